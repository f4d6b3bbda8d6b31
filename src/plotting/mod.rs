//! # Chart Rendering
//!
//! Draws formatted performance data with `plotters` into an in-memory RGB
//! buffer that the UI uploads as a texture.

mod chart;
pub mod styles;

#[cfg(test)]
mod tests;

pub use chart::{format_axis_value, render_chart, set_cache_capacity, RenderedChart};
pub use styles::{ChartStyle, ChartTheme};
