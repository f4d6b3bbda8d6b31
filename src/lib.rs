//! # Prompt Statistics Dashboard Library
//!
//! `promptstats` tracks how prompt templates perform. It combines each
//! prompt's daily usage and success rate into an overall series, prepares
//! that data for charts, and renders a desktop dashboard on top of it.
//!
//! ## Features
//!
//! - Aggregate per-prompt daily performance into one time series
//! - Format series for display (short date labels, percentages)
//! - Split usage into successful and failed volume for pie charts
//! - Search and filter prompts by name, description and category
//! - Line, area, bar and pie charts rendered with `plotters`
//! - Pluggable data providers (built-in demo data or a JSON file)
//!
//! ## Example
//!
//! ```
//! use promptstats::analysis::{aggregate_performance, format_chart_data, process_pie_data};
//! use promptstats::data::{MockProvider, PromptProvider};
//!
//! let provider = MockProvider::new();
//! let combined = aggregate_performance(provider.prompts());
//! let display = format_chart_data(&combined);
//! let [successful, failed] = process_pie_data(&combined);
//!
//! assert_eq!(display.len(), combined.len());
//! assert!(successful.value > failed.value);
//! ```

pub mod analysis;
pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod plotting;
pub mod types;

// Re-export main types for convenience
pub use app::App as PromptStatsApp;
pub use config::Config;
pub use error::{Result, StatsError};
pub use types::{AggregatedRecord, ChartType, DisplayRecord, PerformanceRecord, PieBucket, Prompt};
