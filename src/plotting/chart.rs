use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::num::NonZeroUsize;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, warn};
use lru::LruCache;
use once_cell::sync::Lazy;
use plotters::coord::Shift;
use plotters::element::Pie;
use plotters::prelude::*;

use super::styles::ChartStyle;
use crate::error::{Result, StatsError};
use crate::types::{ChartType, DisplayRecord, PieBucket};

const DEFAULT_CACHE_SIZE: NonZeroUsize = match NonZeroUsize::new(10) {
    Some(size) => size,
    None => NonZeroUsize::MIN,
};

// Rendered charts keyed by what they show
static PLOT_CACHE: Lazy<Mutex<LruCache<PlotCacheKey, Arc<RenderedChart>>>> =
    Lazy::new(|| Mutex::new(LruCache::new(DEFAULT_CACHE_SIZE)));

/// An RGB image of a rendered chart.
#[derive(Debug, PartialEq)]
pub struct RenderedChart {
    pub width: u32,
    pub height: u32,
    /// Row-major RGB pixels, three bytes each
    pub rgb: Vec<u8>,
}

impl RenderedChart {
    /// Write the chart to disk. The format follows the file extension.
    pub fn save(&self, path: &Path) -> Result<()> {
        let image = image::RgbImage::from_raw(self.width, self.height, self.rgb.clone())
            .ok_or_else(|| StatsError::Plot("pixel buffer does not match chart size".to_string()))?;
        image.save(path).map_err(plot_err)
    }
}

#[derive(Hash, Eq, PartialEq)]
struct PlotCacheKey {
    chart_type: ChartType,
    width: u32,
    height: u32,
    data_hash: u64,
}

impl PlotCacheKey {
    fn new(
        series: &[DisplayRecord],
        pie: &[PieBucket; 2],
        chart_type: ChartType,
        style: &ChartStyle,
    ) -> Self {
        let mut hasher = DefaultHasher::new();
        hash_style(style, &mut hasher);
        for record in series {
            record.date.hash(&mut hasher);
            record.usage.hash(&mut hasher);
            record.success_rate.to_bits().hash(&mut hasher);
        }
        for bucket in pie {
            bucket.name.hash(&mut hasher);
            bucket.value.to_bits().hash(&mut hasher);
        }

        Self {
            chart_type,
            width: style.width,
            height: style.height,
            data_hash: hasher.finish(),
        }
    }
}

fn hash_style<H: Hasher>(style: &ChartStyle, hasher: &mut H) {
    (
        style.line_width,
        style.font_size,
        style.caption_size,
        style.margin,
        style.label_area_size,
    )
        .hash(hasher);

    let theme = &style.theme;
    for color in [
        theme.background_color,
        theme.text_color,
        theme.grid_color,
        theme.axis_color,
    ] {
        (color.0, color.1, color.2, color.3.to_bits()).hash(hasher);
    }
    for color in [theme.usage_color, theme.success_color, theme.failure_color] {
        color.hash(hasher);
    }
}

fn plot_err<E: std::fmt::Display>(e: E) -> StatsError {
    StatsError::Plot(e.to_string())
}

fn cache() -> MutexGuard<'static, LruCache<PlotCacheKey, Arc<RenderedChart>>> {
    PLOT_CACHE.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Change how many rendered charts are kept. Zero is ignored.
pub fn set_cache_capacity(capacity: usize) {
    match NonZeroUsize::new(capacity) {
        Some(capacity) => cache().resize(capacity),
        None => warn!("Ignoring plot cache capacity of 0"),
    }
}

/// Render a performance chart, reusing a cached image when the same data was
/// drawn before.
///
/// `series` feeds the line, area and bar views; `pie` feeds the pie view.
pub fn render_chart(
    series: &[DisplayRecord],
    pie: &[PieBucket; 2],
    chart_type: ChartType,
    style: &ChartStyle,
) -> Result<Arc<RenderedChart>> {
    let key = PlotCacheKey::new(series, pie, chart_type, style);

    let cached = cache().get(&key).cloned();
    if let Some(chart) = cached {
        debug!("Plot cache hit for {:?} chart", chart_type);
        return Ok(chart);
    }

    debug!(
        "Rendering {:?} chart with {} points at {}x{}",
        chart_type,
        series.len(),
        style.width,
        style.height
    );
    let chart = Arc::new(draw_chart(series, pie, chart_type, style)?);
    cache().put(key, Arc::clone(&chart));
    Ok(chart)
}

fn draw_chart(
    series: &[DisplayRecord],
    pie: &[PieBucket; 2],
    chart_type: ChartType,
    style: &ChartStyle,
) -> Result<RenderedChart> {
    let mut buffer = vec![0u8; style.width as usize * style.height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (style.width, style.height))
            .into_drawing_area();
        root.fill(&style.theme.background_color).map_err(plot_err)?;

        match chart_type {
            ChartType::Pie => draw_pie(&root, pie, style)?,
            ChartType::Line | ChartType::Area | ChartType::Bar => {
                draw_time_series(&root, series, chart_type, style)?
            }
        }

        root.present().map_err(plot_err)?;
    }

    Ok(RenderedChart {
        width: style.width,
        height: style.height,
        rgb: buffer,
    })
}

/// Usage on the left axis, success percentage on the right one.
fn draw_time_series(
    root: &DrawingArea<BitMapBackend<'_>, Shift>,
    series: &[DisplayRecord],
    chart_type: ChartType,
    style: &ChartStyle,
) -> Result<()> {
    let theme = &style.theme;
    let x_max = series.len().max(1) as f64;
    let y_max = series
        .iter()
        .map(|r| r.usage as f64)
        .fold(0.0, f64::max)
        .max(1.0)
        * 1.1;

    let mut chart = ChartBuilder::on(root)
        .caption(
            "Usage & Success Rate",
            ("sans-serif", style.caption_size)
                .into_font()
                .color(&theme.text_color),
        )
        .margin(style.margin)
        .x_label_area_size(style.label_area_size)
        .y_label_area_size(style.label_area_size)
        .right_y_label_area_size(style.label_area_size)
        .build_cartesian_2d(0f64..x_max, 0f64..y_max)
        .map_err(plot_err)?
        .set_secondary_coord(0f64..x_max, 0f64..100f64);

    let dates: Vec<String> = series.iter().map(|r| r.date.clone()).collect();
    let x_label_formatter = move |x: &f64| {
        let idx = x.floor().max(0.0) as usize;
        dates.get(idx).cloned().unwrap_or_default()
    };

    chart
        .configure_mesh()
        .light_line_style(TRANSPARENT)
        .bold_line_style(theme.grid_color)
        .axis_style(theme.axis_color)
        .label_style(
            ("sans-serif", style.font_size)
                .into_font()
                .color(&theme.text_color),
        )
        .x_labels(series.len().clamp(2, 8))
        .x_label_formatter(&x_label_formatter)
        .y_desc("Usage")
        .y_label_formatter(&|y| format_axis_value(*y))
        .draw()
        .map_err(plot_err)?;

    chart
        .configure_secondary_axes()
        .axis_style(theme.axis_color)
        .label_style(
            ("sans-serif", style.font_size)
                .into_font()
                .color(&theme.text_color),
        )
        .y_desc("Success %")
        .y_label_formatter(&|y| format!("{:.0}%", y))
        .draw()
        .map_err(plot_err)?;

    let usage_color = theme.usage_color;
    let success_color = theme.success_color;
    let usage_points: Vec<(f64, f64)> = series
        .iter()
        .enumerate()
        .map(|(i, r)| (i as f64 + 0.5, r.usage as f64))
        .collect();
    let success_points: Vec<(f64, f64)> = series
        .iter()
        .enumerate()
        .map(|(i, r)| (i as f64 + 0.5, r.success_rate * 100.0))
        .collect();

    match chart_type {
        ChartType::Bar => {
            // Usage and success bars side by side in each day's slot
            chart
                .draw_series(series.iter().enumerate().map(|(i, r)| {
                    let x0 = i as f64 + 0.1;
                    let x1 = i as f64 + 0.5;
                    Rectangle::new([(x0, 0.0), (x1, r.usage as f64)], usage_color.mix(0.7).filled())
                }))
                .map_err(plot_err)?
                .label("Usage")
                .legend(move |(x, y)| {
                    Rectangle::new([(x, y - 5), (x + 20, y + 5)], usage_color.mix(0.7).filled())
                });

            chart
                .draw_secondary_series(series.iter().enumerate().map(|(i, r)| {
                    let x0 = i as f64 + 0.5;
                    let x1 = i as f64 + 0.9;
                    Rectangle::new(
                        [(x0, 0.0), (x1, r.success_rate * 100.0)],
                        success_color.mix(0.7).filled(),
                    )
                }))
                .map_err(plot_err)?
                .label("Success %")
                .legend(move |(x, y)| {
                    Rectangle::new([(x, y - 5), (x + 20, y + 5)], success_color.mix(0.7).filled())
                });
        }
        ChartType::Area => {
            chart
                .draw_series(
                    AreaSeries::new(usage_points, 0.0, usage_color.mix(0.25))
                        .border_style(usage_color.stroke_width(style.line_width)),
                )
                .map_err(plot_err)?
                .label("Usage")
                .legend(move |(x, y)| {
                    Rectangle::new([(x, y - 5), (x + 20, y + 5)], usage_color.mix(0.25).filled())
                });
        }
        _ => {
            chart
                .draw_series(LineSeries::new(
                    usage_points,
                    usage_color.stroke_width(style.line_width),
                ))
                .map_err(plot_err)?
                .label("Usage")
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], usage_color));
        }
    }

    if chart_type != ChartType::Bar {
        chart
            .draw_secondary_series(LineSeries::new(
                success_points,
                success_color.stroke_width(style.line_width),
            ))
            .map_err(plot_err)?
            .label("Success %")
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], success_color));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(theme.background_color)
        .border_style(theme.axis_color)
        .label_font(
            ("sans-serif", style.font_size)
                .into_font()
                .color(&theme.text_color),
        )
        .draw()
        .map_err(plot_err)?;

    Ok(())
}

fn draw_pie(
    root: &DrawingArea<BitMapBackend<'_>, Shift>,
    pie: &[PieBucket; 2],
    style: &ChartStyle,
) -> Result<()> {
    let theme = &style.theme;
    let (width, height) = root.dim_in_pixel();
    let margin = style.margin as i32;

    root.draw(&Text::new(
        "Successful vs. Failed Usage",
        (margin, margin),
        ("sans-serif", style.caption_size)
            .into_font()
            .color(&theme.text_color),
    ))
    .map_err(plot_err)?;

    let center = (width as i32 / 2, height as i32 / 2 + style.caption_size as i32 / 2);
    let label_style = ("sans-serif", style.font_size)
        .into_font()
        .color(&theme.text_color);

    let total: f64 = pie.iter().map(|bucket| bucket.value).sum();
    if total <= 0.0 {
        root.draw(&Text::new("No usage recorded", center, label_style))
            .map_err(plot_err)?;
        return Ok(());
    }

    let radius = (f64::from(width.min(height)) / 2.0
        - f64::from(style.margin)
        - f64::from(style.caption_size))
    .max(10.0);
    let sizes: Vec<f64> = pie.iter().map(|bucket| bucket.value).collect();
    // Buckets always arrive as [Successful, Failed]
    let colors = [theme.success_color, theme.failure_color];
    let labels: Vec<String> = pie
        .iter()
        .map(|bucket| format!("{} ({:.1}%)", bucket.name, bucket.value / total * 100.0))
        .collect();

    let mut slices = Pie::new(&center, &radius, &sizes, &colors, &labels);
    slices.start_angle(-90.0);
    slices.label_style(label_style);
    root.draw(&slices).map_err(plot_err)?;

    Ok(())
}

/// Axis label with K/M suffixes for large numbers.
pub fn format_axis_value(value: f64) -> String {
    if value.abs() >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if value.abs() >= 1_000.0 {
        format!("{:.1}K", value / 1_000.0)
    } else {
        format!("{:.0}", value)
    }
}
