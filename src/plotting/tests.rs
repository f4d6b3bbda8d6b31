use std::sync::Arc;

use chrono::NaiveDate;
use plotters::style::{RGBAColor, RGBColor};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

use super::*;
use crate::analysis::{aggregate_performance, format_chart_data, process_pie_data};
use crate::data::{MockProvider, PromptProvider};
use crate::types::{AggregatedRecord, ChartType, DisplayRecord, PieBucket, PieBucketName};

fn setup_test_data() -> (Vec<DisplayRecord>, [PieBucket; 2]) {
    let provider = MockProvider::new();
    let combined = aggregate_performance(provider.prompts());
    (format_chart_data(&combined), process_pie_data(&combined))
}

fn small_style() -> ChartStyle {
    ChartStyle::with_size(320, 200)
}

#[test]
fn test_render_every_chart_type() {
    let (series, pie) = setup_test_data();
    let style = small_style();

    for chart_type in ChartType::ALL {
        let chart = render_chart(&series, &pie, chart_type, &style).unwrap();
        assert_eq!(chart.width, 320);
        assert_eq!(chart.height, 200);
        assert_eq!(chart.rgb.len(), 320 * 200 * 3);
        // Something other than the background was drawn
        let first = &chart.rgb[..3];
        assert!(chart.rgb.chunks(3).any(|px| px != first));
    }
}

#[test]
fn test_cache_reuses_render() {
    let (series, pie) = setup_test_data();
    let style = ChartStyle::with_size(300, 180);

    let first = render_chart(&series, &pie, ChartType::Bar, &style).unwrap();
    let second = render_chart(&series, &pie, ChartType::Bar, &style).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_empty_plot() {
    let pie = [
        PieBucket {
            name: PieBucketName::Successful,
            value: 0.0,
        },
        PieBucket {
            name: PieBucketName::Failed,
            value: 0.0,
        },
    ];
    let style = ChartStyle::with_size(240, 160);

    // Should handle empty data gracefully
    for chart_type in ChartType::ALL {
        assert!(render_chart(&[], &pie, chart_type, &style).is_ok());
    }
}

#[test]
fn test_save_png() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("chart.png");
    let (series, pie) = setup_test_data();

    let chart = render_chart(&series, &pie, ChartType::Area, &small_style()).unwrap();
    chart.save(&path).unwrap();

    let metadata = std::fs::metadata(&path).unwrap();
    assert!(metadata.len() > 0);
}

#[test]
fn test_zero_capacity_is_ignored() {
    set_cache_capacity(0);
    let (series, pie) = setup_test_data();
    assert!(render_chart(&series, &pie, ChartType::Line, &small_style()).is_ok());
}

#[test]
fn test_axis_value_format() {
    assert_eq!(format_axis_value(950.0), "950");
    assert_eq!(format_axis_value(1_500.0), "1.5K");
    assert_eq!(format_axis_value(2_300_000.0), "2.3M");
}

fn pixel(chart: &RenderedChart, x: u32, y: u32) -> (u8, u8, u8) {
    let idx = ((y * chart.width + x) * 3) as usize;
    (chart.rgb[idx], chart.rgb[idx + 1], chart.rgb[idx + 2])
}

fn pie_of(successful: f64, failed: f64) -> [PieBucket; 2] {
    [
        PieBucket {
            name: PieBucketName::Successful,
            value: successful,
        },
        PieBucket {
            name: PieBucketName::Failed,
            value: failed,
        },
    ]
}

#[test]
fn test_default_theme_colors() {
    let theme = ChartTheme::default();
    let RGBColor(r, g, b) = theme.success_color;
    assert_eq!((r, g, b), (16, 185, 129));
    let RGBColor(r, g, b) = theme.failure_color;
    assert_eq!((r, g, b), (248, 113, 113));
}

#[test]
fn test_pie_slices_use_outcome_colors() {
    let style = ChartStyle::with_size(320, 200);
    // Point halfway down the radius, below the pie center
    let (x, y) = (160, 110 + 35);

    let mostly_ok = render_chart(&[], &pie_of(99.0, 1.0), ChartType::Pie, &style).unwrap();
    let (r, g, b) = pixel(&mostly_ok, x, y);
    assert!(g > r && g > b, "expected green, got {:?}", (r, g, b));

    let mostly_failed = render_chart(&[], &pie_of(1.0, 99.0), ChartType::Pie, &style).unwrap();
    let (r, g, b) = pixel(&mostly_failed, x, y);
    assert!(r > g && r > b, "expected red, got {:?}", (r, g, b));
}

#[test]
fn test_bar_chart_draws_success_bars() {
    let combined: Vec<AggregatedRecord> = (1..=10)
        .map(|d| AggregatedRecord {
            date: NaiveDate::from_ymd_opt(2024, 2, d).unwrap(),
            usage: 100,
            success_rate: 1.0,
        })
        .collect();
    let series = format_chart_data(&combined);
    let pie = process_pie_data(&combined);
    let style = ChartStyle::with_size(320, 200);

    let green_pixels = |chart: &RenderedChart| {
        chart
            .rgb
            .chunks(3)
            .filter(|px| {
                let (r, g, b) = (i32::from(px[0]), i32::from(px[1]), i32::from(px[2]));
                g > r + 40 && g > b + 20
            })
            .count()
    };

    let bar = render_chart(&series, &pie, ChartType::Bar, &style).unwrap();
    let line = render_chart(&series, &pie, ChartType::Line, &style).unwrap();
    let total = (style.width * style.height) as usize;

    assert!(green_pixels(&bar) * 20 > total);
    assert!(green_pixels(&bar) > green_pixels(&line) * 3);
}

#[test]
fn test_style_change_is_not_served_from_cache() {
    let (series, pie) = setup_test_data();
    let style = ChartStyle::with_size(280, 170);
    let mut light = style.clone();
    light.theme.background_color = RGBAColor(255, 255, 255, 1.0);

    let dark_chart = render_chart(&series, &pie, ChartType::Line, &style).unwrap();
    let light_chart = render_chart(&series, &pie, ChartType::Line, &light).unwrap();
    assert!(!Arc::ptr_eq(&dark_chart, &light_chart));
    assert!(dark_chart.rgb != light_chart.rgb);

    let mut thick = style.clone();
    thick.line_width = 5;
    let thick_chart = render_chart(&series, &pie, ChartType::Line, &thick).unwrap();
    assert!(dark_chart.rgb != thick_chart.rgb);
}
