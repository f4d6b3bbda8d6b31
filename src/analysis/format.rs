use chrono::NaiveDate;
use log::debug;

use crate::types::{DisplayRecord, PieBucket, PieBucketName, SeriesPoint};

/// Short axis label, e.g. `"Jan 5"`.
pub fn short_date_label(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

/// Long label for headers and cards, e.g. `"January 5, 2024"`.
pub fn long_date_label(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Success rate in percent with a single decimal digit.
///
/// Ties round away from zero, so `0.8125` reads `"81.3"`.
pub fn success_percent(rate: f64) -> String {
    format!("{:.1}", (rate * 1000.0).round() / 10.0)
}

/// Prepare a series for rendering, keeping its order.
pub fn format_chart_data<P: SeriesPoint>(data: &[P]) -> Vec<DisplayRecord> {
    debug!("Formatting {} chart points", data.len());
    data.iter()
        .map(|point| DisplayRecord {
            date: short_date_label(point.date()),
            usage: point.usage(),
            success_rate: point.success_rate(),
            success_percent: success_percent(point.success_rate()),
        })
        .collect()
}

/// Split total usage into successful and failed volume for the pie chart.
///
/// The buckets are always returned as `[Successful, Failed]`.
pub fn process_pie_data<P: SeriesPoint>(data: &[P]) -> [PieBucket; 2] {
    let (successful, failed) = data.iter().fold((0.0, 0.0), |(ok, failed), point| {
        let usage = point.usage() as f64;
        let rate = point.success_rate();
        (ok + usage * rate, failed + usage * (1.0 - rate))
    });

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
