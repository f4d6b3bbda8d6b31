use std::collections::BTreeMap;

use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::types::{AggregatedRecord, PerformanceRecord, Prompt, SeriesPoint};

/// How success rates from different prompts are combined for a single day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AveragingMode {
    /// Every reporting prompt counts equally, regardless of its volume.
    #[default]
    Unweighted,
    /// Each prompt's rate is weighted by its usage on that day.
    UsageWeighted,
}

#[derive(Default)]
struct DayTotals {
    usage: u64,
    rate_sum: f64,
    weighted_success: f64,
    count: usize,
}

impl DayTotals {
    fn add(&mut self, record: &PerformanceRecord) {
        self.usage = self.usage.saturating_add(record.usage());
        self.rate_sum += record.success_rate();
        self.weighted_success += record.usage() as f64 * record.success_rate();
        self.count += 1;
    }

    fn success_rate(&self, mode: AveragingMode) -> f64 {
        // An entry only exists once a record has been added to it.
        debug_assert!(self.count > 0);
        let mean = self.rate_sum / self.count as f64;
        match mode {
            AveragingMode::Unweighted => mean,
            AveragingMode::UsageWeighted if self.usage == 0 => mean,
            AveragingMode::UsageWeighted => self.weighted_success / self.usage as f64,
        }
    }
}

/// Combine the daily performance of every prompt into one overall series.
///
/// Usage is summed per day and success rates are averaged over the prompts
/// reporting on that day. The result holds one entry per distinct date,
/// oldest first.
pub fn aggregate_performance(prompts: &[Prompt]) -> Vec<AggregatedRecord> {
    aggregate_performance_with(prompts, AveragingMode::Unweighted)
}

/// Same as [`aggregate_performance`] with an explicit averaging mode.
pub fn aggregate_performance_with(
    prompts: &[Prompt],
    mode: AveragingMode,
) -> Vec<AggregatedRecord> {
    aggregate_series(prompts.iter().map(|p| p.performance.as_slice()), mode)
}

/// Aggregate any number of per-prompt series.
pub fn aggregate_series<'a, I>(series: I, mode: AveragingMode) -> Vec<AggregatedRecord>
where
    I: IntoIterator<Item = &'a [PerformanceRecord]>,
{
    let mut days: BTreeMap<NaiveDate, DayTotals> = BTreeMap::new();
    let mut record_count = 0usize;

    for records in series {
        for record in records {
            days.entry(record.date()).or_default().add(record);
            record_count += 1;
        }
    }

    debug!(
        "Aggregated {} records into {} days ({:?})",
        record_count,
        days.len(),
        mode
    );

    // BTreeMap iterates in calendar order
    days.into_iter()
        .map(|(date, totals)| AggregatedRecord {
            date,
            usage: totals.usage,
            success_rate: totals.success_rate(mode),
        })
        .collect()
}
