//! # Common Types
//!
//! This module contains the common types used throughout the application for
//! representing prompts, their daily performance and the derived chart data.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StatsError};

/// Read-only view of a `{date, usage, success_rate}` data point.
///
/// Implemented by both raw [`PerformanceRecord`]s and [`AggregatedRecord`]s so
/// the chart formatter can work on a single prompt's history or on the
/// combined series.
pub trait SeriesPoint {
    fn date(&self) -> NaiveDate;
    fn usage(&self) -> u64;
    fn success_rate(&self) -> f64;
}

/// One prompt's activity on one day.
///
/// Records are validated on construction, so a `PerformanceRecord` always
/// carries a finite success rate in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPerformanceRecord", rename_all = "camelCase")]
pub struct PerformanceRecord {
    date: NaiveDate,
    usage: u64,
    success_rate: f64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPerformanceRecord {
    date: NaiveDate,
    usage: u64,
    success_rate: f64,
}

impl TryFrom<RawPerformanceRecord> for PerformanceRecord {
    type Error = StatsError;

    fn try_from(raw: RawPerformanceRecord) -> Result<Self> {
        Self::new(raw.date, raw.usage, raw.success_rate)
    }
}

impl PerformanceRecord {
    /// Create a record, rejecting success rates outside `[0, 1]`.
    pub fn new(date: NaiveDate, usage: u64, success_rate: f64) -> Result<Self> {
        validate_rate(success_rate)?;
        Ok(Self {
            date,
            usage,
            success_rate,
        })
    }

    /// Create a record, pulling the success rate into `[0, 1]` instead of
    /// rejecting it. Non-finite rates become 0.
    pub fn clamped(date: NaiveDate, usage: u64, success_rate: f64) -> Self {
        let success_rate = if success_rate.is_finite() {
            success_rate.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            date,
            usage,
            success_rate,
        }
    }
}

impl SeriesPoint for PerformanceRecord {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn usage(&self) -> u64 {
        self.usage
    }

    fn success_rate(&self) -> f64 {
        self.success_rate
    }
}

pub(crate) fn validate_rate(success_rate: f64) -> Result<()> {
    if !success_rate.is_finite() {
        return Err(StatsError::InvalidInput {
            field: "successRate",
            value: success_rate.to_string(),
            reason: "must be a finite number",
        });
    }
    if !(0.0..=1.0).contains(&success_rate) {
        return Err(StatsError::InvalidInput {
            field: "successRate",
            value: success_rate.to_string(),
            reason: "must lie within [0, 1]",
        });
    }
    Ok(())
}

/// Combined performance of every prompt reporting on a given day.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedRecord {
    /// Calendar day of the observation
    pub date: NaiveDate,
    /// Sum of usage across all prompts reporting on this day
    pub usage: u64,
    /// Mean success rate across all prompts reporting on this day
    pub success_rate: f64,
}

impl SeriesPoint for AggregatedRecord {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn usage(&self) -> u64 {
        self.usage
    }

    fn success_rate(&self) -> f64 {
        self.success_rate
    }
}

/// A data point ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayRecord {
    /// Short label such as `"Jan 5"`
    pub date: String,
    pub usage: u64,
    pub success_rate: f64,
    /// `success_rate * 100` with one decimal digit, e.g. `"87.3"`
    pub success_percent: String,
}

/// Name of a pie chart slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PieBucketName {
    Successful,
    Failed,
}

impl fmt::Display for PieBucketName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PieBucketName::Successful => write!(f, "Successful"),
            PieBucketName::Failed => write!(f, "Failed"),
        }
    }
}

/// One slice of the success/failure pie chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieBucket {
    pub name: PieBucketName,
    pub value: f64,
}

/// Visual style of the performance chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Line,
    #[default]
    Area,
    Bar,
    Pie,
}

impl ChartType {
    pub const ALL: [ChartType; 4] = [
        ChartType::Line,
        ChartType::Area,
        ChartType::Bar,
        ChartType::Pie,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ChartType::Line => "Line",
            ChartType::Area => "Area",
            ChartType::Bar => "Bar",
            ChartType::Pie => "Pie",
        }
    }
}

/// Stable identifier of a prompt.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PromptId(pub String);

impl From<&str> for PromptId {
    fn from(value: &str) -> Self {
        PromptId(value.to_string())
    }
}

impl fmt::Display for PromptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Icon shown next to a prompt. The UI decides how each variant is drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PromptIcon {
    #[default]
    Sparkles,
    FileText,
    MessageSquare,
    Bot,
    Brain,
    Code,
    Mail,
    Image,
}

/// A prompt template with its counters and daily performance history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prompt {
    pub id: PromptId,
    pub name: String,
    pub description: String,
    /// Template text, with placeholders such as `[product_name]`
    pub content: String,
    pub category: String,
    #[serde(default)]
    pub icon: PromptIcon,
    /// Cumulative number of uses
    pub usage: u64,
    /// Cumulative number of successful uses
    pub success: u64,
    pub created_at: NaiveDate,
    pub updated_at: NaiveDate,
    /// Daily performance, oldest first
    pub performance: Vec<PerformanceRecord>,
}

impl Prompt {
    /// Check the invariants that the type system does not enforce.
    pub fn validate(&self) -> Result<()> {
        if self.success > self.usage {
            return Err(StatsError::InvalidInput {
                field: "success",
                value: self.success.to_string(),
                reason: "cannot exceed usage",
            });
        }
        Ok(())
    }
}

/// Owner of the prompt library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub plan: String,
}

impl UserInfo {
    /// Initials used when no avatar is available, e.g. `"Alex Morgan"` -> `"AM"`.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_record_accepts_bounds() {
        assert!(PerformanceRecord::new(day(1), 10, 0.0).is_ok());
        assert!(PerformanceRecord::new(day(1), 10, 1.0).is_ok());
    }

    #[test]
    fn test_record_rejects_out_of_range_rate() {
        for rate in [-0.01, 1.01, f64::NAN, f64::INFINITY] {
            let err = PerformanceRecord::new(day(1), 10, rate).unwrap_err();
            assert!(matches!(
                err,
                StatsError::InvalidInput {
                    field: "successRate",
                    ..
                }
            ));
        }
    }

    #[test]
    fn test_clamped_record() {
        assert_eq!(PerformanceRecord::clamped(day(1), 1, 1.7).success_rate(), 1.0);
        assert_eq!(PerformanceRecord::clamped(day(1), 1, -2.0).success_rate(), 0.0);
        assert_eq!(PerformanceRecord::clamped(day(1), 1, f64::NAN).success_rate(), 0.0);
        assert_eq!(PerformanceRecord::clamped(day(1), 1, 0.42).success_rate(), 0.42);
    }

    #[test]
    fn test_record_deserialize_validates() {
        let ok: PerformanceRecord =
            serde_json::from_str(r#"{"date":"2024-01-01","usage":100,"successRate":0.9}"#)
                .unwrap();
        assert_eq!(ok, PerformanceRecord::new(day(1), 100, 0.9).unwrap());

        let bad_rate = serde_json::from_str::<PerformanceRecord>(
            r#"{"date":"2024-01-01","usage":100,"successRate":1.5}"#,
        );
        assert!(bad_rate.is_err());

        let negative_usage = serde_json::from_str::<PerformanceRecord>(
            r#"{"date":"2024-01-01","usage":-3,"successRate":0.5}"#,
        );
        assert!(negative_usage.is_err());
    }

    #[test]
    fn test_chart_type_default_is_area() {
        assert_eq!(ChartType::default(), ChartType::Area);
        assert_eq!(
            serde_json::to_string(&ChartType::Pie).unwrap(),
            "\"pie\"".to_string()
        );
    }

    #[test]
    fn test_initials() {
        let user = UserInfo {
            name: "Alex Morgan".to_string(),
            email: "alex@example.com".to_string(),
            plan: "Pro".to_string(),
        };
        assert_eq!(user.initials(), "AM");
    }
}
