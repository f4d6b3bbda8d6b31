use serde::Serialize;

use crate::types::Prompt;

/// Headline numbers shown at the top of the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OverviewStats {
    pub total_prompts: usize,
    pub total_usage: u64,
    pub total_success: u64,
    /// Fraction of all uses that succeeded, 0 when nothing has been used yet
    pub success_rate: f64,
}

impl OverviewStats {
    pub fn from_prompts(prompts: &[Prompt]) -> Self {
        // Loaded datasets are checked for overflow; saturate for anything else
        let total_usage = prompts.iter().fold(0u64, |acc, p| acc.saturating_add(p.usage));
        let total_success = prompts
            .iter()
            .fold(0u64, |acc, p| acc.saturating_add(p.success));
        let success_rate = if total_usage == 0 {
            0.0
        } else {
            total_success as f64 / total_usage as f64
        };

        Self {
            total_prompts: prompts.len(),
            total_usage,
            total_success,
            success_rate,
        }
    }
}

/// Lifetime success rate of a prompt in percent, `None` for unused prompts.
pub fn prompt_success_rate(prompt: &Prompt) -> Option<f64> {
    if prompt.usage == 0 {
        None
    } else {
        Some(prompt.success as f64 / prompt.usage as f64 * 100.0)
    }
}

/// Qualitative bucket for a success percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuccessRating {
    Excellent,
    Good,
    NeedsImprovement,
}

impl SuccessRating {
    pub fn from_percent(percent: f64) -> Self {
        if percent >= 95.0 {
            SuccessRating::Excellent
        } else if percent >= 90.0 {
            SuccessRating::Good
        } else {
            SuccessRating::NeedsImprovement
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SuccessRating::Excellent => "Excellent",
            SuccessRating::Good => "Good",
            SuccessRating::NeedsImprovement => "Needs Improvement",
        }
    }
}

/// Scale values into a 100x10 view box for a sparkline.
///
/// The lowest value sits at `y = 10` and the highest at `y = 2`; a flat series
/// is drawn along the bottom.
pub fn sparkline_points(values: &[f64]) -> Vec<(f64, f64)> {
    if values.is_empty() {
        return Vec::new();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = if max - min == 0.0 { 1.0 } else { max - min };
    let last = (values.len() - 1).max(1) as f64;

    values
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let x = i as f64 / last * 100.0;
            let y = 10.0 - (value - min) / range * 8.0;
            (x, y)
        })
        .collect()
}

/// Group digits in thousands, e.g. `12345` -> `"12,345"`.
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{MockProvider, PromptProvider};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_overview_totals() {
        let provider = MockProvider::new();
        let prompts = provider.prompts();
        let stats = OverviewStats::from_prompts(prompts);

        assert_eq!(stats.total_prompts, prompts.len());
        assert_eq!(stats.total_usage, prompts.iter().map(|p| p.usage).sum::<u64>());
        assert!(stats.success_rate > 0.0 && stats.success_rate <= 1.0);
    }

    #[test]
    fn test_overview_empty() {
        let stats = OverviewStats::from_prompts(&[]);
        assert_eq!(stats, OverviewStats::default());
    }

    #[test]
    fn test_overview_totals_saturate() {
        let mut prompts = MockProvider::new().prompts()[..2].to_vec();
        for prompt in &mut prompts {
            prompt.usage = u64::MAX / 2 + 1;
            prompt.success = u64::MAX / 2 + 1;
        }

        let stats = OverviewStats::from_prompts(&prompts);
        assert_eq!(stats.total_usage, u64::MAX);
        assert_eq!(stats.total_success, u64::MAX);
        assert_eq!(stats.success_rate, 1.0);
    }

    #[test]
    fn test_unused_prompt_has_no_rate() {
        let mut prompt = MockProvider::new().prompts()[0].clone();
        prompt.usage = 0;
        prompt.success = 0;
        assert_eq!(prompt_success_rate(&prompt), None);
    }

    #[test]
    fn test_rating_tiers() {
        assert_eq!(SuccessRating::from_percent(97.2), SuccessRating::Excellent);
        assert_eq!(SuccessRating::from_percent(95.0), SuccessRating::Excellent);
        assert_eq!(SuccessRating::from_percent(90.0), SuccessRating::Good);
        assert_eq!(SuccessRating::from_percent(89.9), SuccessRating::NeedsImprovement);
        assert_eq!(SuccessRating::NeedsImprovement.label(), "Needs Improvement");
    }

    #[test]
    fn test_sparkline_scaling() {
        let points = sparkline_points(&[80.0, 90.0, 100.0]);
        assert_eq!(points, vec![(0.0, 10.0), (50.0, 6.0), (100.0, 2.0)]);
    }

    #[test]
    fn test_sparkline_flat_and_single() {
        assert_eq!(sparkline_points(&[5.0, 5.0]), vec![(0.0, 10.0), (100.0, 10.0)]);
        assert_eq!(sparkline_points(&[5.0]), vec![(0.0, 10.0)]);
        assert!(sparkline_points(&[]).is_empty());
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(12345), "12,345");
        assert_eq!(format_thousands(1234567), "1,234,567");
    }
}
