use std::collections::HashMap;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::PromptProvider;
use crate::error::{Result, StatsError};
use crate::types::{validate_rate, Prompt, SeriesPoint, UserInfo};

/// On-disk shape of a prompt dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub user: UserInfo,
    pub prompts: Vec<Prompt>,
}

/// Provider backed by a JSON file read once at startup.
#[derive(Debug, Clone)]
pub struct JsonFileProvider {
    dataset: Dataset,
}

impl JsonFileProvider {
    /// Read and validate a dataset from `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading prompt dataset from {}", path.display());
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Parse a dataset from a JSON string.
    ///
    /// Out-of-range success rates, `success > usage` and usage totals that
    /// do not fit in a `u64` are reported as [`StatsError::InvalidInput`].
    pub fn from_json(raw: &str) -> Result<Self> {
        let document: Value = serde_json::from_str(raw)?;
        if let Err(e) = check_success_rates(&document) {
            warn!("Rejecting dataset: {}", e);
            return Err(e);
        }

        let dataset: Dataset = serde_json::from_value(document)?;
        for prompt in &dataset.prompts {
            if let Err(e) = prompt.validate() {
                warn!("Rejecting dataset, prompt {} is invalid: {}", prompt.id, e);
                return Err(e);
            }
        }
        if let Err(e) = check_usage_totals(&dataset.prompts) {
            warn!("Rejecting dataset: {}", e);
            return Err(e);
        }

        debug!("Loaded {} prompts", dataset.prompts.len());
        Ok(Self { dataset })
    }
}

// Rate errors surface as InvalidInput, so rows are checked before typed parsing
fn check_success_rates(document: &Value) -> Result<()> {
    let prompts = document
        .get("prompts")
        .and_then(Value::as_array)
        .into_iter()
        .flatten();

    for prompt in prompts {
        let rows = prompt
            .get("performance")
            .and_then(Value::as_array)
            .into_iter()
            .flatten();
        for rate in rows.filter_map(|row| row.get("successRate").and_then(Value::as_f64)) {
            validate_rate(rate)?;
        }
    }
    Ok(())
}

/// Daily and overall usage must be summable without overflow.
fn check_usage_totals(prompts: &[Prompt]) -> Result<()> {
    let overflow = |field: &'static str, value: String| StatsError::InvalidInput {
        field,
        value,
        reason: "total overflows a 64-bit counter",
    };

    let mut total_usage = 0u64;
    let mut total_success = 0u64;
    let mut daily: HashMap<NaiveDate, u64> = HashMap::new();

    for prompt in prompts {
        total_usage = total_usage
            .checked_add(prompt.usage)
            .ok_or_else(|| overflow("usage", prompt.id.to_string()))?;
        total_success = total_success
            .checked_add(prompt.success)
            .ok_or_else(|| overflow("success", prompt.id.to_string()))?;

        for record in &prompt.performance {
            let day = daily.entry(record.date()).or_default();
            *day = day
                .checked_add(record.usage())
                .ok_or_else(|| overflow("performance.usage", record.date().to_string()))?;
        }
    }
    Ok(())
}

impl PromptProvider for JsonFileProvider {
    fn prompts(&self) -> &[Prompt] {
        &self.dataset.prompts
    }

    fn user(&self) -> &UserInfo {
        &self.dataset.user
    }
}
