//! # Configuration
//!
//! Settings are read from a JSON file. The file named by the
//! `PROMPTSTATS_CONFIG` environment variable wins; otherwise
//! `<config dir>/promptstats/config.json` is used when it exists. Missing
//! fields fall back to their defaults.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::analysis::AveragingMode;
use crate::error::{Result, StatsError};
use crate::types::ChartType;

/// Environment variable pointing at an explicit config file.
pub const CONFIG_ENV: &str = "PROMPTSTATS_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window_width: f32,
    pub window_height: f32,
    /// Chart style shown when the dashboard opens
    pub default_chart_type: ChartType,
    /// How daily success rates are combined across prompts
    pub averaging: AveragingMode,
    /// Dataset to load instead of the built-in demo data
    pub data_file: Option<PathBuf>,
    pub plot_width: u32,
    pub plot_height: u32,
    /// Number of rendered charts kept in memory
    pub plot_cache_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_width: 1200.0,
            window_height: 800.0,
            default_chart_type: ChartType::default(),
            averaging: AveragingMode::default(),
            data_file: None,
            plot_width: 760,
            plot_height: 340,
            plot_cache_size: 10,
        }
    }
}

impl Config {
    /// Load the configuration from the usual locations, or use defaults.
    pub fn load() -> Result<Self> {
        match locate(std::env::var_os(CONFIG_ENV).map(PathBuf::from)) {
            Some(path) => Self::from_path(&path),
            None => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Read and validate a config file.
    pub fn from_path(path: &Path) -> Result<Self> {
        info!("Reading configuration from {}", path.display());
        let raw = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let positive = |v: f32| v.is_finite() && v > 0.0;
        if !positive(self.window_width) || !positive(self.window_height) {
            return Err(StatsError::Config(
                "window dimensions must be positive".to_string(),
            ));
        }
        if self.plot_width == 0 || self.plot_height == 0 {
            return Err(StatsError::Config(
                "plot dimensions must be non-zero".to_string(),
            ));
        }
        if self.plot_cache_size == 0 {
            return Err(StatsError::Config(
                "plot_cache_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Default location, `<config dir>/promptstats/config.json`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("promptstats").join("config.json"))
}

fn locate(explicit: Option<PathBuf>) -> Option<PathBuf> {
    explicit.or_else(|| default_config_path().filter(|path| path.exists()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.default_chart_type, ChartType::Area);
        assert_eq!(config.averaging, AveragingMode::Unweighted);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, r#"{ "default_chart_type": "pie", "plot_cache_size": 3 }"#).unwrap();

        let config = Config::from_path(&path).unwrap();
        assert_eq!(config.default_chart_type, ChartType::Pie);
        assert_eq!(config.plot_cache_size, 3);
        assert_eq!(config.window_width, Config::default().window_width);
    }

    #[test]
    fn test_zero_cache_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, r#"{ "plot_cache_size": 0 }"#).unwrap();

        assert!(matches!(
            Config::from_path(&path),
            Err(StatsError::Config(_))
        ));
    }

    #[test]
    fn test_non_finite_window_is_rejected() {
        for width in [f32::NAN, f32::INFINITY, -1.0, 0.0] {
            let config = Config {
                window_width: width,
                ..Config::default()
            };
            assert!(matches!(config.validate(), Err(StatsError::Config(_))));
        }
    }

    #[test]
    fn test_explicit_path_wins() {
        let explicit = PathBuf::from("/tmp/custom.json");
        assert_eq!(locate(Some(explicit.clone())), Some(explicit));
    }
}
