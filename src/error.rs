use thiserror::Error;

/// Errors produced by the statistics library.
#[derive(Debug, Error)]
pub enum StatsError {
    #[error("invalid {field} value {value}: {reason}")]
    InvalidInput {
        field: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to render chart: {0}")]
    Plot(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, StatsError>;
