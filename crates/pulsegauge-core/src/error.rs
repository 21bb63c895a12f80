//! Shared error type across pulsegauge crates.

use thiserror::Error;

/// Shared result type.
pub type Result<T> = std::result::Result<T, PulseError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum PulseError {
    #[error("metric already registered: {0}")]
    DuplicateMetric(String),
    #[error("invalid metric name: {0:?}")]
    InvalidMetricName(String),
    #[error("invalid label name: {0:?}")]
    InvalidLabelName(String),
    #[error("metric {metric} expects {expected} label values, got {got}")]
    LabelCardinality {
        metric: String,
        expected: usize,
        got: usize,
    },
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl PulseError {
    /// Stable machine-readable code, used in logs and tests.
    pub fn code(&self) -> &'static str {
        match self {
            PulseError::DuplicateMetric(_) => "DUPLICATE_METRIC",
            PulseError::InvalidMetricName(_) => "INVALID_METRIC_NAME",
            PulseError::InvalidLabelName(_) => "INVALID_LABEL_NAME",
            PulseError::LabelCardinality { .. } => "LABEL_CARDINALITY",
            PulseError::BadConfig(_) => "BAD_CONFIG",
            PulseError::Internal(_) => "INTERNAL",
        }
    }
}
