//! Error types for revfeat-core

use std::path::PathBuf;

use revfeat_stats::StatsError;
use thiserror::Error;

use crate::transform::TransformError;

/// Result type alias for revfeat operations
pub type Result<T> = std::result::Result<T, RevfeatError>;

/// Main error type for revfeat operations
///
/// Every variant is fatal for the run that raised it: no artifact is written.
#[derive(Error, Debug)]
pub enum RevfeatError {
    /// A required input file or directory does not exist
    #[error("Missing input: {}", .0.display())]
    MissingInput(PathBuf),

    /// An input file exists but is not the expected JSON shape
    #[error("Invalid file {}: {reason}", .path.display())]
    InvalidFile { path: PathBuf, reason: String },

    /// A raw record violates its transform rule
    #[error("Malformed {feature_type} record for review {review_id}: {source}")]
    MalformedRecord {
        feature_type: String,
        review_id: String,
        source: TransformError,
    },

    /// Registry-level transform errors
    #[error("Transform error: {0}")]
    Transform(#[from] TransformError),

    /// Consolidation-related errors
    #[error("Consolidation error: {0}")]
    Consolidate(#[from] ConsolidateError),

    /// Correlation-related errors
    #[error("Correlation error: {0}")]
    Correlation(#[from] CorrelationError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO error
    #[error("IO error: {0}")]
    Io(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Consolidation-specific errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConsolidateError {
    /// No feature types were requested
    #[error("No feature types to consolidate")]
    NoFeatureTypes,

    /// Two feature types produced the same key for one review
    #[error("Feature key {key} from {feature_type} already present for review {review_id}")]
    KeyCollision {
        review_id: String,
        key: String,
        feature_type: String,
    },
}

/// Correlation-specific errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CorrelationError {
    /// The consolidated table has no reviews to take a schema from
    #[error("Consolidated feature table is empty")]
    EmptyTable,

    /// Not enough gold-labelled reviews to correlate
    #[error("Insufficient sample: need at least {needed} labelled reviews, got {actual}")]
    InsufficientSample { needed: usize, actual: usize },

    /// A review's feature keys differ from the representative schema
    #[error("Review {review_id} does not match the feature schema (missing: {missing:?}, extra: {extra:?})")]
    SchemaMismatch {
        review_id: String,
        missing: Vec<String>,
        extra: Vec<String>,
    },

    /// A gold target value is present but not a number
    #[error("Gold field {field} for review {review_id} is not numeric")]
    NonNumericTarget { review_id: String, field: String },

    /// Underlying statistics error
    #[error("Statistics error: {0}")]
    Stats(#[from] StatsError),
}

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Value is out of valid range
    #[error("Value out of range: {0}")]
    OutOfRange(String),

    /// Value is invalid on its own terms
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// Configuration text could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<std::io::Error> for RevfeatError {
    fn from(err: std::io::Error) -> Self {
        RevfeatError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for RevfeatError {
    fn from(err: serde_json::Error) -> Self {
        RevfeatError::Serialization(err.to_string())
    }
}

impl From<StatsError> for RevfeatError {
    fn from(err: StatsError) -> Self {
        match err {
            StatsError::InsufficientSample { needed, actual } => {
                RevfeatError::Correlation(CorrelationError::InsufficientSample { needed, actual })
            }
            other => RevfeatError::Correlation(CorrelationError::Stats(other)),
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}
