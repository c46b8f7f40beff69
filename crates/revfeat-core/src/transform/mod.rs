//! Feature transforms: raw per-type annotation records to flat numeric vectors.
//!
//! Each feature type has exactly one rule implementing [`FeatureTransform`].
//! Rules are stateless; anything tunable (thresholds, category counts) is fixed
//! when the rule is constructed from [`TransformConfig`](crate::TransformConfig).
//!
//! # Built-in feature types
//!
//! | Type          | Raw record                           | Output keys                          |
//! |---------------|--------------------------------------|--------------------------------------|
//! | `argument`    | `{"argument_labels": [..]}`          | `count_<label>`, `norm_<label>`      |
//! | `aspect`      | `{"aspect_spans": [[label, span]]}`  | as above, plus `aspect_coverage`     |
//! | `politeness`  | flat `{name: number}`                | unchanged                            |
//! | `specificity` | `{"specificities": [..]}`            | `{mean,min,max,median,ratio}_specificity` |
//! | `length`      | flat `{name: number}`                | unchanged                            |
//! | `combined`    | `{"combination_score": [..]}`        | `combined_score`                     |
//!
//! Adding a feature type means registering one more transform; nothing else
//! changes.

pub mod registry;
pub mod rules;

pub use registry::TransformRegistry;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use crate::feature::FeatureVector;

pub const ARGUMENT: &str = "argument";
pub const ASPECT: &str = "aspect";
pub const POLITENESS: &str = "politeness";
pub const SPECIFICITY: &str = "specificity";
pub const LENGTH: &str = "length";
pub const COMBINED: &str = "combined";

/// Default processing order for a run
pub const DEFAULT_FEATURE_TYPES: [&str; 6] =
    [ARGUMENT, ASPECT, POLITENESS, SPECIFICITY, LENGTH, COMBINED];

/// Error type for transform operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransformError {
    #[error("No transform registered for feature type: {0}")]
    NotFound(String),

    #[error("Transform already registered for feature type: {0}")]
    AlreadyRegistered(String),

    #[error("Field '{0}' must be a non-empty sequence")]
    EmptySequence(String),

    #[error("Value for '{0}' is not numeric")]
    NonNumeric(String),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

/// The capability every feature type implements: raw record in, flat numbers out.
pub trait FeatureTransform: Send + Sync {
    /// Feature type identifier (also the raw file prefix)
    fn feature_type(&self) -> &str;

    /// One-line description for listings
    fn description(&self) -> &str;

    /// Transform one review's raw record
    fn transform(&self, raw: &serde_json::Value) -> Result<FeatureVector, TransformError>;
}

/// Deserialize a raw record into a rule's typed view of it
pub(crate) fn parse_record<T: DeserializeOwned>(
    raw: &serde_json::Value,
) -> Result<T, TransformError> {
    T::deserialize(raw).map_err(|e| TransformError::InvalidRecord(e.to_string()))
}
