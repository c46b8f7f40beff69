//! Configuration for revfeat-core
//!
//! Centralized configuration for a pipeline run: which feature types are
//! consolidated and in what order, the constants of the transform rules, and
//! the correlation statistic.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use revfeat_stats::CorrelationMethod;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result, RevfeatError};
use crate::transform::DEFAULT_FEATURE_TYPES;

/// System-wide configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevfeatConfig {
    /// Consolidation settings
    pub consolidate: ConsolidateConfig,
    /// Transform rule parameters
    pub transform: TransformConfig,
    /// Correlation settings
    pub correlate: CorrelateConfig,
}

/// Consolidation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsolidateConfig {
    /// Feature types to merge, in processing order
    pub feature_types: Vec<String>,
}

impl Default for ConsolidateConfig {
    fn default() -> Self {
        Self {
            feature_types: DEFAULT_FEATURE_TYPES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Transform rule parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    /// Scores strictly above this count towards `ratio_specificity`
    pub specificity_threshold: f64,
    /// Number of known coarse aspect categories (denominator of `aspect_coverage`)
    pub aspect_categories: usize,
    /// Coarse aspect categories merged into another before counting
    pub aspect_merges: BTreeMap<String, String>,
    /// Decimal digits kept in `combined_score`
    pub combined_score_decimals: u32,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            specificity_threshold: 0.55,
            aspect_categories: 8,
            aspect_merges: BTreeMap::from([("meaningful".to_string(), "comparison".to_string())]),
            combined_score_decimals: 5,
        }
    }
}

/// Correlation configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrelateConfig {
    /// Statistic computed per feature
    pub method: CorrelationMethod,
    /// Fail when a labelled review's feature keys differ from the schema
    /// review's, instead of logging a warning
    pub strict_schema: bool,
}

impl RevfeatConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> std::result::Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> std::result::Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> std::result::Result<Self, ConfigError> {
        Ok(serde_json::from_str(json_str)?)
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> std::result::Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load and validate a configuration file (`.json`, otherwise TOML)
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(RevfeatError::MissingInput(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path)?;

        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&text)?,
            _ => Self::from_toml(&text)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        let types = &self.consolidate.feature_types;
        if types.is_empty() {
            return Err(ConfigError::InvalidValue(
                "consolidate.feature_types must not be empty".to_string(),
            ));
        }
        let mut seen = BTreeSet::new();
        if let Some(dup) = types.iter().find(|t| !seen.insert(t.as_str())) {
            return Err(ConfigError::InvalidValue(format!(
                "feature type {dup} listed more than once"
            )));
        }

        let t = &self.transform;
        if !t.specificity_threshold.is_finite() {
            return Err(ConfigError::OutOfRange(
                "specificity_threshold must be finite".to_string(),
            ));
        }

        if t.aspect_categories == 0 {
            return Err(ConfigError::OutOfRange(
                "aspect_categories must be positive".to_string(),
            ));
        }

        // f64 carries about 15 significant decimal digits
        if t.combined_score_decimals > 15 {
            return Err(ConfigError::OutOfRange(
                "combined_score_decimals must be at most 15".to_string(),
            ));
        }

        Ok(())
    }
}
