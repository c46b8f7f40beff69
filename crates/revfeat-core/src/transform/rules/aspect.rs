//! Aspect coverage.
//!
//! Fine-grained aspect labels look like `<category>_<polarity>`; only the
//! coarse category before the first `_` is counted. Some categories are
//! synonyms of another and are merged before counting.

use std::collections::{BTreeMap, BTreeSet};

use serde::Deserialize;

use super::categorical::featurize_labels;
use crate::feature::{FeatureValue, FeatureVector};
use crate::transform::{parse_record, FeatureTransform, TransformError, ASPECT};

/// Key for the fraction of known coarse categories observed
pub const ASPECT_COVERAGE_KEY: &str = "aspect_coverage";

/// Coarse category of a raw aspect label
pub fn coarse_category(label: &str) -> &str {
    label.split_once('_').map_or(label, |(head, _)| head)
}

#[derive(Debug, Deserialize)]
struct AspectRecord {
    aspect_spans: Vec<(String, serde_json::Value)>,
}

/// Aspect labels with spans
#[derive(Debug, Clone)]
pub struct AspectTransform {
    category_count: usize,
    merges: BTreeMap<String, String>,
}

impl AspectTransform {
    /// `category_count` is the number of known coarse categories; `merges`
    /// maps a category onto the one it is a synonym of.
    pub fn new(category_count: usize, merges: BTreeMap<String, String>) -> Self {
        Self {
            category_count,
            merges,
        }
    }

    fn canonical<'a>(&'a self, label: &'a str) -> &'a str {
        let coarse = coarse_category(label);
        self.merges.get(coarse).map_or(coarse, String::as_str)
    }
}

impl FeatureTransform for AspectTransform {
    fn feature_type(&self) -> &str {
        ASPECT
    }

    fn description(&self) -> &str {
        "Coarse aspect counts, frequencies and coverage"
    }

    fn transform(&self, raw: &serde_json::Value) -> Result<FeatureVector, TransformError> {
        let record: AspectRecord = parse_record(raw)?;
        let categories: Vec<&str> = record
            .aspect_spans
            .iter()
            .map(|(label, _span)| self.canonical(label))
            .collect();

        let mut features = featurize_labels(&categories, "aspect_spans")?;

        // Coverage is relative to the known categories, not a probability
        let distinct: BTreeSet<&str> = categories.iter().copied().collect();
        features.insert(
            ASPECT_COVERAGE_KEY.to_string(),
            FeatureValue::Float(distinct.len() as f64 / self.category_count as f64),
        );
        Ok(features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TransformConfig;
    use serde_json::json;

    fn transform() -> AspectTransform {
        let config = TransformConfig::default();
        AspectTransform::new(config.aspect_categories, config.aspect_merges)
    }

    #[test]
    fn test_coarse_category() {
        assert_eq!(coarse_category("clarity_positive"), "clarity");
        assert_eq!(coarse_category("meaningful_comparison_negative"), "meaningful");
        assert_eq!(coarse_category("summary"), "summary");
    }

    #[test]
    fn test_meaningful_counts_as_comparison() {
        let out = transform()
            .transform(&json!({
                "aspect_spans": [
                    ["meaningful_x", [0, 10]],
                    ["comparison_y", [11, 20]],
                    ["clarity_positive", [21, 30]]
                ]
            }))
            .unwrap();

        assert_eq!(out["count_comparison"], FeatureValue::Integer(2));
        assert_eq!(out["count_clarity"], FeatureValue::Integer(1));
        assert!(!out.contains_key("count_meaningful"));
        assert!((out["norm_comparison"].as_f64() - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(out[ASPECT_COVERAGE_KEY].as_f64(), 2.0 / 8.0);
    }

    #[test]
    fn test_span_shape_is_opaque() {
        let out = transform()
            .transform(&json!({"aspect_spans": [["soundness_negative", "the proof of lemma 2"]]}))
            .unwrap();
        assert_eq!(out["count_soundness"], FeatureValue::Integer(1));
        assert_eq!(out[ASPECT_COVERAGE_KEY].as_f64(), 0.125);
    }

    #[test]
    fn test_empty_spans_rejected() {
        let err = transform()
            .transform(&json!({"aspect_spans": []}))
            .unwrap_err();
        assert_eq!(err, TransformError::EmptySequence("aspect_spans".to_string()));
    }
}
