//! Central-tendency summary of a score sequence.

use revfeat_stats::{fraction_above, SummaryStats};
use serde::Deserialize;

use crate::feature::{FeatureValue, FeatureVector};
use crate::transform::{parse_record, FeatureTransform, TransformError, SPECIFICITY};

/// Summarize `values` as `{mean,min,max,median,ratio}_<name>`.
///
/// `ratio_<name>` is the fraction of values strictly above `threshold`.
pub fn central_tendencies(
    values: &[f64],
    name: &str,
    threshold: f64,
    field: &str,
) -> Result<FeatureVector, TransformError> {
    let empty = || TransformError::EmptySequence(field.to_string());
    let stats = SummaryStats::from_data(values).ok_or_else(empty)?;
    let ratio = fraction_above(values, threshold).ok_or_else(empty)?;

    Ok(FeatureVector::from([
        (format!("mean_{name}"), FeatureValue::Float(stats.mean)),
        (format!("min_{name}"), FeatureValue::Float(stats.min)),
        (format!("max_{name}"), FeatureValue::Float(stats.max)),
        (format!("median_{name}"), FeatureValue::Float(stats.median)),
        (format!("ratio_{name}"), FeatureValue::Float(ratio)),
    ]))
}

#[derive(Debug, Deserialize)]
struct SpecificityRecord {
    specificities: Vec<f64>,
}

/// Per-sentence specificity scores summarized by central tendency
#[derive(Debug, Clone)]
pub struct CentralTendencyTransform {
    threshold: f64,
}

impl CentralTendencyTransform {
    /// Specificity summary with the given "specific sentence" threshold
    pub fn specificity(threshold: f64) -> Self {
        Self { threshold }
    }
}

impl FeatureTransform for CentralTendencyTransform {
    fn feature_type(&self) -> &str {
        SPECIFICITY
    }

    fn description(&self) -> &str {
        "Specificity mean, min, max, median and ratio above threshold"
    }

    fn transform(&self, raw: &serde_json::Value) -> Result<FeatureVector, TransformError> {
        let record: SpecificityRecord = parse_record(raw)?;
        central_tendencies(
            &record.specificities,
            SPECIFICITY,
            self.threshold,
            "specificities",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_two_scores() {
        let out = CentralTendencyTransform::specificity(0.55)
            .transform(&json!({"specificities": [0.1, 0.9]}))
            .unwrap();

        assert!((out["mean_specificity"].as_f64() - 0.5).abs() < 1e-12);
        assert_eq!(out["min_specificity"].as_f64(), 0.1);
        assert_eq!(out["max_specificity"].as_f64(), 0.9);
        assert!((out["median_specificity"].as_f64() - 0.5).abs() < 1e-12);
        assert_eq!(out["ratio_specificity"].as_f64(), 0.5);
        assert_eq!(out.len(), 5);
    }

    #[test]
    fn test_threshold_is_strict() {
        let out = central_tendencies(&[0.55, 0.55, 0.7], "specificity", 0.55, "specificities")
            .unwrap();
        assert!((out["ratio_specificity"].as_f64() - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(out["median_specificity"].as_f64(), 0.55);
    }

    #[test]
    fn test_empty_rejected() {
        let err = CentralTendencyTransform::specificity(0.55)
            .transform(&json!({"specificities": []}))
            .unwrap_err();
        assert_eq!(err, TransformError::EmptySequence("specificities".to_string()));
    }

    #[test]
    fn test_integer_scores_accepted() {
        let out = CentralTendencyTransform::specificity(0.55)
            .transform(&json!({"specificities": [1, 0]}))
            .unwrap();
        assert_eq!(out["ratio_specificity"].as_f64(), 0.5);
    }
}
