//! Adjudicated gold annotations

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CorrelationError, Result};
use crate::feature::ReviewId;
use crate::run_dir::read_json;

/// One adjudicated review
///
/// Fields other than `review_id` and `gold_annotation` are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoldRecord {
    pub review_id: ReviewId,
    #[serde(default)]
    pub gold_annotation: Option<serde_json::Map<String, serde_json::Value>>,
}

impl GoldRecord {
    /// Numeric value of `field`, or `None` when the review has no annotation
    /// or the field is absent or null
    pub fn target_value(&self, field: &str) -> std::result::Result<Option<f64>, CorrelationError> {
        let Some(annotation) = &self.gold_annotation else {
            return Ok(None);
        };

        match annotation.get(field) {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(value) => value
                .as_f64()
                .map(Some)
                .ok_or_else(|| CorrelationError::NonNumericTarget {
                    review_id: self.review_id.clone(),
                    field: field.to_string(),
                }),
        }
    }
}

/// Load the adjudicated annotation file (a JSON array of records)
pub fn load_gold_annotations(path: &Path) -> Result<Vec<GoldRecord>> {
    read_json(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> GoldRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_target_value_present() {
        let r = record(json!({"review_id": "r1", "gold_annotation": {"quality": 4}}));
        assert_eq!(r.target_value("quality"), Ok(Some(4.0)));
    }

    #[test]
    fn test_target_value_absent_cases() {
        let null_annotation = record(json!({"review_id": "r1", "gold_annotation": null}));
        let missing_annotation = record(json!({"review_id": "r2", "text": "..."}));
        let null_field = record(json!({"review_id": "r3", "gold_annotation": {"quality": null}}));
        let other_field = record(json!({"review_id": "r4", "gold_annotation": {"tone": 1}}));

        for r in [null_annotation, missing_annotation, null_field, other_field] {
            assert_eq!(r.target_value("quality"), Ok(None), "{}", r.review_id);
        }
    }

    #[test]
    fn test_target_value_non_numeric() {
        let r = record(json!({"review_id": "r1", "gold_annotation": {"quality": "good"}}));
        assert_eq!(
            r.target_value("quality"),
            Err(CorrelationError::NonNumericTarget {
                review_id: "r1".to_string(),
                field: "quality".to_string(),
            })
        );
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_gold_annotations(&dir.path().join("gold.json")).unwrap_err();
        assert!(matches!(err, crate::RevfeatError::MissingInput(_)));
    }
}
