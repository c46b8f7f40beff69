//! Categorical-list featurization.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::feature::{FeatureValue, FeatureVector};
use crate::transform::{parse_record, FeatureTransform, TransformError, ARGUMENT};

/// Key for the raw count of a label
pub fn count_key(label: &str) -> String {
    format!("count_{label}")
}

/// Key for the length-normalized frequency of a label
pub fn normalized_key(label: &str) -> String {
    format!("norm_{label}")
}

/// Count every distinct label and normalize by sequence length.
///
/// `field` names the source field in error messages. An empty sequence has no
/// frequencies and is rejected.
pub fn featurize_labels<S: AsRef<str>>(
    labels: &[S],
    field: &str,
) -> Result<FeatureVector, TransformError> {
    if labels.is_empty() {
        return Err(TransformError::EmptySequence(field.to_string()));
    }

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for label in labels {
        *counts.entry(label.as_ref()).or_default() += 1;
    }

    let total = labels.len() as f64;
    let mut features = FeatureVector::new();
    for (label, count) in counts {
        features.insert(count_key(label), FeatureValue::from(count));
        features.insert(normalized_key(label), FeatureValue::Float(count as f64 / total));
    }
    Ok(features)
}

#[derive(Debug, Deserialize)]
struct ArgumentRecord {
    argument_labels: Vec<String>,
}

/// Argument-structure labels, one per sentence
#[derive(Debug, Default)]
pub struct ArgumentTransform;

impl ArgumentTransform {
    pub fn new() -> Self {
        Self
    }
}

impl FeatureTransform for ArgumentTransform {
    fn feature_type(&self) -> &str {
        ARGUMENT
    }

    fn description(&self) -> &str {
        "Argument label counts and frequencies"
    }

    fn transform(&self, raw: &serde_json::Value) -> Result<FeatureVector, TransformError> {
        let record: ArgumentRecord = parse_record(raw)?;
        featurize_labels(&record.argument_labels, "argument_labels")
    }
}
