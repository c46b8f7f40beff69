//! Identity transform for feature types whose raw record is already flat.

use crate::feature::{FeatureValue, FeatureVector};
use crate::transform::{FeatureTransform, TransformError};

#[derive(Debug, Clone)]
pub struct IdentityTransform {
    feature_type: String,
    description: String,
}

impl IdentityTransform {
    pub fn new(feature_type: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            feature_type: feature_type.into(),
            description: description.into(),
        }
    }
}

impl FeatureTransform for IdentityTransform {
    fn feature_type(&self) -> &str {
        &self.feature_type
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn transform(&self, raw: &serde_json::Value) -> Result<FeatureVector, TransformError> {
        let object = raw.as_object().ok_or_else(|| {
            TransformError::InvalidRecord("expected a flat object of numbers".to_string())
        })?;

        object
            .iter()
            .map(|(key, value)| {
                FeatureValue::from_json(value)
                    .map(|v| (key.clone(), v))
                    .ok_or_else(|| TransformError::NonNumeric(key.clone()))
            })
            .collect()
    }
}
