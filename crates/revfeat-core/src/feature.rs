//! Feature vectors and the consolidated feature table

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ConsolidateError;

/// Opaque review identifier shared by every file of a run
pub type ReviewId = String;

/// Flat mapping from feature name to value
///
/// Ordered so that serialized tables are byte-for-byte reproducible.
pub type FeatureVector = BTreeMap<String, FeatureValue>;

/// A single numeric feature value
///
/// Counts stay integers on disk; everything else is a float.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Integer(i64),
    Float(f64),
}

impl FeatureValue {
    /// Numeric value as a float
    pub fn as_f64(&self) -> f64 {
        match *self {
            FeatureValue::Integer(v) => v as f64,
            FeatureValue::Float(v) => v,
        }
    }

    /// Convert a JSON value, if it is a number
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        if let Some(v) = value.as_i64() {
            return Some(FeatureValue::Integer(v));
        }
        value.as_f64().map(FeatureValue::Float)
    }
}

impl From<usize> for FeatureValue {
    fn from(v: usize) -> Self {
        FeatureValue::Integer(v as i64)
    }
}

impl From<i64> for FeatureValue {
    fn from(v: i64) -> Self {
        FeatureValue::Integer(v)
    }
}

impl From<f64> for FeatureValue {
    fn from(v: f64) -> Self {
        FeatureValue::Float(v)
    }
}

/// Merged feature vectors across all feature types, keyed by review
///
/// A review missing from one feature type's raw file simply lacks that
/// type's keys; nothing is padded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConsolidatedTable {
    reviews: BTreeMap<ReviewId, FeatureVector>,
}

impl ConsolidatedTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one feature type's vector into a review's record
    ///
    /// Fails without modifying the record if any key is already present.
    pub fn merge(
        &mut self,
        review_id: &str,
        feature_type: &str,
        vector: FeatureVector,
    ) -> Result<(), ConsolidateError> {
        let record = self.reviews.entry(review_id.to_string()).or_default();

        if let Some(key) = vector.keys().find(|k| record.contains_key(*k)) {
            return Err(ConsolidateError::KeyCollision {
                review_id: review_id.to_string(),
                key: key.clone(),
                feature_type: feature_type.to_string(),
            });
        }

        record.extend(vector);
        Ok(())
    }

    /// Replace a review's record outright
    pub fn insert(&mut self, review_id: impl Into<ReviewId>, vector: FeatureVector) {
        self.reviews.insert(review_id.into(), vector);
    }

    /// Get a review's feature vector
    pub fn get(&self, review_id: &str) -> Option<&FeatureVector> {
        self.reviews.get(review_id)
    }

    /// The review used as the feature schema source (first in id order)
    pub fn representative(&self) -> Option<(&ReviewId, &FeatureVector)> {
        self.reviews.iter().next()
    }

    /// Iterate over reviews in id order
    pub fn iter(&self) -> impl Iterator<Item = (&ReviewId, &FeatureVector)> {
        self.reviews.iter()
    }

    /// Number of reviews
    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }
}
