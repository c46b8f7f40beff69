//! Combined score: rounded sum of per-sentence combination scores.

use revfeat_stats::round_to;
use serde::Deserialize;

use crate::feature::{FeatureValue, FeatureVector};
use crate::transform::{parse_record, FeatureTransform, TransformError, COMBINED};

pub const COMBINED_SCORE_KEY: &str = "combined_score";

#[derive(Debug, Deserialize)]
struct CombinedRecord {
    combination_score: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct CombinedScoreTransform {
    decimals: u32,
}

impl CombinedScoreTransform {
    pub fn new(decimals: u32) -> Self {
        Self { decimals }
    }
}

impl FeatureTransform for CombinedScoreTransform {
    fn feature_type(&self) -> &str {
        COMBINED
    }

    fn description(&self) -> &str {
        "Sum of per-sentence combination scores"
    }

    fn transform(&self, raw: &serde_json::Value) -> Result<FeatureVector, TransformError> {
        let record: CombinedRecord = parse_record(raw)?;
        let total: f64 = record.combination_score.iter().sum();
        Ok(FeatureVector::from([(
            COMBINED_SCORE_KEY.to_string(),
            FeatureValue::Float(round_to(total, self.decimals)),
        )]))
    }
}
