//! Property-based tests for the transform rules

use proptest::prelude::*;
use revfeat_core::transform::rules::{coarse_category, featurize_labels, ASPECT_COVERAGE_KEY};
use revfeat_core::{FeatureValue, TransformRegistry};
use serde_json::json;

const ASPECTS: [&str; 8] = [
    "clarity",
    "meaningful",
    "comparison",
    "motivation",
    "originality",
    "replicability",
    "soundness",
    "substance",
];

fn label_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z]{1,3}", 1..40)
}

proptest! {
    #[test]
    fn test_norms_sum_to_one(labels in label_strategy()) {
        let features = featurize_labels(&labels, "labels").unwrap();
        let total: f64 = features
            .iter()
            .filter(|(k, _)| k.starts_with("norm_"))
            .map(|(_, v)| v.as_f64())
            .sum();
        prop_assert!((total - 1.0).abs() < 1e-9, "norms summed to {}", total);
    }

    #[test]
    fn test_counts_sum_to_length(labels in label_strategy()) {
        let features = featurize_labels(&labels, "labels").unwrap();
        let total: i64 = features
            .iter()
            .filter(|(k, _)| k.starts_with("count_"))
            .map(|(_, v)| match v {
                FeatureValue::Integer(n) => *n,
                FeatureValue::Float(_) => panic!("count must be an integer"),
            })
            .sum();
        prop_assert_eq!(total as usize, labels.len());
    }

    #[test]
    fn test_aspect_coverage_bounds(
        picks in prop::collection::vec((0usize..ASPECTS.len(), "[a-z]{0,6}"), 1..30)
    ) {
        let spans: Vec<serde_json::Value> = picks
            .iter()
            .map(|(i, suffix)| json!([format!("{}_{}", ASPECTS[*i], suffix), [0, 1]]))
            .collect();

        let registry = TransformRegistry::new();
        let out = registry
            .get("aspect")
            .unwrap()
            .transform(&json!({"aspect_spans": spans}))
            .unwrap();

        let coverage = out[ASPECT_COVERAGE_KEY].as_f64();
        prop_assert!(coverage >= 1.0 / 8.0 && coverage <= 1.0, "coverage {}", coverage);
        prop_assert!(!out.contains_key("count_meaningful"));
    }

    #[test]
    fn test_coarse_category_is_prefix(head in "[a-z]{1,8}", tail in "[a-z_]{0,8}") {
        let label = format!("{head}_{tail}");
        prop_assert_eq!(coarse_category(&label), head.as_str());
    }

    #[test]
    fn test_specificity_bounds(scores in prop::collection::vec(0.0f64..1.0, 1..50)) {
        let registry = TransformRegistry::new();
        let out = registry
            .get("specificity")
            .unwrap()
            .transform(&json!({"specificities": scores}))
            .unwrap();

        let min = out["min_specificity"].as_f64();
        let max = out["max_specificity"].as_f64();
        for key in ["mean_specificity", "median_specificity"] {
            let v = out[key].as_f64();
            prop_assert!(v >= min - 1e-12 && v <= max + 1e-12, "{} = {} outside [{}, {}]", key, v, min, max);
        }
        let ratio = out["ratio_specificity"].as_f64();
        prop_assert!((0.0..=1.0).contains(&ratio));
    }
}
