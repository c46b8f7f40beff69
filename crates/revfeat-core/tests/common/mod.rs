//! Shared fixtures: temporary run directories with raw feature files

use std::path::{Path, PathBuf};

use serde_json::{json, Value};
use tempfile::TempDir;

/// A temporary run directory
pub struct RunFixture {
    dir: TempDir,
}

impl RunFixture {
    /// Empty run directory
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp run dir"),
        }
    }

    /// Run directory with all six built-in feature files for three reviews.
    ///
    /// `r3` has no argument annotations.
    pub fn complete() -> Self {
        let fixture = Self::empty();
        fixture.write_feature(
            "argument",
            json!({
                "r1": {"argument_labels": ["evaluation", "request", "evaluation", "fact"]},
                "r2": {"argument_labels": ["fact"]}
            }),
        );
        fixture.write_feature(
            "aspect",
            json!({
                "r1": {"aspect_spans": [["clarity_positive", [0, 4]], ["meaningful_comparison_negative", [5, 9]]]},
                "r2": {"aspect_spans": [["comparison_negative", [0, 3]]]},
                "r3": {"aspect_spans": [["soundness_positive", [0, 8]], ["substance_negative", [9, 12]]]}
            }),
        );
        fixture.write_feature(
            "politeness",
            json!({
                "r1": {"politeness": 0.8},
                "r2": {"politeness": 0.2},
                "r3": {"politeness": 0.5}
            }),
        );
        fixture.write_feature(
            "specificity",
            json!({
                "r1": {"specificities": [0.1, 0.9]},
                "r2": {"specificities": [0.6]},
                "r3": {"specificities": [0.2, 0.3, 0.7]}
            }),
        );
        fixture.write_feature(
            "length",
            json!({
                "r1": {"num_sentences": 4, "num_words": 80},
                "r2": {"num_sentences": 1, "num_words": 12},
                "r3": {"num_sentences": 3, "num_words": 40}
            }),
        );
        fixture.write_feature(
            "combined",
            json!({
                "r1": {"combination_score": [0.1, 0.2, 0.30001]},
                "r2": {"combination_score": [0.4]},
                "r3": {"combination_score": [0.25, 0.25]}
            }),
        );
        fixture
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn write_feature(&self, feature_type: &str, records: Value) {
        self.write_json(&format!("{feature_type}_features.json"), &records);
    }

    pub fn write_json(&self, name: &str, value: &Value) {
        std::fs::write(self.file(name), value.to_string()).expect("write fixture");
    }

    pub fn read_json(&self, name: &str) -> Value {
        let text = std::fs::read_to_string(self.file(name)).expect("read artifact");
        serde_json::from_str(&text).expect("artifact is JSON")
    }
}
