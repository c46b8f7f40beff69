//! Consolidation of per-feature-type records into one table per run.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::error::{ConsolidateError, Result, RevfeatError};
use crate::feature::ConsolidatedTable;
use crate::run_dir::RunDirectory;
use crate::transform::{FeatureTransform, TransformRegistry};

/// Merges every declared feature type of a run into a [`ConsolidatedTable`].
pub struct Consolidator<'a> {
    registry: &'a TransformRegistry,
}

impl<'a> Consolidator<'a> {
    pub fn new(registry: &'a TransformRegistry) -> Self {
        Self { registry }
    }

    /// Build the consolidated table in memory.
    ///
    /// Feature types are processed in the given order. Every type must have a
    /// registered transform and a raw file in the run directory; the first
    /// malformed record or key collision aborts the whole build.
    pub fn build<S: AsRef<str>>(
        &self,
        run_dir: &RunDirectory,
        feature_types: &[S],
    ) -> Result<ConsolidatedTable> {
        if feature_types.is_empty() {
            return Err(ConsolidateError::NoFeatureTypes.into());
        }

        // Resolve every rule before touching any file
        let transforms = feature_types
            .iter()
            .map(|ft| self.registry.require(ft.as_ref()))
            .collect::<std::result::Result<Vec<&dyn FeatureTransform>, _>>()?;

        let mut table = ConsolidatedTable::new();
        for transform in transforms {
            let feature_type = transform.feature_type();
            let records = run_dir.read_feature_records(feature_type)?;

            for (review_id, raw) in &records {
                let vector =
                    transform
                        .transform(raw)
                        .map_err(|source| RevfeatError::MalformedRecord {
                            feature_type: feature_type.to_string(),
                            review_id: review_id.clone(),
                            source,
                        })?;
                table.merge(review_id, feature_type, vector)?;
            }

            debug!(feature_type, reviews = records.len(), "transformed");
        }

        Ok(table)
    }

    /// Build the consolidated table and persist it as `final_features.json`.
    ///
    /// The previous artifact, if any, is replaced whole; nothing is written
    /// when the build fails.
    pub fn consolidate<S: AsRef<str>>(
        &self,
        run_dir: &RunDirectory,
        feature_types: &[S],
    ) -> Result<(ConsolidatedTable, PathBuf)> {
        info!(
            run_dir = %run_dir.path().display(),
            feature_types = feature_types.len(),
            "consolidating features"
        );

        let table = self.build(run_dir, feature_types)?;
        let path = run_dir.write_final_features(&table)?;

        info!(reviews = table.len(), path = %path.display(), "wrote consolidated features");
        Ok((table, path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::FeatureValue;
    use crate::transform::TransformError;
    use serde_json::json;

    fn write(dir: &std::path::Path, name: &str, value: serde_json::Value) {
        std::fs::write(dir.join(name), value.to_string()).unwrap();
    }

    #[test]
    fn test_build_merges_types() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "argument_features.json",
            json!({"r1": {"argument_labels": ["fact", "request"]}}),
        );
        write(
            dir.path(),
            "combined_features.json",
            json!({"r1": {"combination_score": [0.5]}, "r2": {"combination_score": [1.0]}}),
        );

        let registry = TransformRegistry::new();
        let run = RunDirectory::open(dir.path()).unwrap();
        let table = Consolidator::new(&registry)
            .build(&run, &["argument", "combined"])
            .unwrap();

        assert_eq!(table.len(), 2);
        let r1 = table.get("r1").unwrap();
        assert_eq!(r1["count_fact"], FeatureValue::Integer(1));
        assert_eq!(r1["combined_score"].as_f64(), 0.5);

        // r2 only has combined features; nothing is padded
        let r2 = table.get("r2").unwrap();
        assert_eq!(r2.len(), 1);
        assert!(!r2.contains_key("count_fact"));
    }

    #[test]
    fn test_unknown_type_fails_before_reading() {
        let dir = tempfile::tempdir().unwrap();
        let registry = TransformRegistry::new();
        let run = RunDirectory::open(dir.path()).unwrap();

        let err = Consolidator::new(&registry)
            .build(&run, &["argument", "sentiment"])
            .unwrap_err();
        assert!(matches!(
            err,
            RevfeatError::Transform(TransformError::NotFound(ref t)) if t == "sentiment"
        ));
    }

    #[test]
    fn test_no_feature_types() {
        let dir = tempfile::tempdir().unwrap();
        let registry = TransformRegistry::new();
        let run = RunDirectory::open(dir.path()).unwrap();

        let none: [&str; 0] = [];
        let err = Consolidator::new(&registry).build(&run, &none).unwrap_err();
        assert!(matches!(
            err,
            RevfeatError::Consolidate(ConsolidateError::NoFeatureTypes)
        ));
    }
}
