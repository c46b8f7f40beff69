//! Correlation of consolidated features with a gold label.
//!
//! The engine reads nothing but the consolidated table and the gold records,
//! so it can run against any run directory that already holds
//! `final_features.json`.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use revfeat_stats::{Correlation, CorrelationMethod, MIN_SAMPLE};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::annotation::{load_gold_annotations, GoldRecord};
use crate::config::CorrelateConfig;
use crate::error::{CorrelationError, Result};
use crate::feature::{ConsolidatedTable, FeatureVector, ReviewId};
use crate::run_dir::RunDirectory;

/// Coefficient and two-sided p-value for one feature
///
/// `None` marks an undefined statistic (zero-variance input) and is written
/// as `null`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureCorrelation {
    pub correlation: Option<f64>,
    #[serde(rename = "p-value")]
    pub p_value: Option<f64>,
}

impl FeatureCorrelation {
    pub fn is_defined(&self) -> bool {
        self.correlation.is_some()
    }
}

impl From<Correlation> for FeatureCorrelation {
    fn from(c: Correlation) -> Self {
        let finite = |v: f64| v.is_finite().then_some(v);
        Self {
            correlation: finite(c.coefficient),
            p_value: finite(c.p_value),
        }
    }
}

/// Feature name -> correlation with the target label
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrelationTable {
    entries: BTreeMap<String, FeatureCorrelation>,
}

impl CorrelationTable {
    pub fn get(&self, feature: &str) -> Option<&FeatureCorrelation> {
        self.entries.get(feature)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FeatureCorrelation)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Features whose coefficient is undefined
    pub fn undefined(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, c)| !c.is_defined())
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Defined correlations ordered by absolute coefficient, strongest first
    pub fn ranked(&self) -> Vec<(&str, f64, f64)> {
        let mut ranked: Vec<(&str, f64, f64)> = self
            .entries
            .iter()
            .filter_map(|(name, c)| {
                Some((name.as_str(), c.correlation?, c.p_value.unwrap_or(f64::NAN)))
            })
            .collect();
        ranked.sort_by(|a, b| {
            b.1.abs()
                .partial_cmp(&a.1.abs())
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(b.0))
        });
        ranked
    }
}

/// Feature columns and label column over the gold-labelled reviews
#[derive(Debug, Clone)]
pub struct AlignedSamples {
    features: Vec<String>,
    columns: Vec<Vec<f64>>,
    labels: Vec<f64>,
    review_ids: Vec<ReviewId>,
    nonconforming: usize,
}

impl AlignedSamples {
    /// Align the consolidated table with gold records on `target_field`.
    ///
    /// The feature schema is taken from the first review of the table. A
    /// review is included when it is in the table, has a gold annotation and
    /// a non-null target value. Features absent from an included review count
    /// as 0. Included reviews whose keys differ from the schema are rejected
    /// when `strict_schema` is set and counted otherwise.
    pub fn align(
        table: &ConsolidatedTable,
        gold: &[GoldRecord],
        target_field: &str,
        strict_schema: bool,
    ) -> std::result::Result<Self, CorrelationError> {
        let (_, schema_record) = table.representative().ok_or(CorrelationError::EmptyTable)?;
        let features: Vec<String> = schema_record.keys().cloned().collect();

        let mut samples = Self {
            columns: vec![Vec::new(); features.len()],
            features,
            labels: Vec::new(),
            review_ids: Vec::new(),
            nonconforming: 0,
        };

        for record in gold {
            let Some(review_features) = table.get(&record.review_id) else {
                continue;
            };
            let Some(label) = record.target_value(target_field)? else {
                continue;
            };

            if !samples.conforms(review_features) {
                if strict_schema {
                    return Err(samples.mismatch(&record.review_id, review_features));
                }
                samples.nonconforming += 1;
            }

            for (column, name) in samples.columns.iter_mut().zip(&samples.features) {
                column.push(review_features.get(name).map_or(0.0, |v| v.as_f64()));
            }
            samples.labels.push(label);
            samples.review_ids.push(record.review_id.clone());
        }

        Ok(samples)
    }

    fn conforms(&self, record: &FeatureVector) -> bool {
        record.len() == self.features.len()
            && self.features.iter().all(|f| record.contains_key(f))
    }

    fn mismatch(&self, review_id: &str, record: &FeatureVector) -> CorrelationError {
        let schema: BTreeSet<&String> = self.features.iter().collect();
        let actual: BTreeSet<&String> = record.keys().collect();
        CorrelationError::SchemaMismatch {
            review_id: review_id.to_string(),
            missing: schema.difference(&actual).map(|s| s.to_string()).collect(),
            extra: actual.difference(&schema).map(|s| s.to_string()).collect(),
        }
    }

    /// Feature names in schema order
    pub fn features(&self) -> &[String] {
        &self.features
    }

    /// Values of one feature across included reviews
    pub fn column(&self, feature: &str) -> Option<&[f64]> {
        self.features
            .iter()
            .position(|f| f == feature)
            .map(|i| self.columns[i].as_slice())
    }

    /// Gold target values, parallel to every column
    pub fn labels(&self) -> &[f64] {
        &self.labels
    }

    /// Included reviews in gold-file order
    pub fn review_ids(&self) -> &[ReviewId] {
        &self.review_ids
    }

    /// Included reviews whose feature keys differ from the schema
    pub fn nonconforming(&self) -> usize {
        self.nonconforming
    }

    /// Number of included reviews
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Computes per-feature correlation against a gold label.
#[derive(Debug, Clone, Default)]
pub struct CorrelationEngine {
    config: CorrelateConfig,
}

impl CorrelationEngine {
    pub fn new(config: CorrelateConfig) -> Self {
        Self { config }
    }

    /// Engine with the given statistic and default settings otherwise
    pub fn with_method(method: CorrelationMethod) -> Self {
        Self::new(CorrelateConfig {
            method,
            ..CorrelateConfig::default()
        })
    }

    /// Correlate every schema feature with `target_field`.
    pub fn correlate(
        &self,
        table: &ConsolidatedTable,
        gold: &[GoldRecord],
        target_field: &str,
    ) -> Result<CorrelationTable> {
        let samples = AlignedSamples::align(table, gold, target_field, self.config.strict_schema)?;

        if samples.nonconforming() > 0 {
            warn!(
                reviews = samples.nonconforming(),
                schema_features = samples.features().len(),
                "feature schema is not uniform across labelled reviews; absent features count as 0"
            );
        }

        if samples.len() < MIN_SAMPLE {
            return Err(CorrelationError::InsufficientSample {
                needed: MIN_SAMPLE,
                actual: samples.len(),
            }
            .into());
        }

        let mut entries = BTreeMap::new();
        for (name, column) in samples.features.iter().zip(&samples.columns) {
            let stat = self.config.method.compute(column, samples.labels())?;
            entries.insert(name.clone(), FeatureCorrelation::from(stat));
        }
        let table = CorrelationTable { entries };

        let undefined = table.undefined();
        if !undefined.is_empty() {
            warn!(features = ?undefined, "correlation undefined for zero-variance features");
        }

        info!(
            method = %self.config.method,
            reviews = samples.len(),
            features = table.len(),
            "computed correlations"
        );
        Ok(table)
    }

    /// Load a run's consolidated table and the gold file, correlate, and
    /// persist `correlations.json`.
    pub fn run(
        &self,
        run_dir: &RunDirectory,
        annotation_file: &Path,
        target_field: &str,
    ) -> Result<(CorrelationTable, PathBuf)> {
        info!(
            run_dir = %run_dir.path().display(),
            annotations = %annotation_file.display(),
            target_field,
            "correlating features"
        );

        let table = run_dir.read_final_features()?;
        let gold = load_gold_annotations(annotation_file)?;
        let correlations = self.correlate(&table, &gold, target_field)?;
        let path = run_dir.write_correlations(&correlations)?;

        info!(path = %path.display(), "wrote correlations");
        Ok((correlations, path))
    }
}
