//! revfeat-core - Review feature consolidation and quality correlation
//!
//! This crate merges the per-review artifacts of several independent
//! annotators into one feature table and measures how each consolidated
//! feature correlates with a human-adjudicated quality label.
//!
//! # Key Components
//!
//! - **Transform**: one stateless rule per feature type, dispatched through a
//!   [`TransformRegistry`]
//! - **Consolidator**: applies the registry over a run directory and writes
//!   `final_features.json`
//! - **CorrelationEngine**: aligns the consolidated table with gold
//!   annotations and writes `correlations.json`
//!
//! The two engines only share the on-disk feature table, so either can be run
//! on its own against an existing run directory.

pub mod annotation;
pub mod config;
pub mod consolidate;
pub mod correlate;
pub mod error;
pub mod feature;
pub mod run_dir;
pub mod transform;

pub use annotation::{load_gold_annotations, GoldRecord};
pub use config::{ConsolidateConfig, CorrelateConfig, RevfeatConfig, TransformConfig};
pub use consolidate::Consolidator;
pub use correlate::{AlignedSamples, CorrelationEngine, CorrelationTable, FeatureCorrelation};
pub use error::{ConfigError, ConsolidateError, CorrelationError, Result, RevfeatError};
pub use feature::{ConsolidatedTable, FeatureValue, FeatureVector, ReviewId};
pub use run_dir::RunDirectory;
pub use transform::{FeatureTransform, TransformError, TransformRegistry};

pub use revfeat_stats::CorrelationMethod;
