//! Registry of feature transforms.
//!
//! The registry maps a feature-type identifier to its transform rule. It is
//! built once per run with all built-in rules registered; further rules can be
//! registered before the run starts.

use std::collections::HashMap;

use super::rules::{
    ArgumentTransform, AspectTransform, CentralTendencyTransform, CombinedScoreTransform,
    IdentityTransform,
};
use super::{FeatureTransform, TransformError, LENGTH, POLITENESS};
use crate::config::TransformConfig;

/// Registry of all available feature transforms.
pub struct TransformRegistry {
    transforms: Vec<Box<dyn FeatureTransform>>,
    by_type: HashMap<String, usize>,
}

impl TransformRegistry {
    /// Create a registry with the built-in rules and default parameters.
    pub fn new() -> Self {
        Self::with_builtins(&TransformConfig::default())
    }

    /// Create a registry with the built-in rules configured from `config`.
    pub fn with_builtins(config: &TransformConfig) -> Self {
        let mut registry = Self::empty();
        registry.register_builtins(config);
        registry
    }

    /// Create an empty registry (for testing)
    pub fn empty() -> Self {
        Self {
            transforms: Vec::new(),
            by_type: HashMap::new(),
        }
    }

    fn register_builtins(&mut self, config: &TransformConfig) {
        let builtins: Vec<Box<dyn FeatureTransform>> = vec![
            Box::new(ArgumentTransform::new()),
            Box::new(AspectTransform::new(
                config.aspect_categories,
                config.aspect_merges.clone(),
            )),
            Box::new(IdentityTransform::new(
                POLITENESS,
                "Politeness scores, passed through",
            )),
            Box::new(CentralTendencyTransform::specificity(
                config.specificity_threshold,
            )),
            Box::new(IdentityTransform::new(LENGTH, "Length measures, passed through")),
            Box::new(CombinedScoreTransform::new(config.combined_score_decimals)),
        ];

        for transform in builtins {
            let registered = self.register(transform);
            debug_assert!(registered.is_ok(), "duplicate built-in transform: {registered:?}");
        }
    }

    /// Register a transform.
    ///
    /// Each feature type has exactly one rule; a second registration for the
    /// same identifier is rejected.
    pub fn register(&mut self, transform: Box<dyn FeatureTransform>) -> Result<(), TransformError> {
        let feature_type = transform.feature_type().to_string();
        if self.by_type.contains_key(&feature_type) {
            return Err(TransformError::AlreadyRegistered(feature_type));
        }

        self.by_type.insert(feature_type, self.transforms.len());
        self.transforms.push(transform);
        Ok(())
    }

    /// Get the transform for a feature type.
    pub fn get(&self, feature_type: &str) -> Option<&dyn FeatureTransform> {
        self.by_type
            .get(feature_type)
            .map(|&index| self.transforms[index].as_ref())
    }

    /// Get the transform for a feature type, or a `NotFound` error.
    pub fn require(&self, feature_type: &str) -> Result<&dyn FeatureTransform, TransformError> {
        self.get(feature_type)
            .ok_or_else(|| TransformError::NotFound(feature_type.to_string()))
    }

    /// Feature type identifiers in registration order.
    pub fn feature_types(&self) -> Vec<&str> {
        self.transforms.iter().map(|t| t.feature_type()).collect()
    }

    /// Iterate over registered transforms in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn FeatureTransform> {
        self.transforms.iter().map(|t| t.as_ref())
    }

    /// Get the total number of registered transforms.
    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }
}

impl Default for TransformRegistry {
    fn default() -> Self {
        Self::new()
    }
}
