//! revfeat-stats - Statistical functions for review feature analysis
//!
//! This crate provides the numeric primitives used by revfeat:
//!
//! - **Summary**: central tendencies of a score sequence (mean, min, max, median)
//!   and the fraction of scores above a threshold
//! - **Rank**: average-tie ranking for rank-based statistics
//! - **Correlation**: Pearson and Spearman coefficients with two-sided p-values
//!
//! # Degenerate input
//!
//! A zero-variance column has no defined correlation. Rather than inventing a
//! number, the coefficient and p-value come back as NaN and callers decide how
//! to surface it. Fewer than two observations is an error.

pub mod correlation;
pub mod rank;
pub mod summary;

pub use correlation::*;
pub use rank::*;
pub use summary::*;

use thiserror::Error;

/// Errors from statistical computations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StatsError {
    #[error("Insufficient sample: need at least {needed} observations, got {actual}")]
    InsufficientSample { needed: usize, actual: usize },

    #[error("Length mismatch: {left} values vs {right} values")]
    LengthMismatch { left: usize, right: usize },

    #[error("Unknown correlation method: {0}")]
    UnknownMethod(String),
}

/// Result type for statistical computations
pub type StatsResult<T> = Result<T, StatsError>;
