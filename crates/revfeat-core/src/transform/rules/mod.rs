//! Built-in transform rules.
//!
//! - **Categorical**: label counts and length-normalized frequencies (argument)
//! - **Aspect**: coarse aspect categories plus a coverage ratio
//! - **Central tendency**: mean/min/max/median/ratio of a score sequence (specificity)
//! - **Combined score**: rounded sum of per-sentence scores
//! - **Identity**: already-flat numeric maps (politeness, length)

mod aspect;
mod categorical;
mod central;
mod combined;
mod identity;

pub use aspect::{coarse_category, AspectTransform, ASPECT_COVERAGE_KEY};
pub use categorical::{count_key, featurize_labels, normalized_key, ArgumentTransform};
pub use central::{central_tendencies, CentralTendencyTransform};
pub use combined::{CombinedScoreTransform, COMBINED_SCORE_KEY};
pub use identity::IdentityTransform;
