//! Correlation coefficients with two-sided p-values
//!
//! Both statistics share the same significance test: under the null
//! hypothesis `t = r * sqrt(df / (1 - r^2))` follows a Student-t distribution
//! with `df = n - 2`, and the two-sided tail probability reduces to the
//! regularized incomplete beta `I_{1 - r^2}(df / 2, 1 / 2)`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use statrs::function::beta::beta_reg;

use crate::rank::average_ranks;
use crate::{StatsError, StatsResult};

/// Minimum number of paired observations for a correlation
pub const MIN_SAMPLE: usize = 2;

/// Which correlation statistic to compute
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrelationMethod {
    /// Linear (product-moment) correlation
    #[default]
    Pearson,
    /// Rank-based correlation
    Spearman,
}

impl CorrelationMethod {
    /// Get the identifier used in configuration files and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            CorrelationMethod::Pearson => "pearson",
            CorrelationMethod::Spearman => "spearman",
        }
    }

    /// Compute this statistic for two paired samples
    pub fn compute(&self, x: &[f64], y: &[f64]) -> StatsResult<Correlation> {
        match self {
            CorrelationMethod::Pearson => pearson(x, y),
            CorrelationMethod::Spearman => spearman(x, y),
        }
    }
}

impl fmt::Display for CorrelationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CorrelationMethod {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pearson" => Ok(CorrelationMethod::Pearson),
            "spearman" => Ok(CorrelationMethod::Spearman),
            other => Err(StatsError::UnknownMethod(other.to_string())),
        }
    }
}

/// A correlation coefficient and its two-sided p-value
///
/// Both fields are NaN when either sample has zero variance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Correlation {
    pub coefficient: f64,
    pub p_value: f64,
    /// Number of paired observations
    pub n: usize,
}

impl Correlation {
    fn undefined(n: usize) -> Self {
        Self {
            coefficient: f64::NAN,
            p_value: f64::NAN,
            n,
        }
    }

    /// Whether the coefficient is a real number
    pub fn is_defined(&self) -> bool {
        self.coefficient.is_finite()
    }
}

/// Pearson product-moment correlation
pub fn pearson(x: &[f64], y: &[f64]) -> StatsResult<Correlation> {
    check_paired(x, y)?;
    let n = x.len();

    // A constant column has no correlation, even when rounding in the mean
    // would leave a tiny nonzero variance
    if is_constant(x) || is_constant(y) {
        return Ok(Correlation::undefined(n));
    }

    let nf = n as f64;
    let mean_x = x.iter().sum::<f64>() / nf;
    let mean_y = y.iter().sum::<f64>() / nf;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (xi, yi) in x.iter().zip(y.iter()) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return Ok(Correlation::undefined(n));
    }

    let r = (cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0);
    Ok(Correlation {
        coefficient: r,
        p_value: two_sided_p_value(r, n),
        n,
    })
}

/// Spearman rank correlation (Pearson on average-tie ranks)
pub fn spearman(x: &[f64], y: &[f64]) -> StatsResult<Correlation> {
    check_paired(x, y)?;
    pearson(&average_ranks(x), &average_ranks(y))
}

/// Two-sided p-value for a correlation coefficient over `n` observations
pub fn two_sided_p_value(r: f64, n: usize) -> f64 {
    if !r.is_finite() {
        return f64::NAN;
    }
    // Two points always lie on a line
    if n <= MIN_SAMPLE {
        return 1.0;
    }
    let df = (n - 2) as f64;
    let x = (1.0 - r * r).clamp(0.0, 1.0);
    beta_reg(df / 2.0, 0.5, x)
}

fn is_constant(data: &[f64]) -> bool {
    data.iter().all(|v| *v == data[0])
}

fn check_paired(x: &[f64], y: &[f64]) -> StatsResult<()> {
    if x.len() != y.len() {
        return Err(StatsError::LengthMismatch {
            left: x.len(),
            right: y.len(),
        });
    }
    if x.len() < MIN_SAMPLE {
        return Err(StatsError::InsufficientSample {
            needed: MIN_SAMPLE,
            actual: x.len(),
        });
    }
    Ok(())
}
