//! Summary statistics for score sequences
//!
//! Provides the central tendencies used to flatten per-sentence scores:
//! - Mean, min, max
//! - Median (midpoint average for even lengths)
//! - Fraction of values strictly above a threshold

use serde::{Deserialize, Serialize};

/// Summary statistics for a numeric sequence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryStats {
    /// Minimum value
    pub min: f64,
    /// Maximum value
    pub max: f64,
    /// Mean (average)
    pub mean: f64,
    /// Median (50th percentile)
    pub median: f64,
}

impl SummaryStats {
    /// Compute summary statistics from data
    ///
    /// Returns `None` for an empty slice; there is no meaningful summary of
    /// nothing and callers treat that as a contract violation.
    pub fn from_data(data: &[f64]) -> Option<Self> {
        if data.is_empty() {
            return None;
        }

        let mean = data.iter().sum::<f64>() / data.len() as f64;

        let min = data.iter().copied().fold(f64::INFINITY, f64::min);
        let max = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Some(Self {
            min,
            max,
            mean,
            median: median(data)?,
        })
    }
}

/// Median of a sequence, averaging the two middle values for even lengths
pub fn median(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }

    let mut sorted = data.to_vec();
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len();
    if n % 2 == 0 {
        Some((sorted[n / 2 - 1] + sorted[n / 2]) / 2.0)
    } else {
        Some(sorted[n / 2])
    }
}

/// Fraction of values strictly greater than `threshold`
pub fn fraction_above(data: &[f64], threshold: f64) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    let above = data.iter().filter(|&&x| x > threshold).count();
    Some(above as f64 / data.len() as f64)
}

/// Round to a fixed number of decimal digits
///
/// Rounds the exact binary value through decimal formatting, never a scaled copy.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    format!("{value:.prec$}", prec = decimals as usize)
        .parse()
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_stats_basic() {
        let data: Vec<f64> = (1..=10).map(|x| x as f64).collect();
        let stats = SummaryStats::from_data(&data).unwrap();

        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 10.0);
        assert!((stats.mean - 5.5).abs() < 1e-10);
        assert!((stats.median - 5.5).abs() < 1e-10);
    }

    #[test]
    fn test_summary_stats_two_values() {
        let stats = SummaryStats::from_data(&[0.9, 0.1]).unwrap();

        assert!((stats.mean - 0.5).abs() < 1e-12);
        assert!((stats.median - 0.5).abs() < 1e-12);
        assert_eq!(stats.min, 0.1);
        assert_eq!(stats.max, 0.9);
    }

    #[test]
    fn test_summary_stats_empty() {
        assert!(SummaryStats::from_data(&[]).is_none());
    }

    #[test]
    fn test_median_odd() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
    }

    #[test]
    fn test_fraction_above_is_strict() {
        let data = vec![0.55, 0.56, 0.1, 0.9];
        assert_eq!(fraction_above(&data, 0.55), Some(0.5));
        assert_eq!(fraction_above(&[], 0.55), None);
    }

    #[test]
    fn test_round_to() {
        let sum: f64 = [0.1, 0.2, 0.30001].iter().sum();
        assert!((round_to(sum, 5) - 0.60001).abs() < 1e-12);
        assert_eq!(round_to(1.234_567, 2), 1.23);
    }

    #[test]
    fn test_round_to_halfway_digits() {
        // Both literals sit just below the halfway point in binary
        assert_eq!(round_to(0.426915, 5), 0.42691);
        assert_eq!(round_to(7.922965, 5), 7.92296);
        assert_eq!(round_to(-0.426915, 5), -0.42691);
    }
}
