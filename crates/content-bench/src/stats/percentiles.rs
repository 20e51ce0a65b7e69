//! Percentile calculations for benchmark samples.
//!
//! Percentiles use nearest-rank by truncation: rank `k` selects index
//! `floor(n * k)` of the ascending samples, clamped to the last index.

use serde::{Deserialize, Serialize};

use super::round2;

/// Select the value at rank `k` from samples already sorted ascending.
///
/// # Arguments
///
/// * `sorted` - Samples in ascending order
/// * `k` - Rank between 0.0 and 1.0 (0.95 for p95)
///
/// # Returns
///
/// * `Some(value)` - The sample at `floor(len * k)`, clamped to the last index
/// * `None` - If `sorted` is empty or `k` is outside [0, 1]
///
/// # Examples
///
/// ```
/// use content_bench::stats::percentiles::percentile;
///
/// let data = vec![100.0, 200.0, 300.0, 400.0];
/// assert_eq!(percentile(&data, 0.5), Some(300.0));
/// assert_eq!(percentile(&data, 1.0), Some(400.0));
/// ```
pub fn percentile(sorted: &[f64], k: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=1.0).contains(&k) {
        return None;
    }

    let index = (sorted.len() as f64 * k).floor() as usize;
    Some(sorted[index.min(sorted.len() - 1)])
}

/// Distribution summary of a set of samples.
///
/// All fields are zero when `sample_count` is zero. Otherwise
/// `min <= p50 <= p95 <= p99 <= max` and `min <= mean <= max`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionSummary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub p50: f64,
    pub p95: f64,
    pub p99: f64,
    /// Population standard deviation
    pub std_dev: f64,
    pub sample_count: usize,
}

impl DistributionSummary {
    /// Compute summary statistics from samples in any order.
    ///
    /// An empty slice yields the all-zero summary.
    ///
    /// # Examples
    ///
    /// ```
    /// use content_bench::stats::percentiles::DistributionSummary;
    ///
    /// let summary = DistributionSummary::from_samples(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
    /// assert_eq!(summary.sample_count, 8);
    /// assert_eq!(summary.mean, 5.0);
    /// assert_eq!(summary.std_dev, 2.0);
    /// ```
    pub fn from_samples(samples: &[f64]) -> Self {
        if samples.is_empty() {
            return Self::default();
        }

        let mut sorted = samples.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let count = sorted.len();
        let min = sorted[0];
        let max = sorted[count - 1];

        // Accumulated rounding can push the mean of identical values one ulp
        // past the extremes.
        let mean = (sorted.iter().sum::<f64>() / count as f64).clamp(min, max);

        let variance = sorted.iter().map(|&x| (x - mean).powi(2)).sum::<f64>() / count as f64;

        let at = |k: f64| percentile(&sorted, k).unwrap_or_default();

        DistributionSummary {
            min,
            max,
            mean,
            p50: at(0.5),
            p95: at(0.95),
            p99: at(0.99),
            std_dev: variance.sqrt(),
            sample_count: count,
        }
    }

    /// Whether the summary was built from zero samples.
    pub fn is_empty(&self) -> bool {
        self.sample_count == 0
    }

    /// Copy of this summary with every real field rounded to two decimals.
    pub fn rounded(&self) -> Self {
        DistributionSummary {
            min: round2(self.min),
            max: round2(self.max),
            mean: round2(self.mean),
            p50: round2(self.p50),
            p95: round2(self.p95),
            p99: round2(self.p99),
            std_dev: round2(self.std_dev),
            sample_count: self.sample_count,
        }
    }
}
