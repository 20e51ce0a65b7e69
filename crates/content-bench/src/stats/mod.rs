//! Statistical analysis of benchmark samples
//!
//! This module turns raw trial measurements into distribution summaries.
//! Values are kept at full precision internally; rounding to two decimals
//! happens only when a report is built.
//!
//! # Examples
//!
//! ```
//! use content_bench::stats::DistributionSummary;
//!
//! let latencies = vec![400.0, 100.0, 300.0, 200.0];
//! let summary = DistributionSummary::from_samples(&latencies);
//!
//! assert_eq!(summary.min, 100.0);
//! assert_eq!(summary.p50, 300.0);
//! assert_eq!(summary.mean, 250.0);
//! ```

pub mod percentiles;

pub use percentiles::{percentile, DistributionSummary};

/// Round a value to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Arithmetic mean, or `0.0` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}
