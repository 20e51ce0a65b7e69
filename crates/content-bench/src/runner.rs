//! Benchmark execution orchestration
//!
//! The runner benchmarks each configured content type in order, one at a
//! time, and rolls the per-type results up into an [`OverallSummary`].
//!
//! ```text
//! RunConfiguration
//!        │
//!        ▼
//! ┌──────────────┐   per content type   ┌─────────────────┐
//! │BenchmarkRunner├─────────────────────►│ SampleCollector │──► Workload
//! └──────┬───────┘                      └────────┬────────┘
//!        │         ContentTypeResult             │
//!        │◄──────────────────────────────────────┘
//!        ▼
//!   BenchmarkRun
//! ```
//!
//! # Example
//!
//! ```no_run
//! use content_bench::config::RunConfiguration;
//! use content_bench::runner::BenchmarkRunner;
//! use content_bench::workload::SimulatedWorkload;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let runner = BenchmarkRunner::new(SimulatedWorkload::new());
//! let run = runner.run(&RunConfiguration::default()).await?;
//!
//! for result in &run.results {
//!     println!("{}: p50={:.0}ms", result.content_type, result.latency.p50);
//! }
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{info, instrument};

use crate::collector::{ContentTypeResult, SampleCollector};
use crate::config::RunConfiguration;
use crate::stats::{self, round2, DistributionSummary};
use crate::workload::Workload;

/// Roll-up across all content types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallSummary {
    /// Latency distribution rebuilt from per-type means
    pub latency: DistributionSummary,
    /// Unweighted mean of per-type success rates
    pub average_success_rate: f64,
    /// Unweighted mean of per-type throughput
    pub average_throughput: f64,
    /// Wall-clock time of the whole run
    pub total_duration_ms: u64,
}

impl OverallSummary {
    /// Aggregate per-type results.
    ///
    /// The overall latency distribution is not computed from raw trials.
    /// Each result contributes its mean latency, repeated once per measured
    /// sample, so overall percentiles describe the spread between content
    /// types rather than between individual trials.
    pub fn from_results(results: &[ContentTypeResult], total_duration_ms: u64) -> Self {
        let reconstructed: Vec<f64> = results
            .iter()
            .flat_map(|r| std::iter::repeat(r.latency.mean).take(r.latency.sample_count))
            .collect();

        let success_rates: Vec<f64> = results.iter().map(|r| r.success_rate).collect();
        let throughputs: Vec<f64> = results.iter().map(|r| r.throughput).collect();

        OverallSummary {
            latency: DistributionSummary::from_samples(&reconstructed),
            average_success_rate: stats::mean(&success_rates),
            average_throughput: stats::mean(&throughputs),
            total_duration_ms,
        }
    }

    pub fn rounded(&self) -> Self {
        OverallSummary {
            latency: self.latency.rounded(),
            average_success_rate: round2(self.average_success_rate),
            average_throughput: round2(self.average_throughput),
            total_duration_ms: self.total_duration_ms,
        }
    }
}

/// Results from a complete benchmark run, before rounding
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkRun {
    /// RFC 3339 timestamp taken when the run started
    pub timestamp: String,
    pub configuration: RunConfiguration,
    /// One entry per content type, in configuration order
    pub results: Vec<ContentTypeResult>,
    pub overall: OverallSummary,
}

/// The benchmark runner
pub struct BenchmarkRunner<W> {
    workload: W,
}

impl<W: Workload> BenchmarkRunner<W> {
    pub fn new(workload: W) -> Self {
        Self { workload }
    }

    /// Run benchmarks according to the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or if any trial of
    /// any content type fails catastrophically. No partial results are
    /// returned in that case.
    #[instrument(skip(self, config), fields(content_types = config.content_types.len()))]
    pub async fn run(&self, config: &RunConfiguration) -> Result<BenchmarkRun> {
        config.validate().context("Invalid run configuration")?;

        let timestamp = chrono::Utc::now().to_rfc3339();
        let start_time = Instant::now();

        info!(
            "Starting benchmark of {} content types ({} iterations, {} warmup)",
            config.content_types.len(),
            config.iterations,
            config.warmup
        );

        let collector = SampleCollector::new(&self.workload, config);
        let mut results = Vec::with_capacity(config.content_types.len());

        for content_type in &config.content_types {
            info!("Benchmarking content type: {}", content_type);

            let result = collector
                .measure(content_type)
                .await
                .with_context(|| format!("Benchmark of '{}' failed", content_type))?;

            info!(
                "{}: mean {:.2}ms, p95 {:.2}ms, success {:.2}%",
                content_type, result.latency.mean, result.latency.p95, result.success_rate
            );

            results.push(result);
        }

        let total_duration_ms = start_time.elapsed().as_millis() as u64;
        let overall = OverallSummary::from_results(&results, total_duration_ms);

        info!("Benchmark completed in {}ms", total_duration_ms);

        Ok(BenchmarkRun {
            timestamp,
            configuration: config.clone(),
            results,
            overall,
        })
    }
}
