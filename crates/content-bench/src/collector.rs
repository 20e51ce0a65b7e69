//! Per-content-type sampling
//!
//! The [`SampleCollector`] runs `warmup + iterations` trials of one content
//! type, strictly one after another. Warmup trials invoke the workload but
//! their measurements are dropped; only the measured trials reach the
//! statistics.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, instrument};

use crate::config::{ConfigError, RunConfiguration};
use crate::stats::{round2, DistributionSummary};
use crate::workload::{Sample, Trial, TrialPhase, Workload};

/// Statistics for one content type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentTypeResult {
    pub content_type: String,
    pub iterations: u32,
    pub warmup: u32,
    /// Latency in milliseconds over measured trials
    pub latency: DistributionSummary,
    /// Memory in megabytes over measured trials
    pub memory: DistributionSummary,
    /// Percentage of measured trials that succeeded, 0 to 100
    pub success_rate: f64,
    /// Operations per minute derived from the mean latency
    pub throughput: f64,
}

impl ContentTypeResult {
    /// Build the result for a content type from its measured samples.
    ///
    /// The success rate is taken over the configured `iterations`, not over
    /// `samples.len()`.
    pub fn from_samples(
        content_type: &str,
        iterations: u32,
        warmup: u32,
        samples: &[Sample],
    ) -> Self {
        let latencies: Vec<f64> = samples.iter().map(|s| s.latency_ms).collect();
        let memory: Vec<f64> = samples.iter().map(|s| s.memory_mb).collect();
        let latency = DistributionSummary::from_samples(&latencies);

        let succeeded = samples.iter().filter(|s| s.succeeded).count();
        let success_rate = if iterations == 0 {
            0.0
        } else {
            round2(succeeded as f64 / f64::from(iterations) * 100.0)
        };

        ContentTypeResult {
            content_type: content_type.to_string(),
            iterations,
            warmup,
            latency,
            memory: DistributionSummary::from_samples(&memory),
            success_rate,
            throughput: throughput_per_minute(latency.mean),
        }
    }

    /// Copy with all reported reals rounded to two decimals.
    pub fn rounded(&self) -> Self {
        ContentTypeResult {
            latency: self.latency.rounded(),
            memory: self.memory.rounded(),
            success_rate: round2(self.success_rate),
            throughput: round2(self.throughput),
            ..self.clone()
        }
    }
}

/// Operations per minute for a mean latency in milliseconds.
///
/// Returns `0.0` when the mean is zero, negative or not finite, so an empty
/// run never reports an infinite rate.
pub fn throughput_per_minute(mean_latency_ms: f64) -> f64 {
    if mean_latency_ms > 0.0 && mean_latency_ms.is_finite() {
        1000.0 / mean_latency_ms * 60.0
    } else {
        0.0
    }
}

/// Drives the trials of a single content type
pub struct SampleCollector<'a, W: ?Sized> {
    workload: &'a W,
    iterations: u32,
    warmup: u32,
    verbose: bool,
    trial_timeout: Option<Duration>,
}

impl<'a, W: Workload + ?Sized> SampleCollector<'a, W> {
    pub fn new(workload: &'a W, config: &RunConfiguration) -> Self {
        Self {
            workload,
            iterations: config.iterations,
            warmup: config.warmup,
            verbose: config.verbose,
            trial_timeout: config.trial_timeout(),
        }
    }

    /// Run all trials and return the measured samples, in trial order.
    ///
    /// # Errors
    ///
    /// Fails if `warmup + iterations` overflows, and otherwise on the first
    /// trial whose workload returns an error or exceeds the trial timeout.
    /// Samples gathered so far are discarded.
    #[instrument(skip(self), fields(iterations = self.iterations, warmup = self.warmup))]
    pub async fn collect(&self, content_type: &str) -> Result<Vec<Sample>> {
        let total = self
            .warmup
            .checked_add(self.iterations)
            .ok_or(ConfigError::TooManyTrials {
                warmup: self.warmup,
                iterations: self.iterations,
            })?;
        let mut samples = Vec::with_capacity(self.iterations as usize);

        for index in 0..total {
            let phase = if index < self.warmup {
                TrialPhase::Warmup
            } else {
                TrialPhase::Measured
            };
            let trial = Trial { index, phase };

            let sample = self
                .run_trial(content_type, trial)
                .await
                .with_context(|| {
                    format!("{} trial {} of {} failed", content_type, index + 1, total)
                })?;

            self.report_progress(content_type, trial, total, &sample);

            if phase == TrialPhase::Measured {
                samples.push(sample);
            }
        }

        debug!(retained = samples.len(), "Sampling complete");
        Ok(samples)
    }

    /// Run all trials and summarize the measured ones.
    pub async fn measure(&self, content_type: &str) -> Result<ContentTypeResult> {
        let samples = self.collect(content_type).await?;
        Ok(ContentTypeResult::from_samples(
            content_type,
            self.iterations,
            self.warmup,
            &samples,
        ))
    }

    async fn run_trial(&self, content_type: &str, trial: Trial) -> Result<Sample> {
        let pending = self.workload.run_trial(content_type, trial);

        match self.trial_timeout {
            Some(limit) => tokio::time::timeout(limit, pending)
                .await
                .map_err(|_| anyhow!("timed out after {}ms", limit.as_millis()))?,
            None => pending.await,
        }
    }

    fn report_progress(&self, content_type: &str, trial: Trial, total: u32, sample: &Sample) {
        if !sample.succeeded {
            debug!(
                trial = trial.index + 1,
                phase = trial.phase.as_str(),
                "Trial reported failure"
            );
        }

        if self.verbose {
            info!(
                "{}",
                progress_line(content_type, trial, self.warmup, self.iterations, total, sample)
            );
        }
    }
}

/// One verbose progress line, e.g. `[slides] iteration 2/4 (4/6): 12.50ms, 40.00MB`.
///
/// Failed trials end in ` FAILED`.
pub fn progress_line(
    content_type: &str,
    trial: Trial,
    warmup: u32,
    iterations: u32,
    total: u32,
    sample: &Sample,
) -> String {
    let position = match trial.phase {
        TrialPhase::Warmup => format!("warmup {}/{}", trial.index + 1, warmup),
        TrialPhase::Measured => format!("iteration {}/{}", trial.index - warmup + 1, iterations),
    };

    format!(
        "[{}] {} ({}/{}): {:.2}ms, {:.2}MB{}",
        content_type,
        position,
        trial.index + 1,
        total,
        sample.latency_ms,
        sample.memory_mb,
        if sample.succeeded { "" } else { " FAILED" }
    )
}
