//! The operation under benchmark
//!
//! The harness never knows what it is measuring. Each trial is delegated to a
//! [`Workload`], which reports the latency and memory of one run together with
//! whether that run succeeded.
//!
//! - An `Ok` sample with `succeeded = false` is a recorded outcome and the run
//!   continues.
//! - An `Err` is a catastrophic failure and aborts the whole benchmark.
//!
//! [`SimulatedWorkload`] is the stand-in used by the command-line tool.
//! [`FnWorkload`] adapts a plain closure, which is convenient for scripted
//! workloads in tests.

use std::sync::Mutex;
use std::time::Duration;

use anyhow::{bail, Result};
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Content types the simulated workload knows how to generate.
pub const KNOWN_CONTENT_TYPES: [&str; 4] = ["slides", "documents", "spreadsheets", "diagrams"];

/// A single measured trial
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    /// Wall-clock latency of the trial in milliseconds
    pub latency_ms: f64,
    /// Memory attributed to the trial in megabytes
    pub memory_mb: f64,
    /// Whether the operation reported success
    pub succeeded: bool,
}

impl Sample {
    pub fn success(latency_ms: f64, memory_mb: f64) -> Self {
        Self {
            latency_ms,
            memory_mb,
            succeeded: true,
        }
    }

    pub fn failure(latency_ms: f64, memory_mb: f64) -> Self {
        Self {
            latency_ms,
            memory_mb,
            succeeded: false,
        }
    }
}

/// Whether a trial is discarded warmup or a measured run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrialPhase {
    Warmup,
    Measured,
}

impl TrialPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrialPhase::Warmup => "warmup",
            TrialPhase::Measured => "measured",
        }
    }
}

/// Position of a trial within one content type's sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trial {
    /// Zero-based index across warmup and measured trials
    pub index: u32,
    pub phase: TrialPhase,
}

/// An operation that can be sampled once per trial.
#[async_trait]
pub trait Workload: Send + Sync {
    /// Run one trial for `content_type`.
    ///
    /// # Errors
    ///
    /// Returning an error aborts the benchmark run. Logical failures should be
    /// reported as a [`Sample`] with `succeeded = false` instead.
    async fn run_trial(&self, content_type: &str, trial: Trial) -> Result<Sample>;
}

#[async_trait]
impl<W: Workload + ?Sized> Workload for Box<W> {
    async fn run_trial(&self, content_type: &str, trial: Trial) -> Result<Sample> {
        (**self).run_trial(content_type, trial).await
    }
}

/// Adapts a synchronous closure into a [`Workload`].
///
/// # Example
///
/// ```
/// use content_bench::workload::{FnWorkload, Sample};
///
/// let workload = FnWorkload::new(|_content_type, _trial| Ok(Sample::success(120.0, 30.0)));
/// # let _ = workload;
/// ```
pub struct FnWorkload<F>(F);

impl<F> FnWorkload<F>
where
    F: Fn(&str, Trial) -> Result<Sample> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

#[async_trait]
impl<F> Workload for FnWorkload<F>
where
    F: Fn(&str, Trial) -> Result<Sample> + Send + Sync,
{
    async fn run_trial(&self, content_type: &str, trial: Trial) -> Result<Sample> {
        (self.0)(content_type, trial)
    }
}

/// Typical cost of generating one item of a content type
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContentProfile {
    pub base_latency_ms: f64,
    pub base_memory_mb: f64,
}

impl ContentProfile {
    /// Profile for one of the [`KNOWN_CONTENT_TYPES`].
    pub fn for_content_type(content_type: &str) -> Option<Self> {
        let (base_latency_ms, base_memory_mb) = match content_type {
            "slides" => (850.0, 45.0),
            "documents" => (420.0, 28.0),
            "spreadsheets" => (610.0, 36.0),
            "diagrams" => (730.0, 52.0),
            _ => return None,
        };

        Some(Self {
            base_latency_ms,
            base_memory_mb,
        })
    }
}

/// Random-variance stand-in for the content generator.
///
/// Latency varies by ±20% and memory by ±15% around the content type's
/// profile, and 5% of trials report failure. When `realtime` is set the trial
/// sleeps for its simulated latency.
pub struct SimulatedWorkload {
    rng: Mutex<StdRng>,
    failure_rate: f64,
    latency_variance: f64,
    memory_variance: f64,
    realtime: bool,
}

impl SimulatedWorkload {
    pub const DEFAULT_FAILURE_RATE: f64 = 0.05;

    /// Workload seeded from system entropy.
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Workload with a reproducible sequence of trials.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng: Mutex::new(rng),
            failure_rate: Self::DEFAULT_FAILURE_RATE,
            latency_variance: 0.2,
            memory_variance: 0.15,
            realtime: true,
        }
    }

    /// Set the fraction of trials (0.0 to 1.0) that report failure.
    pub fn failure_rate(mut self, rate: f64) -> Self {
        self.failure_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Whether each trial sleeps for its simulated latency.
    pub fn realtime(mut self, realtime: bool) -> Self {
        self.realtime = realtime;
        self
    }

    fn draw(&self, profile: ContentProfile) -> Sample {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        let latency_factor = 1.0 + rng.gen_range(-self.latency_variance..=self.latency_variance);
        let memory_factor = 1.0 + rng.gen_range(-self.memory_variance..=self.memory_variance);
        let succeeded = !rng.gen_bool(self.failure_rate);

        Sample {
            latency_ms: profile.base_latency_ms * latency_factor,
            memory_mb: profile.base_memory_mb * memory_factor,
            succeeded,
        }
    }
}

impl Default for SimulatedWorkload {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Workload for SimulatedWorkload {
    async fn run_trial(&self, content_type: &str, trial: Trial) -> Result<Sample> {
        let Some(profile) = ContentProfile::for_content_type(content_type) else {
            bail!(
                "unknown content type '{}' (expected one of: {})",
                content_type,
                KNOWN_CONTENT_TYPES.join(", ")
            );
        };

        let sample = self.draw(profile);

        if self.realtime {
            tokio::time::sleep(Duration::from_secs_f64(sample.latency_ms / 1000.0)).await;
        }

        debug!(
            content_type,
            trial = trial.index,
            latency_ms = sample.latency_ms,
            "Simulated trial complete"
        );

        Ok(sample)
    }
}
