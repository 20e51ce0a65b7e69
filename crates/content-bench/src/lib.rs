//! Benchmark harness for content generation
//!
//! This crate repeatedly samples a latency and memory producing operation for
//! a list of named content types, summarizes the measurements and writes a
//! JSON report that CI can diff between runs.
//!
//! # Features
//!
//! - **Warmup exclusion**: Warmup trials run but never reach the statistics
//! - **Distribution summaries**: min, max, mean, p50, p95, p99 and standard deviation
//! - **Pluggable workload**: The operation under test is any [`Workload`]
//! - **Regression-friendly reports**: Configuration and host metadata are stored with the results
//!
//! # Example
//!
//! ```no_run
//! use content_bench::{BenchmarkRunner, ReportWriter, RunConfiguration, SimulatedWorkload};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = RunConfiguration {
//!     iterations: 20,
//!     content_types: vec!["slides".to_string()],
//!     ..RunConfiguration::default()
//! };
//!
//! let runner = BenchmarkRunner::new(SimulatedWorkload::with_seed(7));
//! let run = runner.run(&config).await?;
//!
//! ReportWriter::default().write(&run, "benchmark_results.json")?;
//! # Ok(())
//! # }
//! ```

pub mod collector;
pub mod config;
pub mod environment;
pub mod reporter;
pub mod runner;
pub mod stats;
pub mod workload;

// Re-export main types for convenience
pub use collector::{ContentTypeResult, SampleCollector};
pub use config::{ConfigError, RunConfiguration};
pub use environment::Environment;
pub use reporter::{BenchmarkReport, OutputFormat, ReportWriter};
pub use runner::{BenchmarkRun, BenchmarkRunner, OverallSummary};
pub use stats::DistributionSummary;
pub use workload::{FnWorkload, Sample, SimulatedWorkload, Trial, TrialPhase, Workload};
