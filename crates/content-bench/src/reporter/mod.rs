//! Benchmark result reporting
//!
//! A [`BenchmarkReport`] is the persisted form of a run: the results with
//! every real rounded to two decimals, the configuration that produced them
//! and a description of the host. Two reports are enough to compare runs
//! without any other context.
//!
//! # Output Formats
//!
//! - **JSON**: Machine-readable format for CI regression checks
//! - **Console**: Human-readable summary table
//!
//! # Example
//!
//! ```no_run
//! use content_bench::reporter::{OutputFormat, ReportWriter};
//! use content_bench::runner::BenchmarkRun;
//!
//! # fn example(run: BenchmarkRun) -> anyhow::Result<()> {
//! let report = ReportWriter::default().write(&run, "benchmark_results.json")?;
//! ReportWriter::new(OutputFormat::Console).print(&report)?;
//! # Ok(())
//! # }
//! ```

mod console;
mod json;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::collector::ContentTypeResult;
use crate::config::RunConfiguration;
use crate::environment::Environment;
use crate::runner::{BenchmarkRun, OverallSummary};

pub use console::ConsoleReporter;
pub use json::JsonReporter;

/// Output format for benchmark results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// JSON format for machine parsing
    Json,
    /// Pretty-printed JSON
    #[default]
    JsonPretty,
    /// Console summary table
    Console,
}

/// Persisted benchmark report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkReport {
    /// When the run started (RFC 3339)
    pub timestamp: String,
    pub configuration: RunConfiguration,
    /// One entry per content type, in configuration order
    pub results: Vec<ContentTypeResult>,
    pub overall: OverallSummary,
    pub environment: Environment,
}

impl BenchmarkReport {
    /// Build the report for a run, rounding reals to two decimals.
    pub fn new(run: &BenchmarkRun, environment: Environment) -> Self {
        Self {
            timestamp: run.timestamp.clone(),
            configuration: run.configuration.clone(),
            results: run.results.iter().map(ContentTypeResult::rounded).collect(),
            overall: run.overall.rounded(),
            environment,
        }
    }

    /// Parse a report previously written as JSON.
    pub fn from_json(s: &str) -> Result<Self> {
        serde_json::from_str(s).context("Failed to parse benchmark report")
    }

    /// Read a report file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read report: {}", path.display()))?;
        Self::from_json(&content)
    }
}

/// Serializes benchmark runs
pub struct ReportWriter {
    format: OutputFormat,
}

impl ReportWriter {
    /// Create a new writer with the specified output format
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Build the report for `run`, describing the current host, and write it
    /// to `path`. Any existing file is replaced.
    pub fn write<P: AsRef<Path>>(&self, run: &BenchmarkRun, path: P) -> Result<BenchmarkReport> {
        self.write_with_environment(run, Environment::detect(), path)
    }

    /// Like [`write`](Self::write) with an explicit environment description.
    pub fn write_with_environment<P: AsRef<Path>>(
        &self,
        run: &BenchmarkRun,
        environment: Environment,
        path: P,
    ) -> Result<BenchmarkReport> {
        let report = BenchmarkReport::new(run, environment);
        self.write_report(&report, path)?;
        Ok(report)
    }

    /// Write an already built report to `path`, creating parent directories.
    pub fn write_report<P: AsRef<Path>>(&self, report: &BenchmarkReport, path: P) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let mut output = self.format_report(report)?;
        if !output.ends_with('\n') {
            output.push('\n');
        }

        fs::write(path, output)
            .with_context(|| format!("Failed to write report: {}", path.display()))?;
        Ok(())
    }

    /// Print a report to stdout
    pub fn print(&self, report: &BenchmarkReport) -> Result<()> {
        let output = self.format_report(report)?;
        let mut stdout = io::stdout().lock();
        stdout.write_all(output.as_bytes())?;
        stdout.flush()?;
        Ok(())
    }

    /// Format a report as a string
    pub fn format_report(&self, report: &BenchmarkReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => JsonReporter::format(report, false),
            OutputFormat::JsonPretty => JsonReporter::format(report, true),
            OutputFormat::Console => ConsoleReporter::format(report),
        }
    }
}

impl Default for ReportWriter {
    fn default() -> Self {
        Self::new(OutputFormat::default())
    }
}
