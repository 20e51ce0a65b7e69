//! Console reporter for benchmark results
//!
//! Provides human-readable output with an ASCII table per run.

use anyhow::Result;
use std::fmt::Write;

use super::BenchmarkReport;
use crate::stats::DistributionSummary;

/// Console format reporter
pub struct ConsoleReporter;

impl ConsoleReporter {
    /// Format a benchmark report for console output
    pub fn format(report: &BenchmarkReport) -> Result<String> {
        let mut output = String::new();

        writeln!(output)?;
        writeln!(output, "╔══════════════════════════════════════════════════════════════════════════════╗")?;
        writeln!(output, "║                              BENCHMARK RESULTS                               ║")?;
        writeln!(output, "╚══════════════════════════════════════════════════════════════════════════════╝")?;
        writeln!(output)?;

        writeln!(output, "Started:   {}", report.timestamp)?;
        writeln!(output, "Duration:  {}ms", report.overall.total_duration_ms)?;
        writeln!(
            output,
            "Host:      {} {} ({} CPUs, {:.0} MB)",
            report.environment.platform,
            report.environment.architecture,
            report.environment.cpu_count,
            report.environment.total_memory_mb
        )?;
        writeln!(output)?;

        writeln!(output, "Configuration:")?;
        writeln!(output, "  Iterations:     {}", report.configuration.iterations)?;
        writeln!(output, "  Warmup:         {}", report.configuration.warmup)?;
        writeln!(output, "  Content Types:  {}", report.configuration.content_types.join(", "))?;
        writeln!(output)?;

        writeln!(output, "  ┌──────────────┬─────────┬─────────┬─────────┬─────────┬─────────┬─────────┬──────────┐")?;
        writeln!(output, "  │ Content Type │   Min   │   P50   │   P95   │   P99   │   Max   │ Success │  Ops/min │")?;
        writeln!(output, "  ├──────────────┼─────────┼─────────┼─────────┼─────────┼─────────┼─────────┼──────────┤")?;

        for result in &report.results {
            Self::format_row(
                &mut output,
                &result.content_type,
                &result.latency,
                result.success_rate,
                result.throughput,
            )?;
        }

        writeln!(output, "  ├──────────────┼─────────┼─────────┼─────────┼─────────┼─────────┼─────────┼──────────┤")?;
        Self::format_row(
            &mut output,
            "overall",
            &report.overall.latency,
            report.overall.average_success_rate,
            report.overall.average_throughput,
        )?;
        writeln!(output, "  └──────────────┴─────────┴─────────┴─────────┴─────────┴─────────┴─────────┴──────────┘")?;
        writeln!(output)?;

        for result in &report.results {
            writeln!(
                output,
                "  {}: mean {:.2}ms ± {:.2}ms, memory {:.2}MB (p95 {:.2}MB)",
                result.content_type,
                result.latency.mean,
                result.latency.std_dev,
                result.memory.mean,
                result.memory.p95
            )?;
        }

        writeln!(output)?;
        Ok(output)
    }

    fn format_row(
        output: &mut String,
        name: &str,
        latency: &DistributionSummary,
        success_rate: f64,
        throughput: f64,
    ) -> Result<()> {
        writeln!(
            output,
            "  │ {:<12} │ {:>7.0} │ {:>7.0} │ {:>7.0} │ {:>7.0} │ {:>7.0} │ {:>6.2}% │ {:>8.2} │",
            name,
            latency.min,
            latency.p50,
            latency.p95,
            latency.p99,
            latency.max,
            success_rate,
            throughput
        )?;

        Ok(())
    }
}
