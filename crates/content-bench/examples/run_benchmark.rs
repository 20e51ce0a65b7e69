//! Benchmark a custom workload and write the report
//!
//! Usage: cargo run -p content-bench --example run_benchmark -- [output.json]

use anyhow::Result;
use async_trait::async_trait;
use content_bench::reporter::{OutputFormat, ReportWriter};
use content_bench::runner::BenchmarkRunner;
use content_bench::workload::{Sample, Trial, Workload};
use content_bench::RunConfiguration;
use std::env;
use std::time::Instant;

/// Renders a block of text and measures how long it takes
struct TextRender;

#[async_trait]
impl Workload for TextRender {
    async fn run_trial(&self, content_type: &str, _trial: Trial) -> Result<Sample> {
        let start = Instant::now();
        let repeat = match content_type {
            "short" => 1_000,
            _ => 100_000,
        };
        let text = "lorem ipsum ".repeat(repeat);
        let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
        let memory_mb = text.capacity() as f64 / 1024.0 / 1024.0;

        Ok(Sample::success(latency_ms.max(f64::EPSILON), memory_mb))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let output = env::args()
        .nth(1)
        .unwrap_or_else(|| "text_render_results.json".to_string());

    let config = RunConfiguration {
        iterations: 20,
        warmup: 3,
        content_types: vec!["short".to_string(), "long".to_string()],
        ..RunConfiguration::default()
    };

    println!("Starting benchmark");
    println!("  Iterations: {}", config.iterations);
    println!("  Warmup: {}", config.warmup);
    println!("  Content types: {}", config.content_types.join(", "));
    println!();

    let run = BenchmarkRunner::new(TextRender).run(&config).await?;
    let report = ReportWriter::default().write(&run, &output)?;

    ReportWriter::new(OutputFormat::Console).print(&report)?;
    println!("Report written to {}", output);

    Ok(())
}
