//! End-to-end tests for the benchmark pipeline
//!
//! These drive the public API from configuration through to a report on
//! disk, using scripted workloads so every number is known in advance.

use std::sync::atomic::{AtomicU32, Ordering};

use content_bench::{
    BenchmarkReport, BenchmarkRunner, FnWorkload, ReportWriter, RunConfiguration,
    Sample, SimulatedWorkload, TrialPhase,
};
use tempfile::TempDir;

fn single_type(content_type: &str, iterations: u32, warmup: u32) -> RunConfiguration {
    RunConfiguration {
        iterations,
        warmup,
        content_types: vec![content_type.to_string()],
        ..RunConfiguration::default()
    }
}

#[tokio::test]
async fn test_scripted_slides_scenario() {
    let latencies = [100.0, 200.0, 300.0, 400.0];
    let workload = FnWorkload::new(move |_, trial| {
        Ok(Sample::success(latencies[trial.index as usize], 40.0))
    });

    let run = BenchmarkRunner::new(workload)
        .run(&single_type("slides", 4, 0))
        .await
        .unwrap();

    assert_eq!(run.results.len(), 1);
    let slides = &run.results[0];
    assert_eq!(slides.content_type, "slides");
    assert_eq!(slides.latency.min, 100.0);
    assert_eq!(slides.latency.max, 400.0);
    assert_eq!(slides.latency.mean, 250.0);
    assert_eq!(slides.latency.p50, 300.0);
    assert_eq!(slides.success_rate, 100.0);

    // One content type: the overall distribution is its mean, four times
    assert_eq!(run.overall.latency.sample_count, 4);
    assert_eq!(run.overall.latency.min, 250.0);
    assert_eq!(run.overall.latency.max, 250.0);
    assert_eq!(run.overall.latency.std_dev, 0.0);
}

#[tokio::test]
async fn test_warmup_values_never_reported() {
    let workload = FnWorkload::new(|_, trial| {
        let latency = match trial.phase {
            TrialPhase::Warmup => 99_999.0,
            TrialPhase::Measured => 50.0 + f64::from(trial.index),
        };
        Ok(Sample::success(latency, 1.0))
    });

    let run = BenchmarkRunner::new(workload)
        .run(&single_type("documents", 5, 3))
        .await
        .unwrap();

    let documents = &run.results[0];
    assert_eq!(documents.latency.sample_count, 5);
    assert_eq!(documents.latency.min, 53.0);
    assert_eq!(documents.latency.max, 57.0);
}

#[tokio::test]
async fn test_catastrophic_failure_aborts_run() {
    let calls = AtomicU32::new(0);

    let workload = FnWorkload::new(|_, _| {
        if calls.fetch_add(1, Ordering::SeqCst) == 5 {
            anyhow::bail!("out of memory");
        }
        Ok(Sample::success(10.0, 1.0))
    });
    let config = RunConfiguration {
        iterations: 3,
        warmup: 0,
        content_types: vec!["slides".to_string(), "documents".to_string()],
        ..RunConfiguration::default()
    };

    let err = BenchmarkRunner::new(workload).run(&config).await.unwrap_err();

    assert_eq!(calls.load(Ordering::SeqCst), 6);
    assert!(format!("{:#}", err).contains("documents trial 3 of 3 failed: out of memory"));
}

#[tokio::test]
async fn test_simulated_run_writes_parseable_report() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("benchmark_results.json");

    let workload = SimulatedWorkload::with_seed(2024).realtime(false);
    let config = RunConfiguration {
        iterations: 12,
        warmup: 2,
        ..RunConfiguration::default()
    };

    let run = BenchmarkRunner::new(workload).run(&config).await.unwrap();
    let written = ReportWriter::default().write(&run, &path).unwrap();
    let parsed = BenchmarkReport::from_file(&path).unwrap();

    assert_eq!(parsed, written);
    assert_eq!(parsed.results.len(), 4);
    assert_eq!(parsed.configuration, config);
    assert_eq!(parsed.environment.platform, std::env::consts::OS);

    for result in &parsed.results {
        assert_eq!(result.latency.sample_count, 12);
        assert!(result.success_rate >= 0.0 && result.success_rate <= 100.0);
        assert!(result.throughput.is_finite() && result.throughput > 0.0);
        assert!(result.latency.min <= result.latency.p50);
        assert!(result.latency.p99 <= result.latency.max);
    }

    assert_eq!(parsed.overall.latency.sample_count, 48);
}

#[tokio::test]
async fn test_second_run_replaces_report() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("benchmark_results.json");
    let writer = ReportWriter::default();

    let fast = FnWorkload::new(|_, _| Ok(Sample::success(10.0, 1.0)));
    let slow = FnWorkload::new(|_, _| Ok(Sample::success(1000.0, 1.0)));

    let first = BenchmarkRunner::new(fast)
        .run(&single_type("slides", 2, 0))
        .await
        .unwrap();
    writer.write(&first, &path).unwrap();

    let second = BenchmarkRunner::new(slow)
        .run(&single_type("diagrams", 2, 0))
        .await
        .unwrap();
    writer.write(&second, &path).unwrap();

    let report = BenchmarkReport::from_file(&path).unwrap();
    assert_eq!(report.results.len(), 1);
    assert_eq!(report.results[0].content_type, "diagrams");
    assert_eq!(report.results[0].throughput, 60.0);
}
