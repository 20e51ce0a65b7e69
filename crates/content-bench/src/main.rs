//! Content benchmark binary
//!
//! Runs the simulated content generator for each content type and writes the
//! report. Exits with status 1 and a one-line message if anything fails.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use content_bench::config::{ConfigFile, DEFAULT_OUTPUT};
use content_bench::workload::KNOWN_CONTENT_TYPES;
use content_bench::{
    BenchmarkRunner, OutputFormat, ReportWriter, RunConfiguration, SimulatedWorkload,
};

#[derive(Parser, Debug)]
#[command(name = "content-bench")]
#[command(version, about = "Benchmark content generation latency and memory per content type")]
struct Args {
    /// Measured iterations per content type [default: 10]
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    iterations: Option<u32>,

    /// Report destination
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Benchmark a single content type [default: all]
    #[arg(long, value_parser = PossibleValuesParser::new(KNOWN_CONTENT_TYPES))]
    content_type: Option<String>,

    /// Warmup iterations discarded before measuring [default: 2]
    #[arg(long)]
    warmup: Option<u32>,

    /// Print a progress line for every trial
    #[arg(short, long)]
    verbose: bool,

    /// TOML file with [benchmark] defaults; flags take precedence
    #[arg(long)]
    config: Option<PathBuf>,

    /// Abort the run if a single trial takes longer than this
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    trial_timeout_ms: Option<u64>,

    /// Seed for the simulated workload
    #[arg(long)]
    seed: Option<u64>,

    /// Do not sleep for simulated latencies
    #[arg(long)]
    no_delay: bool,

    /// Do not print the summary table
    #[arg(short, long)]
    quiet: bool,
}

impl Args {
    fn run_configuration(&self) -> Result<RunConfiguration> {
        let mut config = match &self.config {
            Some(path) => ConfigFile::from_file(path)?.into_run_configuration(),
            None => RunConfiguration::default(),
        };

        if let Some(iterations) = self.iterations {
            config.iterations = iterations;
        }
        if let Some(warmup) = self.warmup {
            config.warmup = warmup;
        }
        if let Some(content_type) = &self.content_type {
            config.content_types = vec![content_type.clone()];
        }
        if self.verbose {
            config.verbose = true;
        }
        if self.trial_timeout_ms.is_some() {
            config.trial_timeout_ms = self.trial_timeout_ms;
        }

        config.validate()?;
        Ok(config)
    }

    fn workload(&self) -> SimulatedWorkload {
        let workload = match self.seed {
            Some(seed) => SimulatedWorkload::with_seed(seed),
            None => SimulatedWorkload::new(),
        };
        workload.realtime(!self.no_delay)
    }
}

async fn run(args: Args) -> Result<()> {
    let config = args.run_configuration()?;

    let runner = BenchmarkRunner::new(args.workload());
    let run = runner.run(&config).await?;

    let report = ReportWriter::new(OutputFormat::JsonPretty).write(&run, &args.output)?;
    tracing::info!("Report written to {}", args.output.display());

    if !args.quiet {
        ReportWriter::new(OutputFormat::Console).print(&report)?;
    }

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        // --help and --version
        Err(err) if !err.use_stderr() => {
            let _ = err.print();
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            let _ = err.print();
            return ExitCode::FAILURE;
        }
    };

    // Logs go to stderr so stdout only carries the summary
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["content-bench"]).unwrap();
        let config = args.run_configuration().unwrap();

        assert_eq!(args.output, PathBuf::from("benchmark_results.json"));
        assert_eq!(config, RunConfiguration::default());
    }

    #[test]
    fn test_flags_override() {
        let args = Args::try_parse_from([
            "content-bench",
            "--iterations",
            "4",
            "--warmup",
            "0",
            "--content-type",
            "slides",
            "--verbose",
            "--output",
            "out/report.json",
        ])
        .unwrap();
        let config = args.run_configuration().unwrap();

        assert_eq!(config.iterations, 4);
        assert_eq!(config.warmup, 0);
        assert_eq!(config.content_types, vec!["slides"]);
        assert!(config.verbose);
        assert_eq!(args.output, PathBuf::from("out/report.json"));
    }

    #[test]
    fn test_rejects_non_numeric_iterations() {
        assert!(Args::try_parse_from(["content-bench", "--iterations", "many"]).is_err());
    }

    #[test]
    fn test_rejects_zero_iterations() {
        assert!(Args::try_parse_from(["content-bench", "--iterations", "0"]).is_err());
    }

    #[test]
    fn test_rejects_unknown_content_type() {
        assert!(Args::try_parse_from(["content-bench", "--content-type", "podcasts"]).is_err());
    }

    #[test]
    fn test_help_is_not_an_error_stream() {
        let err = Args::try_parse_from(["content-bench", "--help"]).unwrap_err();
        assert!(!err.use_stderr());
    }

    #[test]
    fn test_config_file_then_flags() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("bench.toml");
        std::fs::write(
            &path,
            r#"
[benchmark]
iterations = 7
warmup = 1
content_types = ["diagrams", "documents"]
"#,
        )
        .unwrap();

        let args = Args::try_parse_from([
            "content-bench",
            "--config",
            path.to_str().unwrap(),
            "--warmup",
            "3",
        ])
        .unwrap();
        let config = args.run_configuration().unwrap();

        assert_eq!(config.iterations, 7);
        assert_eq!(config.warmup, 3);
        assert_eq!(config.content_types, vec!["diagrams", "documents"]);
    }
}
