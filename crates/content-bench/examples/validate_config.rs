//! Check a TOML run configuration without running it
//!
//! Usage: cargo run -p content-bench --example validate_config -- <bench.toml>

use content_bench::config::ConfigFile;
use std::env;
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();
    let config_path = if args.len() > 1 {
        PathBuf::from(&args[1])
    } else {
        PathBuf::from("crates/content-bench/bench.toml")
    };

    println!("Validating config file: {}", config_path.display());

    let config = ConfigFile::from_file(&config_path)?.into_run_configuration();
    config.validate()?;

    println!("\n✓ Successfully parsed configuration!");
    println!("\nIterations: {}", config.iterations);
    println!("Warmup: {}", config.warmup);
    println!("Verbose: {}", config.verbose);
    match config.trial_timeout() {
        Some(timeout) => println!("Trial timeout: {}ms", timeout.as_millis()),
        None => println!("Trial timeout: none"),
    }

    println!("\nContent types ({}):", config.content_types.len());
    for (i, content_type) in config.content_types.iter().enumerate() {
        println!("  {}. {}", i + 1, content_type);
    }

    println!(
        "\n✓ All validations passed! ({} trials per content type)",
        config.trials_per_content_type()
    );

    Ok(())
}
