//! Run configuration
//!
//! A [`RunConfiguration`] is normally assembled by the command-line tool from
//! its flags. A TOML file can supply the starting values; flags given on the
//! command line take precedence.
//!
//! ```toml
//! [benchmark]
//! iterations = 20
//! warmup = 3
//! content_types = ["slides", "documents"]
//! verbose = true
//! trial_timeout_ms = 10000
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::workload::KNOWN_CONTENT_TYPES;

pub const DEFAULT_ITERATIONS: u32 = 10;
pub const DEFAULT_WARMUP: u32 = 2;
pub const DEFAULT_OUTPUT: &str = "benchmark_results.json";

/// Invalid run configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("iterations must be at least 1")]
    ZeroIterations,

    #[error("at least one content type is required")]
    NoContentTypes,

    #[error("content type labels must not be empty")]
    EmptyContentType,

    #[error("content type '{0}' is listed more than once")]
    DuplicateContentType(String),

    #[error("trial timeout must be greater than zero")]
    ZeroTimeout,

    #[error("warmup ({warmup}) plus iterations ({iterations}) overflows the trial count")]
    TooManyTrials { warmup: u32, iterations: u32 },
}

/// Parameters of a single benchmark run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunConfiguration {
    /// Measured trials per content type
    pub iterations: u32,
    /// Trials run and discarded before measuring
    pub warmup: u32,
    /// Content types to benchmark, in order
    pub content_types: Vec<String>,
    /// Emit a progress line for every trial
    pub verbose: bool,
    /// Deadline for a single trial; none means wait indefinitely
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trial_timeout_ms: Option<u64>,
}

impl Default for RunConfiguration {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            warmup: DEFAULT_WARMUP,
            content_types: KNOWN_CONTENT_TYPES.iter().map(|s| s.to_string()).collect(),
            verbose: false,
            trial_timeout_ms: None,
        }
    }
}

impl RunConfiguration {
    /// Check the invariants the runner relies on.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if:
    /// - `iterations` is zero
    /// - no content types are listed, one is blank, or one appears twice
    /// - a trial timeout of zero is set
    /// - `warmup + iterations` does not fit in a `u32`
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }

        if self.warmup.checked_add(self.iterations).is_none() {
            return Err(ConfigError::TooManyTrials {
                warmup: self.warmup,
                iterations: self.iterations,
            });
        }

        if self.content_types.is_empty() {
            return Err(ConfigError::NoContentTypes);
        }

        let mut seen = HashSet::new();
        for content_type in &self.content_types {
            if content_type.trim().is_empty() {
                return Err(ConfigError::EmptyContentType);
            }
            if !seen.insert(content_type.as_str()) {
                return Err(ConfigError::DuplicateContentType(content_type.clone()));
            }
        }

        if self.trial_timeout_ms == Some(0) {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(())
    }

    /// Total trials run for each content type. Saturates on a configuration
    /// that [`validate`](Self::validate) rejects.
    pub fn trials_per_content_type(&self) -> u32 {
        self.warmup.saturating_add(self.iterations)
    }

    pub fn trial_timeout(&self) -> Option<Duration> {
        self.trial_timeout_ms.map(Duration::from_millis)
    }
}

/// Configuration file loaded from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub benchmark: BenchmarkSection,
}

/// The `[benchmark]` table of a configuration file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkSection {
    /// Number of measured iterations per content type (default: 10)
    pub iterations: u32,
    /// Number of warmup runs before measurement (default: 2)
    pub warmup: u32,
    /// Content types to benchmark (default: all known types)
    pub content_types: Vec<String>,
    pub verbose: bool,
    pub trial_timeout_ms: Option<u64>,
}

impl Default for BenchmarkSection {
    fn default() -> Self {
        let defaults = RunConfiguration::default();
        Self {
            iterations: defaults.iterations,
            warmup: defaults.warmup,
            content_types: defaults.content_types,
            verbose: defaults.verbose,
            trial_timeout_ms: defaults.trial_timeout_ms,
        }
    }
}

impl ConfigFile {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML is malformed
    ///
    /// # Example
    ///
    /// ```no_run
    /// use content_bench::config::ConfigFile;
    ///
    /// # fn example() -> anyhow::Result<()> {
    /// let config = ConfigFile::from_file("bench.toml")?.into_run_configuration();
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string
    ///
    /// # Example
    ///
    /// ```
    /// use content_bench::config::ConfigFile;
    ///
    /// # fn example() -> anyhow::Result<()> {
    /// let config = ConfigFile::from_str("[benchmark]\niterations = 5\n")?;
    /// assert_eq!(config.benchmark.iterations, 5);
    /// assert_eq!(config.benchmark.warmup, 2);
    /// # Ok(())
    /// # }
    /// # example().unwrap();
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> anyhow::Result<Self> {
        toml::from_str(s).context("Failed to parse TOML configuration")
    }

    pub fn into_run_configuration(self) -> RunConfiguration {
        let BenchmarkSection {
            iterations,
            warmup,
            content_types,
            verbose,
            trial_timeout_ms,
        } = self.benchmark;

        RunConfiguration {
            iterations,
            warmup,
            content_types,
            verbose,
            trial_timeout_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(content_types: &[&str]) -> RunConfiguration {
        RunConfiguration {
            content_types: content_types.iter().map(|s| s.to_string()).collect(),
            ..RunConfiguration::default()
        }
    }

    #[test]
    fn test_default_values() {
        let config = RunConfiguration::default();

        assert_eq!(config.iterations, 10);
        assert_eq!(config.warmup, 2);
        assert_eq!(
            config.content_types,
            vec!["slides", "documents", "spreadsheets", "diagrams"]
        );
        assert!(!config.verbose);
        assert_eq!(config.trial_timeout(), None);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_validate_zero_iterations() {
        let config = RunConfiguration {
            iterations: 0,
            ..RunConfiguration::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroIterations));
    }

    #[test]
    fn test_validate_content_types() {
        assert_eq!(config(&[]).validate(), Err(ConfigError::NoContentTypes));
        assert_eq!(
            config(&["slides", " "]).validate(),
            Err(ConfigError::EmptyContentType)
        );
        assert_eq!(
            config(&["slides", "documents", "slides"]).validate(),
            Err(ConfigError::DuplicateContentType("slides".to_string()))
        );
        assert_eq!(config(&["custom"]).validate(), Ok(()));
    }

    #[test]
    fn test_validate_zero_timeout() {
        let config = RunConfiguration {
            trial_timeout_ms: Some(0),
            ..RunConfiguration::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroTimeout));
    }

    #[test]
    fn test_validate_trial_count_overflow() {
        let config = RunConfiguration {
            iterations: u32::MAX,
            warmup: 1,
            ..RunConfiguration::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::TooManyTrials {
                warmup: 1,
                iterations: u32::MAX,
            })
        );

        let largest = RunConfiguration {
            iterations: u32::MAX - 2,
            warmup: 2,
            ..RunConfiguration::default()
        };
        assert_eq!(largest.validate(), Ok(()));
    }

    #[test]
    fn test_trials_per_content_type() {
        let config = RunConfiguration {
            iterations: 5,
            warmup: 3,
            ..RunConfiguration::default()
        };
        assert_eq!(config.trials_per_content_type(), 8);
    }

    #[test]
    fn test_trial_timeout_duration() {
        let config = RunConfiguration {
            trial_timeout_ms: Some(1500),
            ..RunConfiguration::default()
        };
        assert_eq!(config.trial_timeout(), Some(Duration::from_millis(1500)));
    }

    #[test]
    fn test_parse_empty_file_uses_defaults() {
        let config = ConfigFile::from_str("").unwrap().into_run_configuration();
        assert_eq!(config, RunConfiguration::default());
    }

    #[test]
    fn test_parse_full_file() {
        let toml = r#"
            [benchmark]
            iterations = 20
            warmup = 0
            content_types = ["diagrams", "slides"]
            verbose = true
            trial_timeout_ms = 2500
        "#;

        let config = ConfigFile::from_str(toml).unwrap().into_run_configuration();
        assert_eq!(config.iterations, 20);
        assert_eq!(config.warmup, 0);
        assert_eq!(config.content_types, vec!["diagrams", "slides"]);
        assert!(config.verbose);
        assert_eq!(config.trial_timeout_ms, Some(2500));
    }

    #[test]
    fn test_parse_rejects_non_numeric_iterations() {
        let toml = r#"
            [benchmark]
            iterations = "ten"
        "#;
        assert!(ConfigFile::from_str(toml).is_err());
    }

    #[test]
    fn test_json_uses_camel_case() {
        let json = serde_json::to_string(&RunConfiguration::default()).unwrap();

        assert!(json.contains("\"contentTypes\""));
        assert!(!json.contains("trialTimeoutMs"));
    }
}
