//! Host metadata recorded alongside every report

use serde::{Deserialize, Serialize};
use sysinfo::System;

use crate::stats::round2;

/// Description of the machine a benchmark ran on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    /// Operating system, as in `std::env::consts::OS`
    pub platform: String,
    /// CPU architecture, as in `std::env::consts::ARCH`
    pub architecture: String,
    pub total_memory_mb: f64,
    pub cpu_count: usize,
    /// Version of this harness
    pub harness_version: String,
}

impl Environment {
    /// Query the current host.
    pub fn detect() -> Self {
        let mut system = System::new();
        system.refresh_memory();

        Self {
            platform: std::env::consts::OS.to_string(),
            architecture: std::env::consts::ARCH.to_string(),
            total_memory_mb: round2(system.total_memory() as f64 / 1024.0 / 1024.0),
            cpu_count: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            harness_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
