//! JSON reporter for benchmark results

use super::BenchmarkReport;
use anyhow::Result;

/// JSON format reporter
pub struct JsonReporter;

impl JsonReporter {
    /// Format a benchmark report as JSON
    ///
    /// # Arguments
    ///
    /// * `report` - The report to format
    /// * `pretty` - Whether to pretty-print the JSON
    pub fn format(report: &BenchmarkReport, pretty: bool) -> Result<String> {
        let output = if pretty {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::tests::{create_test_run, test_environment};

    fn create_test_report() -> BenchmarkReport {
        BenchmarkReport::new(&create_test_run(), test_environment())
    }

    #[test]
    fn test_json_format_compact() {
        let output = JsonReporter::format(&create_test_report(), false).unwrap();

        assert!(!output.contains('\n'));
        assert!(output.contains("\"contentType\":\"slides\""));
    }

    #[test]
    fn test_json_format_pretty() {
        let output = JsonReporter::format(&create_test_report(), true).unwrap();

        assert!(output.contains('\n'));
        assert!(output.contains("  \"timestamp\""));
    }

    #[test]
    fn test_json_roundtrip() {
        let report = create_test_report();
        let json = JsonReporter::format(&report, false).unwrap();
        let parsed: BenchmarkReport = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, report);
    }
}
