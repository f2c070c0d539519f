//! JSON output formatting
//!
//! The report is wrapped with the crate version and a UTC timestamp so saved
//! runs can be told apart.

use crate::bench::BenchReport;
use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Report as written to JSON
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub generated_at: String,
    pub version: &'static str,
    #[serde(flatten)]
    pub report: &'a BenchReport,
}

impl<'a> JsonReport<'a> {
    /// Wrap `report`, stamped with the current time
    pub fn new(report: &'a BenchReport) -> Self {
        Self {
            generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            version: env!("CARGO_PKG_VERSION"),
            report,
        }
    }
}

/// Serialize the report to pretty-printed JSON
pub fn render_json(report: &BenchReport) -> Result<String> {
    serde_json::to_string_pretty(&JsonReport::new(report)).context("Failed to serialize report")
}

/// Write the report to `path`, or to stdout when `path` is `None`
pub fn write_json_output(report: &BenchReport, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create JSON output file: {}", path.display()))?;
            write_json(report, BufWriter::new(file))
                .with_context(|| format!("Failed to write JSON output: {}", path.display()))
        }
        None => write_json(report, io::stdout().lock()),
    }
}

fn write_json<W: Write>(report: &BenchReport, mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, &JsonReport::new(report))?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bench::{TimingRow, WorkloadReport};
    use crate::config::{BenchConfig, WorkloadKind};
    use tempfile::NamedTempFile;

    fn sample_report() -> BenchReport {
        let mut workload = WorkloadReport::new(WorkloadKind::Pairs, "pairs n=[16]".to_string());
        workload.timings.push(TimingRow {
            case: "n=16".to_string(),
            method: "next_int_pair".to_string(),
            mean_ns: 4.25,
            std_dev_ns: 0.1,
            p50_ns: 4.2,
            p99_ns: 5.0,
            min_ns: 4.0,
            max_ns: 6.0,
            calls_per_sec: 235_294_117.6,
            trials: 3,
        });
        BenchReport {
            config: BenchConfig::default(),
            threads: 2,
            elapsed_secs: 0.5,
            workloads: vec![workload],
        }
    }

    #[test]
    fn test_render_json_fields() {
        let json = render_json(&sample_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["version"], env!("CARGO_PKG_VERSION"));
        assert!(value["generated_at"].as_str().unwrap().ends_with('Z'));
        assert_eq!(value["threads"], 2);
        assert_eq!(value["config"]["seed"], 42);
        assert_eq!(value["workloads"][0]["kind"], "pairs");
        assert_eq!(value["workloads"][0]["timings"][0]["mean_ns"], 4.25);
    }

    #[test]
    fn test_write_json_file() {
        let file = NamedTempFile::new().unwrap();
        write_json_output(&sample_report(), Some(file.path())).unwrap();

        let contents = std::fs::read_to_string(file.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(value["workloads"][0]["description"], "pairs n=[16]");
    }

    #[test]
    fn test_write_json_bad_path() {
        let err = write_json_output(&sample_report(), Some(Path::new("/nonexistent/dir/out.json")))
            .unwrap_err();
        assert!(err.to_string().contains("Failed to create JSON output file"));
    }
}
