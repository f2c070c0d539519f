//! Report output: aligned text tables or JSON

pub mod json;
pub mod text;

use crate::bench::BenchReport;
use crate::config::{OutputConfig, OutputFormat};
use anyhow::Result;

/// Emit the report in the configured format
pub fn write_report(report: &BenchReport, output: &OutputConfig) -> Result<()> {
    match output.format {
        OutputFormat::Text => {
            text::print_report(report);
            Ok(())
        }
        OutputFormat::Json => json::write_json_output(report, output.json_output.as_deref()),
    }
}
