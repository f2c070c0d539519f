//! Human-readable text output

use crate::bench::{BenchReport, CheckRow, ComparisonRow, TimingRow, WorkloadReport};
use crate::util::time::{format_ns, format_rate};
use std::fmt::Write;

const RULE: &str = "═══════════════════════════════════════════════════════════";

/// Print the report to stdout
pub fn print_report(report: &BenchReport) {
    print!("{}", render_report(report));
}

/// Render the whole report as aligned tables
pub fn render_report(report: &BenchReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "                    BENCH RESULTS");
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Seed: {}   Trials: {}   Calls/trial: {}   Threads: {}",
        report.config.seed,
        report.config.trials,
        format_number(report.config.iterations),
        report.threads
    );
    let _ = writeln!(out, "Elapsed Time: {:.3}s", report.elapsed_secs);
    let _ = writeln!(out);

    for workload in &report.workloads {
        render_workload(&mut out, workload);
    }

    let failed: usize = report
        .workloads
        .iter()
        .map(|workload| workload.failed_checks().count())
        .sum();
    if failed > 0 {
        let _ = writeln!(out, "{} check(s) FAILED", failed);
    }
    let _ = writeln!(out, "{}", RULE);
    out
}

fn render_workload(out: &mut String, workload: &WorkloadReport) {
    let _ = writeln!(out, "Workload: {}", workload.description);
    let _ = writeln!(out);

    if !workload.timings.is_empty() {
        render_timings(out, &workload.timings);
    }
    if !workload.comparisons.is_empty() {
        render_comparisons(out, &workload.comparisons);
    }
    if !workload.checks.is_empty() {
        render_checks(out, &workload.checks);
    }
}

fn render_timings(out: &mut String, rows: &[TimingRow]) {
    let table: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            vec![
                row.case.clone(),
                row.method.clone(),
                format_ns(row.mean_ns),
                format!("±{}", format_ns(row.std_dev_ns)),
                format_ns(row.p50_ns),
                format_ns(row.p99_ns),
                format_ns(row.min_ns),
                format_ns(row.max_ns),
                format!("{}/s", format_rate(row.calls_per_sec)),
            ]
        })
        .collect();
    let _ = writeln!(out, "  Cost per call:");
    write_table(
        out,
        &["case", "method", "mean", "std dev", "p50", "p99", "min", "max", "rate"],
        &table,
    );
    let _ = writeln!(out);
}

fn render_comparisons(out: &mut String, rows: &[ComparisonRow]) {
    let table: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            vec![
                row.case.clone(),
                format!("{} vs {}", row.candidate, row.baseline),
                format!("{:.2}", row.t),
                row.dof.to_string(),
                format!("{:.2}x", row.speedup),
            ]
        })
        .collect();
    let _ = writeln!(out, "  Welch t-tests:");
    write_table(out, &["case", "candidate vs baseline", "t", "dof", "speedup"], &table);
    let _ = writeln!(out);
}

fn render_checks(out: &mut String, rows: &[CheckRow]) {
    let table: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            vec![
                row.case.clone(),
                row.method.clone(),
                row.check.clone(),
                format_value(row.value),
                row.limit.map(format_value).unwrap_or_else(|| "-".to_string()),
                match row.passed {
                    Some(true) => "pass".to_string(),
                    Some(false) => "FAIL".to_string(),
                    None => "-".to_string(),
                },
                row.detail.clone(),
            ]
        })
        .collect();
    let _ = writeln!(out, "  Checks:");
    write_table(
        out,
        &["case", "method", "check", "value", "limit", "result", "detail"],
        &table,
    );
    let _ = writeln!(out);
}

/// Write a table with columns padded to their widest cell
fn write_table(out: &mut String, headers: &[&str], rows: &[Vec<String>]) {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    write_row(out, &widths, &header);
    let underline: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    write_row(out, &widths, &underline);
    for row in rows {
        write_row(out, &widths, row);
    }
}

fn write_row(out: &mut String, widths: &[usize], cells: &[String]) {
    let mut line = String::from("   ");
    for (cell, &width) in cells.iter().zip(widths) {
        let pad = width.saturating_sub(cell.chars().count());
        line.push(' ');
        line.push_str(cell);
        line.extend(std::iter::repeat(' ').take(pad + 1));
    }
    let _ = writeln!(out, "{}", line.trim_end());
}

fn format_value(value: f64) -> String {
    if value == 0.0 || (1e-3..1e6).contains(&value.abs()) {
        format!("{:.3}", value)
    } else {
        format!("{:.3e}", value)
    }
}

/// Format a number with thousands separators
fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();

    for (count, c) in s.chars().rev().enumerate() {
        if count > 0 && count % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    result.chars().rev().collect()
}
