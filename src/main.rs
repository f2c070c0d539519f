//! exactsample CLI entry point

use anyhow::{Context, Result};
use exactsample::bench::BenchRunner;
use exactsample::config::{self, cli::Cli};
use exactsample::output;
use exactsample::util::time::{format_duration, Timestamp};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let main_start = Timestamp::now();

    let cli = Cli::parse_args();
    init_logging(cli.debug);
    cli.validate()?;

    let config = config::load(&cli).context("Configuration validation failed")?;
    debug!(elapsed = %format_duration(main_start.elapsed()), "configuration loaded");

    if cli.dry_run {
        println!("exactsample v{}", env!("CARGO_PKG_VERSION"));
        println!();
        print!("{}", config);
        println!();
        println!("Dry run mode - configuration validated successfully");
        return Ok(());
    }

    let runner = BenchRunner::new(config)?;
    let report = runner.run()?;
    info!(
        elapsed = %format_duration(main_start.elapsed()),
        workloads = report.workloads.len(),
        "bench run complete"
    );

    output::write_report(&report, &runner.config().output)?;

    let failed: Vec<String> = report
        .workloads
        .iter()
        .flat_map(|workload| {
            workload.failed_checks().map(move |check| {
                format!(
                    "{} {} {} {}",
                    workload.kind, check.case, check.method, check.check
                )
            })
        })
        .collect();
    if !failed.is_empty() {
        for check in &failed {
            warn!(check = %check, "statistical check failed");
        }
        anyhow::bail!("{} statistical check(s) failed", failed.len());
    }
    Ok(())
}

/// Install the global subscriber; `--debug` wins over `RUST_LOG`
fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
