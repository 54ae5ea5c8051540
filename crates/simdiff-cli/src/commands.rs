use std::io::{self, IsTerminal, Write};
use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use simdiff_sdk::{FileStore, Reconciler};
use tracing::info;

use crate::cli::{Cli, OutputFormat};
use crate::config::SimdiffConfig;
use crate::report::{json_report, print_report};

pub fn run_command(cli: Cli) -> anyhow::Result<ExitCode> {
    let mut config = SimdiffConfig::resolve(&cli)?;
    if !io::stdout().is_terminal() {
        config.color = false;
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let differences = cmd_compare(&config, &mut out)?;
    Ok(ExitCode::from(exit_status(&config, differences)))
}

/// Process exit status for a finished comparison: 1 when `fail_on_diff` is
/// set and anything differed, 0 otherwise.
fn exit_status(config: &SimdiffConfig, differences: usize) -> u8 {
    if config.fail_on_diff && differences > 0 {
        info!(differences, "differences found, failing run");
        return 1;
    }
    0
}

/// Reconcile the configured snapshots and write the report.
///
/// Returns the number of diff entries across all granularities.
fn cmd_compare(config: &SimdiffConfig, out: &mut impl Write) -> anyhow::Result<usize> {
    let reconciler = Reconciler::new(FileStore::current_dir());
    let result = reconciler
        .run(&resource_name(&config.master), &resource_name(&config.branch))
        .context("reconciliation aborted")?;

    match config.format {
        OutputFormat::Text => print_report(&result.report, out, config.color)?,
        OutputFormat::Json => writeln!(out, "{}", json_report(&result.report)?)?,
    }
    Ok(result.report.len())
}

fn resource_name(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
