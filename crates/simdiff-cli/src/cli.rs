use std::path::PathBuf;

use clap::Parser;
use serde::Deserialize;

#[derive(Parser, Debug)]
#[command(
    name = "simdiff",
    about = "Reconcile simulated amounts between a master and a branch snapshot",
    version,
)]
pub struct Cli {
    /// Master (baseline) snapshot [default: master_sorted.json]
    #[arg(long)]
    pub master: Option<PathBuf>,

    /// Branch (candidate) snapshot [default: branch_sorted.json]
    #[arg(long)]
    pub branch: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Exit with status 1 when any difference is found
    #[arg(long)]
    pub fail_on_diff: bool,

    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
