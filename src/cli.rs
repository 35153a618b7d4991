//! Command-line interface.
use std::path::PathBuf;

use clap::Parser;

/// Link dotfiles into the home directory and run per-tool setup.
#[derive(Parser, Debug)]
#[command(
    name = "bootstrap",
    about = "Link dotfiles into the home directory and run per-tool setup",
    version
)]
pub struct Cli {
    /// Print every action without changing anything
    #[arg(short = 'd', long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Override dotfiles root directory
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// List available routines and exit
    #[arg(long)]
    pub list: bool,

    /// Routines to run, in order (defaults to the routines marked `*` by --list)
    #[arg(value_name = "ROUTINE")]
    pub routines: Vec<String>,
}
