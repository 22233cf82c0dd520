//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Sediment - versioned SQL migrations with a verified schema history
#[derive(Parser, Debug)]
#[command(name = "sediment")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: PathBuf,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Named target from the config file
    #[arg(short, long, global = true)]
    pub target: Option<String>,

    /// Override database path
    #[arg(short, long, global = true, env = "SEDIMENT_DATABASE")]
    pub database: Option<String>,

    /// Override schema history table name
    #[arg(long, global = true)]
    pub history_table: Option<String>,

    /// Override migrations directory
    #[arg(short, long, global = true)]
    pub migrations: Option<PathBuf>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the schema history table if it does not exist
    Init,

    /// Verify declared migrations against the schema history
    Check,

    /// Show the status of every migration rank
    Status(StatusArgs),

    /// Apply pending migrations in version order
    Install(InstallArgs),
}

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: StatusOutput,
}

/// Status output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusOutput {
    /// Table format
    Table,
    /// JSON output
    Json,
}

/// Arguments for the install command
#[derive(Args, Debug)]
pub struct InstallArgs {
    /// Check and list pending migrations without executing them
    #[arg(long)]
    pub dry_run: bool,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
