//! CLI argument definitions using clap derive macros.

use crate::commands::{CompareCommand, PreviewCommand, RemediateCommand, RunCommand};
use crate::error::CliError;
use clap::{Parser, Subcommand};

/// Sentira - control-based compliance audit engine
///
/// Run configuration controls against a tenant, remediate failures, and
/// compare runs over time.
#[derive(Debug, Parser)]
#[command(
    name = "sentira",
    author,
    version,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Log errors only
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run an audit against a tenant and persist the report
    Run(RunCommand),

    /// Preview remediation for failing controls without changing anything
    Preview(PreviewCommand),

    /// Apply remediation for failing controls
    Remediate(RemediateCommand),

    /// Compare two stored audit reports
    Compare(CompareCommand),
}

impl Cli {
    /// Execute the selected subcommand.
    pub async fn execute(self) -> Result<(), CliError> {
        match self.command {
            Command::Run(cmd) => cmd.execute(self.json).await,
            Command::Preview(cmd) => cmd.execute(self.json).await,
            Command::Remediate(cmd) => cmd.execute(self.json).await,
            Command::Compare(cmd) => cmd.execute(self.json).await,
        }
    }
}
