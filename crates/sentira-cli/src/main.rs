//! Sentira - control-based compliance audit engine
//!
//! Main entry point for the `sentira` binary.

use std::process::ExitCode;

use clap::Parser;
use tracing::error;

mod cli;
mod commands;
mod error;

use cli::Cli;

/// Application exit codes.
///
/// 0 means the operation completed, regardless of how many controls passed
/// or failed; non-zero means the operation itself could not complete.
#[repr(u8)]
pub enum Exit {
    Success = 0,
    GeneralError = 1,
    ConfigError = 2,
    IoError = 3,
    Interrupted = 130,
}

impl From<Exit> for ExitCode {
    fn from(exit: Exit) -> Self {
        ExitCode::from(exit as u8)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Flags override SENTIRA_LOG_LEVEL; an explicit RUST_LOG filter still
    // takes precedence inside `init`.
    let mut log_config = sentira_common_log::LogConfig::from_env();
    if cli.quiet {
        log_config.level = sentira_common_log::LogLevel::Error;
    } else if cli.verbose == 1 {
        log_config.level = sentira_common_log::LogLevel::Debug;
    } else if cli.verbose >= 2 {
        log_config.level = sentira_common_log::LogLevel::Trace;
    }
    if let Err(e) = sentira_common_log::init(log_config) {
        eprintln!("warning: {e}");
    }

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("failed to create runtime: {e}");
            return Exit::GeneralError.into();
        }
    };

    match runtime.block_on(cli.execute()) {
        Ok(()) => Exit::Success.into(),
        Err(e) => {
            error!("{e}");
            eprintln!("error: {e}");
            e.exit().into()
        }
    }
}
