//! CLI module for Shade.
//!
//! `shade run` drives a live coordinator from JSON-lines events on stdin and
//! writes host requests to stdout. `shade replay` runs a scripted scenario on
//! the virtual clock. The remaining commands manage the configuration file.

mod commands;
mod output;

use clap::Parser;
pub use commands::Cli;
pub use commands::replay::{ReplayStep, parse_scenario, replay};
use tracing_subscriber::{EnvFilter, fmt};

use crate::error::ShadeError;

/// Environment variable holding a tracing filter, e.g. `shade=debug`.
const LOG_ENV: &str = "SHADE_LOG";

/// Runs the CLI.
///
/// Parses command-line arguments and executes the appropriate command.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn run() -> Result<(), ShadeError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    cli.execute()
}

/// Installs the global subscriber. Logs go to stderr so stdout stays free for
/// host requests and command output.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
    fmt().with_env_filter(filter).with_target(false).with_writer(std::io::stderr).init();
}
