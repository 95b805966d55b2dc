//! CLI command definitions using Clap.
//!
//! - `config_cmd` - Configuration file management
//! - `replay` - Scripted scenarios on the virtual clock
//! - `run` - Live coordinator fed from stdin

use std::io;
use std::path::PathBuf;

use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use clap_complete::{Generator, Shell, generate};

use crate::config;
use crate::error::ShadeError;

pub mod config_cmd;
pub mod replay;
pub mod run;

pub use config_cmd::ConfigCommands;

/// Application version from Cargo.toml.
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Shade CLI - status bar, panel and heads-up coordination engine.
#[derive(Parser, Debug)]
#[command(name = "shade")]
#[command(author, version = APP_VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a custom configuration file.
    ///
    /// Overrides the default configuration file search paths.
    /// Supports JSONC format (JSON with comments).
    #[arg(long, short, global = true, value_name = "PATH")]
    pub config: Option<String>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    ///
    /// `SHADE_LOG` takes precedence when set.
    #[arg(long, short, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
#[command(next_display_order = None)]
pub enum Commands {
    /// Run the coordinator.
    ///
    /// Reads one JSON event per line from stdin and writes one JSON host
    /// request per line to stdout. Timers follow wall time and the
    /// configuration file is reloaded when it changes.
    #[command(after_long_help = r#"Examples:
  echo '{"event":"expandNotifications"}' | shade run
  tail -f events.jsonl | shade run -vv"#)]
    Run,

    /// Replay a scripted scenario.
    ///
    /// Reads JSON-lines events from a file (or `-` for stdin), runs them on
    /// the virtual clock and prints what the coordinator asked of the host,
    /// followed by the final state. Advance the clock with
    /// `{"event":"advance","ms":3000}`.
    Replay {
        /// Scenario file, or `-` for stdin.
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print only the final state as plain JSON.
        #[arg(long, short)]
        json: bool,
    },

    /// Configuration file management commands.
    ///
    /// Initialize and locate the configuration file.
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Output Shade configuration JSON Schema.
    ///
    /// Outputs a JSON Schema to stdout that describes the structure of the
    /// Shade configuration file. Can be redirected to a file for use with
    /// editors that support JSON Schema validation.
    Schema,

    /// Generate shell completions.
    ///
    /// Outputs shell completion script to stdout for the specified shell.
    /// Can be used with eval or redirected to a file.
    ///
    /// Usage:
    ///   eval "$(shade completions --shell zsh)"
    ///   shade completions --shell bash > ~/.local/share/bash-completion/completions/shade
    ///   shade completions --shell fish > ~/.config/fish/completions/shade.fish
    Completions {
        /// The shell to generate completions for.
        #[arg(long, short, value_enum)]
        shell: Shell,
    },
}

impl Cli {
    /// Returns the custom config path if specified via --config flag.
    #[must_use]
    pub fn config_path(&self) -> Option<PathBuf> { self.config.as_ref().map(PathBuf::from) }

    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command execution fails.
    pub fn execute(&self) -> Result<(), ShadeError> {
        if let Some(path_buf) = self.config_path() {
            if !path_buf.exists() {
                return Err(ShadeError::ConfigError(format!(
                    "Configuration file not found: {}",
                    path_buf.display()
                )));
            }
            config::set_custom_config_path(path_buf);
        }

        match &self.command {
            Commands::Run => run::execute(),
            Commands::Replay { file, json } => replay::execute(file, *json),
            Commands::Config(cmd) => config_cmd::execute(cmd),

            Commands::Schema => {
                println!("{}", config::print_schema());
                Ok(())
            }

            Commands::Completions { shell } => {
                Self::print_completions(*shell);
                Ok(())
            }
        }
    }

    /// Print shell completions to stdout.
    fn print_completions<G: Generator>(generator: G) {
        let mut cmd = Self::command();
        generate(generator, &mut cmd, "shade", &mut io::stdout());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() { Cli::command().debug_assert(); }

    #[test]
    fn test_cli_parses_run() {
        let cli = Cli::try_parse_from(["shade", "run"]).unwrap();
        assert!(matches!(cli.command, Commands::Run));
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_cli_counts_verbosity() {
        let cli = Cli::try_parse_from(["shade", "-vv", "run"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_cli_parses_replay() {
        let cli = Cli::try_parse_from(["shade", "replay", "scenario.jsonl", "--json"]).unwrap();
        match cli.command {
            Commands::Replay { file, json } => {
                assert_eq!(file, PathBuf::from("scenario.jsonl"));
                assert!(json);
            }
            _ => panic!("Expected Replay command"),
        }
    }

    #[test]
    fn test_cli_requires_replay_file() {
        assert!(Cli::try_parse_from(["shade", "replay"]).is_err());
    }

    #[test]
    fn test_cli_parses_schema() {
        let cli = Cli::try_parse_from(["shade", "schema"]).unwrap();
        assert!(matches!(cli.command, Commands::Schema));
    }

    #[test]
    fn test_cli_parses_completions_zsh() {
        let cli = Cli::try_parse_from(["shade", "completions", "--shell", "zsh"]).unwrap();
        match cli.command {
            Commands::Completions { shell } => assert_eq!(shell, Shell::Zsh),
            _ => panic!("Expected Completions command"),
        }
    }

    #[test]
    fn test_cli_parses_config_init_flags() {
        let cli = Cli::try_parse_from(["shade", "config", "init", "--force", "--stdout"]).unwrap();
        match cli.command {
            Commands::Config(ConfigCommands::Init { force, path, stdout }) => {
                assert!(force);
                assert!(stdout);
                assert!(path.is_none());
            }
            _ => panic!("Expected Config Init command"),
        }
    }

    #[test]
    fn test_cli_global_config_path() {
        let cli = Cli::try_parse_from(["shade", "schema", "--config", "/tmp/shade.jsonc"]).unwrap();
        assert_eq!(cli.config_path(), Some(PathBuf::from("/tmp/shade.jsonc")));
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let cli =
            Cli::try_parse_from(["shade", "schema", "--config", "/nonexistent/shade.jsonc"]).unwrap();
        assert!(matches!(cli.execute(), Err(ShadeError::ConfigError(_))));
    }
}
