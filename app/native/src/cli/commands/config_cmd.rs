//! `shade config` subcommands.

use std::path::{Path, PathBuf};

use clap::Subcommand;
use colored::Colorize;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::cli::output;
use crate::config::template::{create_config_file, generate_config_template};
use crate::config::{self, config_paths, load_config_from_path};
use crate::error::ShadeError;

/// Config management commands.
#[derive(Subcommand, Debug)]
#[command(next_display_order = None)]
pub enum ConfigCommands {
    /// Write a configuration file with every option documented.
    ///
    /// The generated file is JSONC: every option is present but commented
    /// out, so the defaults apply until you uncomment one.
    #[command(
        name = "init",
        after_long_help = r#"Examples:
  shade config init                            # Create config at default location
  shade config init --force                    # Overwrite existing config
  shade config init --path ~/shade.jsonc       # Create at custom path
  shade config init --stdout                   # Print template to stdout"#
    )]
    Init {
        /// Overwrite an existing file.
        #[arg(long, short)]
        force: bool,

        /// Where to write the file.
        /// Defaults to the first search path, usually ~/.config/shade/config.jsonc
        #[arg(long, short, value_name = "PATH")]
        path: Option<PathBuf>,

        /// Print the template instead of writing it.
        #[arg(long)]
        stdout: bool,
    },

    /// List the configuration search paths and mark the active one.
    Path,

    /// Print the effective configuration as JSON.
    Show,
}

/// Execute config subcommands.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn execute(cmd: &ConfigCommands) -> Result<(), ShadeError> {
    match cmd {
        ConfigCommands::Init { force, path, stdout } => {
            if *stdout && (*force || path.is_some()) {
                return Err(ShadeError::InvalidArguments(
                    "--stdout prints the template and cannot be combined with --path or --force"
                        .to_string(),
                ));
            }
            if *stdout {
                println!("{}", generate_config_template());
                Ok(())
            } else {
                let target = path.clone().unwrap_or_else(default_config_path);
                init_config(&target, *force)?;
                println!("Configuration file created at: {}", target.display());
                println!("Uncomment the options you want to change.");
                Ok(())
            }
        }
        ConfigCommands::Path => {
            show_config_paths();
            Ok(())
        }
        ConfigCommands::Show => {
            let value = serde_json::to_value(config::init())?;
            output::print_highlighted_json(&value);
            Ok(())
        }
    }
}

fn default_config_path() -> PathBuf {
    config_paths().into_iter().next().unwrap_or_else(|| PathBuf::from("config.jsonc"))
}

/// Writes the template to `path` and checks that it loads back.
fn init_config(path: &Path, force: bool) -> Result<(), ShadeError> {
    if path.exists() && !force {
        return Err(ShadeError::ConfigError(format!(
            "Configuration file already exists at: {}\nUse --force to overwrite.",
            path.display()
        )));
    }

    create_config_file(path).map_err(|e| {
        ShadeError::ConfigError(format!("Failed to create config file {}: {e}", path.display()))
    })?;
    load_config_from_path(path)?;
    tracing::info!(path = %path.display(), "configuration template written");
    Ok(())
}

fn show_config_paths() {
    #[derive(Tabled)]
    struct PathRow {
        #[tabled(rename = "#")]
        index: usize,
        #[tabled(rename = "Path")]
        path: String,
        #[tabled(rename = "Exists")]
        exists: String,
        #[tabled(rename = "Active")]
        active: String,
    }

    let paths = config_paths();
    let active = paths.iter().position(|p| p.exists());
    let rows: Vec<PathRow> = paths
        .iter()
        .enumerate()
        .map(|(i, p)| PathRow {
            index: i + 1,
            path: p.display().to_string(),
            exists: output::format_bool(p.exists()),
            active: output::format_bool(active == Some(i)),
        })
        .collect();

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::right()))
        .with(Modify::new(Columns::new(2..4)).with(Alignment::center()))
        .to_string();

    println!("{}", "Configuration search paths".bold());
    println!("{table}");

    if active.is_none() {
        println!("{}", "No configuration file found. Run 'shade config init' to create one.".dimmed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_writes_loadable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.jsonc");

        init_config(&path, false).unwrap();
        assert!(path.exists());

        let (config, _) = load_config_from_path(&path).unwrap();
        assert_eq!(config, crate::config::ShadeConfig::default());
    }

    #[test]
    fn test_init_stdout_rejects_write_options() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.jsonc");
        let cmd = ConfigCommands::Init {
            force: false,
            path: Some(path.clone()),
            stdout: true,
        };

        assert!(matches!(execute(&cmd), Err(ShadeError::InvalidArguments(_))));
        assert!(!path.exists());
    }

    #[test]
    fn test_init_refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.jsonc");
        std::fs::write(&path, "{}").unwrap();

        assert!(matches!(init_config(&path, false), Err(ShadeError::ConfigError(_))));
        assert!(init_config(&path, true).is_ok());
    }
}
