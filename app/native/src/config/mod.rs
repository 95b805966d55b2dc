//! Configuration module for Shade.
//!
//! This module provides configuration types, loading functionality, and file watching
//! for hot-reloading configuration changes.
//!
//! The configuration file supports JSONC format (JSON with comments).
//! Both single-line (`//`) and multi-line (`/* */`) comments are allowed.

pub mod template;
pub mod types;
mod watcher;

use std::path::PathBuf;
use std::sync::OnceLock;

use parking_lot::RwLock;
pub use types::{
    ClockStyle, ConfigError, DisplayConfig, HeadsUpConfig, PanelsConfig, SettingKey, ShadeConfig,
    StatusBarConfig, config_paths, load_config as load_config_default, load_config_from_path,
};
pub use watcher::{ConfigWatcher, watch_config_file, watch_path};

use crate::heads_up::HeadsUpSettings;
use crate::panel::PanelLayout;

/// Current configuration, replaced on every successful reload.
static CONFIG: OnceLock<RwLock<ShadeConfig>> = OnceLock::new();

/// Path to the currently loaded configuration file.
static CONFIG_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Custom config path override (set via CLI --config flag).
static CUSTOM_CONFIG_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Sets a custom configuration file path to use instead of the default search paths.
///
/// This must be called before `init()` or `get_config()` to take effect.
///
/// # Returns
///
/// `true` if the path was set successfully, `false` if a path was already set.
pub fn set_custom_config_path(path: PathBuf) -> bool { CUSTOM_CONFIG_PATH.set(path).is_ok() }

/// Loads the configuration from the custom path or the default search paths.
///
/// # Errors
///
/// Returns a [`ConfigError`] when no file exists or it cannot be read or parsed.
pub fn load() -> Result<(ShadeConfig, PathBuf), ConfigError> {
    CUSTOM_CONFIG_PATH.get().map_or_else(load_config_default, |path| load_config_from_path(path))
}

/// Loads the configuration from disk, falling back to defaults.
fn load_or_default() -> ShadeConfig {
    match load() {
        Ok((config, path)) => {
            let _ = CONFIG_PATH.set(path);
            config
        }
        Err(ConfigError::NotFound) => {
            tracing::debug!("no configuration file found, using defaults");
            ShadeConfig::default()
        }
        Err(err) => {
            tracing::warn!(error = %err, "failed to load configuration, using defaults");
            ShadeConfig::default()
        }
    }
}

fn cell() -> &'static RwLock<ShadeConfig> {
    CONFIG.get_or_init(|| RwLock::new(load_or_default()))
}

/// Initializes the global configuration and returns a copy of it.
///
/// Calling it again returns the current configuration without reloading.
pub fn init() -> ShadeConfig { cell().read().clone() }

/// Returns a copy of the current configuration, loading it if necessary.
pub fn get_config() -> ShadeConfig { cell().read().clone() }

/// Replaces the current configuration and returns the keys that changed.
pub fn replace_config(config: ShadeConfig) -> Vec<SettingKey> {
    let mut current = cell().write();
    let changed = current.changed_keys(&config);
    *current = config;
    changed
}

/// Returns the path to the loaded configuration file, if any.
pub fn get_config_path() -> Option<&'static PathBuf> {
    CONFIG_PATH.get().or_else(|| CUSTOM_CONFIG_PATH.get())
}

/// Renders the JSON schema of the configuration file.
#[must_use]
pub fn print_schema() -> String {
    let schema = schemars::schema_for!(ShadeConfig);
    serde_json::to_string_pretty(&schema).unwrap_or_else(|_| "{}".to_string())
}

impl ShadeConfig {
    /// Heads-up settings for the controller.
    #[must_use]
    pub const fn heads_up_settings(&self) -> HeadsUpSettings {
        HeadsUpSettings {
            decay_ms: self.heads_up.decay_ms,
            snooze_ms: self.heads_up.snooze_ms,
            expanded_by_default: self.heads_up.expanded_by_default,
            gravity_bottom: self.heads_up.gravity_bottom,
            status_bar_height: self.display.status_bar_height,
            bottom_gap: self.display.heads_up_bottom_gap,
        }
    }

    /// Panel layout for the state machine.
    #[must_use]
    pub const fn panel_layout(&self) -> PanelLayout {
        PanelLayout {
            flip_settings: self.panels.flip_settings,
            ribbon: self.panels.quick_access_ribbon,
            brightness_slider: self.panels.brightness_slider,
        }
    }
}
