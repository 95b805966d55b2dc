//! Configuration types for Shade.
//!
//! This module provides the configuration types and loading functionality.
//! The configuration file supports JSONC format (JSON with comments).
//! Both single-line (`//`) and multi-line (`/* */`) comments are allowed.

use std::fs;
use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::constants::timing;

// ============================================================================
// Settings
// ============================================================================

/// Where the clock is drawn on the status bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ClockStyle {
    /// No clock.
    Hidden,
    /// Clock at the end of the bar.
    #[default]
    Default,
    /// Clock centered on the bar.
    Centered,
}

/// Heads-up alert settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct HeadsUpConfig {
    /// Milliseconds before a shown alert hides by itself. 0 disables decay.
    /// Default: 5000
    pub decay_ms: u64,

    /// Milliseconds alerts stay suppressed after the user snoozes one.
    /// 0 disables snoozing. Default: 60000
    pub snooze_ms: u64,

    /// Show every alert expanded. Default: false
    pub expanded_by_default: bool,

    /// Anchor alerts to the bottom of the screen. The keyboard always
    /// forces them to the top. Default: false
    pub gravity_bottom: bool,

    /// Present updates to an already posted notification again. Default: false
    pub show_updates: bool,
}

impl Default for HeadsUpConfig {
    fn default() -> Self {
        Self {
            decay_ms: timing::HEADS_UP_DECAY_MS,
            snooze_ms: timing::HEADS_UP_SNOOZE_MS,
            expanded_by_default: false,
            gravity_bottom: false,
            show_updates: false,
        }
    }
}

/// Expanded panel layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct PanelsConfig {
    /// Settings live on the back of the notification panel and are reached
    /// by flipping. When false, settings open as a separate panel.
    /// Default: true
    pub flip_settings: bool,

    /// Show the quick access ribbon above the notifications. Default: false
    pub quick_access_ribbon: bool,

    /// Show the brightness slider above the notifications. Default: false
    pub brightness_slider: bool,
}

impl Default for PanelsConfig {
    fn default() -> Self {
        Self {
            flip_settings: true,
            quick_access_ribbon: false,
            brightness_slider: false,
        }
    }
}

/// Collapsed status bar settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct StatusBarConfig {
    /// Clock placement: "hidden", "default" or "centered".
    pub clock_style: ClockStyle,

    /// Adjust brightness by sliding along the status bar. Default: false
    pub brightness_control: bool,

    /// Transparency of the expanded notification background, 0.0 (opaque)
    /// to 1.0 (fully transparent). Default: 0.0
    pub notification_alpha: f32,
}

/// Screen metrics used for anchoring and gestures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct DisplayConfig {
    /// Screen width in pixels. Default: 1080
    pub width: u32,

    /// Height of the collapsed status bar in pixels. Default: 24
    pub status_bar_height: u32,

    /// Height of the touch area that starts brightness control. Default: 48
    pub header_height: u32,

    /// Gap between a bottom-anchored heads-up alert and the screen edge. Default: 48
    pub heads_up_bottom_gap: u32,

    /// Vertical travel of a heads-up alert animating into place. Default: 32
    pub heads_up_vertical_offset: f32,

    /// Distance a touch must travel before it counts as a drag. Default: 8
    pub touch_slop: u32,

    /// Lowest brightness level brightness control can set (0-255). Default: 10
    pub min_brightness: u8,

    /// Milliseconds the home button must be held before the search panel shows.
    /// Default: 300
    pub search_holdoff_ms: u64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 1080,
            status_bar_height: 24,
            header_height: 48,
            heads_up_bottom_gap: 48,
            heads_up_vertical_offset: 32.0,
            touch_slop: 8,
            min_brightness: 10,
            search_holdoff_ms: timing::SEARCH_PANEL_HOLDOFF_MS,
        }
    }
}

/// Root configuration structure for Shade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ShadeConfig {
    /// JSON schema reference, ignored at runtime.
    #[serde(rename = "$schema", skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Heads-up alert settings.
    pub heads_up: HeadsUpConfig,

    /// Expanded panel layout.
    pub panels: PanelsConfig,

    /// Collapsed status bar settings.
    pub status_bar: StatusBarConfig,

    /// Screen metrics.
    pub display: DisplayConfig,

    /// Device setup is complete. Settings stay unreachable until it is.
    /// Default: true
    pub user_setup_complete: bool,

    /// Accept demo mode commands. Default: false
    pub demo_allowed: bool,
}

impl Default for ShadeConfig {
    fn default() -> Self {
        Self {
            schema: None,
            heads_up: HeadsUpConfig::default(),
            panels: PanelsConfig::default(),
            status_bar: StatusBarConfig::default(),
            display: DisplayConfig::default(),
            user_setup_complete: true,
            demo_allowed: false,
        }
    }
}

// ============================================================================
// Change notifications
// ============================================================================

/// Identifies a setting whose change the coordinator reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SettingKey {
    ClockStyle,
    NotificationAlpha,
    HeadsUpExpanded,
    HeadsUpSnooze,
    HeadsUpDecay,
    HeadsUpShowUpdates,
    HeadsUpGravity,
    BrightnessControl,
    UserSetup,
    PanelLayout,
    Display,
    DemoAllowed,
}

impl ShadeConfig {
    /// Keys whose values differ between `self` and `other`.
    #[must_use]
    pub fn changed_keys(&self, other: &Self) -> Vec<SettingKey> {
        let checks = [
            (SettingKey::ClockStyle, self.status_bar.clock_style != other.status_bar.clock_style),
            (
                SettingKey::NotificationAlpha,
                (self.status_bar.notification_alpha - other.status_bar.notification_alpha).abs()
                    > f32::EPSILON,
            ),
            (
                SettingKey::HeadsUpExpanded,
                self.heads_up.expanded_by_default != other.heads_up.expanded_by_default,
            ),
            (SettingKey::HeadsUpSnooze, self.heads_up.snooze_ms != other.heads_up.snooze_ms),
            (SettingKey::HeadsUpDecay, self.heads_up.decay_ms != other.heads_up.decay_ms),
            (
                SettingKey::HeadsUpShowUpdates,
                self.heads_up.show_updates != other.heads_up.show_updates,
            ),
            (
                SettingKey::HeadsUpGravity,
                self.heads_up.gravity_bottom != other.heads_up.gravity_bottom,
            ),
            (
                SettingKey::BrightnessControl,
                self.status_bar.brightness_control != other.status_bar.brightness_control,
            ),
            (SettingKey::UserSetup, self.user_setup_complete != other.user_setup_complete),
            (SettingKey::PanelLayout, self.panels != other.panels),
            (SettingKey::Display, self.display != other.display),
            (SettingKey::DemoAllowed, self.demo_allowed != other.demo_allowed),
        ];
        checks.into_iter().filter_map(|(key, changed)| changed.then_some(key)).collect()
    }

    /// Background alpha of the expanded notification area (0-255).
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // clamped to 0..=255
    pub fn notification_background_alpha(&self) -> u8 {
        let alpha = (1.0 - self.status_bar.notification_alpha.clamp(0.0, 1.0)) * 255.0;
        alpha.round() as u8
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// No configuration file was found in any of the expected locations.
    NotFound,
    /// The configuration file exists but could not be read.
    IoError(std::io::Error),
    /// The configuration file contains invalid JSON.
    ParseError(serde_json::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(
                f,
                "No configuration file found. Expected at ~/.config/shade/config.jsonc \
                or ~/.shade.jsonc"
            ),
            Self::IoError(err) => write!(f, "Failed to read configuration file: {err}"),
            Self::ParseError(err) => write!(f, "Failed to parse configuration file: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::IoError(err) => Some(err),
            Self::ParseError(err) => Some(err),
            Self::NotFound => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self { Self::IoError(err) }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self { Self::ParseError(err) }
}

/// Configuration file names to search for (in priority order).
const CONFIG_FILE_NAMES: &[&str] = &["config.jsonc", "config.json"];

/// Legacy configuration file names in home directory.
const LEGACY_CONFIG_FILE_NAMES: &[&str] = &[".shade.jsonc", ".shade.json"];

/// Returns the possible configuration file paths in priority order.
///
/// The function checks the following locations (both `.jsonc` and `.json` variants):
/// 1. `$XDG_CONFIG_HOME/shade/` when set
/// 2. `~/.config/shade/`
/// 3. The platform config directory (`dirs::config_dir()`)
/// 4. `~/.shade.jsonc` or `~/.shade.json`
#[must_use]
pub fn config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        let shade_dir = PathBuf::from(xdg_config).join("shade");
        for filename in CONFIG_FILE_NAMES {
            paths.push(shade_dir.join(filename));
        }
    }

    if let Some(home) = dirs::home_dir() {
        let shade_dir = home.join(".config").join("shade");
        for filename in CONFIG_FILE_NAMES {
            let path = shade_dir.join(filename);
            // XDG_CONFIG_HOME might be ~/.config
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
    }

    if let Some(config_dir) = dirs::config_dir() {
        let shade_dir = config_dir.join("shade");
        for filename in CONFIG_FILE_NAMES {
            let path = shade_dir.join(filename);
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
    }

    if let Some(home) = dirs::home_dir() {
        for filename in LEGACY_CONFIG_FILE_NAMES {
            paths.push(home.join(filename));
        }
    }

    paths
}

/// Loads the configuration from a specific file.
///
/// # Errors
///
/// Returns `ConfigError::NotFound` if the file does not exist.
/// Returns `ConfigError::IoError` if the file could not be read.
/// Returns `ConfigError::ParseError` if the file contains invalid JSON.
pub fn load_config_from_path(path: &Path) -> Result<(ShadeConfig, PathBuf), ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound);
    }
    let file = fs::File::open(path)?;
    // Strip comments from JSONC before parsing
    let reader = json_comments::StripComments::new(file);
    let config: ShadeConfig = serde_json::from_reader(reader)?;
    Ok((config, path.to_path_buf()))
}

/// Loads the configuration from the first existing default location.
///
/// # Errors
///
/// Returns `ConfigError::NotFound` if no configuration file exists in any of the expected locations.
/// Returns `ConfigError::IoError` if a configuration file exists but could not be read.
/// Returns `ConfigError::ParseError` if the configuration file contains invalid JSON.
pub fn load_config() -> Result<(ShadeConfig, PathBuf), ConfigError> {
    config_paths()
        .into_iter()
        .find(|path| path.exists())
        .map_or(Err(ConfigError::NotFound), |path| load_config_from_path(&path))
}
