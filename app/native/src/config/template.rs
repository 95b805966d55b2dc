//! Configuration template generation.
//!
//! Generates a commented configuration template with all available options.

use std::fs;
use std::path::Path;

/// Generates a configuration template with all options commented out.
#[must_use]
pub fn generate_config_template() -> String {
    r##"// Shade Configuration File
// =========================
// This file uses JSONC format (JSON with comments).
// All options below are commented out and show their default values.
// Uncomment and modify the options you want to configure.
//
// Documentation: https://github.com/shade-rs/shade

{
  // ============================================================================
  // Heads-up Alerts
  // ============================================================================
  // "headsUp": {
  //   // Milliseconds before an alert hides by itself (0 = never)
  //   "decayMs": 5000,
  //
  //   // Milliseconds alerts stay suppressed after a snooze (0 = no snooze button)
  //   "snoozeMs": 60000,
  //
  //   // Show every alert expanded
  //   "expandedByDefault": false,
  //
  //   // Anchor alerts to the bottom of the screen (the keyboard forces top)
  //   "gravityBottom": false,
  //
  //   // Alert again when a posted notification is updated
  //   "showUpdates": false
  // },

  // ============================================================================
  // Expanded Panels
  // ============================================================================
  // "panels": {
  //   // Settings live on the back of the notification panel.
  //   // Set to false to open settings as a separate panel.
  //   "flipSettings": true,
  //
  //   // Quick access ribbon above the notifications
  //   "quickAccessRibbon": false,
  //
  //   // Brightness slider above the notifications
  //   "brightnessSlider": false
  // },

  // ============================================================================
  // Status Bar
  // ============================================================================
  // "statusBar": {
  //   // Clock placement: "hidden", "default" or "centered"
  //   "clockStyle": "default",
  //
  //   // Slide along the status bar to change brightness
  //   "brightnessControl": false,
  //
  //   // Expanded background transparency, 0.0 (opaque) to 1.0
  //   "notificationAlpha": 0.0
  // },

  // ============================================================================
  // Display Metrics
  // ============================================================================
  // "display": {
  //   "width": 1080,
  //   "statusBarHeight": 24,
  //   "headerHeight": 48,
  //   "headsUpBottomGap": 48,
  //   "headsUpVerticalOffset": 32.0,
  //   "touchSlop": 8,
  //   "minBrightness": 10,
  //   "searchHoldoffMs": 300
  // },

  // Settings stay unreachable until device setup completes
  // "userSetupComplete": true,

  // Accept demo mode commands
  // "demoAllowed": false
}
"##
    .to_string()
}

/// Creates a configuration file with the template at the specified path.
///
/// Creates parent directories if they don't exist.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn create_config_file(path: &Path) -> Result<(), std::io::Error> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, generate_config_template())
}
