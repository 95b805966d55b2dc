//! Internal constants for the coordination engine.
//!
//! Constants are grouped by functionality:
//! - `timing` - Auto-hide, re-check and deferred cleanup delays
//! - `flip` - Panel flip animation durations
//! - `heads_up` - Heads-up swipe presentation parameters
//! - `brightness` - Status-bar brightness gesture tuning
//! - `fade` - Fade durations for auxiliary status bar elements

/// Timing constants for bar and panel timers.
pub mod timing {
    /// Delay before a transient bar is hidden again (ms).
    pub const AUTOHIDE_TIMEOUT_MS: u64 = 3000;

    /// Delay before a transient bar is hidden after the user touches outside it (ms).
    pub const USER_AUTOHIDE_TIMEOUT_MS: u64 = 350;

    /// Delay of the bar mode re-check posted when auto-hide resumes (ms).
    pub const CHECK_BAR_MODES_DELAY_MS: u64 = 500;

    /// Delay before the expanded window is shrunk back after a deferred collapse (ms).
    pub const COLLAPSE_SETTLE_MS: u64 = 50;

    /// Default heads-up decay delay (ms).
    pub const HEADS_UP_DECAY_MS: u64 = 5000;

    /// Default heads-up snooze length (ms).
    pub const HEADS_UP_SNOOZE_MS: u64 = 60_000;

    /// Default hold-off before the search panel is shown from a home press (ms).
    pub const SEARCH_PANEL_HOLDOFF_MS: u64 = 300;
}

/// Panel flip animation durations.
pub mod flip {
    /// Duration of the outgoing half of a flip (ms).
    pub const DURATION_OUT_MS: u64 = 125;

    /// Duration of the incoming half of a flip (ms).
    pub const DURATION_IN_MS: u64 = 225;

    /// Total flip duration, also used for button cross-fades (ms).
    pub const DURATION_MS: u64 = DURATION_OUT_MS + DURATION_IN_MS;

    /// How long before the end of a flip the settle timer fires (ms).
    pub const SETTLE_LEAD_MS: u64 = 150;
}

/// Heads-up swipe presentation.
pub mod heads_up {
    /// Fraction of the swipe distance at which the entry becomes fully transparent.
    pub const SWIPE_FADE_FRACTION: f32 = 0.4;
}

/// Brightness gesture tuning on the collapsed status bar.
pub mod brightness {
    /// Long-press delay before brightness adjustment starts (ms).
    pub const LONG_PRESS_TIMEOUT_MS: u64 = 750;

    /// Fraction of the screen width on each side that maps to min/max brightness.
    pub const EDGE_PADDING: f32 = 0.15;

    /// Number of horizontal moves needed before brightness follows the finger.
    pub const LINGER_THRESHOLD: u32 = 20;
}

/// Fade durations for auxiliary status bar elements.
pub mod fade {
    /// Clear-all button fade (ms).
    pub const CLEAR_BUTTON_MS: u64 = 250;

    /// Lights-out dot fade when showing (ms).
    pub const LIGHTS_OUT_DOT_IN_MS: u64 = 750;

    /// Lights-out dot fade when hiding (ms).
    pub const LIGHTS_OUT_DOT_OUT_MS: u64 = 250;

    /// System icon and notification icon area fade (ms).
    pub const ICON_AREA_MS: u64 = 175;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flip_duration_is_sum_of_halves() {
        assert_eq!(flip::DURATION_MS, 350);
        assert!(flip::SETTLE_LEAD_MS < flip::DURATION_MS);
    }

    #[test]
    fn test_user_autohide_is_shorter_than_autohide() {
        assert!(timing::USER_AUTOHIDE_TIMEOUT_MS < timing::AUTOHIDE_TIMEOUT_MS);
    }

    #[test]
    fn test_brightness_padding_leaves_usable_range() {
        assert!(brightness::EDGE_PADDING * 2.0 < 1.0);
    }
}
