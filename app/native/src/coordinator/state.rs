//! Coordinator-owned state and its serializable snapshot.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::animation::{Element, ElementState};
use crate::bar::{BarMode, WindowShowState};
use crate::config::ClockStyle;
use crate::flags::{BarWindows, DisableFlags, VisibilityFlags};
use crate::heads_up::{HeadsUpAnchor, HeadsUpEntry, HeadsUpPhase, SwipePresentation};
use crate::panel::PanelState;
use crate::timer::TimerName;

/// Progress of a brightness drag along the status bar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BrightnessGesture {
    pub initial_x: i32,
    pub initial_y: i32,
    /// Horizontal-dominant moves seen so far.
    pub linger: u32,
    /// The gesture started inside the header and has not left the peek area.
    pub just_peeked: bool,
}

/// Flags and bookkeeping that no component owns.
#[derive(Clone, Debug, PartialEq)]
pub struct CoordinatorState {
    pub visibility: VisibilityFlags,
    pub disabled: DisableFlags,
    pub user_setup: bool,
    /// The host window currently covers the screen for the expanded panel.
    pub expanded_window: bool,
    /// Target of the lights-out dot, independent of its running fade.
    pub lights_out_dot: bool,
    pub brightness: BrightnessGesture,
    /// Last level sent to the host by brightness control.
    pub brightness_level: Option<u8>,
    pub heads_up_swipe: Option<SwipePresentation>,
}

impl CoordinatorState {
    #[must_use]
    pub const fn new(user_setup: bool) -> Self {
        Self {
            visibility: VisibilityFlags::empty(),
            disabled: DisableFlags::empty(),
            user_setup,
            expanded_window: false,
            lights_out_dot: false,
            brightness: BrightnessGesture {
                initial_x: 0,
                initial_y: 0,
                linger: 0,
                just_peeked: false,
            },
            brightness_level: None,
            heads_up_swipe: None,
        }
    }

    #[must_use]
    pub const fn panels_enabled(&self) -> bool { !self.disabled.contains(DisableFlags::EXPAND) }

    #[must_use]
    pub const fn lights_on(&self) -> bool { !self.visibility.contains(VisibilityFlags::LOW_PROFILE) }

    /// Navigation gestures (home hold for search) are ignored before setup
    /// and while search is disabled.
    #[must_use]
    pub const fn navbar_gestures_disabled(&self) -> bool {
        !self.user_setup || self.disabled.contains(DisableFlags::SEARCH)
    }
}

/// A pending timer in a snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerView {
    pub name: TimerName,
    pub deadline_ms: u64,
}

/// Heads-up slot in a snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadsUpView {
    pub phase: HeadsUpPhase,
    pub entry: Option<HeadsUpEntry>,
    pub anchor: HeadsUpAnchor,
    pub snoozed: bool,
}

/// Bar modes and window states in a snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarsView {
    pub status_mode: BarMode,
    pub navigation_mode: BarMode,
    pub status_window: WindowShowState,
    pub navigation_window: WindowShowState,
    pub interacting: BarWindows,
    pub autohide_suspended: bool,
    pub demo_mode: bool,
}

/// Point-in-time view of the whole coordinator.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub now_ms: u64,
    pub visibility: VisibilityFlags,
    pub disabled: DisableFlags,
    pub user_setup: bool,
    pub bars: BarsView,
    pub panel: PanelState,
    pub expanded_visible: bool,
    pub expanded_window: bool,
    pub heads_up: HeadsUpView,
    pub timers: Vec<TimerView>,
    pub notifications: usize,
    pub clock_style: ClockStyle,
    pub clock_visible: bool,
    pub brightness_level: Option<u8>,
    pub elements: BTreeMap<Element, ElementState>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panels_enabled_follows_expand_bit() {
        let mut state = CoordinatorState::new(true);
        assert!(state.panels_enabled());
        state.disabled = DisableFlags::EXPAND | DisableFlags::CLOCK;
        assert!(!state.panels_enabled());
    }

    #[test]
    fn test_navbar_gestures() {
        let mut state = CoordinatorState::new(false);
        assert!(state.navbar_gestures_disabled());
        state.user_setup = true;
        assert!(!state.navbar_gestures_disabled());
        state.disabled = DisableFlags::SEARCH;
        assert!(state.navbar_gestures_disabled());
    }

    #[test]
    fn test_lights_on() {
        let mut state = CoordinatorState::new(true);
        assert!(state.lights_on());
        state.visibility = VisibilityFlags::LOW_PROFILE;
        assert!(!state.lights_on());
    }
}
