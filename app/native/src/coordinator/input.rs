//! Touch input on the bars: interception, brightness drag and home hold.

use super::StatusBarCoordinator;
use super::events::{Touch, TouchAction};
use super::state::BrightnessGesture;
use crate::bar::{BarTransitions, WindowShowState};
use crate::constants::brightness;
use crate::flags::BarSide;
use crate::host::{HostRequest, WindowHost};
use crate::notification::NotificationStore;
use crate::timer::{TimerName, TimerPayload};

/// Maps a horizontal position to a brightness level in `[min, 255]`.
///
/// The outer 15% on each side of the screen pin the level to the ends of the
/// range.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // clamped to u8 range
pub fn brightness_for(x: i32, width: u32, min: u8) -> u8 {
    if width == 0 {
        return min;
    }
    let padding = f64::from(brightness::EDGE_PADDING);
    let raw = f64::from(x) / f64::from(width);
    let value = (raw.clamp(padding, 1.0 - padding) - padding) / (1.0 - 2.0 * padding);
    let span = f64::from(u8::MAX - min);
    let level = f64::from(min) + (value * span).round();
    level.clamp(f64::from(min), f64::from(u8::MAX)) as u8
}

fn pixels(value: u32) -> i32 { i32::try_from(value).unwrap_or(i32::MAX) }

impl<H: WindowHost, B: BarTransitions, S: NotificationStore> StatusBarCoordinator<H, B, S> {
    /// Looks at a touch on the status bar before the bar handles it.
    ///
    /// Returns true when the touch must be swallowed because expansion is
    /// disabled.
    pub fn intercept_touch(&mut self, touch: Touch) -> bool {
        if self.config.status_bar.brightness_control {
            self.brightness_control(touch);
        }
        if !self.state.panels_enabled() {
            return true;
        }
        if self.bars.window_state(BarSide::Status) == WindowShowState::Showing {
            let released = touch.action.is_up_or_cancel() && !self.panel.is_expanded_visible();
            self.set_interacting(BarSide::Status, !released);
        }
        false
    }

    // ========================================================================
    // Brightness
    // ========================================================================

    fn brightness_control(&mut self, touch: Touch) {
        let header = pixels(self.config.display.header_height);
        let slop = pixels(self.config.display.touch_slop);
        let gesture = &mut self.state.brightness;

        match touch.action {
            TouchAction::Down => {
                if touch.y < header {
                    *gesture = BrightnessGesture {
                        initial_x: touch.x,
                        initial_y: touch.y,
                        linger: 0,
                        just_peeked: true,
                    };
                    self.sched.schedule(
                        TimerName::LongPressBrightness,
                        brightness::LONG_PRESS_TIMEOUT_MS,
                        TimerPayload::None,
                    );
                }
            }
            TouchAction::Move if touch.y < header && gesture.just_peeked => {
                if gesture.linger > brightness::LINGER_THRESHOLD {
                    self.adjust_brightness(touch.x);
                } else {
                    let x_diff = (touch.x - gesture.initial_x).abs();
                    let y_diff = (touch.y - gesture.initial_y).abs();
                    if x_diff > y_diff {
                        gesture.linger += 1;
                    }
                    if x_diff > slop || y_diff > slop {
                        self.sched.cancel(TimerName::LongPressBrightness);
                    }
                }
            }
            TouchAction::Move => {
                if touch.y > header {
                    gesture.just_peeked = false;
                }
                self.sched.cancel(TimerName::LongPressBrightness);
            }
            TouchAction::Up | TouchAction::Cancel => {
                self.sched.cancel(TimerName::LongPressBrightness);
            }
            TouchAction::Outside => {}
        }
    }

    /// Long press elapsed: start following the finger.
    pub(super) fn on_long_press_brightness(&mut self) {
        if !self.config.status_bar.brightness_control || !self.state.brightness.just_peeked {
            tracing::debug!("brightness long press no longer applies");
            return;
        }
        self.adjust_brightness(self.state.brightness.initial_x);
        self.state.brightness.linger = brightness::LINGER_THRESHOLD + 1;
    }

    fn adjust_brightness(&mut self, x: i32) {
        let display = &self.config.display;
        let level = brightness_for(x, display.width, display.min_brightness);
        tracing::trace!(x, level, "brightness drag");
        self.state.brightness_level = Some(level);
        self.host_call(HostRequest::SetBrightness { level });
    }

    // ========================================================================
    // Home button
    // ========================================================================

    /// Holding home opens the search panel after the hold-off.
    pub fn home_touch(&mut self, action: TouchAction) {
        match action {
            TouchAction::Down if !self.state.navbar_gestures_disabled() => {
                self.sched.schedule(
                    TimerName::SearchPanelShow,
                    self.config.display.search_holdoff_ms,
                    TimerPayload::None,
                );
            }
            TouchAction::Up | TouchAction::Cancel => {
                self.sched.cancel(TimerName::SearchPanelShow);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::{BarWindows, DisableFlags};
    use crate::sim::Harness;

    fn brightness_harness() -> Harness { Harness::with_config(|c| c.status_bar.brightness_control = true) }

    #[test]
    fn test_brightness_for_edges_and_middle() {
        assert_eq!(brightness_for(0, 1000, 10), 10);
        assert_eq!(brightness_for(150, 1000, 10), 10);
        assert_eq!(brightness_for(850, 1000, 10), 255);
        assert_eq!(brightness_for(2000, 1000, 10), 255);
        let mid = brightness_for(500, 1000, 10);
        assert!((130..=135).contains(&mid));
        assert_eq!(brightness_for(500, 0, 42), 42);
    }

    #[test]
    fn test_long_press_starts_brightness() {
        let mut h = brightness_harness();
        h.coordinator.intercept_touch(Touch::new(TouchAction::Down, 100, 10));
        assert!(h.coordinator.scheduler().is_pending(TimerName::LongPressBrightness));

        h.coordinator.advance_by(750);
        assert_eq!(h.coordinator.state().brightness_level, Some(10));

        h.coordinator.intercept_touch(Touch::new(TouchAction::Move, 900, 10));
        assert!(h.coordinator.state().brightness_level.unwrap() > 200);
        assert!(h.coordinator.host().saw(|r| matches!(r, HostRequest::SetBrightness { .. })));
    }

    #[test]
    fn test_horizontal_linger_starts_brightness() {
        let mut h = brightness_harness();
        h.coordinator.intercept_touch(Touch::new(TouchAction::Down, 500, 10));
        for i in 1..=25 {
            h.coordinator.intercept_touch(Touch::new(TouchAction::Move, 500 + i, 10));
        }
        assert!(!h.coordinator.scheduler().is_pending(TimerName::LongPressBrightness));
        assert!(h.coordinator.state().brightness_level.is_some());
    }

    #[test]
    fn test_leaving_header_cancels_brightness() {
        let mut h = brightness_harness();
        h.coordinator.intercept_touch(Touch::new(TouchAction::Down, 100, 10));
        h.coordinator.intercept_touch(Touch::new(TouchAction::Move, 100, 200));
        assert!(!h.coordinator.scheduler().is_pending(TimerName::LongPressBrightness));
        assert!(!h.coordinator.state().brightness.just_peeked);

        h.coordinator.advance_by(1000);
        assert_eq!(h.coordinator.state().brightness_level, None);
    }

    #[test]
    fn test_brightness_off_by_default() {
        let mut h = Harness::new();
        h.coordinator.intercept_touch(Touch::new(TouchAction::Down, 100, 10));
        assert!(!h.coordinator.scheduler().is_pending(TimerName::LongPressBrightness));
    }

    #[test]
    fn test_intercept_tracks_interaction() {
        let mut h = Harness::new();
        assert!(!h.coordinator.intercept_touch(Touch::new(TouchAction::Down, 10, 10)));
        assert!(h.coordinator.interaction().is_interacting(BarWindows::STATUS_BAR));

        h.coordinator.intercept_touch(Touch::new(TouchAction::Up, 10, 10));
        assert!(!h.coordinator.interaction().is_interacting(BarWindows::STATUS_BAR));
    }

    #[test]
    fn test_intercept_swallows_when_expand_disabled() {
        let mut h = Harness::new();
        h.coordinator.disable(DisableFlags::EXPAND);
        assert!(h.coordinator.intercept_touch(Touch::new(TouchAction::Down, 10, 10)));
        assert!(!h.coordinator.interaction().is_interacting(BarWindows::STATUS_BAR));
    }

    #[test]
    fn test_home_hold_shows_search_unless_released() {
        let mut h = Harness::new();
        h.coordinator.home_touch(TouchAction::Down);
        h.coordinator.advance_by(100);
        h.coordinator.home_touch(TouchAction::Up);
        h.coordinator.advance_by(1000);
        assert!(!h.coordinator.host().saw(|r| *r == HostRequest::ShowSearchPanel));

        h.coordinator.home_touch(TouchAction::Down);
        h.coordinator.advance_by(300);
        assert!(h.coordinator.host().saw(|r| *r == HostRequest::ShowSearchPanel));
    }

    #[test]
    fn test_home_hold_ignored_before_setup() {
        let mut h = Harness::with_config(|c| c.user_setup_complete = false);
        h.coordinator.home_touch(TouchAction::Down);
        assert!(!h.coordinator.scheduler().is_pending(TimerName::SearchPanelShow));
    }
}
