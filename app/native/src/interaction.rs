//! Tracks which bar windows the user is currently touching.

use crate::flags::BarWindows;

/// Effect of an interaction update on the interacting set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InteractionChange {
    /// The set is non-empty after the update.
    Engaged,
    /// The set is empty after the update.
    Released,
}

/// The interacting window set.
///
/// While any window is interacting, auto-hide is suspended.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InteractionTracker {
    interacting: BarWindows,
}

impl InteractionTracker {
    #[must_use]
    pub const fn new() -> Self { Self { interacting: BarWindows::empty() } }

    /// Marks `window` as interacting or not and reports whether the set is
    /// engaged afterwards. Every call reports, even when nothing changed.
    pub fn set_interacting(&mut self, window: BarWindows, interacting: bool) -> InteractionChange {
        self.interacting.set(window, interacting);
        if self.interacting.is_empty() {
            InteractionChange::Released
        } else {
            InteractionChange::Engaged
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool { self.interacting.is_empty() }

    #[must_use]
    pub const fn is_interacting(&self, window: BarWindows) -> bool {
        self.interacting.contains(window)
    }

    #[must_use]
    pub const fn windows(&self) -> BarWindows { self.interacting }

    pub fn clear(&mut self) { self.interacting = BarWindows::empty(); }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engage_and_release() {
        let mut tracker = InteractionTracker::new();
        assert!(tracker.is_empty());

        assert_eq!(
            tracker.set_interacting(BarWindows::STATUS_BAR, true),
            InteractionChange::Engaged
        );
        assert_eq!(
            tracker.set_interacting(BarWindows::NAVIGATION_BAR, true),
            InteractionChange::Engaged
        );
        assert_eq!(
            tracker.set_interacting(BarWindows::STATUS_BAR, false),
            InteractionChange::Engaged
        );
        assert!(tracker.is_interacting(BarWindows::NAVIGATION_BAR));
        assert!(!tracker.is_interacting(BarWindows::STATUS_BAR));

        assert_eq!(
            tracker.set_interacting(BarWindows::NAVIGATION_BAR, false),
            InteractionChange::Released
        );
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_release_of_idle_window_reports_released() {
        let mut tracker = InteractionTracker::new();
        assert_eq!(
            tracker.set_interacting(BarWindows::STATUS_BAR, false),
            InteractionChange::Released
        );
    }

    #[test]
    fn test_clear() {
        let mut tracker = InteractionTracker::new();
        tracker.set_interacting(BarWindows::all(), true);
        tracker.clear();
        assert_eq!(tracker.windows(), BarWindows::empty());
    }
}
