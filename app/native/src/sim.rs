//! In-memory coordinator wired to recording collaborators.
//!
//! Used by unit and integration tests and by `shade replay`, where scripted
//! events run on the virtual clock and every outward call is kept for
//! inspection.

use crate::bar::{BarSurfaces, RecordingTransitions};
use crate::config::ShadeConfig;
use crate::coordinator::{Event, StatusBarCoordinator};
use crate::host::RecordingHost;
use crate::notification::NotificationList;

/// Coordinator with recording collaborators.
pub type SimCoordinator = StatusBarCoordinator<RecordingHost, RecordingTransitions, NotificationList>;

/// Recording surfaces for a device with a navigation bar.
#[must_use]
pub fn recording_surfaces() -> BarSurfaces<RecordingTransitions> {
    BarSurfaces {
        status: RecordingTransitions::new(),
        navigation: Some(RecordingTransitions::new()),
        blocker: RecordingTransitions::new(),
    }
}

/// Owns a [`SimCoordinator`] and offers shortcuts to its collaborators.
#[derive(Debug)]
pub struct Harness {
    pub coordinator: SimCoordinator,
}

impl Default for Harness {
    fn default() -> Self { Self::new() }
}

impl Harness {
    /// A harness with the default configuration. Nothing has been sent to
    /// the host yet.
    #[must_use]
    pub fn new() -> Self { Self::from_config(ShadeConfig::default()) }

    /// A harness with the default configuration adjusted by `adjust`.
    #[must_use]
    pub fn with_config(adjust: impl FnOnce(&mut ShadeConfig)) -> Self {
        let mut config = ShadeConfig::default();
        adjust(&mut config);
        Self::from_config(config)
    }

    #[must_use]
    pub fn from_config(config: ShadeConfig) -> Self {
        Self {
            coordinator: StatusBarCoordinator::new(
                config,
                RecordingHost::new(),
                recording_surfaces(),
                NotificationList::new(),
            ),
        }
    }

    pub fn handle(&mut self, event: Event) { self.coordinator.handle(event); }

    /// Handles events in order.
    pub fn run(&mut self, events: impl IntoIterator<Item = Event>) {
        for event in events {
            self.coordinator.handle(event);
        }
    }

    #[must_use]
    pub fn status_surface(&self) -> &RecordingTransitions { &self.coordinator.bars().surfaces().status }

    #[must_use]
    pub fn navigation_surface(&self) -> Option<&RecordingTransitions> {
        self.coordinator.bars().surfaces().navigation.as_ref()
    }

    #[must_use]
    pub fn blocker_surface(&self) -> &RecordingTransitions { &self.coordinator.bars().surfaces().blocker }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bar::{BarMode, BarTransitions};
    use crate::flags::VisibilityFlags;

    #[test]
    fn test_run_applies_events_in_order() {
        let mut h = Harness::new();
        h.run([
            Event::SetSystemUiVisibility {
                vis: VisibilityFlags::NAVIGATION_BAR_TRANSLUCENT,
                mask: VisibilityFlags::NAVIGATION_BAR_TRANSLUCENT,
            },
            Event::Advance { ms: 10 },
        ]);
        assert_eq!(h.coordinator.now_ms(), 10);
        assert_eq!(h.navigation_surface().unwrap().mode(), BarMode::Translucent);
        assert_eq!(h.blocker_surface().mode(), BarMode::Opaque);
    }
}
