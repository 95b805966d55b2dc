//! Panel expansion, collapse, toggles and flips.

use super::StatusBarCoordinator;
use crate::animation::Element;
use crate::bar::BarTransitions;
use crate::constants::{flip, timing};
use crate::flags::{BarSide, CollapseFlags, DisableFlags};
use crate::host::{ExpandedWindowLayout, HostRequest, WindowHost};
use crate::notification::NotificationStore;
use crate::panel::PanelRefusal;
use crate::timer::{TimerName, TimerPayload};

impl<H: WindowHost, B: BarTransitions, S: NotificationStore> StatusBarCoordinator<H, B, S> {
    // ========================================================================
    // Expansion
    // ========================================================================

    pub fn expand_notifications(&mut self) {
        let gate = self.panel_gate();
        let result = self.panel.expand_notifications(gate, &mut self.driver);
        self.after_expand("expand notifications", result);
    }

    /// Opens the settings side, flipping when `flip` is true.
    pub fn expand_settings(&mut self, flip: bool) {
        let gate = self.panel_gate();
        let result = self.panel.expand_settings(gate, flip, &mut self.driver);
        self.after_expand("expand settings", result);
    }

    fn after_expand(&mut self, action: &'static str, result: Result<bool, PanelRefusal>) {
        match result {
            Ok(opened) => {
                self.sched.cancel(TimerName::CollapseSettle);
                if opened {
                    self.on_expanded_visible();
                }
                self.schedule_flip_settle();
            }
            Err(refusal) => tracing::debug!(action, ?refusal, "panel request refused"),
        }
    }

    /// Grows the host window to full height and holds the status bar as
    /// interacting while the panel is open.
    fn on_expanded_visible(&mut self) {
        self.state.expanded_window = true;
        self.host_call(HostRequest::UpdateExpandedWindow(ExpandedWindowLayout {
            full_height: true,
            focusable: true,
        }));
        self.set_interacting(BarSide::Status, true);
    }

    // ========================================================================
    // Toggles
    // ========================================================================

    /// Opens notifications, moves from settings to notifications, or closes.
    pub fn toggle_notification_shade(&mut self) {
        if self.panel.is_expanded_visible() {
            if self.panel.settings_showing(&self.driver) {
                self.expand_notifications();
            } else {
                self.collapse_panels(CollapseFlags::empty());
            }
        } else {
            self.host_call(HostRequest::ToggleStatusBar);
            self.expand_notifications();
        }
    }

    /// Opens settings, moves from notifications to settings, or closes.
    pub fn toggle_settings_shade(&mut self) {
        let expanded = self.panel.is_expanded_visible();
        if expanded && self.panel.has_flip_settings() && !self.panel.settings_showing(&self.driver) {
            self.flip_to_settings();
        } else if expanded {
            self.collapse_panels(CollapseFlags::empty());
        } else if self.state.user_setup {
            self.host_call(HostRequest::ToggleStatusBar);
            self.expand_settings(false);
        } else {
            tracing::debug!("settings shade unavailable before setup");
        }
    }

    // ========================================================================
    // Flips
    // ========================================================================

    pub fn flip_to_notifications(&mut self) {
        let result = self.panel.flip_to_notifications(&mut self.driver);
        self.after_flip("flip to notifications", result);
    }

    pub fn flip_to_settings(&mut self) {
        if let Err(refusal) = self.settings_reachable() {
            tracing::debug!(?refusal, "flip to settings refused");
            return;
        }
        let result = self.panel.flip_to_settings(&mut self.driver);
        self.after_flip("flip to settings", result);
    }

    /// Shows the settings side without animating.
    pub fn switch_to_settings(&mut self) {
        if let Err(refusal) = self.settings_reachable() {
            tracing::debug!(?refusal, "switch to settings refused");
            return;
        }
        if let Err(refusal) = self.panel.switch_to_settings(&mut self.driver) {
            tracing::debug!(?refusal, "switch to settings refused");
            return;
        }
        self.set_are_there_notifications();
    }

    pub fn flip_panels(&mut self) {
        if self.panel.settings_showing(&self.driver) {
            self.flip_to_notifications();
        } else {
            self.flip_to_settings();
        }
    }

    /// Follows a drag between the two sides.
    pub fn partial_flip(&mut self, progress: f32) {
        let gate = self.panel_gate();
        if let Err(refusal) = self.panel.partial_flip(progress, gate, &mut self.driver) {
            tracing::debug!(progress, ?refusal, "partial flip refused");
        }
    }

    pub fn complete_partial_flip(&mut self) {
        let result = self.panel.complete_partial_flip(&mut self.driver);
        self.after_flip("complete partial flip", result);
    }

    fn after_flip(&mut self, action: &'static str, result: Result<(), PanelRefusal>) {
        match result {
            Ok(()) => self.schedule_flip_settle(),
            Err(refusal) => tracing::debug!(action, ?refusal, "panel request refused"),
        }
    }

    fn settings_reachable(&self) -> Result<(), PanelRefusal> {
        let gate = self.panel_gate();
        if !gate.panels_enabled {
            Err(PanelRefusal::PanelsDisabled)
        } else if !gate.user_setup {
            Err(PanelRefusal::UserSetupIncomplete)
        } else {
            Ok(())
        }
    }

    fn schedule_flip_settle(&mut self) {
        self.sched.schedule(
            TimerName::FlipSettle,
            flip::DURATION_MS - flip::SETTLE_LEAD_MS,
            TimerPayload::None,
        );
    }

    // ========================================================================
    // Collapse
    // ========================================================================

    /// Collapses every panel.
    ///
    /// Sub-panels are closed unless excluded. Panel elements reset at once;
    /// the host window shrinks shortly after.
    pub fn collapse_panels(&mut self, flags: CollapseFlags) {
        self.release_and_close_sub_panels(flags);
        if !self.panel.collapse(&mut self.driver) {
            return;
        }
        self.sched.cancel(TimerName::FlipSettle);
        self.sched.schedule(TimerName::CollapseSettle, timing::COLLAPSE_SETTLE_MS, TimerPayload::None);
        self.set_are_there_notifications();
        self.check_bar_modes();
    }

    /// Collapses and shrinks the host window without waiting.
    pub(super) fn collapse_immediately(&mut self) {
        if self.panel.is_expanded_visible() || self.state.expanded_window {
            self.release_and_close_sub_panels(CollapseFlags::empty());
        }
        self.panel.collapse(&mut self.driver);
        self.sched.cancel(TimerName::FlipSettle);
        self.sched.cancel(TimerName::CollapseSettle);
        if self.state.expanded_window {
            self.shrink_expanded_window();
        }
    }

    /// Gives up input focus and closes the sub-panels not excluded by `flags`.
    fn release_and_close_sub_panels(&mut self, flags: CollapseFlags) {
        if self.state.expanded_window {
            self.host_call(HostRequest::ReleaseFocus);
        }
        if !flags.contains(CollapseFlags::EXCLUDE_RECENTS) {
            self.host_call(HostRequest::CloseRecents);
        }
        if !flags.contains(CollapseFlags::EXCLUDE_SEARCH) {
            self.host_call(HostRequest::CloseSearchPanel);
        }
    }

    /// Returns the host window to the status bar strip.
    pub(super) fn shrink_expanded_window(&mut self) {
        self.state.expanded_window = false;
        self.host_call(HostRequest::UpdateExpandedWindow(ExpandedWindowLayout {
            full_height: false,
            focusable: false,
        }));
        self.set_are_there_notifications();
        if !self.state.disabled.contains(DisableFlags::NOTIFICATION_ICONS)
            && !self.driver.is_visible(Element::NotificationIcons)
        {
            self.fade_icon_area(Element::NotificationIcons, true);
        }
        self.set_interacting(BarSide::Status, false);
    }
}
