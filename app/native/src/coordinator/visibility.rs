//! System UI visibility, bar modes, auto-hide and interaction.

use super::StatusBarCoordinator;
use super::events::{Touch, TouchAction};
use crate::autohide::AutoHideScheduler;
use crate::bar::{BarTransitions, WindowShowState};
use crate::flags::{BarSide, BarWindows, CollapseFlags, VisibilityFlags};
use crate::host::{HostRequest, WindowHost};
use crate::interaction::InteractionChange;
use crate::notification::NotificationStore;
use crate::timer::TimerName;

impl<H: WindowHost, B: BarTransitions, S: NotificationStore> StatusBarCoordinator<H, B, S> {
    /// Merges `vis` into the visibility flags under `mask`.
    ///
    /// Does nothing when the merged word equals the current one. Otherwise bar
    /// modes and auto-hide follow the new flags, one-shot unhide bits are
    /// consumed and the resulting flags are reported to the host.
    pub fn set_system_ui_visibility(&mut self, vis: VisibilityFlags, mask: VisibilityFlags) {
        let old = self.state.visibility;
        let new = old.merged(vis, mask);
        let diff = old ^ new;
        if diff.is_empty() {
            return;
        }
        tracing::debug!(old = ?old, new = ?new, "system ui visibility");
        self.state.visibility = new;

        if diff.contains(VisibilityFlags::LOW_PROFILE) {
            if new.contains(VisibilityFlags::LOW_PROFILE) {
                self.collapse_panels(CollapseFlags::empty());
                self.host_call(HostRequest::HaltTicker);
            }
            self.set_are_there_notifications();
        }

        let update = self.bars.update_modes(old, new);
        if update.any() {
            self.check_bar_modes();
        }
        let visible_mode_changed = (update.status_changed && BarSide::Status.is_visible(new))
            || (update.navigation_changed && BarSide::Navigation.is_visible(new));
        self.sync_autohide(visible_mode_changed);

        if new.intersects(VisibilityFlags::UNHIDE) {
            self.state.visibility = new.difference(VisibilityFlags::UNHIDE);
        }
        self.host_call(HostRequest::NotifyVisibilityChanged { flags: self.state.visibility });
    }

    /// Keeps the automatic timer pending exactly while a transient bar is
    /// revealed and nothing is being touched.
    fn sync_autohide(&mut self, visible_mode_changed: bool) {
        let vis = self.state.visibility;
        if !vis.has_transient() {
            self.autohide.cancel_all(&mut self.sched);
        } else if !self.interaction.is_empty() {
            self.autohide.defer();
        } else if visible_mode_changed || !self.sched.is_pending(TimerName::AutoHide) {
            self.autohide.schedule(&mut self.sched);
        }
    }

    /// Hides transient bars when an auto-hide timer fires, if any are still revealed.
    pub(super) fn do_auto_hide(&mut self) {
        if AutoHideScheduler::hide_request(self.state.visibility).is_none() {
            tracing::debug!("auto-hide fired without a transient bar");
            return;
        }
        self.set_system_ui_visibility(VisibilityFlags::empty(), VisibilityFlags::TRANSIENT);
    }

    /// Arms the short hide after a tap outside a revealed bar.
    pub(super) fn check_user_autohide(&mut self, touch: Touch) {
        if self.state.visibility.has_transient()
            && touch.action == TouchAction::Outside
            && touch.x == 0
            && touch.y == 0
        {
            tracing::debug!("outside touch, hiding transient bars");
            AutoHideScheduler::user_initiated_hide(&mut self.sched);
        }
    }

    pub fn set_lights_on(&mut self, on: bool) {
        let vis = if on { VisibilityFlags::empty() } else { VisibilityFlags::LOW_PROFILE };
        self.set_system_ui_visibility(vis, VisibilityFlags::LOW_PROFILE);
    }

    /// Apps showing a legacy menu button always get lights on.
    pub fn top_app_window_changed(&mut self, show_menu: bool) {
        if show_menu {
            self.set_lights_on(true);
        }
    }

    // ========================================================================
    // Interaction
    // ========================================================================

    /// Marks a bar window as touched or released.
    pub fn set_interacting(&mut self, side: BarSide, interacting: bool) {
        match self.interaction.set_interacting(side.window(), interacting) {
            InteractionChange::Engaged => {
                self.autohide.suspend(&mut self.sched, self.state.visibility);
            }
            InteractionChange::Released => {
                if self.autohide.resume(&mut self.sched) {
                    tracing::debug!("auto-hide resumed");
                }
            }
        }
        self.check_bar_modes();
    }

    // ========================================================================
    // Bar modes and windows
    // ========================================================================

    /// Pushes bar modes to the surfaces.
    pub fn check_bar_modes(&mut self) {
        let force_status_opaque = self.state.panels_enabled()
            && !self.panel.has_flip_settings()
            && self.interaction.is_interacting(BarWindows::STATUS_BAR);
        self.bars.check_bar_modes(force_status_opaque);
    }

    /// Records a bar window show state. A hidden status bar takes the
    /// expanded panel down with it.
    pub fn set_window_state(&mut self, side: BarSide, state: WindowShowState) {
        if !self.bars.set_window_state(side, state) || side != BarSide::Status {
            return;
        }
        if state == WindowShowState::Hidden {
            self.collapse_immediately();
        }
        self.check_bar_modes();
    }
}
