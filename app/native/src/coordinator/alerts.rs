//! Notifications, the heads-up slot and the summary elements on the bar.

use super::StatusBarCoordinator;
use crate::animation::{Element, Property, Transition, Visibility};
use crate::bar::BarTransitions;
use crate::constants::fade;
use crate::flags::{CollapseFlags, DisableFlags};
use crate::heads_up::{AdmissionContext, DismissDirection, swipe_presentation};
use crate::host::{HostRequest, WindowHost};
use crate::notification::{Notification, NotificationStore};

impl<H: WindowHost, B: BarTransitions, S: NotificationStore> StatusBarCoordinator<H, B, S> {
    // ========================================================================
    // Notifications
    // ========================================================================

    /// Stores a posted notification and offers it to the heads-up slot.
    ///
    /// A notification that cannot be presented but carries a full-screen
    /// action fires that action instead.
    pub fn add_notification(&mut self, notification: Notification) {
        self.notifications.upsert(notification.clone());
        self.offer_heads_up(&notification, true);
        self.set_are_there_notifications();
    }

    /// Replaces a posted notification.
    ///
    /// The presented notification restarts its decay. Others may interrupt
    /// when updates are configured to alert.
    pub fn update_notification(&mut self, notification: Notification) {
        let presented = self.heads_up.active_key() == Some(notification.key.as_str());
        self.notifications.upsert(notification.clone());
        if presented {
            self.heads_up.reset_decay_timer(&mut self.sched);
        } else if self.config.heads_up.show_updates {
            self.offer_heads_up(&notification, false);
        }
        self.set_are_there_notifications();
    }

    pub fn remove_notification(&mut self, key: &str) {
        if self.notifications.remove(key).is_none() {
            tracing::debug!(key, "removed notification was not posted");
        }
        if self.heads_up.on_notification_removed(key, &mut self.sched).is_some() {
            self.heads_up_left();
        }
        self.set_are_there_notifications();

        if self.notifications.is_empty()
            && self.panel.is_expanded_visible()
            && !self.panel.settings_showing(&self.driver)
        {
            tracing::debug!("last notification removed, collapsing");
            self.collapse_panels(CollapseFlags::empty());
        }
    }

    fn offer_heads_up(&mut self, notification: &Notification, allow_full_screen: bool) {
        let ctx = AdmissionContext {
            panels_enabled: self.state.panels_enabled(),
            panels_expanded: self.panel.is_expanded_visible(),
            alerts_disabled: self.state.disabled.contains(DisableFlags::NOTIFICATION_ALERTS),
        };
        match self.heads_up.populate(notification, ctx, self.now_ms()) {
            Ok(()) => {
                self.heads_up.show(&mut self.sched);
                let request = self.heads_up.entry().map(|entry| HostRequest::ShowHeadsUp {
                    key: entry.key.clone(),
                    expanded: entry.expanded,
                    snooze_available: self.heads_up.snooze_available(),
                });
                if let Some(request) = request {
                    self.host_call(request);
                }
            }
            Err(refusal) => {
                tracing::debug!(key = %notification.key, ?refusal, "heads-up refused");
                if allow_full_screen && notification.full_screen_intent {
                    self.host_call(HostRequest::SendFullScreenIntent {
                        key: notification.key.clone(),
                    });
                }
            }
        }
    }

    // ========================================================================
    // Heads-up gestures
    // ========================================================================

    pub fn hide_heads_up(&mut self) {
        if self.heads_up.hide(&mut self.sched).is_some() {
            self.heads_up_left();
        }
    }

    /// Swipe-dismisses the alert. Only a left swipe on a clearable
    /// notification clears it.
    pub fn dismiss_heads_up(&mut self, direction: DismissDirection) {
        let Some(dismissal) = self.heads_up.dismiss(direction, &mut self.sched) else {
            return;
        };
        self.heads_up_left();
        if dismissal.clear {
            self.host_call(HostRequest::ClearNotification { key: dismissal.entry.key });
        }
    }

    /// Fires the full-screen action of the alert before hiding it.
    pub fn escalate_heads_up(&mut self) {
        let Some(entry) = self.heads_up.escalate(&mut self.sched) else {
            return;
        };
        if entry.full_screen_intent {
            self.host_call(HostRequest::SendFullScreenIntent { key: entry.key });
        }
        self.heads_up_left();
    }

    pub fn snooze_heads_up(&mut self) {
        let now_ms = self.now_ms();
        if self.heads_up.snooze(now_ms, &mut self.sched).is_some() {
            self.heads_up_left();
        }
    }

    /// Tracks the alert's presentation while it is dragged.
    pub fn swipe_heads_up(&mut self, animate_into: bool, fraction: f32) {
        if self.heads_up.entry().is_none() {
            return;
        }
        let offset = self.config.display.heads_up_vertical_offset;
        self.state.heads_up_swipe = Some(swipe_presentation(animate_into, fraction, offset));
    }

    pub(super) fn heads_up_left(&mut self) {
        self.state.heads_up_swipe = None;
        self.host_call(HostRequest::HideHeadsUp);
    }

    // ========================================================================
    // Anchor
    // ========================================================================

    pub fn set_ime_showing(&mut self, showing: bool) {
        if self.heads_up.set_ime_showing(showing) {
            self.update_heads_up_layout();
        }
    }

    pub fn set_status_bar_shows(&mut self, shows: bool) {
        if self.heads_up.set_status_bar_shows(shows) {
            self.update_heads_up_layout();
        }
    }

    pub(super) fn update_heads_up_layout(&mut self) {
        self.host_call(HostRequest::UpdateHeadsUpLayout(self.heads_up.anchor()));
    }

    // ========================================================================
    // Summary elements
    // ========================================================================

    /// Brings the clear-all button and the lights-out dot in line with the
    /// notification store.
    pub(crate) fn set_are_there_notifications(&mut self) {
        let any = self.notifications.has_visible_items();
        let clearable = any && self.notifications.has_clearable_items();
        self.panel.update_clear_button(clearable, &mut self.driver);

        let show_dot = any && !self.state.lights_on();
        if show_dot == self.state.lights_out_dot {
            return;
        }
        self.state.lights_out_dot = show_dot;
        let dot = Element::LightsOutDot;
        if show_dot {
            self.driver.set_property(dot, Property::Alpha, 0.0);
            self.driver.set_visibility(dot, Visibility::Visible);
            self.driver
                .apply(Transition::animate(dot, Property::Alpha, 1.0, fade::LIGHTS_OUT_DOT_IN_MS));
        } else {
            self.driver.apply(
                Transition::animate(dot, Property::Alpha, 0.0, fade::LIGHTS_OUT_DOT_OUT_MS)
                    .then(Visibility::Gone),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::animation::{Element, Property, Visibility};
    use crate::flags::DisableFlags;
    use crate::heads_up::{DismissDirection, Gravity, HeadsUpPhase};
    use crate::host::HostRequest;
    use crate::notification::{Notification, NotificationStore};
    use crate::sim::Harness;
    use crate::timer::TimerName;

    fn alert(key: &str) -> Notification { Notification::new(key).interrupting() }

    #[test]
    fn test_interrupting_notification_is_shown_and_decays() {
        let mut h = Harness::new();
        h.coordinator.add_notification(alert("a"));
        assert_eq!(h.coordinator.heads_up().phase(), HeadsUpPhase::Shown);
        assert!(h.coordinator.host().saw(|r| matches!(
            r,
            HostRequest::ShowHeadsUp { key, snooze_available: true, .. } if key == "a"
        )));
        assert_eq!(h.coordinator.scheduler().deadline(TimerName::HeadsUpDecay), Some(5000));

        h.coordinator.advance_by(4999);
        assert_eq!(h.coordinator.heads_up().phase(), HeadsUpPhase::Shown);
        h.coordinator.advance_by(1);
        assert_eq!(h.coordinator.heads_up().phase(), HeadsUpPhase::Idle);
        assert!(h.coordinator.host().saw(|r| *r == HostRequest::HideHeadsUp));
        assert_eq!(h.coordinator.notifications().len(), 1);
    }

    #[test]
    fn test_expanded_panel_refuses_heads_up() {
        let mut h = Harness::new();
        h.coordinator.expand_notifications();
        h.coordinator.add_notification(alert("a"));
        assert_eq!(h.coordinator.heads_up().phase(), HeadsUpPhase::Idle);
        assert_eq!(h.coordinator.notifications().len(), 1);
    }

    #[test]
    fn test_alerts_disabled_refuses_heads_up() {
        let mut h = Harness::new();
        h.coordinator.disable(DisableFlags::NOTIFICATION_ALERTS);
        h.coordinator.add_notification(alert("a"));
        assert_eq!(h.coordinator.heads_up().phase(), HeadsUpPhase::Idle);
    }

    #[test]
    fn test_refused_full_screen_intent_fires_directly() {
        let mut h = Harness::new();
        h.coordinator.add_notification(alert("a"));
        let mut call = alert("call");
        call.full_screen_intent = true;
        h.coordinator.add_notification(call);

        assert_eq!(h.coordinator.heads_up().active_key(), Some("a"));
        assert!(h.coordinator.host().saw(|r| {
            *r == HostRequest::SendFullScreenIntent { key: "call".to_string() }
        }));
    }

    #[test]
    fn test_dismiss_direction_asymmetry() {
        let mut h = Harness::new();
        h.coordinator.add_notification(alert("a"));
        h.coordinator.dismiss_heads_up(DismissDirection::Right);
        assert!(!h.coordinator.host().saw(|r| matches!(r, HostRequest::ClearNotification { .. })));

        h.coordinator.add_notification(alert("b"));
        h.coordinator.dismiss_heads_up(DismissDirection::Left);
        assert!(h.coordinator.host().saw(|r| {
            *r == HostRequest::ClearNotification { key: "b".to_string() }
        }));
    }

    #[test]
    fn test_left_dismiss_keeps_unclearable() {
        let mut h = Harness::new();
        let mut ongoing = alert("ongoing");
        ongoing.clearable = false;
        h.coordinator.add_notification(ongoing);
        h.coordinator.dismiss_heads_up(DismissDirection::Left);
        assert!(!h.coordinator.host().saw(|r| matches!(r, HostRequest::ClearNotification { .. })));
        assert_eq!(h.coordinator.heads_up().phase(), HeadsUpPhase::Idle);
    }

    #[test]
    fn test_escalate_fires_intent_before_hiding() {
        let mut h = Harness::new();
        let mut call = alert("call");
        call.full_screen_intent = true;
        h.coordinator.add_notification(call);
        h.coordinator.host_mut().take();

        h.coordinator.escalate_heads_up();
        assert_eq!(
            h.coordinator.host_mut().take(),
            vec![
                HostRequest::SendFullScreenIntent { key: "call".to_string() },
                HostRequest::HideHeadsUp,
            ]
        );
    }

    #[test]
    fn test_snooze_refuses_until_expired() {
        let mut h = Harness::new();
        h.coordinator.add_notification(alert("a"));
        h.coordinator.snooze_heads_up();
        h.coordinator.add_notification(alert("b"));
        assert_eq!(h.coordinator.heads_up().phase(), HeadsUpPhase::Idle);

        h.coordinator.advance_by(60_000);
        h.coordinator.add_notification(alert("c"));
        assert_eq!(h.coordinator.heads_up().active_key(), Some("c"));
    }

    #[test]
    fn test_update_restarts_decay() {
        let mut h = Harness::new();
        h.coordinator.add_notification(alert("a"));
        h.coordinator.advance_by(4000);
        h.coordinator.update_notification(alert("a"));
        assert_eq!(h.coordinator.scheduler().deadline(TimerName::HeadsUpDecay), Some(9000));
    }

    #[test]
    fn test_update_of_other_notification_alerts_only_when_enabled() {
        let mut h = Harness::new();
        h.coordinator.add_notification(Notification::new("quiet"));
        h.coordinator.update_notification(alert("quiet"));
        assert_eq!(h.coordinator.heads_up().phase(), HeadsUpPhase::Idle);

        let mut h = Harness::with_config(|c| c.heads_up.show_updates = true);
        h.coordinator.add_notification(Notification::new("quiet"));
        h.coordinator.update_notification(alert("quiet"));
        assert_eq!(h.coordinator.heads_up().active_key(), Some("quiet"));
    }

    #[test]
    fn test_removal_hides_matching_heads_up() {
        let mut h = Harness::new();
        h.coordinator.add_notification(alert("a"));
        h.coordinator.remove_notification("a");
        assert_eq!(h.coordinator.heads_up().phase(), HeadsUpPhase::Idle);
        assert!(h.coordinator.notifications().is_empty());
        assert!(!h.coordinator.scheduler().is_pending(TimerName::HeadsUpDecay));
    }

    #[test]
    fn test_removing_last_notification_collapses_panel() {
        let mut h = Harness::new();
        h.coordinator.add_notification(Notification::new("a"));
        h.coordinator.expand_notifications();
        h.coordinator.remove_notification("a");
        assert!(!h.coordinator.panel().is_expanded_visible());
    }

    #[test]
    fn test_keyboard_moves_anchor_to_top() {
        let mut h = Harness::with_config(|c| c.heads_up.gravity_bottom = true);
        assert_eq!(h.coordinator.heads_up().anchor().gravity, Gravity::Bottom);

        h.coordinator.set_ime_showing(true);
        assert_eq!(h.coordinator.heads_up().anchor().gravity, Gravity::Top);
        assert!(h.coordinator.host().saw(|r| matches!(r, HostRequest::UpdateHeadsUpLayout(_))));

        h.coordinator.host_mut().take();
        h.coordinator.set_ime_showing(true);
        assert!(h.coordinator.host().requests().is_empty());
    }

    #[test]
    fn test_swipe_presentation_tracks_active_alert() {
        let mut h = Harness::new();
        h.coordinator.swipe_heads_up(true, 0.2);
        assert!(h.coordinator.state().heads_up_swipe.is_none());

        h.coordinator.add_notification(alert("a"));
        h.coordinator.swipe_heads_up(true, 0.2);
        let swipe = h.coordinator.state().heads_up_swipe.unwrap();
        assert!((swipe.alpha - 0.5).abs() < 1e-6);
        assert!((swipe.offset - 16.0).abs() < 1e-4);

        h.coordinator.hide_heads_up();
        assert!(h.coordinator.state().heads_up_swipe.is_none());
    }

    #[test]
    fn test_lights_out_dot_follows_notifications() {
        let mut h = Harness::new();
        h.coordinator.set_lights_on(false);
        assert_eq!(h.coordinator.driver().visibility(Element::LightsOutDot), Visibility::Gone);

        h.coordinator.add_notification(Notification::new("a"));
        assert_eq!(h.coordinator.driver().visibility(Element::LightsOutDot), Visibility::Visible);
        h.coordinator.advance_by(750);
        assert!((h.coordinator.driver().value(Element::LightsOutDot, Property::Alpha) - 1.0).abs() < 1e-6);

        h.coordinator.set_lights_on(true);
        h.coordinator.advance_by(250);
        assert_eq!(h.coordinator.driver().visibility(Element::LightsOutDot), Visibility::Gone);
    }

    #[test]
    fn test_clear_button_tracks_clearable_notifications() {
        let mut h = Harness::new();
        h.coordinator.add_notification(Notification::new("a"));
        assert!(h.coordinator.driver().is_visible(Element::ClearAllButton));

        h.coordinator.remove_notification("a");
        assert!(!h.coordinator.driver().is_visible(Element::ClearAllButton));
    }
}
