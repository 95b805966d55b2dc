//! Disabled-feature handling.
//!
//! `disable` diffs the new flag word against the old one and runs the handler
//! of every rule whose bits changed, in table order.

use super::StatusBarCoordinator;
use crate::animation::{Element, Interpolator, Property, Transition, Visibility};
use crate::bar::BarTransitions;
use crate::constants::fade;
use crate::flags::{CollapseFlags, DisableFlags};
use crate::host::{HostRequest, WindowHost};
use crate::notification::NotificationStore;

type Handler<H, B, S> = fn(&mut StatusBarCoordinator<H, B, S>, DisableFlags, DisableFlags);

/// A group of bits and what to do when any of them changes.
struct DisableRule<H, B, S> {
    bits: DisableFlags,
    handler: Handler<H, B, S>,
}

impl<H: WindowHost, B: BarTransitions, S: NotificationStore> StatusBarCoordinator<H, B, S> {
    fn disable_rules() -> [DisableRule<H, B, S>; 7] {
        [
            DisableRule { bits: DisableFlags::SYSTEM_INFO, handler: Self::on_system_info_disabled },
            DisableRule { bits: DisableFlags::CLOCK, handler: |c, _, _| c.update_clock() },
            DisableRule { bits: DisableFlags::EXPAND, handler: Self::on_expand_disabled },
            DisableRule { bits: DisableFlags::NAVIGATION, handler: Self::on_navigation_disabled },
            DisableRule {
                bits: DisableFlags::NOTIFICATION_ICONS,
                handler: Self::on_notification_icons_disabled,
            },
            DisableRule {
                bits: DisableFlags::NOTIFICATION_TICKER,
                handler: Self::on_ticker_disabled,
            },
            DisableRule {
                bits: DisableFlags::NOTIFICATION_ALERTS,
                handler: Self::on_alerts_disabled,
            },
        ]
    }

    /// Applies a new disabled-feature word.
    pub fn disable(&mut self, flags: DisableFlags) {
        let old = self.state.disabled;
        let diff = old ^ flags;
        self.state.disabled = flags;
        tracing::debug!(old = ?old, new = ?flags, diff = ?diff, "disable");

        for rule in Self::disable_rules() {
            if diff.intersects(rule.bits) {
                (rule.handler)(self, flags, diff);
            }
        }
    }

    fn on_system_info_disabled(&mut self, state: DisableFlags, _diff: DisableFlags) {
        self.fade_icon_area(Element::SystemIcons, !state.contains(DisableFlags::SYSTEM_INFO));
    }

    fn on_expand_disabled(&mut self, state: DisableFlags, _diff: DisableFlags) {
        if state.contains(DisableFlags::EXPAND) {
            self.collapse_panels(CollapseFlags::empty());
        }
    }

    fn on_navigation_disabled(&mut self, state: DisableFlags, _diff: DisableFlags) {
        self.host_call(HostRequest::PropagateDisabled { flags: state });
        if state.contains(DisableFlags::RECENT) {
            self.host_call(HostRequest::CloseRecents);
        }
    }

    fn on_notification_icons_disabled(&mut self, state: DisableFlags, _diff: DisableFlags) {
        let show = !state.contains(DisableFlags::NOTIFICATION_ICONS);
        if !show {
            self.host_call(HostRequest::HaltTicker);
        }
        self.fade_icon_area(Element::NotificationIcons, show);
    }

    fn on_ticker_disabled(&mut self, state: DisableFlags, diff: DisableFlags) {
        // Handled together with the icons when both change
        if diff.contains(DisableFlags::NOTIFICATION_ICONS) {
            return;
        }
        if state.contains(DisableFlags::NOTIFICATION_TICKER) {
            self.host_call(HostRequest::HaltTicker);
        }
    }

    fn on_alerts_disabled(&mut self, state: DisableFlags, _diff: DisableFlags) {
        if state.contains(DisableFlags::NOTIFICATION_ALERTS) {
            self.hide_heads_up();
        }
    }

    /// Fades an icon area of the collapsed bar in or out.
    pub(super) fn fade_icon_area(&mut self, element: Element, show: bool) {
        self.driver.cancel(element);
        let mut transition = Transition::animate(
            element,
            Property::Alpha,
            if show { 1.0 } else { 0.0 },
            fade::ICON_AREA_MS,
        )
        .with_interpolator(Interpolator::Decelerate);
        if show {
            self.driver.set_visibility(element, Visibility::Visible);
        } else {
            transition = transition.then(Visibility::Invisible);
        }
        self.driver.apply(transition);
    }
}

#[cfg(test)]
mod tests {
    use crate::animation::{Element, Visibility};
    use crate::flags::DisableFlags;
    use crate::host::HostRequest;
    use crate::sim::Harness;

    #[test]
    fn test_expand_disabled_collapses_panels() {
        let mut h = Harness::new();
        h.coordinator.expand_notifications();
        assert!(h.coordinator.panel().is_expanded_visible());

        h.coordinator.disable(DisableFlags::EXPAND);
        assert!(!h.coordinator.panel().is_expanded_visible());
        assert!(!h.coordinator.state().panels_enabled());
    }

    #[test]
    fn test_navigation_bits_propagate_and_close_recents() {
        let mut h = Harness::new();
        h.coordinator.disable(DisableFlags::RECENT);
        let requests = h.coordinator.host().requests();
        assert!(requests.contains(&HostRequest::PropagateDisabled { flags: DisableFlags::RECENT }));
        assert!(requests.contains(&HostRequest::CloseRecents));
    }

    #[test]
    fn test_unchanged_bits_run_nothing() {
        let mut h = Harness::new();
        h.coordinator.disable(DisableFlags::HOME);
        h.coordinator.host_mut().take();

        h.coordinator.disable(DisableFlags::HOME);
        assert!(h.coordinator.host().requests().is_empty());
    }

    #[test]
    fn test_system_info_fades_out_and_back() {
        let mut h = Harness::new();
        h.coordinator.disable(DisableFlags::SYSTEM_INFO);
        h.coordinator.advance_by(200);
        assert_eq!(h.coordinator.driver().visibility(Element::SystemIcons), Visibility::Invisible);

        h.coordinator.disable(DisableFlags::empty());
        assert_eq!(h.coordinator.driver().visibility(Element::SystemIcons), Visibility::Visible);
        h.coordinator.advance_by(200);
        assert!((h.coordinator.driver().value(Element::SystemIcons, crate::animation::Property::Alpha) - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_ticker_halts_once_when_icons_change_too() {
        let mut h = Harness::new();
        h.coordinator.disable(DisableFlags::NOTIFICATION_ICONS | DisableFlags::NOTIFICATION_TICKER);
        let halts = h
            .coordinator
            .host()
            .requests()
            .iter()
            .filter(|r| matches!(r, HostRequest::HaltTicker))
            .count();
        assert_eq!(halts, 1);
    }

    #[test]
    fn test_clock_disable_updates_clock() {
        let mut h = Harness::new();
        h.coordinator.disable(DisableFlags::CLOCK);
        assert!(h.coordinator.host().saw(|r| matches!(r, HostRequest::UpdateClock { visible: false, .. })));
    }
}
