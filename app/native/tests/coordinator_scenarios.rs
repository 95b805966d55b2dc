//! End-to-end scenarios driven through `Event`s.
//!
//! Each test builds a coordinator with recording collaborators, feeds it the
//! same events a host would send, and checks what it asked the host and the
//! bars to do.

use shade_lib::animation::{Element, Property, Visibility};
use shade_lib::bar::{BarMode, BarTransitions, compute_mode_for};
use shade_lib::coordinator::{Event, Snapshot};
use shade_lib::flags::{BarSide, CollapseFlags, DisableFlags, VisibilityFlags};
use shade_lib::heads_up::{Gravity, HeadsUpPhase};
use shade_lib::host::HostRequest;
use shade_lib::notification::{Notification, NotificationStore};
use shade_lib::panel::PanelState;
use shade_lib::sim::Harness;
use shade_lib::timer::TimerName;

fn reveal_status_bar() -> Event {
    Event::SetSystemUiVisibility {
        vis: VisibilityFlags::FULLSCREEN | VisibilityFlags::STATUS_BAR_TRANSIENT,
        mask: VisibilityFlags::FULLSCREEN | VisibilityFlags::STATUS_BAR_TRANSIENT,
    }
}

fn alert(key: &str) -> Event {
    Event::AddNotification {
        notification: Notification::new(key).interrupting(),
    }
}

fn panel_elements(snapshot: &Snapshot) -> Vec<(Element, String)> {
    snapshot
        .elements
        .iter()
        .filter(|(element, _)| **element != Element::ClearAllButton)
        .map(|(element, state)| (*element, format!("{state:?}")))
        .collect()
}

fn autohide_invariant_holds(h: &Harness) -> bool {
    let c = &h.coordinator;
    let pending = c.scheduler().is_pending(TimerName::AutoHide);
    let expected = c.interaction().is_empty() && c.state().visibility.has_transient();
    pending == expected
}

// ============================================================================
// Bar modes
// ============================================================================

#[test]
fn test_compute_mode_is_pure_and_reports_no_change() {
    let old = VisibilityFlags::empty();
    let new = VisibilityFlags::STATUS_BAR_TRANSIENT;

    assert_eq!(compute_mode_for(BarSide::Status, old, new), Some(BarMode::SemiTransparent));
    assert_eq!(
        compute_mode_for(BarSide::Status, old, new),
        compute_mode_for(BarSide::Status, old, new)
    );

    // Bits that do not affect a bar leave it alone.
    assert_eq!(compute_mode_for(BarSide::Status, old, VisibilityFlags::FULLSCREEN), None);
    assert_eq!(compute_mode_for(BarSide::Navigation, old, new), None);
    assert_eq!(compute_mode_for(BarSide::Status, new, new), None);
}

#[test]
fn test_transient_status_bar_is_semi_transparent_with_autohide() {
    let mut h = Harness::new();
    h.handle(reveal_status_bar());

    assert_eq!(h.coordinator.bars().mode(BarSide::Status), BarMode::SemiTransparent);
    assert_eq!(h.status_surface().mode(), BarMode::SemiTransparent);
    assert_eq!(h.coordinator.scheduler().deadline(TimerName::AutoHide), Some(3000));
    assert!(h.coordinator.host().saw(|r| {
        *r == HostRequest::NotifyVisibilityChanged {
            flags: VisibilityFlags::FULLSCREEN | VisibilityFlags::STATUS_BAR_TRANSIENT,
        }
    }));

    h.handle(Event::Advance { ms: 3000 });
    assert_eq!(h.coordinator.state().visibility, VisibilityFlags::FULLSCREEN);
    assert_eq!(h.status_surface().mode(), BarMode::Opaque);
}

#[test]
fn test_autohide_pending_only_while_transient_and_untouched() {
    let mut h = Harness::new();
    let script = [
        reveal_status_bar(),
        Event::Advance { ms: 1000 },
        Event::SetInteracting { side: BarSide::Status, interacting: true },
        Event::Advance { ms: 5000 },
        Event::SetInteracting { side: BarSide::Navigation, interacting: true },
        Event::SetInteracting { side: BarSide::Status, interacting: false },
        Event::Advance { ms: 500 },
        Event::SetInteracting { side: BarSide::Navigation, interacting: false },
        Event::Advance { ms: 1000 },
        Event::SetSystemUiVisibility {
            vis: VisibilityFlags::NAVIGATION_BAR_TRANSIENT,
            mask: VisibilityFlags::NAVIGATION_BAR_TRANSIENT,
        },
        Event::SetSystemUiVisibility {
            vis: VisibilityFlags::empty(),
            mask: VisibilityFlags::TRANSIENT,
        },
        reveal_status_bar(),
        Event::Advance { ms: 3000 },
        Event::Advance { ms: 3000 },
    ];

    assert!(autohide_invariant_holds(&h));
    for event in script {
        let name = event.name();
        h.handle(event);
        assert!(autohide_invariant_holds(&h), "invariant broken after {name}");
    }
}

// ============================================================================
// Panels
// ============================================================================

#[test]
fn test_collapse_twice_equals_collapse_once() {
    let mut h = Harness::new();
    h.run([Event::ExpandSettings { flip: true }, Event::Advance { ms: 100 }]);

    h.handle(Event::Collapse { flags: CollapseFlags::empty() });
    let once = h.coordinator.snapshot();
    h.coordinator.driver_mut().drain_log();

    h.handle(Event::Collapse { flags: CollapseFlags::empty() });
    let twice = h.coordinator.snapshot();

    assert_eq!(once, twice);
    assert!(h.coordinator.driver_mut().drain_log().is_empty());
    assert_eq!(twice.panel, PanelState::Collapsed);
}

#[test]
fn test_flip_there_and_back_restores_panel() {
    let mut h = Harness::new();
    h.run([Event::ExpandNotifications, Event::Advance { ms: 1000 }]);
    let before = h.coordinator.snapshot();

    h.run([Event::FlipToSettings, Event::Advance { ms: 1000 }]);
    assert_eq!(h.coordinator.snapshot().panel, PanelState::SettingsExpanded);
    assert!(h.coordinator.driver().is_visible(Element::SettingsView));

    h.run([Event::FlipToNotifications, Event::Advance { ms: 1000 }]);
    let after = h.coordinator.snapshot();
    assert_eq!(after.panel, PanelState::NotificationsExpanded);
    assert_eq!(panel_elements(&after), panel_elements(&before));
}

#[test]
fn test_partial_flip_is_mirrored() {
    fn side(h: &Harness, element: Element, property: Property) -> (f32, Visibility) {
        let driver = h.coordinator.driver();
        (driver.value(element, property), driver.visibility(element))
    }
    fn close(a: (f32, Visibility), b: (f32, Visibility)) -> bool { (a.0 - b.0).abs() < 1e-6 && a.1 == b.1 }

    let p = 0.4;
    let mut toward_settings = Harness::with_config(|c| c.panels.quick_access_ribbon = true);
    toward_settings.run([Event::ExpandNotifications, Event::Advance { ms: 1000 }, Event::PartialFlip { progress: p }]);
    let mut toward_list = Harness::with_config(|c| c.panels.quick_access_ribbon = true);
    toward_list.run([Event::ExpandNotifications, Event::Advance { ms: 1000 }, Event::PartialFlip { progress: -p }]);

    let (a, b) = (&toward_settings, &toward_list);
    assert!((side(a, Element::SettingsView, Property::ScaleX).0 - p).abs() < 1e-6);
    for list_side in [Element::NotificationList, Element::Ribbon] {
        assert!(close(side(a, Element::SettingsView, Property::ScaleX), side(b, list_side, Property::ScaleX)));
        assert!(close(side(b, Element::SettingsView, Property::ScaleX), side(a, list_side, Property::ScaleX)));
    }
    for button in [Element::NotificationButton, Element::AddTileButton] {
        assert!(close(side(a, button, Property::Alpha), side(b, Element::SettingsButton, Property::Alpha)));
        assert_eq!(side(b, button, Property::Alpha).1, side(a, Element::SettingsButton, Property::Alpha).1);
    }
}

#[test]
fn test_expand_settings_before_setup_changes_nothing() {
    let mut h = Harness::with_config(|c| c.user_setup_complete = false);
    let before = h.coordinator.snapshot();

    h.run([
        Event::ExpandSettings { flip: true },
        Event::ExpandSettings { flip: false },
        Event::ToggleSettingsShade,
    ]);

    let after = h.coordinator.snapshot();
    assert_eq!(after, before);
    assert!(h.coordinator.host().requests().is_empty());
}

#[test]
fn test_collapse_shrinks_window_once_settled() {
    let mut h = Harness::new();
    h.handle(Event::ExpandNotifications);
    assert!(h.coordinator.snapshot().expanded_window);

    h.run([Event::Collapse { flags: CollapseFlags::empty() }, Event::Advance { ms: 100 }]);
    let snapshot = h.coordinator.snapshot();
    assert!(!snapshot.expanded_window);
    assert!(!snapshot.expanded_visible);
    assert!(h.coordinator.host().saw(|r| *r == HostRequest::CloseRecents));
}

// ============================================================================
// Heads-up
// ============================================================================

#[test]
fn test_heads_up_decays_after_five_seconds() {
    let mut h = Harness::new();
    h.handle(alert("msg"));
    assert_eq!(h.coordinator.heads_up().phase(), HeadsUpPhase::Shown);

    h.handle(Event::Advance { ms: 4999 });
    assert_eq!(h.coordinator.heads_up().active_key(), Some("msg"));

    h.handle(Event::Advance { ms: 1 });
    assert_eq!(h.coordinator.heads_up().phase(), HeadsUpPhase::Idle);
    assert!(h.coordinator.host().saw(|r| *r == HostRequest::HideHeadsUp));
    assert_eq!(h.coordinator.notifications().len(), 1);
}

#[test]
fn test_heads_up_admission_refusals() {
    // Not interrupting.
    let mut h = Harness::new();
    h.handle(Event::AddNotification { notification: Notification::new("quiet") });
    assert_eq!(h.coordinator.heads_up().phase(), HeadsUpPhase::Idle);

    // Alerts disabled.
    let mut h = Harness::new();
    h.run([Event::Disable { flags: DisableFlags::NOTIFICATION_ALERTS }, alert("a")]);
    assert_eq!(h.coordinator.heads_up().phase(), HeadsUpPhase::Idle);

    // Panel expanded.
    let mut h = Harness::new();
    h.run([Event::ExpandNotifications, alert("a")]);
    assert_eq!(h.coordinator.heads_up().phase(), HeadsUpPhase::Idle);

    // Slot taken by another key.
    let mut h = Harness::new();
    h.run([alert("first"), alert("second")]);
    assert_eq!(h.coordinator.heads_up().active_key(), Some("first"));
    assert_eq!(h.coordinator.notifications().len(), 2);
    assert!(!h.coordinator.host().saw(|r| {
        matches!(r, HostRequest::ShowHeadsUp { key, .. } if key == "second")
    }));
}

#[test]
fn test_keyboard_moves_bottom_heads_up_to_top() {
    let mut h = Harness::with_config(|c| c.heads_up.gravity_bottom = true);
    assert_eq!(h.coordinator.heads_up().anchor().gravity, Gravity::Bottom);

    h.handle(Event::ImeVisibility { showing: true });
    let anchor = h.coordinator.heads_up().anchor();
    assert_eq!(anchor.gravity, Gravity::Top);
    assert!(h.coordinator.host().saw(|r| *r == HostRequest::UpdateHeadsUpLayout(anchor)));

    h.handle(Event::ImeVisibility { showing: false });
    assert_eq!(h.coordinator.heads_up().anchor().gravity, Gravity::Bottom);
}

// ============================================================================
// Scripted replay
// ============================================================================

#[test]
fn test_replay_of_jsonl_scenario() {
    let script = r#"
{"event":"setSystemUiVisibility","vis":"STATUS_BAR_TRANSIENT","mask":"STATUS_BAR_TRANSIENT"}
{"event":"advance","ms":3000}
"#;
    let events = shade_lib::cli::parse_scenario(script).unwrap();
    let (snapshot, steps) = shade_lib::cli::replay(shade_lib::config::ShadeConfig::default(), events);

    assert_eq!(steps.len(), 3);
    assert_eq!(snapshot.now_ms, 3000);
    assert!(!snapshot.visibility.has_transient());
    assert!(steps[2].requests.iter().any(|r| matches!(r, HostRequest::NotifyVisibilityChanged { .. })));
}
