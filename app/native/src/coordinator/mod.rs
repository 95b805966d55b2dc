//! Status bar coordinator.
//!
//! Composes the bar, panel and heads-up state machines and routes every
//! external event and timer through a single entry point. The coordinator is
//! the only writer of [`CoordinatorState`]; components never call each other.
//!
//! Handlers are grouped by concern:
//! - `visibility` - system UI flags, bar modes, auto-hide and interaction
//! - `panels` - expand, collapse, toggles and flips
//! - `alerts` - notifications and the heads-up slot
//! - `input` - touch interception, brightness control, home hold-off
//! - `system` - screen, settings, demo mode and recreation
//! - `disable` - disabled-feature table

mod alerts;
mod disable;
mod events;
mod input;
mod panels;
mod state;
mod system;
mod visibility;

pub use events::{Event, Touch, TouchAction};
pub use input::brightness_for;
pub use state::{BarsView, BrightnessGesture, CoordinatorState, HeadsUpView, Snapshot, TimerView};

use crate::animation::{AnimationDriver, Element, Property, Visibility};
use crate::autohide::AutoHideScheduler;
use crate::bar::{BarModeController, BarSurfaces, BarTransitions};
use crate::config::ShadeConfig;
use crate::flags::BarSide;
use crate::heads_up::HeadsUpController;
use crate::host::{HostRequest, WindowHost};
use crate::interaction::InteractionTracker;
use crate::notification::{NotificationList, NotificationStore};
use crate::panel::{PanelGate, PanelStateMachine};
use crate::timer::{Scheduler, TimerFired, TimerName};

/// Owns every state machine and serializes all transitions.
#[derive(Debug)]
pub struct StatusBarCoordinator<H, B, S = NotificationList> {
    state: CoordinatorState,
    config: ShadeConfig,
    sched: Scheduler,
    driver: AnimationDriver,
    bars: BarModeController<B>,
    panel: PanelStateMachine,
    heads_up: HeadsUpController,
    autohide: AutoHideScheduler,
    interaction: InteractionTracker,
    notifications: S,
    host: H,
}

impl<H: WindowHost, B: BarTransitions, S: NotificationStore> StatusBarCoordinator<H, B, S> {
    /// Builds a coordinator with collapsed panels and opaque bars.
    ///
    /// Nothing is sent to the host until [`Self::start`].
    pub fn new(config: ShadeConfig, host: H, surfaces: BarSurfaces<B>, notifications: S) -> Self {
        let mut coordinator = Self {
            state: CoordinatorState::new(config.user_setup_complete),
            sched: Scheduler::new(),
            driver: AnimationDriver::new(),
            bars: BarModeController::new(surfaces),
            panel: PanelStateMachine::new(config.panel_layout()),
            heads_up: HeadsUpController::new(config.heads_up_settings()),
            autohide: AutoHideScheduler::new(),
            interaction: InteractionTracker::new(),
            notifications,
            host,
            config,
        };
        coordinator.panel.reset_elements(&mut coordinator.driver);
        coordinator.driver.set_property(Element::ClearAllButton, Property::Alpha, 0.0);
        coordinator.driver.set_visibility(Element::ClearAllButton, Visibility::Invisible);
        coordinator.driver.set_property(Element::LightsOutDot, Property::Alpha, 0.0);
        coordinator.driver.set_visibility(Element::LightsOutDot, Visibility::Gone);
        coordinator.driver.drain_log();
        coordinator
    }

    /// Pushes the initial presentation to the host.
    pub fn start(&mut self) {
        tracing::debug!("coordinator starting");
        self.host_call(HostRequest::AddHeadsUpView);
        self.refresh_settings();
        self.set_are_there_notifications();
        self.check_bar_modes();
    }

    /// Consumes the coordinator, returning its host.
    pub fn into_host(self) -> H { self.host }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[must_use]
    pub const fn state(&self) -> &CoordinatorState { &self.state }

    #[must_use]
    pub const fn config(&self) -> &ShadeConfig { &self.config }

    #[must_use]
    pub const fn scheduler(&self) -> &Scheduler { &self.sched }

    #[must_use]
    pub const fn driver(&self) -> &AnimationDriver { &self.driver }

    pub const fn driver_mut(&mut self) -> &mut AnimationDriver { &mut self.driver }

    #[must_use]
    pub const fn bars(&self) -> &BarModeController<B> { &self.bars }

    #[must_use]
    pub const fn panel(&self) -> &PanelStateMachine { &self.panel }

    #[must_use]
    pub const fn heads_up(&self) -> &HeadsUpController { &self.heads_up }

    #[must_use]
    pub const fn autohide(&self) -> &AutoHideScheduler { &self.autohide }

    #[must_use]
    pub const fn interaction(&self) -> &InteractionTracker { &self.interaction }

    #[must_use]
    pub const fn notifications(&self) -> &S { &self.notifications }

    #[must_use]
    pub const fn host(&self) -> &H { &self.host }

    pub const fn host_mut(&mut self) -> &mut H { &mut self.host }

    #[must_use]
    pub const fn now_ms(&self) -> u64 { self.sched.now_ms() }

    /// Earliest pending timer deadline, used by the runtime to sleep.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> { self.sched.next_deadline() }

    // ========================================================================
    // Event routing
    // ========================================================================

    /// Handles one event.
    pub fn handle(&mut self, event: Event) {
        tracing::trace!(event = event.name(), now_ms = self.now_ms(), "event");
        match event {
            Event::SetSystemUiVisibility { vis, mask } => self.set_system_ui_visibility(vis, mask),
            Event::SetLightsOn { on } => self.set_lights_on(on),
            Event::TopAppWindowChanged { show_menu } => self.top_app_window_changed(show_menu),
            Event::SetWindowState { side, state } => self.set_window_state(side, state),
            Event::SetInteracting { side, interacting } => self.set_interacting(side, interacting),
            Event::StatusBarTouch { touch } => {
                self.intercept_touch(touch);
            }
            Event::BarTouch { touch, .. } => self.check_user_autohide(touch),
            Event::HomeTouch { action } => self.home_touch(action),
            Event::Disable { flags } => self.disable(flags),

            Event::ExpandNotifications => self.expand_notifications(),
            Event::ExpandSettings { flip } => self.expand_settings(flip),
            Event::Collapse { flags } => self.collapse_panels(flags),
            Event::ToggleNotificationShade => self.toggle_notification_shade(),
            Event::ToggleSettingsShade => self.toggle_settings_shade(),
            Event::FlipToNotifications => self.flip_to_notifications(),
            Event::FlipToSettings => self.flip_to_settings(),
            Event::FlipPanels => self.flip_panels(),
            Event::SwitchToSettings => self.switch_to_settings(),
            Event::PartialFlip { progress } => self.partial_flip(progress),
            Event::CompletePartialFlip => self.complete_partial_flip(),

            Event::AddNotification { notification } => self.add_notification(notification),
            Event::UpdateNotification { notification } => self.update_notification(notification),
            Event::RemoveNotification { key } => self.remove_notification(&key),
            Event::HideHeadsUp => self.hide_heads_up(),
            Event::DismissHeadsUp { direction } => self.dismiss_heads_up(direction),
            Event::EscalateHeadsUp => self.escalate_heads_up(),
            Event::SnoozeHeadsUp => self.snooze_heads_up(),
            Event::ResetHeadsUpDecay => self.heads_up.reset_decay_timer(&mut self.sched),
            Event::SwipeHeadsUp { animate_into, fraction } => {
                self.swipe_heads_up(animate_into, fraction);
            }
            Event::ImeVisibility { showing } => self.set_ime_showing(showing),
            Event::StatusBarShows { shows } => self.set_status_bar_shows(shows),

            Event::ScreenOn => self.screen_on(),
            Event::ScreenOff => self.screen_off(),
            Event::CloseSystemDialogs { reason } => self.close_system_dialogs(reason.as_deref()),
            Event::SettingsChanged { config } => self.apply_settings(*config),
            Event::UserSetup { complete } => self.set_user_setup(complete),
            Event::UserSwitched => self.user_switched(),
            Event::Demo { command, args } => self.dispatch_demo(&command, &args),
            Event::Recreate => self.recreate(),
            Event::Advance { ms } => self.advance_by(ms),
        }
    }

    // ========================================================================
    // Clock
    // ========================================================================

    /// Moves the virtual clock forward by `ms`, firing due timers in order.
    pub fn advance_by(&mut self, ms: u64) { self.advance_to(self.now_ms().saturating_add(ms)); }

    /// Moves the virtual clock to `target_ms`, firing due timers in order.
    ///
    /// Animations are advanced to each timer's deadline before its handler
    /// runs, so handlers observe element state as of that instant.
    pub fn advance_to(&mut self, target_ms: u64) {
        while let Some(fired) = self.sched.pop_due(target_ms) {
            self.driver.advance(fired.at_ms);
            self.on_timer(fired);
        }
        self.driver.advance(target_ms);
        self.sched.set_now(target_ms);
    }

    fn on_timer(&mut self, fired: TimerFired) {
        tracing::debug!(timer = ?fired.name, at_ms = fired.at_ms, "timer fired");
        match fired.name {
            TimerName::AutoHide | TimerName::UserAutoHide => self.do_auto_hide(),
            TimerName::CheckBarModes => self.check_bar_modes(),
            TimerName::HeadsUpDecay => {
                if self.heads_up.on_decay(&fired, &mut self.sched).is_some() {
                    self.heads_up_left();
                }
            }
            TimerName::LongPressBrightness => self.on_long_press_brightness(),
            TimerName::SearchPanelShow => {
                if self.state.navbar_gestures_disabled() {
                    tracing::debug!("search panel hold-off expired while gestures are disabled");
                } else {
                    self.host_call(HostRequest::ShowSearchPanel);
                }
            }
            TimerName::FlipSettle => self.set_are_there_notifications(),
            TimerName::CollapseSettle => {
                if self.panel.is_expanded_visible() {
                    tracing::debug!("panel reopened before collapse settled");
                } else {
                    self.shrink_expanded_window();
                }
            }
        }
    }

    // ========================================================================
    // Shared helpers
    // ========================================================================

    /// Performs a host request, logging and swallowing failures.
    pub(crate) fn host_call(&mut self, request: HostRequest) {
        tracing::trace!(?request, "host request");
        if let Err(err) = self.host.apply(request) {
            tracing::warn!(error = %err, "host request failed");
        }
    }

    const fn panel_gate(&self) -> PanelGate {
        PanelGate {
            panels_enabled: self.state.panels_enabled(),
            user_setup: self.state.user_setup,
        }
    }

    /// Captures the whole coordinator for inspection.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let timers = self
            .sched
            .pending_names()
            .into_iter()
            .filter_map(|name| self.sched.deadline(name).map(|deadline_ms| TimerView { name, deadline_ms }))
            .collect();
        let elements = Element::ALL.iter().map(|&e| (e, self.driver.state(e))).collect();

        Snapshot {
            now_ms: self.now_ms(),
            visibility: self.state.visibility,
            disabled: self.state.disabled,
            user_setup: self.state.user_setup,
            bars: BarsView {
                status_mode: self.bars.mode(BarSide::Status),
                navigation_mode: self.bars.mode(BarSide::Navigation),
                status_window: self.bars.window_state(BarSide::Status),
                navigation_window: self.bars.window_state(BarSide::Navigation),
                interacting: self.interaction.windows(),
                autohide_suspended: self.autohide.is_suspended(),
                demo_mode: self.bars.is_demo_mode(),
            },
            panel: self.panel.state(),
            expanded_visible: self.panel.is_expanded_visible(),
            expanded_window: self.state.expanded_window,
            heads_up: HeadsUpView {
                phase: self.heads_up.phase(),
                entry: self.heads_up.entry().cloned(),
                anchor: self.heads_up.anchor(),
                snoozed: self.heads_up.is_snoozed(self.now_ms()),
            },
            timers,
            notifications: self.notifications.len(),
            clock_style: self.config.status_bar.clock_style,
            clock_visible: self.clock_visible(),
            brightness_level: self.state.brightness_level,
            elements,
        }
    }
}
