//! Screen state, settings, demo mode and recreation.

use std::collections::BTreeMap;

use super::StatusBarCoordinator;
use super::state::BrightnessGesture;
use crate::bar::{BarMode, BarTransitions};
use crate::config::{ClockStyle, SettingKey, ShadeConfig};
use crate::flags::{CollapseFlags, DisableFlags};
use crate::host::{HostRequest, WindowHost};
use crate::notification::NotificationStore;
use crate::timer::TimerName;

/// Close reason sent when the recents screen itself asks dialogs to close.
const REASON_RECENT_APPS: &str = "recentapps";

impl<H: WindowHost, B: BarTransitions, S: NotificationStore> StatusBarCoordinator<H, B, S> {
    // ========================================================================
    // Screen
    // ========================================================================

    pub fn screen_on(&mut self) { self.bars.set_screen_on(true); }

    /// Drops the expanded panel at once and settles every bar animation.
    pub fn screen_off(&mut self) {
        self.bars.set_screen_on(false);
        self.collapse_immediately();
        self.heads_up.reset_snooze();
        self.bars.finish_animations();
    }

    pub fn close_system_dialogs(&mut self, reason: Option<&str>) {
        let flags = if reason == Some(REASON_RECENT_APPS) {
            CollapseFlags::EXCLUDE_RECENTS
        } else {
            CollapseFlags::empty()
        };
        self.collapse_panels(flags);
    }

    // ========================================================================
    // Settings
    // ========================================================================

    /// Adopts a new configuration, re-deriving only what the changed keys
    /// affect.
    pub fn apply_settings(&mut self, config: ShadeConfig) {
        let changed = self.config.changed_keys(&config);
        if changed.is_empty() {
            return;
        }
        tracing::info!(?changed, "settings changed");
        self.config = config;
        for key in changed {
            self.on_setting_changed(key);
        }
    }

    fn on_setting_changed(&mut self, key: SettingKey) {
        match key {
            SettingKey::HeadsUpExpanded
            | SettingKey::HeadsUpSnooze
            | SettingKey::HeadsUpDecay
            | SettingKey::HeadsUpGravity
            | SettingKey::Display => {
                if self.heads_up.set_settings(self.config.heads_up_settings()) {
                    self.update_heads_up_layout();
                }
            }
            // Read when an update arrives.
            SettingKey::HeadsUpShowUpdates => {}
            SettingKey::ClockStyle => self.update_clock(),
            SettingKey::NotificationAlpha => self.update_notification_alpha(),
            SettingKey::BrightnessControl => {
                if !self.config.status_bar.brightness_control {
                    self.sched.cancel(TimerName::LongPressBrightness);
                    self.state.brightness = BrightnessGesture::default();
                }
            }
            SettingKey::UserSetup => self.set_user_setup(self.config.user_setup_complete),
            SettingKey::PanelLayout => {
                self.collapse_immediately();
                self.panel.set_layout(self.config.panel_layout());
                self.panel.reset_elements(&mut self.driver);
                self.set_are_there_notifications();
                self.check_bar_modes();
            }
            SettingKey::DemoAllowed => {
                if !self.config.demo_allowed && self.bars.is_demo_mode() {
                    self.exit_demo();
                }
            }
        }
    }

    /// Records whether device setup is complete. Settings close when setup
    /// becomes incomplete.
    pub fn set_user_setup(&mut self, complete: bool) {
        self.config.user_setup_complete = complete;
        if self.state.user_setup == complete {
            return;
        }
        self.state.user_setup = complete;
        tracing::debug!(complete, "user setup changed");
        if !complete && self.panel.is_expanded_visible() && self.panel.settings_showing(&self.driver) {
            self.collapse_panels(CollapseFlags::empty());
        }
    }

    pub fn user_switched(&mut self) {
        self.collapse_panels(CollapseFlags::empty());
        self.refresh_settings();
    }

    /// Pushes every settings-derived presentation to the host.
    pub(super) fn refresh_settings(&mut self) {
        self.heads_up.set_settings(self.config.heads_up_settings());
        self.panel.set_layout(self.config.panel_layout());
        self.update_heads_up_layout();
        self.update_clock();
        self.update_notification_alpha();
    }

    #[must_use]
    pub fn clock_visible(&self) -> bool {
        !self.state.disabled.contains(DisableFlags::CLOCK)
            && self.config.status_bar.clock_style != ClockStyle::Hidden
    }

    pub(crate) fn update_clock(&mut self) {
        self.host_call(HostRequest::UpdateClock {
            style: self.config.status_bar.clock_style,
            visible: self.clock_visible(),
        });
    }

    fn update_notification_alpha(&mut self) {
        self.host_call(HostRequest::SetNotificationAlpha {
            alpha: self.config.notification_background_alpha(),
        });
    }

    // ========================================================================
    // Demo mode
    // ========================================================================

    /// Runs a demo command.
    ///
    /// Any command other than `exit` enters demo mode first. `bars` forces
    /// every bar surface to the requested mode; everything else is forwarded
    /// to the host.
    pub fn dispatch_demo(&mut self, command: &str, args: &BTreeMap<String, String>) {
        if !self.config.demo_allowed {
            tracing::debug!(command, "demo mode not allowed");
            return;
        }
        match command {
            "enter" => self.bars.set_demo_mode(true),
            "exit" => self.exit_demo(),
            _ if !self.bars.is_demo_mode() => self.dispatch_demo("enter", &BTreeMap::new()),
            _ => {}
        }

        if command == "bars" {
            match args.get("mode").and_then(|mode| BarMode::from_demo_name(mode)) {
                Some(mode) => self.bars.force_all(mode),
                None => tracing::debug!(?args, "unknown demo bar mode"),
            }
        } else {
            self.host_call(HostRequest::Demo {
                command: command.to_string(),
                args: args.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
            });
        }
    }

    fn exit_demo(&mut self) {
        self.bars.set_demo_mode(false);
        self.check_bar_modes();
    }

    // ========================================================================
    // Recreate
    // ========================================================================

    /// Rebuilds the presentation from scratch, keeping posted notifications
    /// and visibility flags.
    pub fn recreate(&mut self) {
        tracing::info!("recreating status bar");
        self.hide_heads_up();
        self.host_call(HostRequest::RemoveHeadsUpView);
        self.collapse_immediately();
        self.driver.finish_all();
        self.panel.reset_elements(&mut self.driver);
        self.host_call(HostRequest::AddHeadsUpView);
        self.refresh_settings();
        self.set_are_there_notifications();
        self.check_bar_modes();
    }
}
