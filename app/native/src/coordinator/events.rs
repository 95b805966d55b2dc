//! Inbound events routed by the coordinator.
//!
//! Events arrive from the window host, the notification service, input
//! dispatch and the settings watcher. They are plain data so that scripted
//! scenarios can be written as JSON lines.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::bar::WindowShowState;
use crate::config::ShadeConfig;
use crate::flags::{BarSide, CollapseFlags, DisableFlags, VisibilityFlags};
use crate::heads_up::DismissDirection;
use crate::notification::Notification;

/// Phase of a touch gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TouchAction {
    Down,
    Move,
    Up,
    Cancel,
    /// Touch landed outside the window that received it.
    Outside,
}

impl TouchAction {
    #[must_use]
    pub const fn is_up_or_cancel(self) -> bool { matches!(self, Self::Up | Self::Cancel) }
}

/// A touch sample in screen coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Touch {
    pub action: TouchAction,
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
}

impl Touch {
    #[must_use]
    pub const fn new(action: TouchAction, x: i32, y: i32) -> Self { Self { action, x, y } }
}

/// Everything the coordinator reacts to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase", tag = "event")]
pub enum Event {
    // ========================================================================
    // Bars
    // ========================================================================
    /// Merge `vis` into the flags under `mask`.
    SetSystemUiVisibility {
        vis: VisibilityFlags,
        mask: VisibilityFlags,
    },
    SetLightsOn { on: bool },
    /// The foreground app changed; a legacy menu forces lights on.
    TopAppWindowChanged { show_menu: bool },
    SetWindowState { side: BarSide, state: WindowShowState },
    SetInteracting { side: BarSide, interacting: bool },
    /// Touch delivered to the status bar window.
    StatusBarTouch { touch: Touch },
    /// Touch delivered to either bar window, checked for outside taps.
    BarTouch { side: BarSide, touch: Touch },
    /// Touch on the home button.
    HomeTouch { action: TouchAction },
    Disable { flags: DisableFlags },

    // ========================================================================
    // Panels
    // ========================================================================
    ExpandNotifications,
    ExpandSettings {
        #[serde(default)]
        flip: bool,
    },
    Collapse {
        #[serde(default)]
        flags: CollapseFlags,
    },
    ToggleNotificationShade,
    ToggleSettingsShade,
    FlipToNotifications,
    FlipToSettings,
    FlipPanels,
    SwitchToSettings,
    PartialFlip { progress: f32 },
    CompletePartialFlip,

    // ========================================================================
    // Notifications and heads-up
    // ========================================================================
    AddNotification { notification: Notification },
    UpdateNotification { notification: Notification },
    RemoveNotification { key: String },
    HideHeadsUp,
    DismissHeadsUp { direction: DismissDirection },
    EscalateHeadsUp,
    SnoozeHeadsUp,
    /// The user touched the alert; restart its decay.
    ResetHeadsUpDecay,
    SwipeHeadsUp { animate_into: bool, fraction: f32 },
    ImeVisibility { showing: bool },
    StatusBarShows { shows: bool },

    // ========================================================================
    // System
    // ========================================================================
    ScreenOn,
    ScreenOff,
    CloseSystemDialogs {
        #[serde(default)]
        reason: Option<String>,
    },
    SettingsChanged { config: Box<ShadeConfig> },
    UserSetup { complete: bool },
    UserSwitched,
    Demo {
        command: String,
        #[serde(default)]
        args: BTreeMap<String, String>,
    },
    Recreate,
    /// Moves the virtual clock forward.
    Advance { ms: u64 },
}

impl Event {
    /// Short name for logging.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SetSystemUiVisibility { .. } => "setSystemUiVisibility",
            Self::SetLightsOn { .. } => "setLightsOn",
            Self::TopAppWindowChanged { .. } => "topAppWindowChanged",
            Self::SetWindowState { .. } => "setWindowState",
            Self::SetInteracting { .. } => "setInteracting",
            Self::StatusBarTouch { .. } => "statusBarTouch",
            Self::BarTouch { .. } => "barTouch",
            Self::HomeTouch { .. } => "homeTouch",
            Self::Disable { .. } => "disable",
            Self::ExpandNotifications => "expandNotifications",
            Self::ExpandSettings { .. } => "expandSettings",
            Self::Collapse { .. } => "collapse",
            Self::ToggleNotificationShade => "toggleNotificationShade",
            Self::ToggleSettingsShade => "toggleSettingsShade",
            Self::FlipToNotifications => "flipToNotifications",
            Self::FlipToSettings => "flipToSettings",
            Self::FlipPanels => "flipPanels",
            Self::SwitchToSettings => "switchToSettings",
            Self::PartialFlip { .. } => "partialFlip",
            Self::CompletePartialFlip => "completePartialFlip",
            Self::AddNotification { .. } => "addNotification",
            Self::UpdateNotification { .. } => "updateNotification",
            Self::RemoveNotification { .. } => "removeNotification",
            Self::HideHeadsUp => "hideHeadsUp",
            Self::DismissHeadsUp { .. } => "dismissHeadsUp",
            Self::EscalateHeadsUp => "escalateHeadsUp",
            Self::SnoozeHeadsUp => "snoozeHeadsUp",
            Self::ResetHeadsUpDecay => "resetHeadsUpDecay",
            Self::SwipeHeadsUp { .. } => "swipeHeadsUp",
            Self::ImeVisibility { .. } => "imeVisibility",
            Self::StatusBarShows { .. } => "statusBarShows",
            Self::ScreenOn => "screenOn",
            Self::ScreenOff => "screenOff",
            Self::CloseSystemDialogs { .. } => "closeSystemDialogs",
            Self::SettingsChanged { .. } => "settingsChanged",
            Self::UserSetup { .. } => "userSetup",
            Self::UserSwitched => "userSwitched",
            Self::Demo { .. } => "demo",
            Self::Recreate => "recreate",
            Self::Advance { .. } => "advance",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_visibility_event() {
        let event: Event = serde_json::from_str(
            r#"{"event":"setSystemUiVisibility","vis":"STATUS_BAR_TRANSIENT","mask":"STATUS_BAR_TRANSIENT | FULLSCREEN"}"#,
        )
        .unwrap();
        assert_eq!(
            event,
            Event::SetSystemUiVisibility {
                vis: VisibilityFlags::STATUS_BAR_TRANSIENT,
                mask: VisibilityFlags::STATUS_BAR_TRANSIENT | VisibilityFlags::FULLSCREEN,
            }
        );
    }

    #[test]
    fn test_parse_defaults() {
        let event: Event = serde_json::from_str(r#"{"event":"collapse"}"#).unwrap();
        assert_eq!(event, Event::Collapse { flags: CollapseFlags::empty() });

        let event: Event = serde_json::from_str(r#"{"event":"expandSettings"}"#).unwrap();
        assert_eq!(event, Event::ExpandSettings { flip: false });

        let event: Event = serde_json::from_str(r#"{"event":"demo","command":"enter"}"#).unwrap();
        assert!(matches!(event, Event::Demo { ref args, .. } if args.is_empty()));
    }

    #[test]
    fn test_parse_notification_event() {
        let event: Event = serde_json::from_str(
            r#"{"event":"addNotification","notification":{"key":"a","interrupt":true,"clearable":true}}"#,
        )
        .unwrap();
        let Event::AddNotification { notification } = event else {
            panic!("unexpected event");
        };
        assert_eq!(notification.key, "a");
        assert!(notification.interrupt);
        assert!(notification.visible);
    }

    #[test]
    fn test_parse_touch_fields_are_camel_case() {
        let event: Event = serde_json::from_str(
            r#"{"event":"swipeHeadsUp","animateInto":true,"fraction":0.2}"#,
        )
        .unwrap();
        assert_eq!(event, Event::SwipeHeadsUp { animate_into: true, fraction: 0.2 });
        assert_eq!(event.name(), "swipeHeadsUp");
    }

    #[test]
    fn test_up_or_cancel() {
        assert!(TouchAction::Up.is_up_or_cancel());
        assert!(TouchAction::Cancel.is_up_or_cancel());
        assert!(!TouchAction::Outside.is_up_or_cancel());
    }
}
