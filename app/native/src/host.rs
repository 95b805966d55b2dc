//! Seam to the window host and remote services.
//!
//! Every outward call the coordinator makes is a [`HostRequest`]. Calls are
//! synchronous and best effort: the coordinator logs a [`HostError`] and keeps
//! its optimistic local state.

use serde::Serialize;

use crate::config::ClockStyle;
use crate::flags::{DisableFlags, VisibilityFlags};
use crate::heads_up::HeadsUpAnchor;

/// Layout of the expanded panel window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpandedWindowLayout {
    /// Fills the screen instead of the status bar strip.
    pub full_height: bool,
    pub focusable: bool,
}

/// An outward call made by the coordinator.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "request")]
pub enum HostRequest {
    UpdateExpandedWindow(ExpandedWindowLayout),
    /// Report the flags the bars should now have to the window manager.
    NotifyVisibilityChanged { flags: VisibilityFlags },
    /// Give up input focus held by the expanded panel.
    ReleaseFocus,
    CloseRecents,
    CloseSearchPanel,
    ShowSearchPanel,
    /// Ask the service side to toggle the shade as well.
    ToggleStatusBar,
    AddHeadsUpView,
    RemoveHeadsUpView,
    ShowHeadsUp { key: String, expanded: bool, snooze_available: bool },
    HideHeadsUp,
    UpdateHeadsUpLayout(HeadsUpAnchor),
    ClearNotification { key: String },
    SendFullScreenIntent { key: String },
    /// Temporary brightness override while dragging along the status bar (0-255).
    SetBrightness { level: u8 },
    /// Navigation buttons follow the disabled flags.
    PropagateDisabled { flags: DisableFlags },
    UpdateClock { style: ClockStyle, visible: bool },
    /// Background alpha of the expanded notification area (0-255).
    SetNotificationAlpha { alpha: u8 },
    HaltTicker,
    /// Forwards a demo command to the icon controllers.
    Demo { command: String, args: Vec<(String, String)> },
}

/// Failure of a host call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    /// The remote side is gone.
    #[error("host unavailable: {0}")]
    Unavailable(String),
    /// The remote side refused the call.
    #[error("host rejected request: {0}")]
    Rejected(String),
}

/// Receives outward calls.
pub trait WindowHost {
    /// Performs one request.
    ///
    /// # Errors
    ///
    /// Returns a [`HostError`] when the remote side could not be reached.
    fn apply(&mut self, request: HostRequest) -> Result<(), HostError>;
}

/// [`WindowHost`] that records requests and can be told to fail.
#[derive(Clone, Debug, Default)]
pub struct RecordingHost {
    requests: Vec<HostRequest>,
    failing: bool,
}

impl RecordingHost {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// A host whose every call fails after being recorded.
    #[must_use]
    pub fn failing() -> Self { Self { requests: Vec::new(), failing: true } }

    pub const fn set_failing(&mut self, failing: bool) { self.failing = failing; }

    #[must_use]
    pub fn requests(&self) -> &[HostRequest] { &self.requests }

    /// Whether `predicate` matches any recorded request.
    pub fn saw(&self, predicate: impl Fn(&HostRequest) -> bool) -> bool {
        self.requests.iter().any(predicate)
    }

    pub fn take(&mut self) -> Vec<HostRequest> { std::mem::take(&mut self.requests) }
}

impl WindowHost for RecordingHost {
    fn apply(&mut self, request: HostRequest) -> Result<(), HostError> {
        self.requests.push(request);
        if self.failing {
            return Err(HostError::Unavailable("recording host set to fail".to_string()));
        }
        Ok(())
    }
}

/// [`WindowHost`] that writes each request as a JSON line to stdout.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdoutHost;

impl WindowHost for StdoutHost {
    fn apply(&mut self, request: HostRequest) -> Result<(), HostError> {
        let line = serde_json::to_string(&request).map_err(|err| HostError::Rejected(err.to_string()))?;
        println!("{line}");
        Ok(())
    }
}
