//! Rendering seam for bar mode changes.

use serde::Serialize;

use super::mode::BarMode;

/// Receives mode changes for one bar surface.
///
/// Implementations own whatever background/alpha animation the mode implies.
pub trait BarTransitions {
    /// Moves the surface to `mode`, animating when `animate` is true.
    fn transition_to(&mut self, mode: BarMode, animate: bool);

    /// Current mode of the surface.
    fn mode(&self) -> BarMode;

    /// Jumps any running animation to its end state.
    fn finish_animations(&mut self);
}

/// One recorded call on a [`RecordingTransitions`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "call")]
pub enum TransitionCall {
    TransitionTo { mode: BarMode, animate: bool },
    FinishAnimations,
}

/// In-memory [`BarTransitions`] that records every call.
#[derive(Clone, Debug, Default)]
pub struct RecordingTransitions {
    mode: BarMode,
    calls: Vec<TransitionCall>,
}

impl RecordingTransitions {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Calls received so far, oldest first.
    #[must_use]
    pub fn calls(&self) -> &[TransitionCall] { &self.calls }

    /// Last `animate` argument passed to `transition_to`, if any.
    #[must_use]
    pub fn last_animate(&self) -> Option<bool> {
        self.calls.iter().rev().find_map(|call| match call {
            TransitionCall::TransitionTo { animate, .. } => Some(*animate),
            TransitionCall::FinishAnimations => None,
        })
    }

    pub fn clear(&mut self) { self.calls.clear(); }
}

impl BarTransitions for RecordingTransitions {
    fn transition_to(&mut self, mode: BarMode, animate: bool) {
        self.mode = mode;
        self.calls.push(TransitionCall::TransitionTo { mode, animate });
    }

    fn mode(&self) -> BarMode { self.mode }

    fn finish_animations(&mut self) { self.calls.push(TransitionCall::FinishAnimations); }
}

/// Headless [`BarTransitions`] that keeps the mode and logs every change.
#[derive(Clone, Debug)]
pub struct LoggedTransitions {
    surface: &'static str,
    mode: BarMode,
}

impl LoggedTransitions {
    #[must_use]
    pub const fn new(surface: &'static str) -> Self { Self { surface, mode: BarMode::Opaque } }
}

impl BarTransitions for LoggedTransitions {
    fn transition_to(&mut self, mode: BarMode, animate: bool) {
        tracing::info!(surface = self.surface, from = ?self.mode, to = ?mode, animate, "bar transition");
        self.mode = mode;
    }

    fn mode(&self) -> BarMode { self.mode }

    fn finish_animations(&mut self) {
        tracing::debug!(surface = self.surface, "bar animations finished");
    }
}
