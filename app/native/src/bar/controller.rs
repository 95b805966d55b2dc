//! Owns the current bar modes and pushes them to the bar surfaces.

use serde::{Deserialize, Serialize};

use super::mode::{BarMode, compute_mode_for};
use super::transitions::BarTransitions;
use crate::flags::{BarSide, VisibilityFlags};

/// Whether a bar window is on screen, independent of its mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WindowShowState {
    #[default]
    Showing,
    Hidden,
}

/// The rendering surfaces the controller drives.
#[derive(Clone, Debug, Default)]
pub struct BarSurfaces<B> {
    pub status: B,
    /// Absent on devices without a navigation bar.
    pub navigation: Option<B>,
    /// Backdrop drawn behind the status bar when the navigation bar is translucent.
    pub blocker: B,
}

/// Which bars changed mode in a visibility update.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ModeUpdate {
    pub status_changed: bool,
    pub navigation_changed: bool,
}

impl ModeUpdate {
    #[must_use]
    pub const fn any(self) -> bool { self.status_changed || self.navigation_changed }
}

/// Current status and navigation bar modes, window states and screen state.
#[derive(Debug)]
pub struct BarModeController<B> {
    status_mode: BarMode,
    navigation_mode: BarMode,
    status_window: WindowShowState,
    navigation_window: WindowShowState,
    /// `None` until the first screen event.
    screen_on: Option<bool>,
    demo_mode: bool,
    surfaces: BarSurfaces<B>,
}

impl<B: BarTransitions> BarModeController<B> {
    #[must_use]
    pub const fn new(surfaces: BarSurfaces<B>) -> Self {
        Self {
            status_mode: BarMode::Opaque,
            navigation_mode: BarMode::Opaque,
            status_window: WindowShowState::Showing,
            navigation_window: WindowShowState::Showing,
            screen_on: None,
            demo_mode: false,
            surfaces,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[must_use]
    pub const fn mode(&self, side: BarSide) -> BarMode {
        match side {
            BarSide::Status => self.status_mode,
            BarSide::Navigation => self.navigation_mode,
        }
    }

    #[must_use]
    pub const fn window_state(&self, side: BarSide) -> WindowShowState {
        match side {
            BarSide::Status => self.status_window,
            BarSide::Navigation => self.navigation_window,
        }
    }

    #[must_use]
    pub const fn screen_on(&self) -> Option<bool> { self.screen_on }

    #[must_use]
    pub const fn is_demo_mode(&self) -> bool { self.demo_mode }

    #[must_use]
    pub const fn surfaces(&self) -> &BarSurfaces<B> { &self.surfaces }

    pub const fn surfaces_mut(&mut self) -> &mut BarSurfaces<B> { &mut self.surfaces }

    /// Whether a transiently revealed bar is currently in its transient mode.
    #[must_use]
    pub const fn has_semi_transparent_bar(&self) -> bool {
        self.status_mode.is_transient() || self.navigation_mode.is_transient()
    }

    // ========================================================================
    // State updates
    // ========================================================================

    /// Stores the modes implied by a visibility transition.
    pub fn update_modes(&mut self, old: VisibilityFlags, new: VisibilityFlags) -> ModeUpdate {
        let mut update = ModeUpdate::default();
        if let Some(mode) = compute_mode_for(BarSide::Status, old, new) {
            tracing::debug!(?mode, "status bar mode changed");
            update.status_changed = mode != self.status_mode;
            self.status_mode = mode;
        }
        if let Some(mode) = compute_mode_for(BarSide::Navigation, old, new) {
            tracing::debug!(?mode, "navigation bar mode changed");
            update.navigation_changed = mode != self.navigation_mode;
            self.navigation_mode = mode;
        }
        update
    }

    /// Records a bar window show state. Returns true if it changed.
    pub fn set_window_state(&mut self, side: BarSide, state: WindowShowState) -> bool {
        let slot = match side {
            BarSide::Status => &mut self.status_window,
            BarSide::Navigation => &mut self.navigation_window,
        };
        if *slot == state {
            return false;
        }
        *slot = state;
        tracing::debug!(?side, ?state, "bar window state changed");
        true
    }

    pub const fn set_screen_on(&mut self, on: bool) { self.screen_on = Some(on); }

    pub const fn set_demo_mode(&mut self, demo: bool) { self.demo_mode = demo; }

    // ========================================================================
    // Surface updates
    // ========================================================================

    /// Pushes the current modes to every surface.
    ///
    /// Frozen in demo mode. `force_status_opaque` is set by the caller while
    /// the status bar is touched in a dual-panel layout.
    pub fn check_bar_modes(&mut self, force_status_opaque: bool) {
        if self.demo_mode {
            return;
        }
        let status_mode = if force_status_opaque { BarMode::Opaque } else { self.status_mode };
        let status_animate = self.should_animate(self.status_window);
        let navigation_animate = self.should_animate(self.navigation_window);

        transition(&mut self.surfaces.status, status_mode, status_animate);
        if let Some(navigation) = self.surfaces.navigation.as_mut() {
            transition(navigation, self.navigation_mode, navigation_animate);
        }

        let blocker_mode = if self.status_window != WindowShowState::Hidden
            && self.navigation_mode == BarMode::Translucent
        {
            status_mode
        } else {
            BarMode::Transparent
        };
        transition(&mut self.surfaces.blocker, blocker_mode, status_animate);
    }

    /// Forces every surface to `mode`, used by demo commands.
    pub fn force_all(&mut self, mode: BarMode) {
        transition(&mut self.surfaces.status, mode, true);
        if let Some(navigation) = self.surfaces.navigation.as_mut() {
            transition(navigation, mode, true);
        }
        transition(&mut self.surfaces.blocker, mode, true);
    }

    /// Jumps running bar animations to their end state.
    pub fn finish_animations(&mut self) {
        self.surfaces.status.finish_animations();
        if let Some(navigation) = self.surfaces.navigation.as_mut() {
            navigation.finish_animations();
        }
    }

    const fn should_animate(&self, window: WindowShowState) -> bool {
        !matches!(self.screen_on, Some(false)) && matches!(window, WindowShowState::Showing)
    }
}

fn transition<B: BarTransitions>(surface: &mut B, mode: BarMode, animate: bool) {
    if surface.mode() != mode {
        surface.transition_to(mode, animate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bar::transitions::{RecordingTransitions, TransitionCall};

    fn controller() -> BarModeController<RecordingTransitions> {
        BarModeController::new(BarSurfaces {
            status: RecordingTransitions::new(),
            navigation: Some(RecordingTransitions::new()),
            blocker: RecordingTransitions::new(),
        })
    }

    #[test]
    fn test_update_modes_reports_changes() {
        let mut ctl = controller();
        let old = VisibilityFlags::FULLSCREEN;
        let new = old | VisibilityFlags::STATUS_BAR_TRANSIENT;
        let update = ctl.update_modes(old, new);
        assert!(update.status_changed);
        assert!(!update.navigation_changed);
        assert_eq!(ctl.mode(BarSide::Status), BarMode::SemiTransparent);
        assert!(ctl.has_semi_transparent_bar());
    }

    #[test]
    fn test_check_bar_modes_pushes_modes() {
        let mut ctl = controller();
        ctl.update_modes(VisibilityFlags::empty(), VisibilityFlags::NAVIGATION_BAR_TRANSLUCENT);
        ctl.update_modes(
            VisibilityFlags::NAVIGATION_BAR_TRANSLUCENT,
            VisibilityFlags::NAVIGATION_BAR_TRANSLUCENT | VisibilityFlags::STATUS_BAR_TRANSLUCENT,
        );
        ctl.check_bar_modes(false);

        let surfaces = ctl.surfaces();
        assert_eq!(surfaces.status.mode(), BarMode::Translucent);
        assert_eq!(surfaces.navigation.as_ref().unwrap().mode(), BarMode::Translucent);
        // Navigation translucent and status showing: blocker follows the status bar.
        assert_eq!(surfaces.blocker.mode(), BarMode::Translucent);
    }

    #[test]
    fn test_blocker_transparent_when_status_hidden() {
        let mut ctl = controller();
        ctl.update_modes(VisibilityFlags::empty(), VisibilityFlags::NAVIGATION_BAR_TRANSLUCENT);
        ctl.set_window_state(BarSide::Status, WindowShowState::Hidden);
        ctl.check_bar_modes(false);
        assert_eq!(ctl.surfaces().blocker.mode(), BarMode::Transparent);
    }

    #[test]
    fn test_force_status_opaque() {
        let mut ctl = controller();
        ctl.update_modes(VisibilityFlags::empty(), VisibilityFlags::STATUS_BAR_TRANSLUCENT);
        ctl.check_bar_modes(true);
        assert_eq!(ctl.surfaces().status.mode(), BarMode::Opaque);
        assert_eq!(ctl.mode(BarSide::Status), BarMode::Translucent);
    }

    #[test]
    fn test_no_animation_when_screen_off_or_hidden() {
        let mut ctl = controller();
        ctl.set_screen_on(false);
        ctl.update_modes(VisibilityFlags::empty(), VisibilityFlags::LOW_PROFILE);
        ctl.check_bar_modes(false);
        assert_eq!(ctl.surfaces().status.last_animate(), Some(false));

        ctl.set_screen_on(true);
        ctl.set_window_state(BarSide::Navigation, WindowShowState::Hidden);
        ctl.update_modes(VisibilityFlags::LOW_PROFILE, VisibilityFlags::empty());
        ctl.check_bar_modes(false);
        assert_eq!(ctl.surfaces().status.last_animate(), Some(true));
        assert_eq!(ctl.surfaces().navigation.as_ref().unwrap().last_animate(), Some(false));
    }

    #[test]
    fn test_unknown_screen_state_animates() {
        let mut ctl = controller();
        ctl.update_modes(VisibilityFlags::empty(), VisibilityFlags::LOW_PROFILE);
        ctl.check_bar_modes(false);
        assert_eq!(ctl.surfaces().status.last_animate(), Some(true));
    }

    #[test]
    fn test_demo_mode_freezes_modes() {
        let mut ctl = controller();
        ctl.set_demo_mode(true);
        ctl.update_modes(VisibilityFlags::empty(), VisibilityFlags::LOW_PROFILE);
        ctl.check_bar_modes(false);
        assert!(ctl.surfaces().status.calls().is_empty());

        ctl.force_all(BarMode::SemiTransparent);
        assert_eq!(ctl.surfaces().status.mode(), BarMode::SemiTransparent);
        assert_eq!(ctl.surfaces().blocker.mode(), BarMode::SemiTransparent);
    }

    #[test]
    fn test_redundant_transition_skipped() {
        let mut ctl = controller();
        ctl.check_bar_modes(false);
        ctl.check_bar_modes(false);
        // Status is already opaque; only the blocker moves to transparent once.
        assert!(ctl.surfaces().status.calls().is_empty());
        assert_eq!(ctl.surfaces().blocker.calls().len(), 1);
    }

    #[test]
    fn test_window_state_change_detection() {
        let mut ctl = controller();
        assert!(!ctl.set_window_state(BarSide::Status, WindowShowState::Showing));
        assert!(ctl.set_window_state(BarSide::Status, WindowShowState::Hidden));
        assert_eq!(ctl.window_state(BarSide::Status), WindowShowState::Hidden);
    }

    #[test]
    fn test_finish_animations_reaches_both_bars() {
        let mut ctl = controller();
        ctl.finish_animations();
        assert_eq!(ctl.surfaces().status.calls(), &[TransitionCall::FinishAnimations]);
        assert_eq!(
            ctl.surfaces().navigation.as_ref().unwrap().calls(),
            &[TransitionCall::FinishAnimations]
        );
    }
}
