//! Expanded panel state: notifications, settings and the flip between them.
//!
//! The machine decides which side of the panel is showing and emits element
//! transitions through the [`AnimationDriver`]. Host window changes and bar
//! mode re-checks belong to the coordinator.

use serde::{Deserialize, Serialize};

use crate::animation::{
    AnimationDriver, Element, Interpolator, Property, Transition, Visibility,
};
use crate::constants::{fade, flip};

// ============================================================================
// Types
// ============================================================================

/// Direction of an in-progress flip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FlipDirection {
    ToNotifications,
    ToSettings,
}

/// Which panel content is showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "state")]
pub enum PanelState {
    #[default]
    Collapsed,
    NotificationsExpanded,
    SettingsExpanded,
    /// Following a drag between the two sides. `progress` is in `[-1, 1]`;
    /// negative values favor notifications.
    Flipping { progress: f32, direction: FlipDirection },
}

impl PanelState {
    #[must_use]
    pub const fn is_collapsed(&self) -> bool { matches!(self, Self::Collapsed) }
}

/// Preconditions evaluated by the coordinator for each request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PanelGate {
    /// Expansion is not disabled.
    pub panels_enabled: bool,
    /// Device setup is complete; settings are reachable.
    pub user_setup: bool,
}

/// Panel layout options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PanelLayout {
    /// Settings live on the back of the notification panel and are reached by
    /// flipping. When false, settings are a separate panel (dual-panel layout).
    pub flip_settings: bool,
    pub ribbon: bool,
    pub brightness_slider: bool,
}

impl Default for PanelLayout {
    fn default() -> Self {
        Self {
            flip_settings: true,
            ribbon: false,
            brightness_slider: false,
        }
    }
}

/// Why a panel request did nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelRefusal {
    PanelsDisabled,
    UserSetupIncomplete,
    NotExpanded,
    NoFlipSettings,
}

/// Elements touched by a flip.
const FLIP_ELEMENTS: [Element; 8] = Element::PANEL;

// ============================================================================
// State machine
// ============================================================================

/// Expanded panel state machine.
#[derive(Clone, Debug, Default)]
pub struct PanelStateMachine {
    state: PanelState,
    /// The expanded window is on screen.
    expanded_visible: bool,
    layout: PanelLayout,
}

impl PanelStateMachine {
    #[must_use]
    pub fn new(layout: PanelLayout) -> Self {
        Self {
            state: PanelState::Collapsed,
            expanded_visible: false,
            layout,
        }
    }

    #[must_use]
    pub const fn state(&self) -> PanelState { self.state }

    #[must_use]
    pub const fn is_expanded_visible(&self) -> bool { self.expanded_visible }

    #[must_use]
    pub const fn layout(&self) -> PanelLayout { self.layout }

    #[must_use]
    pub const fn has_flip_settings(&self) -> bool { self.layout.flip_settings }

    pub const fn set_layout(&mut self, layout: PanelLayout) { self.layout = layout; }

    /// Whether the settings side of the panel is showing and the notification
    /// list is not.
    #[must_use]
    pub fn settings_showing(&self, driver: &AnimationDriver) -> bool {
        if self.layout.flip_settings {
            driver.is_visible(Element::SettingsView) && !driver.is_visible(Element::NotificationList)
        } else {
            matches!(self.state, PanelState::SettingsExpanded)
        }
    }

    // ========================================================================
    // Expansion
    // ========================================================================

    /// Opens the notification side. Returns true if the expanded window
    /// became visible.
    ///
    /// # Errors
    ///
    /// Returns [`PanelRefusal::PanelsDisabled`] when expansion is disabled.
    pub fn expand_notifications(
        &mut self,
        gate: PanelGate,
        driver: &mut AnimationDriver,
    ) -> Result<bool, PanelRefusal> {
        if !gate.panels_enabled {
            return Err(PanelRefusal::PanelsDisabled);
        }
        let opened = self.make_expanded_visible();
        if self.layout.flip_settings && !driver.is_visible(Element::NotificationList) {
            self.flip_to_notifications(driver)?;
        }
        self.state = PanelState::NotificationsExpanded;
        Ok(opened)
    }

    /// Opens the settings side, flipping when `animate_flip` is true and
    /// switching instantly otherwise. Returns true if the expanded window
    /// became visible.
    ///
    /// # Errors
    ///
    /// Refused when expansion is disabled or user setup is incomplete.
    pub fn expand_settings(
        &mut self,
        gate: PanelGate,
        animate_flip: bool,
        driver: &mut AnimationDriver,
    ) -> Result<bool, PanelRefusal> {
        if !gate.panels_enabled {
            return Err(PanelRefusal::PanelsDisabled);
        }
        if !gate.user_setup {
            return Err(PanelRefusal::UserSetupIncomplete);
        }
        let opened = self.make_expanded_visible();
        if self.layout.flip_settings && !driver.is_visible(Element::SettingsView) {
            if animate_flip {
                self.flip_to_settings(driver)?;
            } else {
                self.switch_to_settings(driver)?;
            }
        }
        self.state = PanelState::SettingsExpanded;
        Ok(opened)
    }

    fn make_expanded_visible(&mut self) -> bool {
        if self.expanded_visible {
            return false;
        }
        self.expanded_visible = true;
        tracing::debug!("expanded panel visible");
        true
    }

    // ========================================================================
    // Flipping
    // ========================================================================

    /// Animates from the settings side to the notification side.
    ///
    /// # Errors
    ///
    /// Refused when collapsed or when settings are a separate panel.
    pub fn flip_to_notifications(&mut self, driver: &mut AnimationDriver) -> Result<(), PanelRefusal> {
        self.check_flippable()?;
        driver.cancel_all(&FLIP_ELEMENTS);

        let halfway_done = driver.is_visible(Element::NotificationList);
        let delay = if halfway_done { 0 } else { flip::DURATION_OUT_MS };
        let incoming = self.list_side_elements();
        if !halfway_done {
            for element in &incoming {
                driver.set_property(*element, Property::ScaleX, 0.0);
            }
        }
        for element in incoming {
            driver.set_visibility(element, Visibility::Visible);
            driver.apply(grow(element, delay));
        }
        driver.apply(shrink(Element::SettingsView));

        driver.set_visibility(Element::SettingsButton, Visibility::Visible);
        driver.apply_all([
            Transition::animate(Element::SettingsButton, Property::Alpha, 1.0, flip::DURATION_MS),
            fade_out(Element::NotificationButton),
            fade_out(Element::AddTileButton),
        ]);
        driver.set_visibility(Element::ClearAllButton, Visibility::Visible);
        driver.set_property(Element::ClearAllButton, Property::Alpha, 0.0);

        self.state = PanelState::NotificationsExpanded;
        tracing::debug!(halfway_done, "flip to notifications");
        Ok(())
    }

    /// Animates from the notification side to the settings side.
    ///
    /// # Errors
    ///
    /// Refused when collapsed or when settings are a separate panel.
    pub fn flip_to_settings(&mut self, driver: &mut AnimationDriver) -> Result<(), PanelRefusal> {
        self.check_flippable()?;
        driver.cancel_all(&FLIP_ELEMENTS);

        let halfway_done = driver.is_visible(Element::SettingsView);
        let delay = if halfway_done { 0 } else { flip::DURATION_OUT_MS };
        if !halfway_done {
            driver.set_property(Element::SettingsView, Property::ScaleX, 0.0);
        }
        driver.set_visibility(Element::SettingsView, Visibility::Visible);
        driver.apply(grow(Element::SettingsView, delay));
        for element in self.list_side_elements() {
            driver.apply(shrink(element));
        }

        driver.set_visibility(Element::NotificationButton, Visibility::Visible);
        driver.set_visibility(Element::AddTileButton, Visibility::Visible);
        driver.apply_all([
            fade_out(Element::SettingsButton),
            Transition::animate(Element::NotificationButton, Property::Alpha, 1.0, flip::DURATION_MS),
            Transition::animate(Element::AddTileButton, Property::Alpha, 1.0, flip::DURATION_MS),
            fade_out(Element::ClearAllButton),
        ]);

        self.state = PanelState::SettingsExpanded;
        tracing::debug!(halfway_done, "flip to settings");
        Ok(())
    }

    /// Switches to the settings side without animating.
    ///
    /// # Errors
    ///
    /// Refused when collapsed or when settings are a separate panel.
    pub fn switch_to_settings(&mut self, driver: &mut AnimationDriver) -> Result<(), PanelRefusal> {
        self.check_flippable()?;
        driver.cancel_all(&FLIP_ELEMENTS);

        driver.set_visibility(Element::SettingsView, Visibility::Visible);
        driver.set_property(Element::SettingsView, Property::ScaleX, 1.0);
        for element in [Element::NotificationList, Element::Ribbon, Element::BrightnessSlider] {
            driver.set_visibility(element, Visibility::Gone);
            driver.set_property(element, Property::ScaleX, 0.0);
        }
        for element in [Element::SettingsButton, Element::ClearAllButton] {
            driver.set_visibility(element, Visibility::Gone);
            driver.set_property(element, Property::Alpha, 0.0);
        }
        for element in [Element::NotificationButton, Element::AddTileButton] {
            driver.set_visibility(element, Visibility::Visible);
            driver.set_property(element, Property::Alpha, 1.0);
        }

        self.state = PanelState::SettingsExpanded;
        Ok(())
    }

    /// Toggles between the two sides.
    ///
    /// # Errors
    ///
    /// Refused when collapsed or when settings are a separate panel.
    pub fn flip_panels(&mut self, driver: &mut AnimationDriver) -> Result<(), PanelRefusal> {
        if matches!(self.state, PanelState::SettingsExpanded) {
            self.flip_to_notifications(driver)
        } else {
            self.flip_to_settings(driver)
        }
    }

    /// Places the panel part way between the sides, following a drag.
    ///
    /// `progress` is clamped to `[-1, 1]`: -1 shows only notifications, 1
    /// shows only settings. At either end the panel rests on that side
    /// instead of flipping. Moving towards settings is refused before setup
    /// is complete.
    ///
    /// # Errors
    ///
    /// Refused when collapsed, without flip settings, or when settings are
    /// not reachable yet.
    pub fn partial_flip(
        &mut self,
        progress: f32,
        gate: PanelGate,
        driver: &mut AnimationDriver,
    ) -> Result<(), PanelRefusal> {
        self.check_flippable()?;
        let progress = progress.clamp(-1.0, 1.0);
        if progress >= 0.0 && !gate.user_setup {
            return Err(PanelRefusal::UserSetupIncomplete);
        }
        driver.cancel_all(&FLIP_ELEMENTS);

        let list_side = self.list_side_elements();
        if progress < 0.0 {
            driver.set_property(Element::SettingsView, Property::ScaleX, 0.0);
            driver.set_visibility(Element::SettingsView, Visibility::Gone);
            driver.set_visibility(Element::SettingsButton, Visibility::Visible);
            driver.set_property(Element::SettingsButton, Property::Alpha, -progress);
            for element in list_side {
                driver.set_visibility(element, Visibility::Visible);
                driver.set_property(element, Property::ScaleX, -progress);
            }
            driver.set_visibility(Element::NotificationButton, Visibility::Gone);
            driver.set_visibility(Element::AddTileButton, Visibility::Gone);
        } else {
            driver.set_visibility(Element::SettingsView, Visibility::Visible);
            driver.set_property(Element::SettingsView, Property::ScaleX, progress);
            driver.set_visibility(Element::SettingsButton, Visibility::Gone);
            for element in list_side {
                driver.set_visibility(element, Visibility::Gone);
                driver.set_property(element, Property::ScaleX, 0.0);
            }
            driver.set_visibility(Element::NotificationButton, Visibility::Visible);
            driver.set_property(Element::NotificationButton, Property::Alpha, progress);
            driver.set_visibility(Element::AddTileButton, Visibility::Visible);
            driver.set_property(Element::AddTileButton, Property::Alpha, progress);
        }
        driver.set_visibility(Element::ClearAllButton, Visibility::Gone);

        self.state = if progress <= -1.0 {
            PanelState::NotificationsExpanded
        } else if progress >= 1.0 {
            PanelState::SettingsExpanded
        } else if progress < 0.0 {
            PanelState::Flipping {
                progress,
                direction: FlipDirection::ToNotifications,
            }
        } else {
            PanelState::Flipping {
                progress,
                direction: FlipDirection::ToSettings,
            }
        };
        Ok(())
    }

    /// Finishes a drag by flipping to whichever side is showing.
    ///
    /// # Errors
    ///
    /// Refused when collapsed or when settings are a separate panel.
    pub fn complete_partial_flip(&mut self, driver: &mut AnimationDriver) -> Result<(), PanelRefusal> {
        if driver.is_visible(Element::SettingsView) {
            self.flip_to_settings(driver)
        } else {
            self.flip_to_notifications(driver)
        }
    }

    // ========================================================================
    // Collapse
    // ========================================================================

    /// Collapses the panel, resetting every panel element synchronously.
    ///
    /// Returns false when already collapsed, in which case nothing changes.
    pub fn collapse(&mut self, driver: &mut AnimationDriver) -> bool {
        if !self.expanded_visible {
            return false;
        }
        self.expanded_visible = false;
        self.state = PanelState::Collapsed;
        self.reset_elements(driver);
        tracing::debug!("expanded panel collapsed");
        true
    }

    /// Puts every panel element in its collapsed resting state. The clear-all
    /// button is left to [`Self::update_clear_button`].
    pub fn reset_elements(&self, driver: &mut AnimationDriver) {
        driver.cancel_all(&FLIP_ELEMENTS);
        driver.set_visibility(Element::NotificationList, Visibility::Visible);
        driver.set_property(Element::NotificationList, Property::ScaleX, 1.0);
        for (element, enabled) in [
            (Element::Ribbon, self.layout.ribbon),
            (Element::BrightnessSlider, self.layout.brightness_slider),
        ] {
            let visibility = if enabled { Visibility::Visible } else { Visibility::Gone };
            driver.set_visibility(element, visibility);
            driver.set_property(element, Property::ScaleX, 1.0);
        }
        driver.set_visibility(Element::SettingsButton, Visibility::Visible);
        driver.set_property(Element::SettingsButton, Property::Alpha, 1.0);
        driver.set_visibility(Element::SettingsView, Visibility::Gone);
        driver.set_property(Element::SettingsView, Property::ScaleX, 0.0);
        for element in [Element::NotificationButton, Element::AddTileButton] {
            driver.set_visibility(element, Visibility::Gone);
            driver.set_property(element, Property::Alpha, 0.0);
        }
    }

    /// Shows or fades the clear-all button to match whether any clearable
    /// notification exists.
    pub fn update_clear_button(&self, clearable: bool, driver: &mut AnimationDriver) {
        let target = if clearable { 1.0 } else { 0.0 };
        if self.layout.flip_settings && self.settings_showing(driver) {
            driver.set_visibility(Element::ClearAllButton, Visibility::Invisible);
        } else if self.expanded_visible && driver.is_visible(Element::ClearAllButton) {
            let alpha = driver.value(Element::ClearAllButton, Property::Alpha);
            let fully_shown = (alpha - 1.0).abs() < f32::EPSILON;
            if clearable != fully_shown {
                let mut fade =
                    Transition::animate(Element::ClearAllButton, Property::Alpha, target, fade::CLEAR_BUTTON_MS);
                if !clearable {
                    fade = fade.then(Visibility::Invisible);
                }
                driver.apply(fade);
            }
        } else {
            driver.set_property(Element::ClearAllButton, Property::Alpha, target);
            let visibility = if clearable { Visibility::Visible } else { Visibility::Invisible };
            driver.set_visibility(Element::ClearAllButton, visibility);
        }
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    const fn check_flippable(&self) -> Result<(), PanelRefusal> {
        if !self.layout.flip_settings {
            return Err(PanelRefusal::NoFlipSettings);
        }
        if !self.expanded_visible {
            return Err(PanelRefusal::NotExpanded);
        }
        Ok(())
    }

    /// The notification list plus the optional widgets that travel with it.
    fn list_side_elements(&self) -> Vec<Element> {
        let mut elements = vec![Element::NotificationList];
        if self.layout.ribbon {
            elements.push(Element::Ribbon);
        }
        if self.layout.brightness_slider {
            elements.push(Element::BrightnessSlider);
        }
        elements
    }
}

fn grow(element: Element, delay_ms: u64) -> Transition {
    Transition::animate(element, Property::ScaleX, 1.0, flip::DURATION_IN_MS)
        .with_delay(delay_ms)
        .with_interpolator(Interpolator::Decelerate)
}

fn shrink(element: Element) -> Transition {
    Transition::animate(element, Property::ScaleX, 0.0, flip::DURATION_OUT_MS)
        .with_interpolator(Interpolator::Accelerate)
        .then(Visibility::Gone)
}

fn fade_out(element: Element) -> Transition {
    Transition::animate(element, Property::Alpha, 0.0, flip::DURATION_MS).then(Visibility::Gone)
}
