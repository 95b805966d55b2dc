//! Animated elements of the status bar and its panels.

use serde::{Deserialize, Serialize};

/// An element whose visibility, horizontal scale or alpha is animated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Element {
    NotificationList,
    SettingsView,
    SettingsButton,
    NotificationButton,
    ClearAllButton,
    AddTileButton,
    /// Quick access ribbon above the notification list.
    Ribbon,
    BrightnessSlider,
    SystemIcons,
    NotificationIcons,
    /// Dot shown on the collapsed bar while lights are out and notifications exist.
    LightsOutDot,
}

impl Element {
    pub const COUNT: usize = 11;

    pub const ALL: [Self; Self::COUNT] = [
        Self::NotificationList,
        Self::SettingsView,
        Self::SettingsButton,
        Self::NotificationButton,
        Self::ClearAllButton,
        Self::AddTileButton,
        Self::Ribbon,
        Self::BrightnessSlider,
        Self::SystemIcons,
        Self::NotificationIcons,
        Self::LightsOutDot,
    ];

    /// Elements living in the expanded panel.
    pub const PANEL: [Self; 8] = [
        Self::NotificationList,
        Self::SettingsView,
        Self::SettingsButton,
        Self::NotificationButton,
        Self::ClearAllButton,
        Self::AddTileButton,
        Self::Ribbon,
        Self::BrightnessSlider,
    ];

    #[must_use]
    pub const fn index(self) -> usize { self as usize }
}

/// View visibility.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Visibility {
    #[default]
    Visible,
    /// Hidden but still occupying layout space.
    Invisible,
    Gone,
}

/// Animatable property of an element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Property {
    ScaleX,
    Alpha,
}

/// Resting state of one element.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementState {
    pub visibility: Visibility,
    pub scale_x: f32,
    pub alpha: f32,
}

impl Default for ElementState {
    fn default() -> Self {
        Self {
            visibility: Visibility::Visible,
            scale_x: 1.0,
            alpha: 1.0,
        }
    }
}

impl ElementState {
    #[must_use]
    pub const fn get(&self, property: Property) -> f32 {
        match property {
            Property::ScaleX => self.scale_x,
            Property::Alpha => self.alpha,
        }
    }

    pub const fn set(&mut self, property: Property, value: f32) {
        match property {
            Property::ScaleX => self.scale_x = value,
            Property::Alpha => self.alpha = value,
        }
    }

    #[must_use]
    pub fn is_visible(&self) -> bool { self.visibility == Visibility::Visible }
}
