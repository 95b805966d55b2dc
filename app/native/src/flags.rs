//! Bit flag types shared by the coordination engine.
//!
//! Bit values match the platform wire values so that flag words received from
//! the window host can be used as-is.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// System UI visibility requested by the foreground application and the
    /// window host.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct VisibilityFlags: u32 {
        /// Dim the bars (lights out).
        const LOW_PROFILE = 0x0000_0001;
        /// Hide the navigation bar.
        const HIDE_NAVIGATION = 0x0000_0002;
        /// Hide the status bar.
        const FULLSCREEN = 0x0000_0004;
        /// The status bar is temporarily revealed over fullscreen content.
        const STATUS_BAR_TRANSIENT = 0x0400_0000;
        /// The navigation bar is temporarily revealed over fullscreen content.
        const NAVIGATION_BAR_TRANSIENT = 0x0800_0000;
        /// One-shot request to re-reveal the status bar.
        const STATUS_BAR_UNHIDE = 0x1000_0000;
        /// One-shot request to re-reveal the navigation bar.
        const NAVIGATION_BAR_UNHIDE = 0x2000_0000;
        /// Draw the status bar translucent.
        const STATUS_BAR_TRANSLUCENT = 0x4000_0000;
        /// Draw the navigation bar translucent.
        const NAVIGATION_BAR_TRANSLUCENT = 0x8000_0000;

        const TRANSIENT = Self::STATUS_BAR_TRANSIENT.bits() | Self::NAVIGATION_BAR_TRANSIENT.bits();
        const UNHIDE = Self::STATUS_BAR_UNHIDE.bits() | Self::NAVIGATION_BAR_UNHIDE.bits();
    }
}

impl VisibilityFlags {
    /// Returns true if either bar is currently revealed transiently.
    #[must_use]
    pub const fn has_transient(self) -> bool { self.intersects(Self::TRANSIENT) }

    /// Returns `(self & !mask) | (requested & mask)`.
    #[must_use]
    pub const fn merged(self, requested: Self, mask: Self) -> Self {
        Self::from_bits_retain((self.bits() & !mask.bits()) | (requested.bits() & mask.bits()))
    }
}

bitflags! {
    /// Features of the status bar that the host has disabled.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct DisableFlags: u32 {
        /// Panels may not be expanded.
        const EXPAND = 0x0001_0000;
        const NOTIFICATION_ICONS = 0x0002_0000;
        /// Heads-up alerts are suppressed.
        const NOTIFICATION_ALERTS = 0x0004_0000;
        const NOTIFICATION_TICKER = 0x0008_0000;
        const SYSTEM_INFO = 0x0010_0000;
        const HOME = 0x0020_0000;
        const BACK = 0x0040_0000;
        const CLOCK = 0x0080_0000;
        const RECENT = 0x0100_0000;
        const SEARCH = 0x0200_0000;

        const NAVIGATION = Self::HOME.bits()
            | Self::RECENT.bits()
            | Self::BACK.bits()
            | Self::SEARCH.bits();
    }
}

bitflags! {
    /// Bar windows, used for the interacting window set.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct BarWindows: u8 {
        const STATUS_BAR = 1 << 0;
        const NAVIGATION_BAR = 1 << 1;
    }
}

bitflags! {
    /// Sub-panels to leave alone when collapsing.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct CollapseFlags: u8 {
        const EXCLUDE_RECENTS = 1 << 0;
        const EXCLUDE_SEARCH = 1 << 1;
    }
}

/// One of the two system bars.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BarSide {
    Status,
    Navigation,
}

impl BarSide {
    /// Transient bit for this bar.
    #[must_use]
    pub const fn transient_bit(self) -> VisibilityFlags {
        match self {
            Self::Status => VisibilityFlags::STATUS_BAR_TRANSIENT,
            Self::Navigation => VisibilityFlags::NAVIGATION_BAR_TRANSIENT,
        }
    }

    /// Translucent bit for this bar.
    #[must_use]
    pub const fn translucent_bit(self) -> VisibilityFlags {
        match self {
            Self::Status => VisibilityFlags::STATUS_BAR_TRANSLUCENT,
            Self::Navigation => VisibilityFlags::NAVIGATION_BAR_TRANSLUCENT,
        }
    }

    /// Bit that hides this bar.
    #[must_use]
    pub const fn hidden_bit(self) -> VisibilityFlags {
        match self {
            Self::Status => VisibilityFlags::FULLSCREEN,
            Self::Navigation => VisibilityFlags::HIDE_NAVIGATION,
        }
    }

    /// Window identity used in the interacting set.
    #[must_use]
    pub const fn window(self) -> BarWindows {
        match self {
            Self::Status => BarWindows::STATUS_BAR,
            Self::Navigation => BarWindows::NAVIGATION_BAR,
        }
    }

    /// Whether this bar is on screen under `vis`: not hidden, or hidden but
    /// transiently revealed.
    #[must_use]
    pub const fn is_visible(self, vis: VisibilityFlags) -> bool {
        !vis.contains(self.hidden_bit()) || vis.contains(self.transient_bit())
    }
}
