//! Bar mode classification.
//!
//! A bar's mode is a pure function of the visibility flags. [`compute_mode`]
//! only reports a mode when one of the bar's relevant bits actually changed,
//! so callers can skip redundant transitions.

use serde::{Deserialize, Serialize};

use crate::flags::{BarSide, VisibilityFlags};

/// Rendering mode of a bar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BarMode {
    #[default]
    Opaque,
    Translucent,
    /// Transiently revealed over fullscreen content; subject to auto-hide.
    SemiTransparent,
    LightsOut,
    Transparent,
}

impl BarMode {
    /// Parses the names used by demo commands.
    #[must_use]
    pub fn from_demo_name(name: &str) -> Option<Self> {
        match name {
            "opaque" => Some(Self::Opaque),
            "translucent" => Some(Self::Translucent),
            "semi-transparent" => Some(Self::SemiTransparent),
            _ => None,
        }
    }

    /// Whether this mode marks a transiently revealed bar.
    #[must_use]
    pub const fn is_transient(self) -> bool { matches!(self, Self::SemiTransparent) }
}

/// Classifies a flag word for one bar.
///
/// Priority: transient, then translucent, then low-profile, then opaque.
#[must_use]
pub const fn classify(
    vis: VisibilityFlags,
    transient_bit: VisibilityFlags,
    translucent_bit: VisibilityFlags,
) -> BarMode {
    if vis.intersects(transient_bit) {
        BarMode::SemiTransparent
    } else if vis.intersects(translucent_bit) {
        BarMode::Translucent
    } else if vis.contains(VisibilityFlags::LOW_PROFILE) {
        BarMode::LightsOut
    } else {
        BarMode::Opaque
    }
}

/// Computes the new mode for a bar, or `None` when none of the bits that
/// affect it changed between `old` and `new`.
#[must_use]
pub fn compute_mode(
    old: VisibilityFlags,
    new: VisibilityFlags,
    transient_bit: VisibilityFlags,
    translucent_bit: VisibilityFlags,
) -> Option<BarMode> {
    let relevant = transient_bit.bits() | translucent_bit.bits() | VisibilityFlags::LOW_PROFILE.bits();
    if (old.bits() ^ new.bits()) & relevant == 0 {
        return None;
    }
    let old_mode = classify(old, transient_bit, translucent_bit);
    let new_mode = classify(new, transient_bit, translucent_bit);
    if old_mode == new_mode {
        return None;
    }
    Some(new_mode)
}

/// [`compute_mode`] for a named bar.
#[must_use]
pub fn compute_mode_for(
    side: BarSide,
    old: VisibilityFlags,
    new: VisibilityFlags,
) -> Option<BarMode> {
    compute_mode(old, new, side.transient_bit(), side.translucent_bit())
}
