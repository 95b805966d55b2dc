//! Heads-up alert lifecycle.
//!
//! At most one notification is presented as a heads-up alert at a time. The
//! entry is populated on admission, shown, and then leaves through decay,
//! an explicit hide, a dismiss gesture, snoozing or escalation.

use serde::{Deserialize, Serialize};

use crate::constants::{heads_up, timing};
use crate::notification::Notification;
use crate::timer::{Scheduler, TimerFired, TimerName, TimerPayload};

// ============================================================================
// Types
// ============================================================================

/// The active heads-up entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadsUpEntry {
    pub key: String,
    /// Virtual time of admission (ms).
    pub arrival_ms: u64,
    pub expanded: bool,
    pub clearable: bool,
    pub full_screen_intent: bool,
}

/// Lifecycle phase of the heads-up slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum HeadsUpPhase {
    #[default]
    Idle,
    Populated,
    Shown,
}

/// Why a notification was not presented as a heads-up alert.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HeadsUpRefusal {
    /// Another notification holds the slot.
    Busy { active: String },
    NotInterrupting,
    PanelsDisabled,
    PanelsExpanded,
    AlertsDisabled,
    Snoozed { until_ms: u64 },
}

/// Coordinator state consulted on admission.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AdmissionContext {
    pub panels_enabled: bool,
    pub panels_expanded: bool,
    pub alerts_disabled: bool,
}

/// Swipe direction of a dismiss gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DismissDirection {
    /// Clears the notification when it is clearable.
    Left,
    /// Keeps the notification in the shade.
    Right,
}

/// Result of a dismiss gesture.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dismissal {
    pub entry: HeadsUpEntry,
    /// The notification should be cleared upstream.
    pub clear: bool,
}

/// Vertical anchor of the heads-up window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Gravity {
    #[default]
    Top,
    Bottom,
}

/// Placement of the heads-up window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadsUpAnchor {
    pub gravity: Gravity,
    /// Offset from the anchored edge (px).
    pub y: u32,
}

/// Tunables read from settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeadsUpSettings {
    /// Zero disables decay.
    pub decay_ms: u64,
    /// Zero disables snoozing.
    pub snooze_ms: u64,
    pub expanded_by_default: bool,
    pub gravity_bottom: bool,
    pub status_bar_height: u32,
    pub bottom_gap: u32,
}

impl Default for HeadsUpSettings {
    fn default() -> Self {
        Self {
            decay_ms: timing::HEADS_UP_DECAY_MS,
            snooze_ms: timing::HEADS_UP_SNOOZE_MS,
            expanded_by_default: false,
            gravity_bottom: false,
            status_bar_height: 24,
            bottom_gap: 0,
        }
    }
}

/// Alpha and vertical offset of the alert while it is being swiped.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SwipePresentation {
    pub alpha: f32,
    pub offset: f32,
}

/// Computes the swipe presentation for a drag fraction.
///
/// The alert is fully faded at 40% of the swipe. The offset only applies
/// when animating into place.
#[must_use]
pub fn swipe_presentation(animate_into: bool, fraction: f32, vertical_offset: f32) -> SwipePresentation {
    let fraction = (fraction / heads_up::SWIPE_FADE_FRACTION).min(1.0);
    SwipePresentation {
        alpha: 1.0 - fraction,
        offset: if animate_into { vertical_offset * fraction } else { 0.0 },
    }
}

// ============================================================================
// Controller
// ============================================================================

/// Heads-up slot, snooze and anchor state.
#[derive(Clone, Debug, Default)]
pub struct HeadsUpController {
    phase: HeadsUpPhase,
    entry: Option<HeadsUpEntry>,
    /// Zero when not snoozed.
    snoozed_until_ms: u64,
    ime_showing: bool,
    status_bar_shows: bool,
    anchor: HeadsUpAnchor,
    settings: HeadsUpSettings,
}

impl HeadsUpController {
    #[must_use]
    pub fn new(settings: HeadsUpSettings) -> Self {
        let mut controller = Self {
            status_bar_shows: true,
            settings,
            ..Self::default()
        };
        controller.anchor = controller.compute_anchor();
        controller
    }

    #[must_use]
    pub const fn phase(&self) -> HeadsUpPhase { self.phase }

    #[must_use]
    pub const fn entry(&self) -> Option<&HeadsUpEntry> { self.entry.as_ref() }

    #[must_use]
    pub fn active_key(&self) -> Option<&str> { self.entry.as_ref().map(|e| e.key.as_str()) }

    #[must_use]
    pub const fn anchor(&self) -> HeadsUpAnchor { self.anchor }

    #[must_use]
    pub const fn settings(&self) -> HeadsUpSettings { self.settings }

    #[must_use]
    pub const fn is_snoozed(&self, now_ms: u64) -> bool { self.snoozed_until_ms > now_ms }

    /// Whether the snooze affordance should be offered on the alert.
    #[must_use]
    pub const fn snooze_available(&self) -> bool { self.settings.snooze_ms != 0 }

    // ========================================================================
    // Admission
    // ========================================================================

    /// Checks whether `candidate` may take the heads-up slot.
    ///
    /// # Errors
    ///
    /// Returns the first rule that refuses the candidate.
    pub fn admit(
        &self,
        candidate: &Notification,
        ctx: AdmissionContext,
        now_ms: u64,
    ) -> Result<(), HeadsUpRefusal> {
        if !candidate.interrupt {
            return Err(HeadsUpRefusal::NotInterrupting);
        }
        if ctx.alerts_disabled {
            return Err(HeadsUpRefusal::AlertsDisabled);
        }
        if !ctx.panels_enabled {
            return Err(HeadsUpRefusal::PanelsDisabled);
        }
        if ctx.panels_expanded {
            return Err(HeadsUpRefusal::PanelsExpanded);
        }
        if self.is_snoozed(now_ms) {
            return Err(HeadsUpRefusal::Snoozed { until_ms: self.snoozed_until_ms });
        }
        if let Some(active) = self.entry.as_ref().filter(|e| e.key != candidate.key) {
            return Err(HeadsUpRefusal::Busy { active: active.key.clone() });
        }
        Ok(())
    }

    /// Takes the slot for `candidate`.
    ///
    /// # Errors
    ///
    /// Propagates the refusal from [`Self::admit`]; nothing changes then.
    pub fn populate(
        &mut self,
        candidate: &Notification,
        ctx: AdmissionContext,
        now_ms: u64,
    ) -> Result<(), HeadsUpRefusal> {
        self.admit(candidate, ctx, now_ms)?;
        self.entry = Some(HeadsUpEntry {
            key: candidate.key.clone(),
            arrival_ms: now_ms,
            expanded: candidate.expanded_hint || self.settings.expanded_by_default,
            clearable: candidate.clearable,
            full_screen_intent: candidate.full_screen_intent,
        });
        self.phase = HeadsUpPhase::Populated;
        tracing::debug!(key = %candidate.key, "heads-up populated");
        Ok(())
    }

    /// Shows the populated entry and arms decay.
    pub fn show(&mut self, sched: &mut Scheduler) {
        if self.phase != HeadsUpPhase::Populated {
            return;
        }
        self.phase = HeadsUpPhase::Shown;
        self.reset_decay_timer(sched);
    }

    /// Re-arms decay for the active entry. Entries that cannot be cleared
    /// never decay.
    pub fn reset_decay_timer(&self, sched: &mut Scheduler) {
        let Some(entry) = self.entry.as_ref() else {
            return;
        };
        if self.settings.decay_ms > 0 && entry.clearable {
            sched.schedule(
                TimerName::HeadsUpDecay,
                self.settings.decay_ms,
                TimerPayload::Notification(entry.key.clone()),
            );
        }
    }

    // ========================================================================
    // Leaving the slot
    // ========================================================================

    /// Clears the slot, returning the entry that was active.
    pub fn hide(&mut self, sched: &mut Scheduler) -> Option<HeadsUpEntry> {
        sched.cancel(TimerName::HeadsUpDecay);
        self.phase = HeadsUpPhase::Idle;
        let entry = self.entry.take();
        if let Some(entry) = entry.as_ref() {
            tracing::debug!(key = %entry.key, "heads-up hidden");
        }
        entry
    }

    /// Handles a decay timer. Stale fires for another entry are ignored.
    pub fn on_decay(&mut self, fired: &TimerFired, sched: &mut Scheduler) -> Option<HeadsUpEntry> {
        let TimerPayload::Notification(key) = &fired.payload else {
            return None;
        };
        if self.active_key() != Some(key.as_str()) {
            tracing::debug!(%key, "stale heads-up decay ignored");
            return None;
        }
        self.hide(sched)
    }

    /// Handles a dismiss gesture.
    pub fn dismiss(&mut self, direction: DismissDirection, sched: &mut Scheduler) -> Option<Dismissal> {
        let entry = self.hide(sched)?;
        let clear = entry.clearable && direction == DismissDirection::Left;
        Some(Dismissal { entry, clear })
    }

    /// Promotes the alert to a full interruption. The caller fires the
    /// full-screen action of the returned entry, if any, before anything else.
    pub fn escalate(&mut self, sched: &mut Scheduler) -> Option<HeadsUpEntry> { self.hide(sched) }

    /// Hides the alert and refuses new ones for the snooze interval.
    pub fn snooze(&mut self, now_ms: u64, sched: &mut Scheduler) -> Option<HeadsUpEntry> {
        if self.settings.snooze_ms == 0 {
            return None;
        }
        self.snoozed_until_ms = now_ms.saturating_add(self.settings.snooze_ms);
        tracing::debug!(until_ms = self.snoozed_until_ms, "heads-up snoozed");
        self.hide(sched)
    }

    pub const fn reset_snooze(&mut self) { self.snoozed_until_ms = 0; }

    /// Hides the alert if it presents the removed notification.
    pub fn on_notification_removed(&mut self, key: &str, sched: &mut Scheduler) -> Option<HeadsUpEntry> {
        if self.active_key() == Some(key) {
            self.hide(sched)
        } else {
            None
        }
    }

    // ========================================================================
    // Settings and anchor
    // ========================================================================

    /// Replaces the settings. Returns true if the anchor moved.
    pub fn set_settings(&mut self, settings: HeadsUpSettings) -> bool {
        self.settings = settings;
        self.refresh_anchor()
    }

    /// Records keyboard visibility. Returns true if the anchor moved.
    pub fn set_ime_showing(&mut self, showing: bool) -> bool {
        if self.ime_showing == showing {
            return false;
        }
        self.ime_showing = showing;
        self.refresh_anchor()
    }

    /// Records whether the status bar is on screen. Returns true if the anchor moved.
    pub fn set_status_bar_shows(&mut self, shows: bool) -> bool {
        self.status_bar_shows = shows;
        self.refresh_anchor()
    }

    fn refresh_anchor(&mut self) -> bool {
        let anchor = self.compute_anchor();
        let moved = anchor != self.anchor;
        self.anchor = anchor;
        if moved {
            tracing::debug!(gravity = ?anchor.gravity, y = anchor.y, "heads-up anchor moved");
        }
        moved
    }

    /// Bottom gravity unless the keyboard is showing.
    const fn compute_anchor(&self) -> HeadsUpAnchor {
        if self.settings.gravity_bottom && !self.ime_showing {
            HeadsUpAnchor {
                gravity: Gravity::Bottom,
                y: self.settings.bottom_gap,
            }
        } else {
            HeadsUpAnchor {
                gravity: Gravity::Top,
                y: if self.status_bar_shows { self.settings.status_bar_height } else { 0 },
            }
        }
    }
}
