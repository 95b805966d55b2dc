//! Auto-hide for transiently revealed bars.
//!
//! The scheduler only arms timers; the coordinator owns the visibility flags
//! and re-validates them when a timer fires.

use crate::constants::timing;
use crate::flags::VisibilityFlags;
use crate::timer::{Scheduler, TimerName, TimerPayload};

/// Auto-hide state for transient bars.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AutoHideScheduler {
    /// A transient bar was showing when auto-hide was suspended.
    suspended: bool,
}

impl AutoHideScheduler {
    #[must_use]
    pub const fn new() -> Self { Self { suspended: false } }

    /// Whether a suspended auto-hide is waiting for interaction to end.
    #[must_use]
    pub const fn is_suspended(&self) -> bool { self.suspended }

    /// Arms the auto-hide timer, replacing a pending one.
    pub fn schedule(&mut self, sched: &mut Scheduler) {
        self.cancel(sched);
        sched.schedule(TimerName::AutoHide, timing::AUTOHIDE_TIMEOUT_MS, TimerPayload::None);
    }

    /// Records that auto-hide is wanted but must wait for interaction to end.
    pub const fn defer(&mut self) { self.suspended = true; }

    /// Cancels the automatic timer and forgets any suspension.
    pub fn cancel(&mut self, sched: &mut Scheduler) {
        self.suspended = false;
        sched.cancel(TimerName::AutoHide);
    }

    /// Cancels both the automatic and the user-initiated timers.
    pub fn cancel_all(&mut self, sched: &mut Scheduler) {
        self.cancel(sched);
        sched.cancel(TimerName::UserAutoHide);
    }

    /// Stops all auto-hide activity while a bar is being touched, remembering
    /// whether a transient bar was visible.
    pub fn suspend(&mut self, sched: &mut Scheduler, vis: VisibilityFlags) {
        sched.cancel(TimerName::AutoHide);
        sched.cancel(TimerName::UserAutoHide);
        sched.cancel(TimerName::CheckBarModes);
        self.suspended = vis.has_transient();
    }

    /// Re-arms auto-hide after interaction ends if the suspension remembered a
    /// transient bar, and posts a bar mode re-check. Returns true if re-armed.
    pub fn resume(&mut self, sched: &mut Scheduler) -> bool {
        if !self.suspended {
            return false;
        }
        self.schedule(sched);
        sched.schedule(
            TimerName::CheckBarModes,
            timing::CHECK_BAR_MODES_DELAY_MS,
            TimerPayload::None,
        );
        true
    }

    /// Arms the short user-initiated hide. The automatic timer is left alone.
    pub fn user_initiated_hide(sched: &mut Scheduler) {
        sched.schedule(
            TimerName::UserAutoHide,
            timing::USER_AUTOHIDE_TIMEOUT_MS,
            TimerPayload::None,
        );
    }

    /// Flags to request when a hide timer fires, or `None` when no transient
    /// bar is showing anymore.
    #[must_use]
    pub const fn hide_request(vis: VisibilityFlags) -> Option<VisibilityFlags> {
        if vis.has_transient() {
            Some(vis.difference(VisibilityFlags::TRANSIENT))
        } else {
            None
        }
    }
}
