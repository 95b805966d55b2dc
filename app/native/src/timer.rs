//! Named one-shot timers on a virtual clock.
//!
//! Every timer is a delayed post identified by a [`TimerName`]. At most one
//! instance per name is pending: scheduling a name replaces its previous
//! instance, and never touches timers with other names. Time only moves when
//! the owner advances the clock, which makes every timer-driven behavior
//! reproducible in tests and in scripted replays.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Identity of a pending timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimerName {
    /// Hides transient bars after the auto-hide timeout.
    AutoHide,
    /// Hides transient bars shortly after a touch outside them.
    UserAutoHide,
    /// Recomputes bar modes after auto-hide resumes.
    CheckBarModes,
    /// Hides the heads-up entry when its decay elapses.
    HeadsUpDecay,
    /// Starts brightness adjustment after a long press on the status bar.
    LongPressBrightness,
    /// Shows the search panel after the home hold-off.
    SearchPanelShow,
    /// Settles element visibility after a panel flip.
    FlipSettle,
    /// Shrinks the expanded window after a deferred collapse.
    CollapseSettle,
}

/// Data carried by a timer to its handler.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type", content = "value")]
pub enum TimerPayload {
    #[default]
    None,
    /// Key of the notification the timer was armed for.
    Notification(String),
}

/// A timer that reached its deadline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TimerFired {
    pub name: TimerName,
    pub payload: TimerPayload,
    /// Virtual time at which the timer fired (ms).
    pub at_ms: u64,
}

#[derive(Clone, Debug)]
struct PendingTimer {
    name: TimerName,
    payload: TimerPayload,
    deadline_ms: u64,
    /// Insertion order, breaks ties between equal deadlines.
    seq: u64,
}

/// Single-queue timer scheduler.
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    now_ms: u64,
    next_seq: u64,
    pending: SmallVec<[PendingTimer; 8]>,
}

impl Scheduler {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Current virtual time (ms).
    #[must_use]
    pub const fn now_ms(&self) -> u64 { self.now_ms }

    /// Arms `name` to fire `delay_ms` from now, replacing any pending instance.
    pub fn schedule(&mut self, name: TimerName, delay_ms: u64, payload: TimerPayload) {
        self.cancel(name);
        let seq = self.next_seq;
        self.next_seq += 1;
        tracing::trace!(timer = ?name, delay_ms, "timer scheduled");
        self.pending.push(PendingTimer {
            name,
            payload,
            deadline_ms: self.now_ms.saturating_add(delay_ms),
            seq,
        });
    }

    /// Cancels the pending instance of `name`. Returns true if one was pending.
    pub fn cancel(&mut self, name: TimerName) -> bool {
        let before = self.pending.len();
        self.pending.retain(|timer| timer.name != name);
        let removed = self.pending.len() != before;
        if removed {
            tracing::trace!(timer = ?name, "timer cancelled");
        }
        removed
    }

    #[must_use]
    pub fn is_pending(&self, name: TimerName) -> bool {
        self.pending.iter().any(|timer| timer.name == name)
    }

    /// Deadline of the pending instance of `name`.
    #[must_use]
    pub fn deadline(&self, name: TimerName) -> Option<u64> {
        self.pending.iter().find(|timer| timer.name == name).map(|timer| timer.deadline_ms)
    }

    /// Earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.pending.iter().map(|timer| timer.deadline_ms).min()
    }

    /// Names of all pending timers, earliest first.
    #[must_use]
    pub fn pending_names(&self) -> Vec<TimerName> {
        let mut timers: Vec<&PendingTimer> = self.pending.iter().collect();
        timers.sort_by_key(|timer| (timer.deadline_ms, timer.seq));
        timers.into_iter().map(|timer| timer.name).collect()
    }

    /// Removes and returns the earliest timer due at or before `until_ms`,
    /// moving the clock to its deadline.
    ///
    /// Handlers may schedule new timers between calls; those are honored if
    /// they fall due before `until_ms` as well.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<TimerFired> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.deadline_ms <= until_ms)
            .min_by_key(|(_, timer)| (timer.deadline_ms, timer.seq))
            .map(|(index, _)| index)?;

        let timer = self.pending.remove(index);
        self.now_ms = self.now_ms.max(timer.deadline_ms);
        Some(TimerFired {
            name: timer.name,
            payload: timer.payload,
            at_ms: self.now_ms,
        })
    }

    /// Moves the clock forward without firing anything. Never moves it back.
    pub fn set_now(&mut self, now_ms: u64) { self.now_ms = self.now_ms.max(now_ms); }

    /// Cancels every pending timer.
    pub fn clear(&mut self) { self.pending.clear(); }
}
