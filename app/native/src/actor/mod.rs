//! Coordinator actor.
//!
//! The actor owns a [`StatusBarCoordinator`] and processes messages one at a
//! time on a tokio task. Between messages it sleeps until the next pending
//! timer, so the coordinator's virtual clock follows wall time: virtual
//! milliseconds are measured from the instant the actor was spawned, offset
//! by whatever the coordinator's clock already read.
//!
//! # Panic Recovery
//!
//! A panicking handler is caught and logged and the loop moves on to the next
//! message. The coordinator may be partially updated afterwards.

mod handle;
mod messages;

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Duration;

pub use handle::{ActorError, CoordinatorHandle};
pub use messages::{CoordinatorMessage, CoordinatorQuery, QueryResult};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::bar::BarTransitions;
use crate::coordinator::StatusBarCoordinator;
use crate::host::WindowHost;
use crate::notification::NotificationStore;

/// Channel buffer size for the coordinator actor.
const CHANNEL_BUFFER_SIZE: usize = 256;

/// Owns the coordinator while it runs on a tokio task.
pub struct CoordinatorActor<H, B, S> {
    coordinator: StatusBarCoordinator<H, B, S>,
    receiver: mpsc::Receiver<CoordinatorMessage>,
    /// Wall time matching `offset_ms` on the virtual clock.
    epoch: Instant,
    offset_ms: u64,
}

impl<H, B, S> CoordinatorActor<H, B, S>
where
    H: WindowHost + Send + 'static,
    B: BarTransitions + Send + 'static,
    S: NotificationStore + Send + 'static,
{
    /// Spawns the actor on the current tokio runtime.
    ///
    /// The join handle yields the coordinator back once the actor stops,
    /// either on [`CoordinatorHandle::shutdown`] or when every handle is
    /// dropped.
    #[must_use]
    pub fn spawn(
        coordinator: StatusBarCoordinator<H, B, S>,
    ) -> (CoordinatorHandle, JoinHandle<StatusBarCoordinator<H, B, S>>) {
        tracing::debug!(now_ms = coordinator.now_ms(), "spawning coordinator actor");
        let (sender, receiver) = mpsc::channel(CHANNEL_BUFFER_SIZE);

        let actor = Self {
            offset_ms: coordinator.now_ms(),
            coordinator,
            receiver,
            epoch: Instant::now(),
        };
        let task = tokio::spawn(actor.run());

        (CoordinatorHandle::new(sender), task)
    }

    async fn run(mut self) -> StatusBarCoordinator<H, B, S> {
        tracing::trace!("coordinator actor loop starting");

        loop {
            let wake = self.coordinator.next_deadline().map(|ms| self.instant_for(ms));
            let received = tokio::select! {
                msg = self.receiver.recv() => Some(msg),
                () = sleep_until(wake) => None,
            };

            let Some(msg) = received else {
                self.guarded("Timer", Self::sync_clock);
                continue;
            };
            let Some(msg) = msg else {
                break;
            };
            if matches!(msg, CoordinatorMessage::Shutdown) {
                tracing::debug!("coordinator actor received shutdown message");
                return self.coordinator;
            }

            let name = msg.name();
            self.guarded(name, |actor| {
                actor.sync_clock();
                actor.handle_message(msg);
            });
        }

        tracing::debug!("coordinator actor channel closed, exiting");
        self.coordinator
    }

    /// Runs `f`, logging instead of unwinding if it panics.
    fn guarded(&mut self, name: &str, f: impl FnOnce(&mut Self)) {
        let result = catch_unwind(AssertUnwindSafe(|| f(self)));

        if let Err(panic_info) = result {
            let panic_msg = panic_info
                .downcast_ref::<&str>()
                .map(|s| (*s).to_string())
                .or_else(|| panic_info.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());

            tracing::error!(handler = name, panic = %panic_msg, "coordinator actor handler panicked");
            tracing::error!("coordinator actor recovered from panic; state may be inconsistent");
        }
    }

    fn handle_message(&mut self, msg: CoordinatorMessage) {
        match msg {
            CoordinatorMessage::Event(event) => self.coordinator.handle(*event),
            CoordinatorMessage::Query { query, respond_to } => {
                let result = self.execute_query(query);
                if respond_to.send(result).is_err() {
                    tracing::warn!(?query, "failed to send query response (channel closed)");
                }
            }
            // Handled in run()
            CoordinatorMessage::Shutdown => {}
        }
    }

    fn execute_query(&self, query: CoordinatorQuery) -> QueryResult {
        match query {
            CoordinatorQuery::Snapshot => QueryResult::Snapshot(Box::new(self.coordinator.snapshot())),
            CoordinatorQuery::Config => QueryResult::Config(Box::new(self.coordinator.config().clone())),
            CoordinatorQuery::NextDeadline => QueryResult::NextDeadline(self.coordinator.next_deadline()),
        }
    }

    // ========================================================================
    // Clock
    // ========================================================================

    fn wall_ms(&self) -> u64 {
        let elapsed = u64::try_from(self.epoch.elapsed().as_millis()).unwrap_or(u64::MAX);
        self.offset_ms.saturating_add(elapsed)
    }

    fn instant_for(&self, virtual_ms: u64) -> Instant {
        self.epoch + Duration::from_millis(virtual_ms.saturating_sub(self.offset_ms))
    }

    /// Fires every timer that is due at the current wall time.
    fn sync_clock(&mut self) {
        let now = self.wall_ms();
        if now > self.coordinator.now_ms() {
            self.coordinator.advance_to(now);
        }
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinator::Event;
    use crate::flags::VisibilityFlags;
    use crate::host::HostRequest;
    use crate::sim::Harness;
    use crate::timer::TimerName;

    fn reveal() -> Event {
        Event::SetSystemUiVisibility {
            vis: VisibilityFlags::FULLSCREEN | VisibilityFlags::STATUS_BAR_TRANSIENT,
            mask: VisibilityFlags::FULLSCREEN | VisibilityFlags::STATUS_BAR_TRANSIENT,
        }
    }

    #[tokio::test]
    async fn test_actor_spawn_and_shutdown() {
        let (handle, task) = CoordinatorActor::spawn(Harness::new().coordinator);
        assert!(handle.is_alive());

        handle.shutdown().unwrap();
        let coordinator = task.await.unwrap();
        assert_eq!(coordinator.now_ms(), 0);
    }

    #[tokio::test]
    async fn test_actor_stops_when_handles_drop() {
        let (handle, task) = CoordinatorActor::spawn(Harness::new().coordinator);
        drop(handle);
        assert!(task.await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_actor_fires_timers_on_wall_clock() {
        let (handle, task) = CoordinatorActor::spawn(Harness::new().coordinator);
        handle.send_async(reveal()).await.unwrap();

        let snapshot = handle.snapshot().await.unwrap();
        assert!(snapshot.timers.iter().any(|t| t.name == TimerName::AutoHide));

        tokio::time::sleep(Duration::from_millis(3100)).await;
        let snapshot = handle.snapshot().await.unwrap();
        assert_eq!(snapshot.visibility, VisibilityFlags::FULLSCREEN);
        assert!(snapshot.now_ms >= 3000);

        handle.shutdown().unwrap();
        let coordinator = task.await.unwrap();
        assert!(coordinator.host().saw(|r| {
            *r == HostRequest::NotifyVisibilityChanged { flags: VisibilityFlags::FULLSCREEN }
        }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_actor_query_config_and_deadline() {
        let (handle, _task) = CoordinatorActor::spawn(Harness::new().coordinator);
        let config = handle.config().await.unwrap();
        assert_eq!(config, crate::config::ShadeConfig::default());

        let deadline = handle.query(CoordinatorQuery::NextDeadline).await.unwrap();
        assert_eq!(deadline.into_next_deadline(), Some(None));

        handle.send(reveal()).unwrap();
        let deadline = handle
            .query_timeout(CoordinatorQuery::NextDeadline, Duration::from_secs(1))
            .await
            .unwrap();
        assert!(deadline.into_next_deadline().flatten().is_some());
    }
}
