//! Handle for communicating with the coordinator actor.
//!
//! The `CoordinatorHandle` is a cheap, cloneable sender that event sources
//! (stdin reader, config watcher, tests) use to feed the coordinator.

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};

use super::messages::{CoordinatorMessage, CoordinatorQuery, QueryResult};
use crate::config::ShadeConfig;
use crate::coordinator::{Event, Snapshot};

/// Error types for actor communication.
#[derive(Debug, thiserror::Error)]
pub enum ActorError {
    /// Failed to send message to actor.
    #[error("Failed to send message to actor: channel closed")]
    SendFailed,

    /// Failed to receive response from actor.
    #[error("Failed to receive response from actor: channel closed")]
    ReceiveFailed,

    /// Query timed out.
    #[error("Query timed out after {0:?}")]
    Timeout(Duration),

    /// The actor answered with a result of another kind.
    #[error("Unexpected query result")]
    UnexpectedResult,
}

/// Handle for communicating with the coordinator actor.
#[derive(Clone)]
pub struct CoordinatorHandle {
    sender: mpsc::Sender<CoordinatorMessage>,
}

impl CoordinatorHandle {
    pub(crate) const fn new(sender: mpsc::Sender<CoordinatorMessage>) -> Self { Self { sender } }

    // ========================================================================
    // Fire-and-forget sending
    // ========================================================================

    /// Queues an event without waiting.
    ///
    /// # Errors
    ///
    /// Returns [`ActorError::SendFailed`] if the actor has stopped or its
    /// buffer is full.
    pub fn send(&self, event: Event) -> Result<(), ActorError> {
        self.sender
            .try_send(CoordinatorMessage::Event(Box::new(event)))
            .map_err(|_| ActorError::SendFailed)
    }

    /// Queues an event, waiting for buffer space.
    ///
    /// # Errors
    ///
    /// Returns [`ActorError::SendFailed`] if the channel is closed.
    pub async fn send_async(&self, event: Event) -> Result<(), ActorError> {
        self.sender
            .send(CoordinatorMessage::Event(Box::new(event)))
            .await
            .map_err(|_| ActorError::SendFailed)
    }

    // ========================================================================
    // Query methods
    // ========================================================================

    /// Execute a query and wait for the result.
    ///
    /// # Errors
    ///
    /// Returns [`ActorError::SendFailed`] if the channel is closed, or
    /// [`ActorError::ReceiveFailed`] if the response channel is closed.
    pub async fn query(&self, query: CoordinatorQuery) -> Result<QueryResult, ActorError> {
        let (tx, rx) = oneshot::channel();

        self.sender
            .send(CoordinatorMessage::Query { query, respond_to: tx })
            .await
            .map_err(|_| ActorError::SendFailed)?;

        rx.await.map_err(|_| ActorError::ReceiveFailed)
    }

    /// Execute a query with a timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ActorError::Timeout`] if the query doesn't complete in time,
    /// or any error from [`Self::query`].
    pub async fn query_timeout(
        &self,
        query: CoordinatorQuery,
        timeout: Duration,
    ) -> Result<QueryResult, ActorError> {
        tokio::time::timeout(timeout, self.query(query))
            .await
            .map_err(|_| ActorError::Timeout(timeout))?
    }

    /// Current state of the coordinator.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the actor fails.
    pub async fn snapshot(&self) -> Result<Snapshot, ActorError> {
        self.query(CoordinatorQuery::Snapshot)
            .await?
            .into_snapshot()
            .ok_or(ActorError::UnexpectedResult)
    }

    /// Configuration the coordinator is running with.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the actor fails.
    pub async fn config(&self) -> Result<ShadeConfig, ActorError> {
        self.query(CoordinatorQuery::Config)
            .await?
            .into_config()
            .ok_or(ActorError::UnexpectedResult)
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Asks the actor to stop after the messages already queued.
    ///
    /// # Errors
    ///
    /// Returns [`ActorError::SendFailed`] if the actor has already stopped.
    pub fn shutdown(&self) -> Result<(), ActorError> {
        self.sender.try_send(CoordinatorMessage::Shutdown).map_err(|_| ActorError::SendFailed)
    }

    /// Check if the actor is still running.
    #[must_use]
    pub fn is_alive(&self) -> bool { !self.sender.is_closed() }

    /// Number of messages waiting in the channel.
    #[must_use]
    pub fn pending_messages(&self) -> usize { self.sender.max_capacity() - self.sender.capacity() }
}

impl std::fmt::Debug for CoordinatorHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoordinatorHandle")
            .field("alive", &self.is_alive())
            .field("pending", &self.pending_messages())
            .finish()
    }
}
