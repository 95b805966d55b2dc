//! Message types for the coordinator actor.

use tokio::sync::oneshot;

use crate::config::ShadeConfig;
use crate::coordinator::{Event, Snapshot};

/// Messages the coordinator actor processes.
#[derive(Debug)]
pub enum CoordinatorMessage {
    /// An input event for the coordinator.
    Event(Box<Event>),

    /// Query the coordinator and get a response.
    Query {
        query: CoordinatorQuery,
        respond_to: oneshot::Sender<QueryResult>,
    },

    /// Stop the actor loop.
    Shutdown,
}

impl CoordinatorMessage {
    /// Name used when logging a failed handler.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Event(_) => "Event",
            Self::Query { .. } => "Query",
            Self::Shutdown => "Shutdown",
        }
    }
}

/// Read-only queries answered from the actor's coordinator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoordinatorQuery {
    Snapshot,
    Config,
    NextDeadline,
}

/// Responses to [`CoordinatorQuery`].
#[derive(Debug)]
pub enum QueryResult {
    Snapshot(Box<Snapshot>),
    Config(Box<ShadeConfig>),
    NextDeadline(Option<u64>),
}

impl QueryResult {
    #[must_use]
    pub fn into_snapshot(self) -> Option<Snapshot> {
        match self {
            Self::Snapshot(snapshot) => Some(*snapshot),
            _ => None,
        }
    }

    #[must_use]
    pub fn into_config(self) -> Option<ShadeConfig> {
        match self {
            Self::Config(config) => Some(*config),
            _ => None,
        }
    }

    #[must_use]
    pub fn into_next_deadline(self) -> Option<Option<u64>> {
        match self {
            Self::NextDeadline(deadline) => Some(deadline),
            _ => None,
        }
    }
}
