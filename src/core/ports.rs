// Ports define what the core needs from the outside world, without implementing it.
//
// Purpose
// - Describe the award event log as a trait so the core does not depend on a storage backend.
//
// Boundaries
// - No concrete storage here. Adapters implement these traits in the adapters layer.
//
// Testing guidance
// - The in memory adapter backs tests and the default composition.

use crate::core::event::{Event, EventKind};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EventStoreError {
    #[error("backend error: {0}")]
    Backend(String),
}

/// Append-only log of accepted award events, partitioned by award and kind.
#[async_trait]
pub trait EventStore: Send + Sync {
    async fn add_event(&self, event: Event) -> Result<(), EventStoreError>;

    /// Events of one kind for one award, by event date ascending. Ties keep insertion order.
    async fn get_events(
        &self,
        award_id: &str,
        kind: EventKind,
    ) -> Result<Vec<Event>, EventStoreError>;

    async fn get_all_award_ids(&self) -> Result<Vec<String>, EventStoreError>;
}
