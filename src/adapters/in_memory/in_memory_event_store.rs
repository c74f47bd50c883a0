// In memory implementation of the EventStore port.
//
// Purpose
// - Keep the accepted award events for the lifetime of the process.
//
// Responsibilities
// - Store events per award, with one bucket per event kind.
// - Append in constant time; order by event date only when reading.

use crate::core::event::{Event, EventKind};
use crate::core::ports::{EventStore, EventStoreError};
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct AwardBuckets {
    vested: Vec<Event>,
    cancelled: Vec<Event>,
    performance: Vec<Event>,
}

impl AwardBuckets {
    fn bucket(&self, kind: EventKind) -> &Vec<Event> {
        match kind {
            EventKind::Vest => &self.vested,
            EventKind::Cancel => &self.cancelled,
            EventKind::Performance => &self.performance,
        }
    }

    fn bucket_mut(&mut self, kind: EventKind) -> &mut Vec<Event> {
        match kind {
            EventKind::Vest => &mut self.vested,
            EventKind::Cancel => &mut self.cancelled,
            EventKind::Performance => &mut self.performance,
        }
    }
}

#[derive(Default)]
pub struct InMemoryEventStore {
    inner: RwLock<HashMap<String, AwardBuckets>>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl EventStore for InMemoryEventStore {
    async fn add_event(&self, event: Event) -> Result<(), EventStoreError> {
        let mut guard = self.inner.write().await;
        guard
            .entry(event.award_id().to_string())
            .or_default()
            .bucket_mut(event.kind())
            .push(event);
        Ok(())
    }

    async fn get_events(
        &self,
        award_id: &str,
        kind: EventKind,
    ) -> Result<Vec<Event>, EventStoreError> {
        let guard = self.inner.read().await;
        let mut events = guard
            .get(award_id)
            .map(|buckets| buckets.bucket(kind).clone())
            .unwrap_or_default();
        // Stable sort, so same-day events keep their insertion order.
        events.sort_by_key(Event::event_date);
        Ok(events)
    }

    async fn get_all_award_ids(&self) -> Result<Vec<String>, EventStoreError> {
        let guard = self.inner.read().await;
        let mut ids: Vec<String> = guard.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }
}
