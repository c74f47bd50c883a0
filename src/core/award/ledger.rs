// Event collections of a single award, in the order they were accepted.
//
// Ingestion is chronological per award, so each collection is also ordered by event date
// unless a later batch back-fills an earlier date. The calculator does not rely on the order.

use crate::core::event::{Event, EventKind};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AwardLedger {
    vested: Vec<Event>,
    cancelled: Vec<Event>,
    performance: Vec<Event>,
}

impl AwardLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vested(&self) -> &[Event] {
        &self.vested
    }

    pub fn cancelled(&self) -> &[Event] {
        &self.cancelled
    }

    pub fn performance(&self) -> &[Event] {
        &self.performance
    }

    pub fn events(&self, kind: EventKind) -> &[Event] {
        match kind {
            EventKind::Vest => &self.vested,
            EventKind::Cancel => &self.cancelled,
            EventKind::Performance => &self.performance,
        }
    }

    pub(crate) fn push_vested(&mut self, event: Event) {
        self.vested.push(event);
    }

    pub(crate) fn push_cancelled(&mut self, event: Event) {
        self.cancelled.push(event);
    }

    pub(crate) fn push_performance(&mut self, event: Event) {
        self.performance.push(event);
    }

    pub fn len(&self) -> usize {
        self.vested.len() + self.cancelled.len() + self.performance.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
