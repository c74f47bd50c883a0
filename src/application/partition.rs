// Batch preparation before fan-out.
//
// Purpose
// - Fix a deterministic order, drop repeats inside the batch, and group the rest per
//   (employee, award).
//
// Responsibilities
// - Sort by event date, stable on ties, so same-day events keep their submitted order.
// - Keep the first occurrence of each dedup key. Repeats across batches are dropped later,
//   by the award that already applied them.
// - Emit partitions sorted by employee id then award id.

use crate::core::event::Event;
use std::collections::{BTreeMap, HashSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    pub employee_id: String,
    pub award_id: String,
    pub events: Vec<Event>,
}

#[derive(Debug, Default)]
pub struct PartitionedBatch {
    pub partitions: Vec<Partition>,
    pub duplicates: usize,
}

pub fn partition_batch(mut events: Vec<Event>) -> PartitionedBatch {
    events.sort_by_key(Event::event_date);

    let mut seen = HashSet::new();
    let mut duplicates = 0;
    let mut groups: BTreeMap<(String, String), Vec<Event>> = BTreeMap::new();
    for event in events {
        if !seen.insert(event.key()) {
            duplicates += 1;
            continue;
        }
        groups
            .entry((event.employee_id().to_string(), event.award_id().to_string()))
            .or_default()
            .push(event);
    }

    let partitions = groups
        .into_iter()
        .map(|((employee_id, award_id), events)| Partition {
            employee_id,
            award_id,
            events,
        })
        .collect();
    PartitionedBatch {
        partitions,
        duplicates,
    }
}
