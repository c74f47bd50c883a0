// Vesting schedule read model and its cache.
//
// The cache is invalidated wholesale by ingestion. A generation counter rejects a schedule
// that was computed while an invalidation happened, so a stale result is never stored.

use crate::core::precision::Precision;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleRow {
    pub employee_id: String,
    pub employee_name: String,
    pub award_id: String,
    pub net_vested: Decimal,
}

#[derive(Debug, Default)]
pub struct ScheduleCache {
    generation: u64,
    entries: HashMap<(NaiveDate, Precision), Vec<ScheduleRow>>,
}

impl ScheduleCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn get(&self, as_of: NaiveDate, precision: Precision) -> Option<Vec<ScheduleRow>> {
        self.entries.get(&(as_of, precision)).cloned()
    }

    /// Stores `rows` only if no invalidation happened since `generation` was read.
    pub fn store(
        &mut self,
        generation: u64,
        as_of: NaiveDate,
        precision: Precision,
        rows: Vec<ScheduleRow>,
    ) -> bool {
        if generation != self.generation {
            return false;
        }
        self.entries.insert((as_of, precision), rows);
        true
    }

    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.entries.clear();
    }
}
