// Memoized award totals, keyed by target date and precision.
//
// Invalidation is coarse: any append to the award clears every table.

use crate::core::precision::Precision;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashMap;

pub type CacheKey = (NaiveDate, Precision);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Total {
    Vested,
    Cancelled,
    Net,
}

#[derive(Debug, Default)]
pub struct AwardCache {
    entries: HashMap<(Total, CacheKey), Decimal>,
}

impl AwardCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, total: Total, key: CacheKey) -> Option<Decimal> {
        self.entries.get(&(total, key)).copied()
    }

    pub fn insert(&mut self, total: Total, key: CacheKey, value: Decimal) {
        self.entries.insert((total, key), value);
    }

    pub fn invalidate(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
