// Award aggregate: one award's ledger, memo tables and applied keys behind a single lock.
//
// Responsibilities
// - Drop an event whose key was already applied to this award.
// - Validate and append in one critical section, so a cancel is checked against the
//   history it lands on.
// - Compute totals through the cache with the award's calculator; a miss computes, stores
//   and returns under the same lock.
// - Clear the cache on every append and on every calculator swap.
//
// Concurrency
// - The mutex is owned by this award and never held while touching another award.

use crate::core::award::cache::{AwardCache, Total};
use crate::core::award::decide::{DecideError, decide};
use crate::core::award::evolve::evolve;
use crate::core::award::ledger::AwardLedger;
use crate::core::calculator::{self, DefaultVestingCalculator, VestingCalculator};
use crate::core::event::{Event, EventKey, EventKind};
use crate::core::precision::Precision;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;

/// What `Award::apply` did with an event that passed validation or was already known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Appended,
    Duplicate,
}

#[derive(Debug)]
struct AwardState {
    ledger: AwardLedger,
    cache: AwardCache,
    applied: HashSet<EventKey>,
    calculator: Arc<dyn VestingCalculator>,
}

impl AwardState {
    fn new(calculator: Arc<dyn VestingCalculator>) -> Self {
        Self {
            ledger: AwardLedger::new(),
            cache: AwardCache::new(),
            applied: HashSet::new(),
            calculator,
        }
    }

    fn total(&mut self, total: Total, as_of: NaiveDate, precision: Precision) -> Decimal {
        let key = (as_of, precision);
        if let Some(hit) = self.cache.get(total, key) {
            return hit;
        }
        let calculator = &self.calculator;
        let ledger = &self.ledger;
        let exact = match total {
            Total::Vested => calculator.vested(ledger.vested(), as_of),
            Total::Cancelled => calculator.cancelled(ledger.cancelled(), as_of),
            Total::Net => calculator::net(
                calculator.vested(ledger.vested(), as_of),
                calculator.cancelled(ledger.cancelled(), as_of),
            ),
        };
        let value = calculator::truncate(exact, precision);
        self.cache.insert(total, key, value);
        value
    }

    fn append(&mut self, event: Event) {
        self.applied.insert(event.key());
        evolve(&mut self.ledger, event);
        self.cache.invalidate();
    }
}

#[derive(Debug)]
pub struct Award {
    award_id: String,
    employee_id: String,
    employee_name: String,
    state: Mutex<AwardState>,
}

impl Award {
    pub fn new(
        award_id: impl Into<String>,
        employee_id: impl Into<String>,
        employee_name: impl Into<String>,
    ) -> Self {
        Self::with_calculator(
            award_id,
            employee_id,
            employee_name,
            Arc::new(DefaultVestingCalculator),
        )
    }

    pub fn with_calculator(
        award_id: impl Into<String>,
        employee_id: impl Into<String>,
        employee_name: impl Into<String>,
        calculator: Arc<dyn VestingCalculator>,
    ) -> Self {
        Self {
            award_id: award_id.into(),
            employee_id: employee_id.into(),
            employee_name: employee_name.into(),
            state: Mutex::new(AwardState::new(calculator)),
        }
    }

    pub fn award_id(&self) -> &str {
        &self.award_id
    }

    pub fn employee_id(&self) -> &str {
        &self.employee_id
    }

    pub fn employee_name(&self) -> &str {
        &self.employee_name
    }

    /// Swaps the aggregation strategy. Cached totals computed with the old one are dropped.
    pub async fn set_calculator(&self, calculator: Arc<dyn VestingCalculator>) {
        let mut state = self.state.lock().await;
        state.calculator = calculator;
        state.cache.invalidate();
    }

    /// Validates `event` against the current history and appends it. A rejected event changes
    /// nothing; an event whose key was already applied is skipped.
    pub async fn apply(&self, event: Event) -> Result<Applied, DecideError> {
        let mut state = self.state.lock().await;
        if state.applied.contains(&event.key()) {
            return Ok(Applied::Duplicate);
        }
        decide(&state.ledger, &event, state.calculator.as_ref())?;
        state.append(event);
        Ok(Applied::Appended)
    }

    pub async fn add_vested_event(&self, event: Event) {
        debug_assert_eq!(event.kind(), EventKind::Vest);
        self.state.lock().await.append(event);
    }

    pub async fn add_cancelled_event(&self, event: Event) {
        debug_assert_eq!(event.kind(), EventKind::Cancel);
        self.state.lock().await.append(event);
    }

    pub async fn add_performance_event(&self, event: Event) {
        debug_assert_eq!(event.kind(), EventKind::Performance);
        self.state.lock().await.append(event);
    }

    pub async fn total_vested_shares(&self, as_of: NaiveDate, precision: Precision) -> Decimal {
        self.state
            .lock()
            .await
            .total(Total::Vested, as_of, precision)
    }

    pub async fn total_cancelled_shares(&self, as_of: NaiveDate, precision: Precision) -> Decimal {
        self.state
            .lock()
            .await
            .total(Total::Cancelled, as_of, precision)
    }

    pub async fn net_vested_shares(&self, as_of: NaiveDate, precision: Precision) -> Decimal {
        self.state.lock().await.total(Total::Net, as_of, precision)
    }

    pub async fn performance_multiplier(&self, as_of: NaiveDate) -> Decimal {
        let state = self.state.lock().await;
        state.calculator.performance(state.ledger.performance(), as_of)
    }

    pub async fn events(&self, kind: EventKind) -> Vec<Event> {
        self.state.lock().await.ledger.events(kind).to_vec()
    }

    pub async fn event_count(&self) -> usize {
        self.state.lock().await.ledger.len()
    }
}
