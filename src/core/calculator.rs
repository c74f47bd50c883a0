// Vesting calculator: aggregation over award events as of a target date.
//
// Purpose
// - Sum quantities of events dated on or before the target date, with exact decimal arithmetic.
// - Let awards swap the summing strategy through the VestingCalculator trait.
//
// Boundaries
// - No input or output, no caching, no locking. Callers own the event collections.
//
// Defaults
// - Vested and cancelled sums start from zero.
// - The performance sum is used as a multiplier, so an empty or non-positive sum yields one.
// - Sums saturate at Decimal::MAX. Validated ingestion never lets a bucket reach that.

use crate::core::event::Event;
use crate::core::precision::Precision;
use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;

pub mod parallel;

/// Strategy used by an award to aggregate its event collections.
pub trait VestingCalculator: Send + Sync + fmt::Debug {
    fn vested(&self, events: &[Event], as_of: NaiveDate) -> Decimal;

    fn cancelled(&self, events: &[Event], as_of: NaiveDate) -> Decimal;

    fn performance(&self, events: &[Event], as_of: NaiveDate) -> Decimal;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultVestingCalculator;

impl VestingCalculator for DefaultVestingCalculator {
    fn vested(&self, events: &[Event], as_of: NaiveDate) -> Decimal {
        vested(events, as_of)
    }

    fn cancelled(&self, events: &[Event], as_of: NaiveDate) -> Decimal {
        cancelled(events, as_of)
    }

    fn performance(&self, events: &[Event], as_of: NaiveDate) -> Decimal {
        performance(events, as_of)
    }
}

pub(crate) fn sum_as_of(events: &[Event], as_of: NaiveDate) -> Decimal {
    events
        .iter()
        .filter(|event| event.event_date() <= as_of)
        .fold(Decimal::ZERO, |total, event| {
            total.saturating_add(event.quantity())
        })
}

pub fn vested(events: &[Event], as_of: NaiveDate) -> Decimal {
    sum_as_of(events, as_of)
}

pub fn cancelled(events: &[Event], as_of: NaiveDate) -> Decimal {
    sum_as_of(events, as_of)
}

pub fn performance(events: &[Event], as_of: NaiveDate) -> Decimal {
    performance_or_identity(sum_as_of(events, as_of))
}

pub(crate) fn performance_or_identity(total: Decimal) -> Decimal {
    if total > Decimal::ZERO {
        total
    } else {
        Decimal::ONE
    }
}

/// Sum of every quantity regardless of date, or `None` when it cannot be represented.
pub fn checked_total(quantities: impl IntoIterator<Item = Decimal>) -> Option<Decimal> {
    quantities
        .into_iter()
        .try_fold(Decimal::ZERO, |total, quantity| total.checked_add(quantity))
}

pub fn net(vested: Decimal, cancelled: Decimal) -> Decimal {
    vested - vested.min(cancelled)
}

/// Truncates toward zero at `precision` fractional digits and pads the scale to exactly that many.
pub fn truncate(value: Decimal, precision: Precision) -> Decimal {
    let digits = precision.digits();
    let mut truncated = value.round_dp_with_strategy(digits, RoundingStrategy::ToZero);
    truncated.rescale(digits);
    truncated
}
