// Pure decision function for an incoming award event.
//
// Purpose
// - Validate the event against the award's accepted history before anything is appended.
//
// Responsibilities
// - Every kind: the quantity must be positive (re-checked even though construction enforces
//   it), and the running total of its collection must stay representable.
// - CANCEL: the quantity must not exceed vested minus cancelled as of the cancel's own date,
//   and that figure must be positive.
// - Never perform input or output.

use crate::core::award::ledger::AwardLedger;
use crate::core::calculator::{self, VestingCalculator};
use crate::core::event::{Event, EventKind};
use chrono::NaiveDate;
use rust_decimal::Decimal;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecideError {
    #[error("{kind} quantity must be positive, got {quantity}")]
    NonPositiveQuantity { kind: EventKind, quantity: Decimal },

    #[error("{kind} of {quantity} would overflow the award's running total")]
    TotalOverflow { kind: EventKind, quantity: Decimal },

    #[error(
        "cannot cancel {requested} shares, only {available} vested and not cancelled as of {as_of}"
    )]
    CancelExceedsVested {
        requested: Decimal,
        available: Decimal,
        as_of: NaiveDate,
    },
}

pub fn decide(
    ledger: &AwardLedger,
    event: &Event,
    calculator: &dyn VestingCalculator,
) -> Result<(), DecideError> {
    ensure_positive(event)?;
    ensure_summable(ledger, event)?;
    match event.kind() {
        EventKind::Vest | EventKind::Performance => Ok(()),
        EventKind::Cancel => decide_cancel(ledger, event, calculator),
    }
}

fn ensure_positive(event: &Event) -> Result<(), DecideError> {
    if event.quantity() <= Decimal::ZERO {
        return Err(DecideError::NonPositiveQuantity {
            kind: event.kind(),
            quantity: event.quantity(),
        });
    }
    Ok(())
}

fn ensure_summable(ledger: &AwardLedger, event: &Event) -> Result<(), DecideError> {
    let quantities = ledger
        .events(event.kind())
        .iter()
        .map(Event::quantity)
        .chain(std::iter::once(event.quantity()));
    if calculator::checked_total(quantities).is_none() {
        return Err(DecideError::TotalOverflow {
            kind: event.kind(),
            quantity: event.quantity(),
        });
    }
    Ok(())
}

fn decide_cancel(
    ledger: &AwardLedger,
    event: &Event,
    calculator: &dyn VestingCalculator,
) -> Result<(), DecideError> {
    let as_of = event.event_date();
    let vested = calculator.vested(ledger.vested(), as_of);
    let available = vested - calculator.cancelled(ledger.cancelled(), as_of);
    if available <= Decimal::ZERO || event.quantity() > available {
        return Err(DecideError::CancelExceedsVested {
            requested: event.quantity(),
            available: available.max(Decimal::ZERO),
            as_of,
        });
    }
    Ok(())
}

#[cfg(test)]
mod award_decide_tests {
    use super::*;
    use crate::core::award::evolve::evolve;
    use crate::core::calculator::DefaultVestingCalculator;
    use crate::test_support::fixtures::events::event_builder::EventBuilder;
    use crate::test_support::fixtures::{day, qty};
    use rstest::{fixture, rstest};

    const HUGE: &str = "50000000000000000000000000000";

    #[fixture]
    fn vested_ledger() -> AwardLedger {
        let mut ledger = AwardLedger::new();
        evolve(
            &mut ledger,
            EventBuilder::new()
                .event_date(day(2020, 1, 1))
                .quantity("1000")
                .build(),
        );
        ledger
    }

    fn cancel(date: NaiveDate, quantity: &str) -> Event {
        EventBuilder::new()
            .kind(EventKind::Cancel)
            .event_date(date)
            .quantity(quantity)
            .build()
    }

    fn check(ledger: &AwardLedger, event: &Event) -> Result<(), DecideError> {
        decide(ledger, event, &DefaultVestingCalculator)
    }

    #[rstest]
    fn it_should_accept_a_vest_on_an_empty_ledger() {
        let event = EventBuilder::new().build();
        assert_eq!(check(&AwardLedger::new(), &event), Ok(()));
    }

    #[rstest]
    fn it_should_accept_a_performance_event_on_an_empty_ledger() {
        let event = EventBuilder::new()
            .kind(EventKind::Performance)
            .quantity("1.2")
            .build();
        assert_eq!(check(&AwardLedger::new(), &event), Ok(()));
    }

    #[rstest]
    fn it_should_accept_a_cancel_within_the_vested_balance(vested_ledger: AwardLedger) {
        let event = cancel(day(2021, 1, 1), "300");
        assert_eq!(check(&vested_ledger, &event), Ok(()));
    }

    #[rstest]
    fn it_should_accept_a_cancel_of_the_exact_balance(vested_ledger: AwardLedger) {
        let event = cancel(day(2020, 1, 1), "1000");
        assert_eq!(check(&vested_ledger, &event), Ok(()));
    }

    #[rstest]
    fn it_should_reject_a_cancel_above_the_vested_balance(vested_ledger: AwardLedger) {
        let result = check(&vested_ledger, &cancel(day(2020, 2, 1), "1500"));
        assert_eq!(
            result,
            Err(DecideError::CancelExceedsVested {
                requested: qty("1500"),
                available: qty("1000"),
                as_of: day(2020, 2, 1),
            })
        );
    }

    #[rstest]
    fn it_should_reject_a_cancel_dated_before_any_vest(vested_ledger: AwardLedger) {
        let result = check(&vested_ledger, &cancel(day(2019, 12, 31), "1"));
        assert!(matches!(
            result,
            Err(DecideError::CancelExceedsVested { available, .. }) if available == Decimal::ZERO
        ));
    }

    #[rstest]
    fn it_should_count_earlier_cancels_against_the_balance(mut vested_ledger: AwardLedger) {
        evolve(&mut vested_ledger, cancel(day(2020, 6, 1), "800"));
        assert_eq!(check(&vested_ledger, &cancel(day(2020, 7, 1), "200")), Ok(()));
        assert!(check(&vested_ledger, &cancel(day(2020, 7, 1), "201")).is_err());
    }

    #[rstest]
    fn it_should_reject_any_cancel_once_fully_cancelled(mut vested_ledger: AwardLedger) {
        evolve(&mut vested_ledger, cancel(day(2020, 6, 1), "1000"));
        assert!(check(&vested_ledger, &cancel(day(2020, 7, 1), "0.000001")).is_err());
    }

    #[rstest]
    fn it_should_ignore_vests_dated_after_the_cancel() {
        let mut ledger = AwardLedger::new();
        evolve(
            &mut ledger,
            EventBuilder::new()
                .event_date(day(2022, 1, 1))
                .quantity("500")
                .build(),
        );
        assert!(check(&ledger, &cancel(day(2021, 1, 1), "100")).is_err());
    }

    #[rstest]
    #[case(EventKind::Vest)]
    #[case(EventKind::Performance)]
    fn it_should_reject_an_event_whose_running_total_would_overflow(#[case] kind: EventKind) {
        let mut ledger = AwardLedger::new();
        let first = EventBuilder::new().kind(kind).quantity(HUGE).build();
        assert_eq!(check(&ledger, &first), Ok(()));
        evolve(&mut ledger, first);

        let second = EventBuilder::new()
            .kind(kind)
            .event_date(day(2021, 1, 1))
            .quantity(HUGE)
            .build();
        assert_eq!(
            check(&ledger, &second),
            Err(DecideError::TotalOverflow {
                kind,
                quantity: qty(HUGE),
            })
        );
    }

    #[rstest]
    fn it_should_validate_cancels_with_the_given_strategy(vested_ledger: AwardLedger) {
        #[derive(Debug)]
        struct NothingVested;

        impl VestingCalculator for NothingVested {
            fn vested(&self, _: &[Event], _: NaiveDate) -> Decimal {
                Decimal::ZERO
            }

            fn cancelled(&self, _: &[Event], _: NaiveDate) -> Decimal {
                Decimal::ZERO
            }

            fn performance(&self, _: &[Event], _: NaiveDate) -> Decimal {
                Decimal::ONE
            }
        }

        let event = cancel(day(2021, 1, 1), "1");
        assert_eq!(check(&vested_ledger, &event), Ok(()));
        assert!(decide(&vested_ledger, &event, &NothingVested).is_err());
    }
}
