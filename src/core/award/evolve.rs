// Evolve function: append an accepted event to the collection of its kind.
//
// Boundaries
// - No validation here. Call decide first.

use crate::core::award::ledger::AwardLedger;
use crate::core::event::{Event, EventKind};

pub fn evolve(ledger: &mut AwardLedger, event: Event) {
    match event.kind() {
        EventKind::Vest => ledger.push_vested(event),
        EventKind::Cancel => ledger.push_cancelled(event),
        EventKind::Performance => ledger.push_performance(event),
    }
}

#[cfg(test)]
mod award_evolve_tests {
    use super::*;
    use crate::test_support::fixtures::events::event_builder::EventBuilder;
    use rstest::rstest;

    #[rstest]
    fn it_should_route_each_kind_to_its_collection() {
        let mut ledger = AwardLedger::new();
        for kind in EventKind::ALL {
            evolve(&mut ledger, EventBuilder::new().kind(kind).build());
        }
        for kind in EventKind::ALL {
            assert_eq!(ledger.events(kind).len(), 1);
            assert_eq!(ledger.events(kind)[0].kind(), kind);
        }
        assert_eq!(ledger.len(), 3);
    }

    #[rstest]
    fn it_should_keep_acceptance_order() {
        let mut ledger = AwardLedger::new();
        let first = EventBuilder::new().quantity("1").build();
        let second = EventBuilder::new().quantity("2").build();
        evolve(&mut ledger, first.clone());
        evolve(&mut ledger, second.clone());
        assert_eq!(ledger.vested(), &[first, second]);
    }
}
