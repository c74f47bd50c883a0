// Per-award figures computed straight from the event log.
//
// Purpose
// - Answer vested, cancelled, performance and net figures for one award id without going
//   through the award aggregates or their caches.
//
// Boundaries
// - Exact values; truncation to a precision is the caller's choice.

use crate::core::calculator::{self, DefaultVestingCalculator, VestingCalculator};
use crate::core::event::EventKind;
use crate::core::ports::{EventStore, EventStoreError};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::sync::Arc;

pub struct AwardCalculatorService<TEventStore>
where
    TEventStore: EventStore + 'static,
{
    event_store: Arc<TEventStore>,
    calculator: Arc<dyn VestingCalculator>,
}

impl<TEventStore> AwardCalculatorService<TEventStore>
where
    TEventStore: EventStore + 'static,
{
    pub fn new(event_store: Arc<TEventStore>) -> Self {
        Self::with_calculator(event_store, Arc::new(DefaultVestingCalculator))
    }

    pub fn with_calculator(
        event_store: Arc<TEventStore>,
        calculator: Arc<dyn VestingCalculator>,
    ) -> Self {
        Self {
            event_store,
            calculator,
        }
    }

    pub async fn calculate_vested_shares(
        &self,
        award_id: &str,
        as_of: NaiveDate,
    ) -> Result<Decimal, EventStoreError> {
        let events = self.event_store.get_events(award_id, EventKind::Vest).await?;
        Ok(self.calculator.vested(&events, as_of))
    }

    pub async fn calculate_cancelled_shares(
        &self,
        award_id: &str,
        as_of: NaiveDate,
    ) -> Result<Decimal, EventStoreError> {
        let events = self
            .event_store
            .get_events(award_id, EventKind::Cancel)
            .await?;
        Ok(self.calculator.cancelled(&events, as_of))
    }

    pub async fn calculate_performance(
        &self,
        award_id: &str,
        as_of: NaiveDate,
    ) -> Result<Decimal, EventStoreError> {
        let events = self
            .event_store
            .get_events(award_id, EventKind::Performance)
            .await?;
        Ok(self.calculator.performance(&events, as_of))
    }

    pub async fn calculate_net_vested_shares(
        &self,
        award_id: &str,
        as_of: NaiveDate,
    ) -> Result<Decimal, EventStoreError> {
        let vested = self.calculate_vested_shares(award_id, as_of).await?;
        let cancelled = self.calculate_cancelled_shares(award_id, as_of).await?;
        Ok(calculator::net(vested, cancelled))
    }
}

#[cfg(test)]
mod award_calculator_service_tests {
    use super::*;
    use crate::adapters::in_memory::in_memory_event_store::InMemoryEventStore;
    use crate::core::calculator::parallel::ParallelVestingCalculator;
    use crate::test_support::fixtures::events::event_builder::EventBuilder;
    use crate::test_support::fixtures::{day, qty};
    use rstest::{fixture, rstest};

    type Service = AwardCalculatorService<InMemoryEventStore>;

    #[fixture]
    fn before_each() -> (Arc<InMemoryEventStore>, Service) {
        let store = Arc::new(InMemoryEventStore::new());
        let service = AwardCalculatorService::new(store.clone());
        (store, service)
    }

    async fn seed(store: &InMemoryEventStore) {
        let events = [
            EventBuilder::new()
                .event_date(day(2020, 1, 1))
                .quantity("1000")
                .build(),
            EventBuilder::new()
                .event_date(day(2021, 1, 1))
                .quantity("300")
                .build(),
            EventBuilder::new()
                .kind(EventKind::Cancel)
                .event_date(day(2021, 6, 1))
                .quantity("250.5")
                .build(),
            EventBuilder::new()
                .kind(EventKind::Performance)
                .event_date(day(2021, 12, 31))
                .quantity("1.1")
                .build(),
        ];
        for event in events {
            store.add_event(event).await.unwrap();
        }
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_compute_figures_from_the_log(
        before_each: (Arc<InMemoryEventStore>, Service),
    ) {
        let (store, service) = before_each;
        seed(&store).await;

        let as_of = day(2022, 1, 1);
        let vested = service.calculate_vested_shares("ISO-001", as_of).await;
        let cancelled = service.calculate_cancelled_shares("ISO-001", as_of).await;
        let performance = service.calculate_performance("ISO-001", as_of).await;
        let net = service.calculate_net_vested_shares("ISO-001", as_of).await;
        assert_eq!(vested.unwrap(), qty("1300"));
        assert_eq!(cancelled.unwrap(), qty("250.5"));
        assert_eq!(performance.unwrap(), qty("1.1"));
        assert_eq!(net.unwrap(), qty("1049.5"));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_default_an_unknown_award(before_each: (Arc<InMemoryEventStore>, Service)) {
        let (_, service) = before_each;
        let as_of = day(2022, 1, 1);
        let vested = service.calculate_vested_shares("none", as_of).await;
        let net = service.calculate_net_vested_shares("none", as_of).await;
        let performance = service.calculate_performance("none", as_of).await;
        assert_eq!(vested.unwrap(), Decimal::ZERO);
        assert_eq!(net.unwrap(), Decimal::ZERO);
        assert_eq!(performance.unwrap(), Decimal::ONE);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_compute_with_an_injected_calculator() {
        let store = Arc::new(InMemoryEventStore::new());
        seed(&store).await;
        let service = AwardCalculatorService::with_calculator(
            store,
            Arc::new(ParallelVestingCalculator::new(1, 2)),
        );
        let net = service
            .calculate_net_vested_shares("ISO-001", day(2022, 1, 1))
            .await;
        assert_eq!(net.unwrap(), qty("1049.5"));
    }
}
