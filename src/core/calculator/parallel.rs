// Chunked calculator for awards with long event histories.
//
// Below the threshold it sums sequentially. At or above it, the collection is split into one
// chunk per worker and the chunks are summed on scoped threads, then combined.

use crate::core::calculator::{VestingCalculator, performance_or_identity, sum_as_of};
use crate::core::event::Event;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::num::NonZeroUsize;
use std::thread;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParallelVestingCalculator {
    parallel_threshold: usize,
    workers: usize,
}

impl ParallelVestingCalculator {
    pub const DEFAULT_THRESHOLD: usize = 500;

    pub fn new(parallel_threshold: usize, workers: usize) -> Self {
        Self {
            parallel_threshold,
            workers: workers.max(1),
        }
    }

    pub fn parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    fn sum(&self, events: &[Event], as_of: NaiveDate) -> Decimal {
        if self.workers == 1 || events.len() < self.parallel_threshold {
            return sum_as_of(events, as_of);
        }
        let chunk_len = events.len().div_ceil(self.workers);
        thread::scope(|scope| {
            let chunks: Vec<_> = events
                .chunks(chunk_len)
                .map(|chunk| scope.spawn(move || sum_as_of(chunk, as_of)))
                .collect();
            chunks
                .into_iter()
                .map(|chunk| {
                    chunk
                        .join()
                        .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
                })
                .fold(Decimal::ZERO, Decimal::saturating_add)
        })
    }
}

impl Default for ParallelVestingCalculator {
    fn default() -> Self {
        let workers = thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1);
        Self::new(Self::DEFAULT_THRESHOLD, workers)
    }
}

impl VestingCalculator for ParallelVestingCalculator {
    fn vested(&self, events: &[Event], as_of: NaiveDate) -> Decimal {
        self.sum(events, as_of)
    }

    fn cancelled(&self, events: &[Event], as_of: NaiveDate) -> Decimal {
        self.sum(events, as_of)
    }

    fn performance(&self, events: &[Event], as_of: NaiveDate) -> Decimal {
        performance_or_identity(self.sum(events, as_of))
    }
}

#[cfg(test)]
mod parallel_calculator_tests {
    use super::*;
    use crate::core::calculator::DefaultVestingCalculator;
    use crate::test_support::fixtures::day;
    use crate::test_support::fixtures::events::event_builder::EventBuilder;
    use rstest::rstest;

    fn daily_events(count: u32) -> Vec<Event> {
        (0..count)
            .map(|offset| {
                EventBuilder::new()
                    .event_date(day(2020, 1, 1) + chrono::Days::new(u64::from(offset)))
                    .quantity("1.25")
                    .build()
            })
            .collect()
    }

    #[rstest]
    #[case(10)]
    #[case(499)]
    #[case(500)]
    #[case(2_000)]
    fn it_should_match_the_default_strategy(#[case] count: u32) {
        let events = daily_events(count);
        let parallel =
            ParallelVestingCalculator::new(ParallelVestingCalculator::DEFAULT_THRESHOLD, 4);
        let sequential = DefaultVestingCalculator;
        for as_of in [day(2019, 1, 1), day(2020, 6, 1), day(2030, 1, 1)] {
            assert_eq!(
                parallel.vested(&events, as_of),
                sequential.vested(&events, as_of)
            );
            assert_eq!(
                parallel.cancelled(&events, as_of),
                sequential.cancelled(&events, as_of)
            );
            assert_eq!(
                parallel.performance(&events, as_of),
                sequential.performance(&events, as_of)
            );
        }
    }

    #[rstest]
    fn it_should_keep_at_least_one_worker() {
        let calculator = ParallelVestingCalculator::new(0, 0);
        assert_eq!(calculator.workers(), 1);
        assert_eq!(calculator.parallel_threshold(), 0);
        assert!(ParallelVestingCalculator::default().workers() >= 1);
    }
}
