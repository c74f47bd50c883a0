// Vesting service orchestrates batch ingestion and serves the vesting schedule.
//
// Responsibilities
// - Sort, deduplicate and partition each batch per (employee, award).
// - Fan partitions out over a bounded worker pool; events inside a partition run in date order.
// - Validate and append each event under its award's lock, then record it in the event log
//   and the employee registry. An award skips events it already applied, so repeats across
//   batches (sequential or concurrent) are applied once.
// - Stop at the first failure of a partition, skip partitions that have not started, keep
//   everything already applied. Nothing is rolled back.
// - Cache schedules per (target date, precision); every ingestion invalidates the whole cache.
//
// Lock order
// - awards map, then calculator. Never the other way around.

use crate::application::award_calculator_service::AwardCalculatorService;
use crate::application::config::ServiceConfig;
use crate::application::employee_registry::EmployeeRegistry;
use crate::application::errors::ApplicationError;
use crate::application::partition::{Partition, partition_batch};
use crate::application::schedule::{ScheduleCache, ScheduleRow};
use crate::core::award::aggregate::{Applied, Award};
use crate::core::calculator::{DefaultVestingCalculator, VestingCalculator};
use crate::core::event::Event;
use crate::core::ports::EventStore;
use crate::core::precision::Precision;
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::{Mutex, Semaphore};
use tokio::task::JoinSet;

type AwardKey = (String, String);

struct PartitionJob {
    partition: Partition,
    award: Arc<Award>,
}

enum PartitionOutcome {
    Completed,
    Skipped,
    Failed(ApplicationError),
}

// Everything a worker task needs, cloned into each task.
struct PartitionWorker<TEventStore>
where
    TEventStore: EventStore + 'static,
{
    event_store: Arc<TEventStore>,
    registry: Arc<EmployeeRegistry>,
}

impl<TEventStore> PartitionWorker<TEventStore>
where
    TEventStore: EventStore + 'static,
{
    async fn run(&self, job: PartitionJob) -> PartitionOutcome {
        let PartitionJob { partition, award } = job;
        tracing::debug!(
            employee_id = %partition.employee_id,
            award_id = %partition.award_id,
            events = partition.events.len(),
            "processing partition"
        );

        for event in partition.events {
            let kind = event.kind();
            match award.apply(event.clone()).await {
                Ok(Applied::Appended) => {
                    if let Err(error) = self.record(event).await {
                        return PartitionOutcome::Failed(error);
                    }
                }
                Ok(Applied::Duplicate) => {
                    tracing::debug!(
                        %kind,
                        employee_id = %partition.employee_id,
                        award_id = %partition.award_id,
                        "event already applied, skipping"
                    );
                }
                Err(source) => {
                    tracing::warn!(
                        %kind,
                        employee_id = %partition.employee_id,
                        award_id = %partition.award_id,
                        error = %source,
                        "event rejected, abandoning the rest of the partition"
                    );
                    return PartitionOutcome::Failed(ApplicationError::Validation {
                        kind,
                        employee_id: partition.employee_id,
                        award_id: partition.award_id,
                        source,
                    });
                }
            }
        }
        PartitionOutcome::Completed
    }

    async fn record(&self, event: Event) -> Result<(), ApplicationError> {
        self.registry
            .register_employee(event.employee_id(), event.employee_name())
            .await;
        self.registry
            .register_award(event.employee_id(), event.award_id())
            .await;
        self.event_store.add_event(event).await?;
        Ok(())
    }
}

pub struct VestingService<TEventStore>
where
    TEventStore: EventStore + 'static,
{
    config: ServiceConfig,
    event_store: Arc<TEventStore>,
    registry: Arc<EmployeeRegistry>,
    awards: Mutex<HashMap<AwardKey, Arc<Award>>>,
    calculator: Mutex<Arc<dyn VestingCalculator>>,
    schedule: Mutex<ScheduleCache>,
}

impl<TEventStore> VestingService<TEventStore>
where
    TEventStore: EventStore + 'static,
{
    pub fn new(config: ServiceConfig, event_store: Arc<TEventStore>) -> Self {
        Self::with_calculator(config, event_store, Arc::new(DefaultVestingCalculator))
    }

    pub fn with_calculator(
        config: ServiceConfig,
        event_store: Arc<TEventStore>,
        calculator: Arc<dyn VestingCalculator>,
    ) -> Self {
        Self {
            config,
            event_store,
            registry: Arc::new(EmployeeRegistry::new()),
            awards: Mutex::new(HashMap::new()),
            calculator: Mutex::new(calculator),
            schedule: Mutex::new(ScheduleCache::new()),
        }
    }

    pub fn config(&self) -> ServiceConfig {
        self.config
    }

    pub fn registry(&self) -> &EmployeeRegistry {
        &self.registry
    }

    pub async fn award_calculator(&self) -> AwardCalculatorService<TEventStore> {
        let calculator = self.calculator.lock().await.clone();
        AwardCalculatorService::with_calculator(self.event_store.clone(), calculator)
    }

    /// Swaps the aggregation strategy for every award, present and future, and drops cached
    /// schedules.
    pub async fn set_calculator(&self, calculator: Arc<dyn VestingCalculator>) {
        let awards = self.awards.lock().await;
        *self.calculator.lock().await = calculator.clone();
        for award in awards.values() {
            award.set_calculator(calculator.clone()).await;
        }
        drop(awards);
        self.schedule.lock().await.invalidate();
        tracing::info!(?calculator, "vesting calculator replaced");
    }

    pub async fn award(&self, employee_id: &str, award_id: &str) -> Option<Arc<Award>> {
        self.awards
            .lock()
            .await
            .get(&(employee_id.to_string(), award_id.to_string()))
            .cloned()
    }

    /// Awards the registry attributes to `employee_id`, keyed by award id.
    pub async fn employee_awards(&self, employee_id: &str) -> BTreeMap<String, Arc<Award>> {
        let award_ids = self.registry.get_employee_awards(employee_id).await;
        let awards = self.awards.lock().await;
        award_ids
            .into_iter()
            .filter_map(|award_id| {
                let award = awards
                    .get(&(employee_id.to_string(), award_id.clone()))?
                    .clone();
                Some((award_id, award))
            })
            .collect()
    }

    /// Ingests a batch. On failure, events applied before it (in any partition) stay applied.
    #[tracing::instrument(name = "process_events", skip_all, fields(batch = events.len()))]
    pub async fn process_events(&self, events: Vec<Event>) -> Result<(), ApplicationError> {
        if events.is_empty() {
            return Ok(());
        }

        let jobs = self.prepare(events).await;
        self.schedule.lock().await.invalidate();
        let result = self.fan_out(jobs).await;
        // Schedules computed while the batch was in flight must not survive it.
        self.schedule.lock().await.invalidate();

        match &result {
            Ok(()) => tracing::info!("batch applied"),
            Err(error) => tracing::warn!(%error, "batch partially applied"),
        }
        result
    }

    async fn prepare(&self, events: Vec<Event>) -> Vec<PartitionJob> {
        let batch = partition_batch(events);
        tracing::info!(
            partitions = batch.partitions.len(),
            duplicates = batch.duplicates,
            "batch partitioned"
        );

        let mut awards = self.awards.lock().await;
        let calculator = self.calculator.lock().await.clone();
        batch
            .partitions
            .into_iter()
            .map(|partition| {
                let key = (partition.employee_id.clone(), partition.award_id.clone());
                let award = awards
                    .entry(key)
                    .or_insert_with(|| {
                        let employee_name = partition
                            .events
                            .first()
                            .map(Event::employee_name)
                            .unwrap_or_default();
                        Arc::new(Award::with_calculator(
                            partition.award_id.clone(),
                            partition.employee_id.clone(),
                            employee_name,
                            calculator.clone(),
                        ))
                    })
                    .clone();
                PartitionJob { partition, award }
            })
            .collect()
    }

    async fn fan_out(&self, jobs: Vec<PartitionJob>) -> Result<(), ApplicationError> {
        let width = self.config.max_workers.min(Semaphore::MAX_PERMITS);
        let permits = Arc::new(Semaphore::new(width));
        let halted = Arc::new(AtomicBool::new(false));
        let mut workers = JoinSet::new();

        for job in jobs {
            let permits = permits.clone();
            let halted = halted.clone();
            let worker = PartitionWorker {
                event_store: self.event_store.clone(),
                registry: self.registry.clone(),
            };
            workers.spawn(async move {
                let Ok(_permit) = permits.acquire_owned().await else {
                    return PartitionOutcome::Skipped;
                };
                if halted.load(Ordering::SeqCst) {
                    return PartitionOutcome::Skipped;
                }
                let outcome = worker.run(job).await;
                if matches!(outcome, PartitionOutcome::Failed(_)) {
                    halted.store(true, Ordering::SeqCst);
                }
                outcome
            });
        }

        let mut first_error = None;
        let mut skipped = 0usize;
        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok(PartitionOutcome::Completed) => {}
                Ok(PartitionOutcome::Skipped) => skipped += 1,
                Ok(PartitionOutcome::Failed(error)) => {
                    first_error.get_or_insert(error);
                }
                Err(join_error) => {
                    halted.store(true, Ordering::SeqCst);
                    let error = ApplicationError::Unexpected(join_error.to_string());
                    first_error.get_or_insert(error);
                }
            }
        }
        if skipped > 0 {
            tracing::debug!(skipped, "partitions skipped after a failure");
        }

        match first_error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    /// Net vested shares per (employee, award) with at least one accepted event, sorted by
    /// employee id then award id.
    pub async fn get_vesting_schedule(
        &self,
        as_of: NaiveDate,
        precision: Precision,
    ) -> Vec<ScheduleRow> {
        let generation = {
            let cache = self.schedule.lock().await;
            if let Some(rows) = cache.get(as_of, precision) {
                return rows;
            }
            cache.generation()
        };

        let rows = self.compute_schedule(as_of, precision).await;
        let stored = self
            .schedule
            .lock()
            .await
            .store(generation, as_of, precision, rows.clone());
        if !stored {
            tracing::debug!(
                %as_of,
                %precision,
                "ingestion ran during schedule computation, result not cached"
            );
        }
        rows
    }

    async fn compute_schedule(&self, as_of: NaiveDate, precision: Precision) -> Vec<ScheduleRow> {
        let awards = self.awards.lock().await.clone();
        let mut rows = Vec::new();
        for employee_id in self.registry.get_all_employee_ids().await {
            let Some(record) = self.registry.get_employee(&employee_id).await else {
                continue;
            };
            for award_id in &record.awards {
                let Some(award) = awards.get(&(employee_id.clone(), award_id.clone())) else {
                    continue;
                };
                if award.event_count().await == 0 {
                    continue;
                }
                rows.push(ScheduleRow {
                    employee_id: employee_id.clone(),
                    employee_name: record.name.clone(),
                    award_id: award_id.clone(),
                    net_vested: award.net_vested_shares(as_of, precision).await,
                });
            }
        }
        rows.sort_by(|a, b| (&a.employee_id, &a.award_id).cmp(&(&b.employee_id, &b.award_id)));
        rows
    }
}
