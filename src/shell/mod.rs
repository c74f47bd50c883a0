// Composition root for the vesting engine.
//
// Responsibilities
// - Read config from the environment.
// - Install the tracing subscriber.
// - Instantiate the in memory event store and wire it into the vesting service.

use crate::adapters::in_memory::in_memory_event_store::InMemoryEventStore;
use crate::application::config::ServiceConfig;
use crate::application::vesting_service::VestingService;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt};

pub type InMemoryVestingService = VestingService<InMemoryEventStore>;

/// Installs a `fmt` subscriber filtered by `RUST_LOG`. Later calls are no-ops.
pub fn init_tracing() {
    let _ = fmt().with_env_filter(EnvFilter::from_default_env()).try_init();
}

pub fn build_service(config: ServiceConfig) -> InMemoryVestingService {
    tracing::info!(max_workers = config.max_workers, "vesting service configured");
    VestingService::new(config, Arc::new(InMemoryEventStore::new()))
}

pub fn build_service_from_env() -> anyhow::Result<InMemoryVestingService> {
    let config = ServiceConfig::from_env()?;
    Ok(build_service(config))
}
