// Service configuration.
//
// Invalid widths are normalized rather than rejected: zero, negative or unset
// means one worker per available core.

use anyhow::Context;
use std::num::NonZeroUsize;

pub const MAX_WORKERS_VAR: &str = "VESTING_MAX_WORKERS";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceConfig {
    pub max_workers: usize,
}

impl ServiceConfig {
    pub fn new(max_workers: i64) -> Self {
        match usize::try_from(max_workers) {
            Ok(width) if width > 0 => Self { max_workers: width },
            _ => {
                tracing::warn!(max_workers, "worker count must be positive, using default");
                Self::default()
            }
        }
    }

    /// Reads settings through `lookup`; missing keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup(MAX_WORKERS_VAR) {
            None => Ok(Self::default()),
            Some(raw) => {
                let width: i64 = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("{MAX_WORKERS_VAR} must be an integer, got {raw:?}"))?;
                Ok(Self::new(width))
            }
        }
    }

    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        let max_workers = std::thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1);
        Self { max_workers }
    }
}
