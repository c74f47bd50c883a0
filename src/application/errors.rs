use crate::core::award::decide::DecideError;
use crate::core::event::EventKind;
use crate::core::ports::EventStoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(
        "validation error processing {kind} event for employee {employee_id}, \
         award {award_id}: {source}"
    )]
    Validation {
        kind: EventKind,
        employee_id: String,
        award_id: String,
        #[source]
        source: DecideError,
    },

    #[error(transparent)]
    Store(#[from] EventStoreError),

    #[error("unexpected: {0}")]
    Unexpected(String),
}
