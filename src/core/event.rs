// Award lifecycle event: the only fact the engine ingests.
//
// Purpose
// - Record that shares of one award were vested, cancelled or adjusted for performance on a date.
//
// Responsibilities
// - Reject malformed input at construction: blank identifiers or a non-positive quantity.
// - Stay immutable once built. Fields are private and only readable through getters.
// - Provide the structural key used to drop duplicate submissions.
//
// Boundaries
// - Field level parsing (text to date, text to decimal) belongs to the caller.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventKind {
    Vest,
    Cancel,
    Performance,
}

impl EventKind {
    pub const ALL: [EventKind; 3] = [EventKind::Vest, EventKind::Cancel, EventKind::Performance];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Vest => "VEST",
            EventKind::Cancel => "CANCEL",
            EventKind::Performance => "PERFORMANCE",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EventError {
    #[error("{field} cannot be empty")]
    EmptyField { field: &'static str },

    #[error("quantity must be positive, got {quantity}")]
    NonPositiveQuantity { quantity: Decimal },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EventDto")]
pub struct Event {
    kind: EventKind,
    employee_id: String,
    employee_name: String,
    award_id: String,
    event_date: NaiveDate,
    quantity: Decimal,
}

// Transport shape. Deserialization funnels through `Event::new` so the invariants hold.
#[derive(Deserialize)]
struct EventDto {
    kind: EventKind,
    employee_id: String,
    employee_name: String,
    award_id: String,
    event_date: NaiveDate,
    quantity: Decimal,
}

impl TryFrom<EventDto> for Event {
    type Error = EventError;

    fn try_from(dto: EventDto) -> Result<Self, Self::Error> {
        Event::new(
            dto.kind,
            dto.employee_id,
            dto.employee_name,
            dto.award_id,
            dto.event_date,
            dto.quantity,
        )
    }
}

impl Event {
    pub fn new(
        kind: EventKind,
        employee_id: impl Into<String>,
        employee_name: impl Into<String>,
        award_id: impl Into<String>,
        event_date: NaiveDate,
        quantity: Decimal,
    ) -> Result<Self, EventError> {
        let employee_id = non_blank("employee_id", employee_id.into())?;
        let employee_name = non_blank("employee_name", employee_name.into())?;
        let award_id = non_blank("award_id", award_id.into())?;
        if quantity <= Decimal::ZERO {
            return Err(EventError::NonPositiveQuantity { quantity });
        }
        Ok(Self {
            kind,
            employee_id,
            employee_name,
            award_id,
            event_date,
            quantity,
        })
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn employee_id(&self) -> &str {
        &self.employee_id
    }

    pub fn employee_name(&self) -> &str {
        &self.employee_name
    }

    pub fn award_id(&self) -> &str {
        &self.award_id
    }

    pub fn event_date(&self) -> NaiveDate {
        self.event_date
    }

    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    /// Structural identity used for deduplication. Quantities equal in value share a key.
    pub fn key(&self) -> EventKey {
        EventKey {
            kind: self.kind,
            employee_id: self.employee_id.clone(),
            award_id: self.award_id.clone(),
            event_date: self.event_date,
            quantity: self.quantity.normalize(),
        }
    }
}

fn non_blank(field: &'static str, value: String) -> Result<String, EventError> {
    if value.trim().is_empty() {
        return Err(EventError::EmptyField { field });
    }
    Ok(value)
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EventKey {
    pub kind: EventKind,
    pub employee_id: String,
    pub award_id: String,
    pub event_date: NaiveDate,
    pub quantity: Decimal,
}
