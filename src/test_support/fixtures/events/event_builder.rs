// Shared test fixture for award events.
// Defaults come from json/vest_event.json; setters override single fields.

use crate::core::event::{Event, EventKind};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs;

// JSON -> DTO (transport shape)
#[derive(Debug, Clone, Deserialize)]
pub struct EventDto {
    pub kind: EventKind,
    pub employee_id: String,
    pub employee_name: String,
    pub award_id: String,
    pub event_date: NaiveDate,
    pub quantity: Decimal,
}

pub struct EventBuilder {
    inner: EventDto,
}

impl Default for EventBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl EventBuilder {
    pub fn new() -> Self {
        let path = concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/src/test_support/fixtures/events/json/vest_event.json"
        );
        let json_str = fs::read_to_string(path).unwrap();
        let inner: EventDto = serde_json::from_str(&json_str).unwrap();
        Self { inner }
    }

    pub fn kind(mut self, v: EventKind) -> Self {
        self.inner.kind = v;
        self
    }

    pub fn employee_id(mut self, v: impl Into<String>) -> Self {
        self.inner.employee_id = v.into();
        self
    }

    pub fn employee_name(mut self, v: impl Into<String>) -> Self {
        self.inner.employee_name = v.into();
        self
    }

    pub fn award_id(mut self, v: impl Into<String>) -> Self {
        self.inner.award_id = v.into();
        self
    }

    pub fn event_date(mut self, v: NaiveDate) -> Self {
        self.inner.event_date = v;
        self
    }

    pub fn quantity(mut self, v: &str) -> Self {
        self.inner.quantity = v.parse().unwrap();
        self
    }

    pub fn build(self) -> Event {
        let dto = self.inner;
        Event::new(
            dto.kind,
            dto.employee_id,
            dto.employee_name,
            dto.award_id,
            dto.event_date,
            dto.quantity,
        )
        .unwrap()
    }
}

#[cfg(test)]
mod event_builder_tests {
    use super::*;
    use crate::test_support::fixtures::{day, qty};
    use rstest::rstest;

    #[rstest]
    fn default_delegates_to_new_and_parses_json() {
        let built = EventBuilder::default().build();
        assert_eq!(built.kind(), EventKind::Vest);
        assert_eq!(built.employee_id(), "E001");
        assert_eq!(built.employee_name(), "Alice Smith");
        assert_eq!(built.award_id(), "ISO-001");
        assert_eq!(built.event_date(), day(2020, 1, 1));
        assert_eq!(built.quantity(), qty("1000"));
    }

    #[rstest]
    fn setters_override_all_fields_and_build_returns_inner() {
        let custom = EventBuilder::new()
            .kind(EventKind::Cancel)
            .employee_id("E777")
            .employee_name("Tester")
            .award_id("RSU-9")
            .event_date(day(2024, 2, 29))
            .quantity("12.25")
            .build();

        assert_eq!(custom.kind(), EventKind::Cancel);
        assert_eq!(custom.employee_id(), "E777");
        assert_eq!(custom.employee_name(), "Tester");
        assert_eq!(custom.award_id(), "RSU-9");
        assert_eq!(custom.event_date(), day(2024, 2, 29));
        assert_eq!(custom.quantity(), qty("12.25"));
    }
}
