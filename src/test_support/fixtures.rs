// Shared test fixtures, compiled only for unit tests.

use chrono::NaiveDate;
use rust_decimal::Decimal;

pub mod events {
    pub mod event_builder;
}

pub fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

pub fn qty(value: &str) -> Decimal {
    value.parse().expect("valid decimal literal")
}
