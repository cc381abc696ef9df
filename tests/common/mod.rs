// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use chrono::NaiveDate;
use maintenance_maker::application::Session;
use maintenance_maker::domain::{Cents, EntryRequest, PaymentStatus, Period};
use maintenance_maker::format::FormatConfig;
use maintenance_maker::io::{ExportOptions, Exporter, Report};

/// Helper to parse a date string into NaiveDate
pub fn parse_date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

pub fn period(label: &str) -> Period {
    label.parse().unwrap()
}

/// Render a session with the default INR formatting
pub fn export(session: &Session) -> Report {
    let format = FormatConfig::default();
    let options = ExportOptions::default();
    session.export_report(&Exporter::new(&format, &options))
}

/// Test fixture: a typical month of building upkeep
pub struct StandardEntries;

impl StandardEntries {
    pub const TOTAL: Cents = 1_240_075;

    pub fn add_july(session: &mut Session) {
        session
            .add_entry(
                EntryRequest::new("HVAC Filter Change", period("Jul-25"), 150075)
                    .with_deadline(parse_date("2025-07-04"))
                    .with_status(PaymentStatus::Paid),
            )
            .unwrap();
        session
            .add_entry(
                EntryRequest::new("Lift AMC", period("Jun-25"), 1_000_000)
                    .with_status(PaymentStatus::Overdue),
            )
            .unwrap();
        session
            .add_entry(EntryRequest::new("Garden upkeep", period("Jul-25"), 90000))
            .unwrap();
    }
}
