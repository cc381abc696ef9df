use std::fmt;

use tracing::debug;

use crate::config::ReportConfig;
use crate::domain::{Cents, Entry, EntryId, EntryRequest, Ledger, format_cents};
use crate::io::{Exporter, Report};

use super::AppError;

pub const DEFAULT_REPORT_TITLE: &str = "OFFICE MAINTENANCE SPENDING JULY 2025";

/// Free-form report heading. Not validated; may be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportTitle(String);

impl ReportTitle {
    pub fn new(title: impl Into<String>) -> Self {
        Self(title.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn set(&mut self, title: impl Into<String>) {
        self.0 = title.into();
    }

    /// The title as printed at the top of the report.
    pub fn heading(&self) -> String {
        self.0.to_uppercase()
    }
}

impl Default for ReportTitle {
    fn default() -> Self {
        Self::new(DEFAULT_REPORT_TITLE)
    }
}

impl fmt::Display for ReportTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One report-composition session: the ledger plus the report title.
/// This is the only mutator of either; nothing else holds a copy.
#[derive(Debug, Clone, Default)]
pub struct Session {
    ledger: Ledger,
    title: ReportTitle,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            ledger: Ledger::new(),
            title: ReportTitle::new(title),
        }
    }

    pub fn from_config(config: &ReportConfig) -> Self {
        Self::with_title(config.title.clone())
    }

    // ========================
    // Ledger operations
    // ========================

    pub fn add_entry(&mut self, request: EntryRequest) -> Result<Entry, AppError> {
        let entry = self.ledger.add(request)?;
        debug!(
            id = %entry.id,
            description = %entry.description,
            amount = %format_cents(entry.amount_cents),
            "entry added"
        );
        Ok(entry)
    }

    /// Remove by id; unknown ids leave the ledger unchanged.
    pub fn remove_entry(&mut self, id: EntryId) -> Option<Entry> {
        let removed = self.ledger.remove(id);
        match &removed {
            Some(entry) => debug!(id = %entry.id, "entry removed"),
            None => debug!(id = %id, "remove ignored, no such entry"),
        }
        removed
    }

    /// Remove by 1-based row number as shown in the report.
    pub fn remove_row(&mut self, row: usize) -> Option<Entry> {
        let id = row
            .checked_sub(1)
            .and_then(|index| self.ledger.entries().get(index))
            .map(|entry| entry.id)?;
        self.remove_entry(id)
    }

    pub fn total(&self) -> Cents {
        self.ledger.total()
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    // ========================
    // Title
    // ========================

    pub fn title(&self) -> &ReportTitle {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title.set(title);
        debug!(title = %self.title, "report title changed");
    }

    // ========================
    // Export
    // ========================

    pub fn export_report(&self, exporter: &Exporter) -> Report {
        exporter.render(self.title.as_str(), self.ledger.entries(), self.total())
    }
}
