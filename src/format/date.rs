use std::fmt::Write;

use chrono::NaiveDate;
use chrono::format::{Item, StrftimeItems};

use super::FormatConfig;

/// "04 July 2025"
pub const DEFAULT_DATE_PATTERN: &str = "%d %B %Y";

/// Render a deadline for display. An absent date renders as an empty string.
pub fn format_date(date: Option<NaiveDate>, config: &FormatConfig) -> String {
    let Some(date) = date else {
        return String::new();
    };

    let mut out = String::new();
    if write!(out, "{}", date.format(&config.date_pattern)).is_err() {
        return String::new();
    }
    out
}

/// Render a `YYYY-MM-DD` string. Blank or unparsable input renders as empty.
pub fn format_date_str(input: &str, config: &FormatConfig) -> String {
    let date = NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").ok();
    format_date(date, config)
}

/// Returns false if chrono cannot render `pattern`.
pub fn is_valid_date_pattern(pattern: &str) -> bool {
    !StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error))
}
