//! Display formatting for amounts and dates.
//!
//! Locale details are carried explicitly in [`FormatConfig`] rather than read
//! from the environment, so the same input always renders the same way.

mod currency;
mod date;

use serde::{Deserialize, Serialize};

pub use currency::*;
pub use date::*;

/// How the integer part of an amount is split into groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigitGrouping {
    /// 12,34,567: last three digits, then pairs
    #[default]
    Indian,
    /// 1,234,567
    Western,
    /// 1234567
    None,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    pub currency_symbol: String,
    pub grouping: DigitGrouping,
    pub group_separator: char,
    pub decimal_separator: char,
    /// Digits shown after the decimal separator (0..=2)
    pub fraction_digits: u32,
    /// chrono strftime pattern used for deadlines
    pub date_pattern: String,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "₹".to_string(),
            grouping: DigitGrouping::Indian,
            group_separator: ',',
            decimal_separator: '.',
            fraction_digits: 0,
            date_pattern: DEFAULT_DATE_PATTERN.to_string(),
        }
    }
}
