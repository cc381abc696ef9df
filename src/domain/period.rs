use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Offsets (in months, relative to today) of the selectable billing periods:
/// next month, the current month, then the three months before it.
pub const MONTH_OPTION_OFFSETS: [i32; 5] = [1, 0, -1, -2, -3];

/// A billing month, displayed as "Jul-25".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Period {
    year: i32,
    /// 1-based month
    month: u32,
}

impl Period {
    /// Returns `None` if `month` is not in 1..=12.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// The period containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Shift by a number of months, carrying across year boundaries.
    pub fn offset(&self, months: i32) -> Self {
        let index = self.year * 12 + (self.month as i32 - 1) + months;
        Self {
            year: index.div_euclid(12),
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{:02}",
            MONTH_ABBREVIATIONS[(self.month - 1) as usize],
            self.year.rem_euclid(100)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid period '{0}', expected a label like 'Jul-25'")]
pub struct ParsePeriodError(pub String);

impl FromStr for Period {
    type Err = ParsePeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let err = || ParsePeriodError(trimmed.to_string());

        let (month_str, year_str) = trimmed.split_once('-').ok_or_else(err)?;
        let month = MONTH_ABBREVIATIONS
            .iter()
            .position(|abbr| abbr.eq_ignore_ascii_case(month_str))
            .ok_or_else(err)? as u32
            + 1;

        if year_str.len() != 2 || !year_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(err());
        }
        let year: i32 = year_str.parse().map_err(|_| err())?;

        Ok(Self {
            year: 2000 + year,
            month,
        })
    }
}

impl TryFrom<String> for Period {
    type Error = ParsePeriodError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Period> for String {
    fn from(period: Period) -> Self {
        period.to_string()
    }
}

/// The selectable billing periods for `today`, in display order:
/// next month, current month, and the three preceding months.
pub fn month_options(today: NaiveDate) -> [Period; 5] {
    let current = Period::containing(today);
    MONTH_OPTION_OFFSETS.map(|offset| current.offset(offset))
}

/// Labels for [`month_options`].
pub fn month_option_labels(today: NaiveDate) -> Vec<String> {
    month_options(today).iter().map(Period::label).collect()
}
