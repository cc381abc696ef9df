use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::{Cents, ParseCentsError, ParsePeriodError, Period, parse_cents};

pub type EntryId = Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Overdue,
}

impl PaymentStatus {
    pub const ALL: [PaymentStatus; 3] = [
        PaymentStatus::Pending,
        PaymentStatus::Paid,
        PaymentStatus::Overdue,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "Pending",
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Overdue => "Overdue",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Some(PaymentStatus::Pending),
            "paid" => Some(PaymentStatus::Paid),
            "overdue" => Some(PaymentStatus::Overdue),
            _ => None,
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Why an entry submission was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EntryError {
    #[error("Item description is required")]
    MissingDescription,

    #[error("Bill month is required")]
    MissingPeriod,

    #[error("Amount is required")]
    MissingAmount,

    #[error("Invalid amount '{input}': {reason}")]
    InvalidAmount {
        input: String,
        reason: ParseCentsError,
    },

    #[error("Amount cannot be negative: {0}")]
    NegativeAmount(Cents),

    #[error(transparent)]
    InvalidPeriod(#[from] ParsePeriodError),

    #[error("Invalid deadline '{0}', expected YYYY-MM-DD")]
    InvalidDeadline(String),

    #[error("Invalid status '{0}', expected Pending, Paid or Overdue")]
    InvalidStatus(String),
}

/// One maintenance expense line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,
    pub description: String,
    /// Billing month the expense belongs to
    pub period: Period,
    /// Amount in minor units (always >= 0)
    pub amount_cents: Cents,
    /// Payment deadline
    pub deadline: Option<NaiveDate>,
    pub status: PaymentStatus,
}

/// The fields submitted to create an [`Entry`]. Validation happens in
/// [`super::Ledger::add`], which is the only place entries are created.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryRequest {
    pub description: String,
    pub period: Option<Period>,
    pub amount_cents: Option<Cents>,
    pub deadline: Option<NaiveDate>,
    pub status: PaymentStatus,
}

impl EntryRequest {
    pub fn new(description: impl Into<String>, period: Period, amount_cents: Cents) -> Self {
        Self {
            description: description.into(),
            period: Some(period),
            amount_cents: Some(amount_cents),
            ..Default::default()
        }
    }

    pub fn with_deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_status(mut self, status: PaymentStatus) -> Self {
        self.status = status;
        self
    }

    /// Build a request from raw form fields. Blank fields are treated as
    /// absent; a blank month or amount is left for `Ledger::add` to reject.
    pub fn from_fields(
        description: &str,
        period: &str,
        amount: &str,
        deadline: &str,
        status: &str,
    ) -> Result<Self, EntryError> {
        let period = match period.trim() {
            "" => None,
            label => Some(label.parse::<Period>()?),
        };

        let amount_cents = match amount.trim() {
            "" => None,
            raw => Some(parse_cents(raw).map_err(|reason| EntryError::InvalidAmount {
                input: raw.to_string(),
                reason,
            })?),
        };

        let deadline = match deadline.trim() {
            "" => None,
            raw => Some(
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .map_err(|_| EntryError::InvalidDeadline(raw.to_string()))?,
            ),
        };

        let status = match status.trim() {
            "" => PaymentStatus::default(),
            raw => PaymentStatus::from_str(raw)
                .ok_or_else(|| EntryError::InvalidStatus(raw.to_string()))?,
        };

        Ok(Self {
            description: description.to_string(),
            period,
            amount_cents,
            deadline,
            status,
        })
    }
}
