//! Core types and data structures for rent reconciliation

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Display format used for every date in the report
pub const REPORT_DATE_FORMAT: &str = "%d.%m.%Y";

/// Marker written in place of a missing payment date
pub const ABSENT_MARKER: &str = "-";

/// A unit's recurring expected rent payment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentObligation {
    /// Identifier of the rented unit (garage number, flat, etc.)
    pub unit_id: String,
    /// Expected amount in whole currency units
    pub amount: u64,
    /// Day of month the rent is due on (1-31)
    pub due_day: u32,
}

impl RentObligation {
    /// Create a new obligation
    pub fn new(unit_id: impl Into<String>, amount: u64, due_day: u32) -> Self {
        Self {
            unit_id: unit_id.into(),
            amount,
            due_day,
        }
    }
}

/// Incoming bank transaction
///
/// Only positive, well-formed entries reach the core. The statement
/// adapter is responsible for discarding everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transaction {
    /// Amount received in whole currency units
    pub amount: u64,
    /// Operation date
    pub date: NaiveDate,
}

impl Transaction {
    pub fn new(amount: u64, date: NaiveDate) -> Self {
        Self { amount, date }
    }
}

/// Terminal classification of an obligation for the current month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// Paid on or before the grace deadline
    Received,
    /// Paid after the grace deadline but not later than today
    ReceivedLate,
    /// Matching payment is dated after today
    Unknown,
    /// No payment yet and the grace deadline has not passed
    NotYetDue,
    /// No payment and the grace deadline has passed
    Overdue,
}

impl PaymentStatus {
    /// All statuses in decision order
    pub const ALL: [PaymentStatus; 5] = [
        PaymentStatus::Received,
        PaymentStatus::ReceivedLate,
        PaymentStatus::Unknown,
        PaymentStatus::NotYetDue,
        PaymentStatus::Overdue,
    ];

    /// Label written to the report
    pub fn label(&self) -> &'static str {
        match self {
            PaymentStatus::Received => "получен",
            PaymentStatus::ReceivedLate => "получен с задержкой",
            PaymentStatus::Unknown => "неизвестно",
            PaymentStatus::NotYetDue => "срок не наступил",
            PaymentStatus::Overdue => "просрочен",
        }
    }

    /// Whether a payment for the obligation was found on or before today
    pub fn is_settled(&self) -> bool {
        matches!(self, PaymentStatus::Received | PaymentStatus::ReceivedLate)
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One line of the reconciliation report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub unit_id: String,
    /// Due date in the reporting month
    pub due_date: NaiveDate,
    /// Expected amount
    pub amount: u64,
    /// Latest transaction with exactly this amount, if any
    pub last_payment_date: Option<NaiveDate>,
    pub status: PaymentStatus,
}

impl ReportRow {
    /// Due date formatted as day.month.year
    pub fn due_date_display(&self) -> String {
        self.due_date.format(REPORT_DATE_FORMAT).to_string()
    }

    /// Last payment date formatted as day.month.year, or the absent marker
    pub fn last_payment_display(&self) -> String {
        match self.last_payment_date {
            Some(date) => date.format(REPORT_DATE_FORMAT).to_string(),
            None => ABSENT_MARKER.to_string(),
        }
    }
}

/// Reasons a statement row never reaches the core
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DropReason {
    /// Row has too few columns to hold a date and an amount
    ShortRow,
    /// Amount is not marked as incoming (no leading `+`)
    NotIncoming,
    /// Amount could not be parsed or is not positive after truncation
    BadAmount,
    /// Operation date could not be parsed
    BadDate,
    /// Row is not valid UTF-8
    BadEncoding,
}

/// Counters for statement rows discarded by the adapter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DroppedRows {
    pub short_row: usize,
    pub not_incoming: usize,
    pub bad_amount: usize,
    pub bad_date: usize,
    pub bad_encoding: usize,
}

impl DroppedRows {
    pub fn record(&mut self, reason: DropReason) {
        match reason {
            DropReason::ShortRow => self.short_row += 1,
            DropReason::NotIncoming => self.not_incoming += 1,
            DropReason::BadAmount => self.bad_amount += 1,
            DropReason::BadDate => self.bad_date += 1,
            DropReason::BadEncoding => self.bad_encoding += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.short_row + self.not_incoming + self.bad_amount + self.bad_date + self.bad_encoding
    }
}

/// Cleaned statement: the incoming transactions plus what was thrown away
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementLoad {
    pub transactions: Vec<Transaction>,
    pub dropped: DroppedRows,
}

/// Errors that can occur while reconciling rent
#[derive(Debug, thiserror::Error)]
pub enum RentError {
    #[error("Invalid obligation: {0}")]
    InvalidObligation(String),
    #[error("Schedule row {row}: {message}")]
    Schedule { row: usize, message: String },
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Config file error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type for reconciliation operations
pub type RentResult<T> = Result<T, RentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_labels() {
        assert_eq!(PaymentStatus::Received.label(), "получен");
        assert_eq!(PaymentStatus::ReceivedLate.label(), "получен с задержкой");
        assert_eq!(PaymentStatus::Unknown.to_string(), "неизвестно");
        assert_eq!(PaymentStatus::NotYetDue.to_string(), "срок не наступил");
        assert_eq!(PaymentStatus::Overdue.to_string(), "просрочен");
    }

    #[test]
    fn test_settled_statuses() {
        let settled: Vec<_> = PaymentStatus::ALL
            .iter()
            .filter(|s| s.is_settled())
            .collect();
        assert_eq!(
            settled,
            vec![&PaymentStatus::Received, &PaymentStatus::ReceivedLate]
        );
    }

    #[test]
    fn test_row_display_helpers() {
        let row = ReportRow {
            unit_id: "G1".to_string(),
            due_date: NaiveDate::from_ymd_opt(2025, 6, 5).unwrap(),
            amount: 5000,
            last_payment_date: None,
            status: PaymentStatus::Overdue,
        };
        assert_eq!(row.due_date_display(), "05.06.2025");
        assert_eq!(row.last_payment_display(), "-");

        let paid = ReportRow {
            last_payment_date: NaiveDate::from_ymd_opt(2025, 6, 7),
            ..row
        };
        assert_eq!(paid.last_payment_display(), "07.06.2025");
    }

    #[test]
    fn test_dropped_rows_total() {
        let mut dropped = DroppedRows::default();
        dropped.record(DropReason::NotIncoming);
        dropped.record(DropReason::NotIncoming);
        dropped.record(DropReason::BadDate);

        assert_eq!(dropped.not_incoming, 2);
        assert_eq!(dropped.bad_date, 1);
        assert_eq!(dropped.total(), 3);
    }
}
