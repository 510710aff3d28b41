//! Reconciliation engine matching expected rent against bank payments
//!
//! For every obligation the engine resolves a due date in the month of the
//! reference date, adds the grace window, looks up the latest payment of the
//! exact rent amount and classifies the result. The reference date is always
//! supplied by the caller; nothing here reads the clock.

use chrono::{Datelike, NaiveDate};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::ledger::{expected_pay_date, grace_deadline, PaymentIndex, DEFAULT_GRACE_DAYS};
use crate::traits::*;
use crate::types::*;
use crate::utils::shared_obligation_amounts;

/// Classify one obligation
///
/// Checks run in order and the first match wins. A payment dated after
/// `today` is treated as an anomaly rather than a match.
pub fn classify(
    last_payment_date: Option<NaiveDate>,
    grace_date: NaiveDate,
    today: NaiveDate,
) -> PaymentStatus {
    match last_payment_date {
        Some(paid) if paid <= grace_date => PaymentStatus::Received,
        Some(paid) if paid <= today => PaymentStatus::ReceivedLate,
        Some(_) => PaymentStatus::Unknown,
        None if today <= grace_date => PaymentStatus::NotYetDue,
        None => PaymentStatus::Overdue,
    }
}

/// Reconciliation result for one reference date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationReport {
    /// Reference date the report was computed for
    pub as_of: NaiveDate,
    /// One row per obligation, in schedule order
    pub rows: Vec<ReportRow>,
}

impl ReconciliationReport {
    /// Number of rows per status; every status is present, possibly with 0
    pub fn status_counts(&self) -> BTreeMap<PaymentStatus, usize> {
        let mut counts: BTreeMap<PaymentStatus, usize> =
            PaymentStatus::ALL.iter().map(|s| (*s, 0)).collect();
        for row in &self.rows {
            *counts.entry(row.status).or_insert(0) += 1;
        }
        counts
    }

    /// Rows that still need attention (overdue or anomalous)
    pub fn attention_rows(&self) -> Vec<&ReportRow> {
        self.rows
            .iter()
            .filter(|row| matches!(row.status, PaymentStatus::Overdue | PaymentStatus::Unknown))
            .collect()
    }

    pub fn summary(&self) -> String {
        let counts = self.status_counts();
        let parts: Vec<String> = counts
            .iter()
            .map(|(status, count)| format!("{}: {}", status, count))
            .collect();
        format!(
            "Rent reconciliation as of {}: {} units ({})",
            self.as_of.format(REPORT_DATE_FORMAT),
            self.rows.len(),
            parts.join(", ")
        )
    }
}

/// Engine classifying each obligation for the current month
pub struct ReconciliationEngine {
    grace_days: u64,
    validator: Box<dyn ObligationValidator>,
}

impl Default for ReconciliationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ReconciliationEngine {
    /// Create an engine with the standard three-day grace window
    pub fn new() -> Self {
        Self {
            grace_days: DEFAULT_GRACE_DAYS,
            validator: Box::new(DefaultObligationValidator),
        }
    }

    /// Create an engine with a custom validator
    pub fn with_validator(validator: Box<dyn ObligationValidator>) -> Self {
        Self {
            grace_days: DEFAULT_GRACE_DAYS,
            validator,
        }
    }

    /// Override the grace window
    pub fn with_grace_days(mut self, grace_days: u64) -> Self {
        self.grace_days = grace_days;
        self
    }

    pub fn grace_days(&self) -> u64 {
        self.grace_days
    }

    /// Build one report row
    ///
    /// The due date is always resolved against the month and year of
    /// `today`, whatever cycle the payment belongs to.
    pub fn reconcile_obligation(
        &self,
        obligation: &RentObligation,
        index: &PaymentIndex,
        today: NaiveDate,
    ) -> RentResult<ReportRow> {
        self.validator.validate_obligation(obligation)?;

        let due_date = expected_pay_date(obligation.due_day, today.month(), today.year())
            .ok_or_else(|| {
                RentError::InvalidObligation(format!(
                    "unit '{}': no due date for day {} in {}",
                    obligation.unit_id,
                    obligation.due_day,
                    today.format("%m.%Y")
                ))
            })?;
        let grace_date = grace_deadline(due_date, self.grace_days).ok_or_else(|| {
            RentError::InvalidObligation(format!(
                "unit '{}': grace deadline overflows the calendar",
                obligation.unit_id
            ))
        })?;

        let last_payment_date = index.get(obligation.amount);
        let status = classify(last_payment_date, grace_date, today);

        debug!(
            "unit {}: due {}, grace {}, last payment {:?} -> {:?}",
            obligation.unit_id, due_date, grace_date, last_payment_date, status
        );

        Ok(ReportRow {
            unit_id: obligation.unit_id.clone(),
            due_date,
            amount: obligation.amount,
            last_payment_date,
            status,
        })
    }

    /// Classify every obligation, preserving schedule order
    ///
    /// Fails on the first obligation that breaks the validator's rules.
    pub fn reconcile(
        &self,
        obligations: &[RentObligation],
        index: &PaymentIndex,
        today: NaiveDate,
    ) -> RentResult<Vec<ReportRow>> {
        let shared = shared_obligation_amounts(obligations);
        if !shared.is_empty() {
            warn!(
                "Several units share the rent amount(s) {:?}; they will match the same payment",
                shared
            );
        }

        let rows = obligations
            .iter()
            .map(|obligation| self.reconcile_obligation(obligation, index, today))
            .collect::<RentResult<Vec<_>>>()?;

        info!(
            "Reconciled {} obligations against {} payment amounts",
            rows.len(),
            index.len()
        );
        Ok(rows)
    }

    /// Index the transactions and reconcile in one step
    pub fn reconcile_report(
        &self,
        obligations: &[RentObligation],
        transactions: &[Transaction],
        today: NaiveDate,
    ) -> RentResult<ReconciliationReport> {
        let index = PaymentIndex::from_transactions(transactions);
        let rows = self.reconcile(obligations, &index, today)?;
        Ok(ReconciliationReport { as_of: today, rows })
    }
}
