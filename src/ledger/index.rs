//! Lookup from payment amount to the most recent payment date

use chrono::NaiveDate;
use log::{debug, warn};
use std::collections::HashMap;

use crate::types::*;

/// Amount -> latest transaction date seen for that amount
///
/// Transactions are keyed by amount alone. When several transactions share
/// an amount only the latest date survives, so earlier payments of the same
/// amount (or payments from another unit with the same rent) cannot be told
/// apart. This is a known precision loss of amount-based matching.
///
/// Input transactions must already be positive and well-formed; the
/// statement adapter filters everything else out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentIndex {
    latest: HashMap<u64, NaiveDate>,
    occurrences: HashMap<u64, usize>,
}

impl PaymentIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the index from a transaction collection
    pub fn from_transactions<'a, I>(transactions: I) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut index = Self::new();
        for transaction in transactions {
            index.record(transaction);
        }

        let shared = index.shared_amounts();
        if !shared.is_empty() {
            warn!(
                "{} amount(s) appear on more than one transaction, keeping the latest date: {:?}",
                shared.len(),
                shared
            );
        }
        debug!("Indexed {} distinct payment amounts", index.len());
        index
    }

    fn record(&mut self, transaction: &Transaction) {
        *self.occurrences.entry(transaction.amount).or_insert(0) += 1;
        self.latest
            .entry(transaction.amount)
            .and_modify(|date| {
                if transaction.date > *date {
                    *date = transaction.date;
                }
            })
            .or_insert(transaction.date);
    }

    /// Latest payment date for exactly this amount
    pub fn get(&self, amount: u64) -> Option<NaiveDate> {
        self.latest.get(&amount).copied()
    }

    /// Number of distinct amounts
    pub fn len(&self) -> usize {
        self.latest.len()
    }

    pub fn is_empty(&self) -> bool {
        self.latest.is_empty()
    }

    /// Amounts observed on more than one transaction, ascending
    pub fn shared_amounts(&self) -> Vec<u64> {
        let mut amounts: Vec<u64> = self
            .occurrences
            .iter()
            .filter(|(_, count)| **count > 1)
            .map(|(amount, _)| *amount)
            .collect();
        amounts.sort_unstable();
        amounts
    }
}

impl<'a> FromIterator<&'a Transaction> for PaymentIndex {
    fn from_iter<I: IntoIterator<Item = &'a Transaction>>(iter: I) -> Self {
        Self::from_transactions(iter)
    }
}
