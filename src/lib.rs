//! # Rent Reconcile
//!
//! Reconciles expected monthly rent against a bank statement and classifies
//! each unit's payment status for the current month.
//!
//! ## Features
//!
//! - **Payment index**: latest payment date per amount, built from the statement
//! - **Due dates**: day-of-month due dates clamped to the end of short months
//! - **Status classification**: received, received late, unknown, not yet due, overdue
//! - **Adapters**: CSV schedule and statement readers, CSV report writer
//! - **Adapter abstraction**: trait-based sources and sinks, in-memory implementation included
//!
//! ## Quick Start
//!
//! ```rust
//! use rent_reconcile::{PaymentIndex, PaymentStatus, ReconciliationEngine, RentObligation, Transaction};
//! use chrono::NaiveDate;
//!
//! let obligations = vec![RentObligation::new("G1", 5000, 5)];
//! let transactions = vec![Transaction::new(5000, NaiveDate::from_ymd_opt(2025, 6, 7).unwrap())];
//! let index = PaymentIndex::from_transactions(&transactions);
//!
//! let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
//! let rows = ReconciliationEngine::new().reconcile(&obligations, &index, today).unwrap();
//! assert_eq!(rows[0].status, PaymentStatus::Received);
//! ```
//!
//! ## Known limitation
//!
//! Payments are matched to units by exact amount only. Units sharing a rent
//! amount all see the same, latest payment, and earlier payments of the same
//! amount are not retrievable.

pub mod config;
pub mod io;
pub mod ledger;
pub mod pipeline;
pub mod reconciliation;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use config::ReportConfig;
pub use ledger::*;
pub use pipeline::*;
pub use reconciliation::*;
pub use traits::*;
pub use types::*;
