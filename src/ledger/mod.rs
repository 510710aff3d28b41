//! Bank ledger side of reconciliation: payment lookup and due-date arithmetic

pub mod calendar;
pub mod index;

pub use calendar::*;
pub use index::*;
