//! Traits for adapter abstraction and extensibility
//!
//! The reconciliation core only ever sees typed collections. Anything that
//! reads schedules, cleans statements or writes reports sits behind these
//! traits, so the core can be driven from files, memory or any other source.

use crate::types::*;

/// Source of the rent schedule
pub trait ScheduleSource {
    /// Load obligations in schedule order
    fn load_obligations(&self) -> RentResult<Vec<RentObligation>>;
}

/// Source of incoming bank transactions
pub trait StatementSource {
    /// Load and clean the statement, reporting what was discarded
    fn load_statement(&self) -> RentResult<StatementLoad>;
}

/// Destination for finished report rows
pub trait ReportSink {
    /// Persist rows in the order given
    fn write_report(&mut self, rows: &[ReportRow]) -> RentResult<()>;
}

/// Trait for implementing custom obligation validation rules
pub trait ObligationValidator: Send + Sync {
    /// Validate an obligation before it is classified
    fn validate_obligation(&self, obligation: &RentObligation) -> RentResult<()>;
}

/// Default obligation validator enforcing the reconciliation preconditions
pub struct DefaultObligationValidator;

impl ObligationValidator for DefaultObligationValidator {
    fn validate_obligation(&self, obligation: &RentObligation) -> RentResult<()> {
        if obligation.amount == 0 {
            return Err(RentError::InvalidObligation(format!(
                "unit '{}' has a zero rent amount",
                obligation.unit_id
            )));
        }

        if !(1..=31).contains(&obligation.due_day) {
            return Err(RentError::InvalidObligation(format!(
                "unit '{}' has due day {} outside 1-31",
                obligation.unit_id, obligation.due_day
            )));
        }

        Ok(())
    }
}
