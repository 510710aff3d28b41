//! Validation utilities

use std::collections::HashMap;

use crate::traits::*;
use crate::types::*;

/// Validate that a unit ID is valid
pub fn validate_unit_id(unit_id: &str) -> RentResult<()> {
    if unit_id.trim().is_empty() {
        return Err(RentError::InvalidObligation(
            "Unit ID cannot be empty".to_string(),
        ));
    }

    if unit_id.chars().count() > 100 {
        return Err(RentError::InvalidObligation(
            "Unit ID cannot exceed 100 characters".to_string(),
        ));
    }

    Ok(())
}

/// Amounts carried by more than one obligation in the schedule
///
/// Such units cannot be told apart by amount matching and will all be
/// reported against the same latest payment.
pub fn shared_obligation_amounts(obligations: &[RentObligation]) -> Vec<u64> {
    let mut counts: HashMap<u64, usize> = HashMap::new();
    for obligation in obligations {
        *counts.entry(obligation.amount).or_insert(0) += 1;
    }

    let mut shared: Vec<u64> = counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(amount, _)| amount)
        .collect();
    shared.sort_unstable();
    shared
}

/// Enhanced obligation validator with detailed checks
pub struct EnhancedObligationValidator;

impl ObligationValidator for EnhancedObligationValidator {
    fn validate_obligation(&self, obligation: &RentObligation) -> RentResult<()> {
        DefaultObligationValidator.validate_obligation(obligation)?;

        validate_unit_id(&obligation.unit_id)
    }
}
