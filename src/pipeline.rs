//! End-to-end run: adapters in, reconciliation, adapter out

use chrono::NaiveDate;
use log::info;
use serde::{Deserialize, Serialize};

use crate::ledger::PaymentIndex;
use crate::reconciliation::{ReconciliationEngine, ReconciliationReport};
use crate::traits::*;
use crate::types::*;

/// Outcome of a full run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub report: ReconciliationReport,
    /// Statement rows the adapter discarded before indexing
    pub dropped: DroppedRows,
    /// Distinct payment amounts available for matching
    pub indexed_amounts: usize,
}

/// Load both inputs, reconcile as of `today` and hand the rows to `sink`
///
/// Adapter failures surface before the engine runs; nothing is written
/// unless every obligation was classified.
pub fn run_reconciliation<S, T, R>(
    engine: &ReconciliationEngine,
    schedule: &S,
    statement: &T,
    sink: &mut R,
    today: NaiveDate,
) -> RentResult<RunSummary>
where
    S: ScheduleSource + ?Sized,
    T: StatementSource + ?Sized,
    R: ReportSink + ?Sized,
{
    let obligations = schedule.load_obligations()?;
    let load = statement.load_statement()?;

    let index = PaymentIndex::from_transactions(&load.transactions);
    let rows = engine.reconcile(&obligations, &index, today)?;
    sink.write_report(&rows)?;

    let report = ReconciliationReport { as_of: today, rows };
    info!("{}", report.summary());

    Ok(RunSummary {
        report,
        dropped: load.dropped,
        indexed_amounts: index.len(),
    })
}
