//! In-memory adapter implementation for testing and embedding

use crate::traits::*;
use crate::types::*;

/// In-memory schedule, statement and report holder
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    obligations: Vec<RentObligation>,
    statement: StatementLoad,
    report: Vec<ReportRow>,
}

impl MemorySource {
    /// Create an empty memory source
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a source pre-loaded with a schedule and clean transactions
    pub fn with_data(obligations: Vec<RentObligation>, transactions: Vec<Transaction>) -> Self {
        Self {
            obligations,
            statement: StatementLoad {
                transactions,
                dropped: DroppedRows::default(),
            },
            report: Vec::new(),
        }
    }

    pub fn add_obligation(&mut self, obligation: RentObligation) {
        self.obligations.push(obligation);
    }

    pub fn add_transaction(&mut self, transaction: Transaction) {
        self.statement.transactions.push(transaction);
    }

    /// Rows written by the last report
    pub fn report(&self) -> &[ReportRow] {
        &self.report
    }

    /// Clear all data (useful for testing)
    pub fn clear(&mut self) {
        self.obligations.clear();
        self.statement = StatementLoad::default();
        self.report.clear();
    }
}

impl ScheduleSource for MemorySource {
    fn load_obligations(&self) -> RentResult<Vec<RentObligation>> {
        Ok(self.obligations.clone())
    }
}

impl StatementSource for MemorySource {
    fn load_statement(&self) -> RentResult<StatementLoad> {
        Ok(self.statement.clone())
    }
}

impl ReportSink for MemorySource {
    fn write_report(&mut self, rows: &[ReportRow]) -> RentResult<()> {
        self.report = rows.to_vec();
        Ok(())
    }
}
