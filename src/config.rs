//! Run configuration for the file adapters
//!
//! Paths and report naming live here and are handed to the adapters at
//! startup. The reconciliation core never sees this struct.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::ledger::DEFAULT_GRACE_DAYS;

/// Longest grace window accepted from configuration
pub const MAX_GRACE_DAYS: u64 = 365;
use crate::types::*;

/// Paths and tunables for one reconciliation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Rent schedule CSV
    pub schedule_path: PathBuf,
    /// Bank statement CSV
    pub statement_path: PathBuf,
    /// Directory the report is written into
    pub report_dir: PathBuf,
    /// Report file name prefix, followed by the run date
    pub report_prefix: String,
    /// Days after the due date before an unpaid unit is overdue
    pub grace_days: u64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            schedule_path: PathBuf::from("arenda.csv"),
            statement_path: PathBuf::from("statement.csv"),
            report_dir: PathBuf::from("."),
            report_prefix: "report".to_string(),
            grace_days: DEFAULT_GRACE_DAYS,
        }
    }
}

impl ReportConfig {
    /// Load from a TOML file; missing keys fall back to defaults
    pub fn from_toml_file(path: &Path) -> RentResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> RentResult<Self> {
        let config: ReportConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Report path for a run on `today`: `<dir>/<prefix>_<YYYY-MM-DD>.csv`
    pub fn report_path(&self, today: NaiveDate) -> PathBuf {
        self.report_dir.join(format!(
            "{}_{}.csv",
            self.report_prefix,
            today.format("%Y-%m-%d")
        ))
    }

    pub fn validate(&self) -> RentResult<()> {
        if self.schedule_path.as_os_str().is_empty() {
            return Err(RentError::Config("schedule_path cannot be empty".to_string()));
        }

        if self.statement_path.as_os_str().is_empty() {
            return Err(RentError::Config("statement_path cannot be empty".to_string()));
        }

        if self.grace_days > MAX_GRACE_DAYS {
            return Err(RentError::Config(format!(
                "grace_days {} exceeds the maximum of {}",
                self.grace_days, MAX_GRACE_DAYS
            )));
        }

        if self.report_prefix.trim().is_empty() {
            return Err(RentError::Config("report_prefix cannot be empty".to_string()));
        }

        if self
            .report_prefix
            .chars()
            .any(|c| matches!(c, '/' | '\\'))
        {
            return Err(RentError::Config(format!(
                "report_prefix '{}' must not contain path separators",
                self.report_prefix
            )));
        }

        Ok(())
    }
}
