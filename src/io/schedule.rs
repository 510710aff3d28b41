//! Rent schedule reader
//!
//! Expected layout: a header row, then one row per unit with the columns
//! unit id, monthly amount and the original contract date. Only the day of
//! the contract date matters; it becomes the monthly due day.

use bigdecimal::BigDecimal;
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use csv::ReaderBuilder;
use log::info;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::io::statement::truncate_to_units;
use crate::traits::*;
use crate::types::*;

const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d.%m.%Y"];

/// Schedule stored as a CSV file
#[derive(Debug, Clone)]
pub struct CsvScheduleSource {
    path: PathBuf,
}

impl CsvScheduleSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScheduleSource for CsvScheduleSource {
    fn load_obligations(&self) -> RentResult<Vec<RentObligation>> {
        let file = File::open(&self.path)?;
        let obligations = read_obligations(file)?;
        info!(
            "Loaded {} obligations from {}",
            obligations.len(),
            self.path.display()
        );
        Ok(obligations)
    }
}

/// Read obligations from any CSV reader, in file order
pub fn read_obligations<R: Read>(reader: R) -> RentResult<Vec<RentObligation>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut obligations = Vec::new();
    for (line_num, result) in reader.records().enumerate() {
        let record = result?;
        // 1-indexed, plus the header row
        let row = line_num + 2;

        if record.iter().all(|field| field.is_empty()) {
            continue;
        }

        let field = |idx: usize, name: &str| {
            record.get(idx).ok_or_else(|| RentError::Schedule {
                row,
                message: format!("missing {} column", name),
            })
        };

        let unit_id = field(0, "unit")?.to_string();
        let amount = parse_schedule_amount(field(1, "amount")?).ok_or_else(|| {
            RentError::Schedule {
                row,
                message: format!("invalid amount '{}'", record.get(1).unwrap_or_default()),
            }
        })?;
        let due_day = parse_due_day(field(2, "date")?).ok_or_else(|| RentError::Schedule {
            row,
            message: format!("invalid contract date '{}'", record.get(2).unwrap_or_default()),
        })?;

        obligations.push(RentObligation {
            unit_id,
            amount,
            due_day,
        });
    }

    Ok(obligations)
}

/// Positive amount in whole units; fractions are truncated toward zero
pub fn parse_schedule_amount(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    if let Ok(amount) = raw.parse::<u64>() {
        return (amount > 0).then_some(amount);
    }

    let value = BigDecimal::from_str(raw).ok()?;
    truncate_to_units(&value).filter(|amount| *amount > 0)
}

/// Day of month taken from a contract date or timestamp
pub fn parse_due_day(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.date())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        })
        .map(|date| date.day())
}
