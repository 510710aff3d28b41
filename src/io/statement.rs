//! Bank statement reader and amount cleanup
//!
//! The statement export has no header. The operation date sits in the first
//! column as `DD.MM.YYYY` (optionally followed by a time) and the signed
//! amount in the fifth, formatted like `+5 000,00`. Only incoming amounts
//! survive; every other row is counted and dropped.

use bigdecimal::{BigDecimal, ToPrimitive};
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use log::{debug, info, warn};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::traits::*;
use crate::types::*;

pub const DATE_COLUMN: usize = 0;
pub const AMOUNT_COLUMN: usize = 4;

const OPERATION_DATE_FORMAT: &str = "%d.%m.%Y";

/// 10^19 is the largest power of ten a u64 holds
const MAX_INTEGER_EXPONENT: i64 = 19;
/// More fractional digits than this is not a bank amount
const MAX_FRACTION_DIGITS: i64 = 64;

/// Statement stored as a CSV file
#[derive(Debug, Clone)]
pub struct CsvStatementSource {
    path: PathBuf,
}

impl CsvStatementSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StatementSource for CsvStatementSource {
    fn load_statement(&self) -> RentResult<StatementLoad> {
        let file = File::open(&self.path)?;
        let load = read_statement(file)?;
        info!(
            "Loaded {} incoming transactions from {} ({} rows dropped)",
            load.transactions.len(),
            self.path.display(),
            load.dropped.total()
        );
        if load.dropped.bad_amount + load.dropped.bad_date > 0 {
            warn!(
                "Statement rows with unreadable data were skipped: {} bad amount, {} bad date",
                load.dropped.bad_amount, load.dropped.bad_date
            );
        }
        Ok(load)
    }
}

/// Read and clean a statement from any CSV reader
pub fn read_statement<R: Read>(reader: R) -> RentResult<StatementLoad> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut load = StatementLoad::default();
    for (line_num, result) in reader.byte_records().enumerate() {
        let parsed = match StringRecord::from_byte_record(result?) {
            Ok(record) => parse_row(record.get(DATE_COLUMN), record.get(AMOUNT_COLUMN)),
            Err(_) => Err(DropReason::BadEncoding),
        };
        match parsed {
            Ok(transaction) => load.transactions.push(transaction),
            Err(reason) => {
                debug!("Statement line {} dropped: {:?}", line_num + 1, reason);
                load.dropped.record(reason);
            }
        }
    }

    Ok(load)
}

fn parse_row(date_raw: Option<&str>, amount_raw: Option<&str>) -> Result<Transaction, DropReason> {
    let (date_raw, amount_raw) = match (date_raw, amount_raw) {
        (Some(date), Some(amount)) => (date, amount),
        _ => return Err(DropReason::ShortRow),
    };

    let amount = clean_amount(amount_raw)?;
    let date = parse_operation_date(date_raw).ok_or(DropReason::BadDate)?;
    Ok(Transaction::new(amount, date))
}

/// Turn a raw incoming amount such as `+5 000,00` into whole units
///
/// Fractions are truncated toward zero. Anything without a leading `+`
/// is not an incoming payment.
pub fn clean_amount(raw: &str) -> Result<u64, DropReason> {
    let raw = raw.trim();
    if !raw.starts_with('+') {
        return Err(DropReason::NotIncoming);
    }

    let normalized: String = raw
        .chars()
        .filter(|c| *c != '+' && !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    let value = BigDecimal::from_str(&normalized).map_err(|_| DropReason::BadAmount)?;
    match truncate_to_units(&value) {
        Some(amount) if amount > 0 => Ok(amount),
        _ => Err(DropReason::BadAmount),
    }
}

/// Whole units of a decimal, truncated toward zero
///
/// Values whose exponent puts them outside `u64`, or with an absurd number
/// of fractional digits, are rejected before any rescaling happens.
pub fn truncate_to_units(value: &BigDecimal) -> Option<u64> {
    let (_, scale) = value.as_bigint_and_exponent();
    if scale < -MAX_INTEGER_EXPONENT || scale > MAX_FRACTION_DIGITS {
        return None;
    }
    value.with_scale(0).to_u64()
}

/// Operation date from the first ten characters of the date cell
pub fn parse_operation_date(raw: &str) -> Option<NaiveDate> {
    let head: String = raw.trim().chars().take(10).collect();
    NaiveDate::parse_from_str(&head, OPERATION_DATE_FORMAT).ok()
}
