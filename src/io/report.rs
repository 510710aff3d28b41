//! Report writer

use csv::WriterBuilder;
use log::info;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::traits::*;
use crate::types::*;

/// Column titles of the written report
pub const REPORT_HEADER: [&str; 5] = [
    "Гараж",
    "Дата платежа (срок)",
    "Сумма",
    "Последний платёж",
    "Статус",
];

/// Report written to a CSV file, parent directories created on demand
#[derive(Debug, Clone)]
pub struct CsvReportSink {
    path: PathBuf,
}

impl CsvReportSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReportSink for CsvReportSink {
    fn write_report(&mut self, rows: &[ReportRow]) -> RentResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = File::create(&self.path)?;
        write_rows(file, rows)?;
        info!("Report saved: {} ({} rows)", self.path.display(), rows.len());
        Ok(())
    }
}

/// Write the header and one line per row to any writer
pub fn write_rows<W: Write>(writer: W, rows: &[ReportRow]) -> RentResult<()> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(writer);

    writer.write_record(REPORT_HEADER)?;
    for row in rows {
        writer.write_record([
            row.unit_id.clone(),
            row.due_date_display(),
            row.amount.to_string(),
            row.last_payment_display(),
            row.status.label().to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
