use chrono::{Local, NaiveDate};
use clap::Parser;
use log::{error, info};
use std::path::PathBuf;
use std::process;

use rent_reconcile::io::{CsvReportSink, CsvScheduleSource, CsvStatementSource};
use rent_reconcile::{run_reconciliation, ReconciliationEngine, RentResult, ReportConfig};

/// Reconcile the rent schedule against a bank statement for the current month
#[derive(Parser, Debug)]
#[command(name = "rent-reconcile", version, about)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Rent schedule CSV (overrides the config file)
    #[arg(long)]
    schedule: Option<PathBuf>,

    /// Bank statement CSV (overrides the config file)
    #[arg(long)]
    statement: Option<PathBuf>,

    /// Directory for the report (overrides the config file)
    #[arg(long)]
    report_dir: Option<PathBuf>,

    /// Grace period in days (overrides the config file)
    #[arg(long)]
    grace_days: Option<u64>,

    /// Reference date as YYYY-MM-DD, defaults to today
    #[arg(long)]
    today: Option<NaiveDate>,
}

impl Cli {
    fn resolve_config(&self) -> RentResult<ReportConfig> {
        let mut config = match &self.config {
            Some(path) => ReportConfig::from_toml_file(path)?,
            None => ReportConfig::default(),
        };

        if let Some(path) = &self.schedule {
            config.schedule_path = path.clone();
        }
        if let Some(path) = &self.statement {
            config.statement_path = path.clone();
        }
        if let Some(dir) = &self.report_dir {
            config.report_dir = dir.clone();
        }
        if let Some(days) = self.grace_days {
            config.grace_days = days;
        }

        config.validate()?;
        Ok(config)
    }
}

fn run(cli: Cli) -> RentResult<()> {
    let config = cli.resolve_config()?;
    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());
    info!("Reconciling rent as of {}", today);

    let engine = ReconciliationEngine::new().with_grace_days(config.grace_days);
    let schedule = CsvScheduleSource::new(&config.schedule_path);
    let statement = CsvStatementSource::new(&config.statement_path);
    let mut sink = CsvReportSink::new(config.report_path(today));

    let summary = run_reconciliation(&engine, &schedule, &statement, &mut sink, today)?;

    println!("{}", summary.report.summary());
    for row in summary.report.attention_rows() {
        println!(
            "  {} ({}): {}, last payment {}",
            row.unit_id,
            row.amount,
            row.status,
            row.last_payment_display()
        );
    }
    println!("Report saved: {}", sink.path().display());

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        error!("Reconciliation failed: {}", e);
        process::exit(1);
    }
}
