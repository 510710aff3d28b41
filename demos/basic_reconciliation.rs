//! Basic reconciliation example

use chrono::NaiveDate;
use rent_reconcile::utils::MemorySource;
use rent_reconcile::{run_reconciliation, ReconciliationEngine, RentObligation, Transaction};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🏠 Rent Reconcile - Basic Example\n");

    let today = NaiveDate::from_ymd_opt(2025, 6, 15).ok_or("invalid date")?;
    let paid_on = |day| NaiveDate::from_ymd_opt(2025, 6, day).ok_or("invalid date");

    // 1. Rent schedule
    let mut source = MemorySource::new();
    source.add_obligation(RentObligation::new("Гараж 1", 5000, 5));
    source.add_obligation(RentObligation::new("Гараж 2", 6500, 10));
    source.add_obligation(RentObligation::new("Гараж 3", 7000, 31));
    source.add_obligation(RentObligation::new("Гараж 4", 4500, 1));

    // 2. Incoming payments from the bank statement
    source.add_transaction(Transaction::new(5000, paid_on(6)?));
    source.add_transaction(Transaction::new(6500, paid_on(14)?));
    source.add_transaction(Transaction::new(9999, paid_on(2)?));

    // 3. Reconcile
    let input = source.clone();
    let summary = run_reconciliation(
        &ReconciliationEngine::new(),
        &input,
        &input,
        &mut source,
        today,
    )?;

    println!("📊 {}\n", summary.report.summary());
    for row in source.report() {
        println!(
            "  {:<8} due {}  {:>6}  last payment {:<10}  {}",
            row.unit_id,
            row.due_date_display(),
            row.amount,
            row.last_payment_display(),
            row.status
        );
    }

    Ok(())
}
