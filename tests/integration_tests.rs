//! Integration tests for rent-reconcile

use rent_reconcile::{
    expected_pay_date,
    io::{CsvReportSink, CsvScheduleSource, CsvStatementSource},
    run_reconciliation,
    utils::MemorySource,
    PaymentIndex, PaymentStatus, ReconciliationEngine, RentError, RentObligation, ReportConfig,
    ReportSink, ScheduleSource, StatementSource, Transaction,
};
use chrono::NaiveDate;
use std::fs;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_received_scenario() {
    let engine = ReconciliationEngine::new();
    let obligations = vec![RentObligation::new("G1", 5000, 5)];
    let transactions = vec![Transaction::new(5000, date(2025, 6, 7))];

    let report = engine
        .reconcile_report(&obligations, &transactions, date(2025, 6, 10))
        .unwrap();

    let row = &report.rows[0];
    assert_eq!(row.due_date, date(2025, 6, 5));
    assert_eq!(row.last_payment_date, Some(date(2025, 6, 7)));
    assert_eq!(row.status, PaymentStatus::Received);
}

#[test]
fn test_overdue_scenario() {
    let engine = ReconciliationEngine::new();
    let report = engine
        .reconcile_report(
            &[RentObligation::new("G1", 5000, 5)],
            &[],
            date(2025, 6, 15),
        )
        .unwrap();

    assert_eq!(report.rows[0].status, PaymentStatus::Overdue);
    assert_eq!(report.rows[0].last_payment_display(), "-");
}

#[test]
fn test_payment_dated_after_today_but_within_grace() {
    let engine = ReconciliationEngine::new();
    let report = engine
        .reconcile_report(
            &[
                RentObligation::new("G1", 5000, 5),
                RentObligation::new("G2", 6000, 5),
            ],
            &[
                Transaction::new(5000, date(2025, 6, 7)),
                Transaction::new(6000, date(2025, 6, 9)),
            ],
            date(2025, 6, 6),
        )
        .unwrap();

    assert_eq!(report.rows[0].status, PaymentStatus::Received);
    assert_eq!(report.rows[1].status, PaymentStatus::Unknown);
}

#[test]
fn test_due_date_normalization() {
    assert_eq!(expected_pay_date(31, 4, 2025), Some(date(2025, 4, 30)));
    assert_eq!(expected_pay_date(30, 2, 2024), Some(date(2024, 2, 29)));
    assert_eq!(expected_pay_date(31, 2, 2025), Some(date(2025, 2, 28)));
    assert_eq!(expected_pay_date(15, 2, 2025), Some(date(2025, 2, 15)));
}

#[test]
fn test_shared_amount_uses_latest_payment_for_every_unit() {
    // Two units with the same rent cannot be told apart.
    let engine = ReconciliationEngine::new();
    let obligations = vec![
        RentObligation::new("G1", 5000, 5),
        RentObligation::new("G2", 5000, 25),
    ];
    let transactions = vec![
        Transaction::new(5000, date(2025, 6, 4)),
        Transaction::new(5000, date(2025, 6, 12)),
    ];
    let index = PaymentIndex::from_transactions(&transactions);
    assert_eq!(index.get(5000), Some(date(2025, 6, 12)));

    let rows = engine
        .reconcile(&obligations, &index, date(2025, 6, 20))
        .unwrap();

    assert_eq!(rows[0].last_payment_date, Some(date(2025, 6, 12)));
    assert_eq!(rows[0].status, PaymentStatus::ReceivedLate);
    assert_eq!(rows[1].last_payment_date, Some(date(2025, 6, 12)));
    assert_eq!(rows[1].status, PaymentStatus::Received);
}

#[test]
fn test_all_statuses_in_one_run() {
    let engine = ReconciliationEngine::new();
    let today = date(2025, 6, 15);
    let obligations = vec![
        RentObligation::new("received", 1000, 5),
        RentObligation::new("late", 2000, 5),
        RentObligation::new("unknown", 3000, 5),
        RentObligation::new("not-yet-due", 4000, 14),
        RentObligation::new("overdue", 5000, 5),
    ];
    let transactions = vec![
        Transaction::new(1000, date(2025, 6, 5)),
        Transaction::new(2000, date(2025, 6, 12)),
        Transaction::new(3000, date(2025, 6, 30)),
    ];

    let report = engine
        .reconcile_report(&obligations, &transactions, today)
        .unwrap();
    let statuses: Vec<PaymentStatus> = report.rows.iter().map(|r| r.status).collect();

    assert_eq!(
        statuses,
        vec![
            PaymentStatus::Received,
            PaymentStatus::ReceivedLate,
            PaymentStatus::Unknown,
            PaymentStatus::NotYetDue,
            PaymentStatus::Overdue,
        ]
    );
    assert!(report.status_counts().values().all(|count| *count == 1));
}

#[test]
fn test_memory_source_pipeline() {
    let mut source = MemorySource::new();
    source.add_obligation(RentObligation::new("G1", 5000, 31));
    source.add_transaction(Transaction::new(5000, date(2025, 4, 29)));
    let input = source.clone();

    let summary = run_reconciliation(
        &ReconciliationEngine::new(),
        &input,
        &input,
        &mut source,
        date(2025, 4, 30),
    )
    .unwrap();

    assert_eq!(summary.report.rows[0].due_date, date(2025, 4, 30));
    assert_eq!(source.report()[0].status, PaymentStatus::Received);
}

#[test]
fn test_csv_files_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let schedule_path = dir.path().join("arenda.csv");
    let statement_path = dir.path().join("statement.csv");

    fs::write(
        &schedule_path,
        "Гараж,Сумма,Первоначальная дата\n\
         G1,5000,2023-03-05 00:00:00\n\
         G2,6500,2024-01-31 00:00:00\n\
         G3,7000,2022-11-01 00:00:00\n",
    )
    .unwrap();
    fs::write(
        &statement_path,
        "07.06.2025 10:15,Перевод,40817,RUB,\"+5 000,00\"\n\
         02.06.2025 09:00,Комиссия,40817,RUB,\"-150,00\"\n\
         01.06.2025 12:00,Перевод,40817,RUB,\"+7 000,00\"\n\
         mangled,Перевод,40817,RUB,+100\n",
    )
    .unwrap();

    let config = ReportConfig {
        schedule_path: schedule_path.clone(),
        statement_path: statement_path.clone(),
        report_dir: dir.path().join("reports"),
        ..ReportConfig::default()
    };
    let today = date(2025, 6, 10);
    let report_path = config.report_path(today);

    let schedule = CsvScheduleSource::new(&config.schedule_path);
    let statement = CsvStatementSource::new(&config.statement_path);
    let mut sink = CsvReportSink::new(&report_path);

    let summary = run_reconciliation(
        &ReconciliationEngine::new().with_grace_days(config.grace_days),
        &schedule,
        &statement,
        &mut sink,
        today,
    )
    .unwrap();

    assert_eq!(summary.indexed_amounts, 2);
    assert_eq!(summary.dropped.not_incoming, 1);
    assert_eq!(summary.dropped.bad_date, 1);
    assert!(report_path.ends_with("reports/report_2025-06-10.csv"));

    let written = fs::read_to_string(&report_path).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Гараж,Дата платежа (срок),Сумма,Последний платёж,Статус",
            "G1,05.06.2025,5000,07.06.2025,получен",
            "G2,30.06.2025,6500,-,срок не наступил",
            "G3,01.06.2025,7000,01.06.2025,получен",
        ]
    );
}

#[test]
fn test_adapter_failures_surface_before_reconciliation() {
    let dir = tempfile::tempdir().unwrap();
    let missing = CsvScheduleSource::new(dir.path().join("missing.csv"));
    assert!(matches!(missing.load_obligations(), Err(RentError::Io(_))));

    let bad_path = dir.path().join("bad.csv");
    fs::write(&bad_path, "unit,amount,date\nG1,5000,someday\n").unwrap();
    let bad = CsvScheduleSource::new(&bad_path);
    assert!(matches!(
        bad.load_obligations(),
        Err(RentError::Schedule { row: 2, .. })
    ));

    let statement = CsvStatementSource::new(dir.path().join("missing_statement.csv"));
    assert!(statement.load_statement().is_err());

    let mut sink = CsvReportSink::new(dir.path().join("nested/out/report.csv"));
    sink.write_report(&[]).unwrap();
    assert!(dir.path().join("nested/out/report.csv").exists());
}

#[test]
fn test_report_rows_serialize() {
    let engine = ReconciliationEngine::new();
    let report = engine
        .reconcile_report(
            &[RentObligation::new("G1", 5000, 5)],
            &[Transaction::new(5000, date(2025, 6, 7))],
            date(2025, 6, 10),
        )
        .unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["as_of"], "2025-06-10");
    assert_eq!(json["rows"][0]["status"], "Received");
    assert_eq!(json["rows"][0]["last_payment_date"], "2025-06-07");
}
