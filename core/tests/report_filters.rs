//! Integration tests for the report filter.
//!
//! Tests verify, over an in-memory store:
//! 1. A fully paid-by-transfer statement is reported with derived fields
//! 2. Non-positive statement totals are dropped
//! 3. Future sales are dropped unless the sale number is a legacy code
//! 4. The cutoff is strict and statement dates are read day-first
//! 5. Unreadable statement dates exclude the row without failing the run
//! 6. Only non-cheque, non-contra payments qualify a statement
//! 7. Each transfer date yields its own row
//! 8. Transfers that net to zero in cents never qualify a statement

use chrono::NaiveDate;
use rust_decimal::Decimal;
use vendor_payments_core::{
    config::ReportConfig,
    model::{Client, Payment, Sale, Statement},
    report::{run_report, ReportRow},
    store::ReportStore,
};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

const TODAY: (i32, u32, u32) = (2024, 6, 30);
const CUTOFF: (i32, u32, u32) = (2024, 3, 1);

fn dec(text: &str) -> Decimal {
    Decimal::from_str_exact(text).unwrap()
}

fn store() -> ReportStore {
    let store = ReportStore::in_memory().expect("in-memory store");
    store.migrate().expect("migration");
    store
}

fn sale(store: &ReportStore, sale_id: i64, number: &str, held: NaiveDate) {
    store
        .insert_sale(&Sale { sale_id, sale_number: number.into(), actual_date: Some(held) })
        .unwrap();
}

fn statement(store: &ReportStore, no: i64, sale_id: i64, date: &str, total: &str) {
    store
        .insert_statement(&Statement {
            statement_no: no,
            sale_id: Some(sale_id),
            vendor_no: Some("V001".into()),
            statement_date: Some(date.into()),
            total: dec(total),
            left_to_pay: Decimal::ZERO,
            notes: None,
            vendor_charges: Decimal::ZERO,
            vat_vendor_charges: Decimal::ZERO,
        })
        .unwrap();
}

fn pay(store: &ReportStore, no: i64, date: NaiveDate, amount: &str, kind: &str) {
    store
        .insert_payment(&Payment {
            statement_no: no,
            pay_date: Some(date),
            amount: dec(amount),
            payment_type: kind.into(),
        })
        .unwrap();
}

fn run(store: &ReportStore) -> Vec<ReportRow> {
    let snapshot = store.load_snapshot().unwrap();
    run_report(
        &snapshot,
        ymd(CUTOFF.0, CUTOFF.1, CUTOFF.2),
        ymd(TODAY.0, TODAY.1, TODAY.2),
        &ReportConfig::default_test(),
    )
}

fn statement_nos(rows: &[ReportRow]) -> Vec<i64> {
    rows.iter().map(|r| r.statement_no).collect()
}

#[test]
fn paid_statement_is_reported_with_derived_fields() {
    let store = store();
    sale(&store, 10, "CV010424", ymd(2024, 4, 1));
    store
        .insert_client(&Client {
            client_ref: "V001".into(),
            company_name: Some("  ".into()),
            title: Some("Mr".into()),
            first_name: Some("John".into()),
            surname: Some("Smith".into()),
            account_name: Some("J SMITH".into()),
        })
        .unwrap();
    store
        .insert_statement(&Statement {
            statement_no: 500,
            sale_id: Some(10),
            vendor_no: Some("V001".into()),
            statement_date: Some("05/04/2024".into()),
            total: dec("1250"),
            left_to_pay: dec("250"),
            notes: Some("paid\r\nby bank".into()),
            vendor_charges: dec("10"),
            vat_vendor_charges: dec("2"),
        })
        .unwrap();
    pay(&store, 500, ymd(2024, 4, 10), "1000", "bacs");

    let rows = run(&store);
    assert_eq!(rows.len(), 1);
    let r = &rows[0];
    assert_eq!(r.account_name, "Mr John Smith");
    assert_eq!(r.payee, "J SMITH");
    assert_eq!(r.statement_notes, "paid by bank");
    assert_eq!(r.bank_transfer, dec("1000"));
    // No lots: total is minus the vendor charges.
    assert_eq!(r.total, dec("-12"));

    assert_eq!(
        r.to_record(),
        vec![
            "CV010424", "2024-04-01", "V001", "Mr John Smith", "J SMITH", "500",
            "05/04/2024", "1,250.00", "250.00", "paid by bank", "-12.00", "2024-04-10",
            "1,000.00",
        ]
    );
}

#[test]
fn non_positive_total_is_dropped() {
    let store = store();
    sale(&store, 10, "CV010424", ymd(2024, 4, 1));
    statement(&store, 1, 10, "05/04/2024", "0");
    statement(&store, 2, 10, "05/04/2024", "-5");
    pay(&store, 1, ymd(2024, 4, 10), "10", "bacs");
    pay(&store, 2, ymd(2024, 4, 10), "10", "bacs");
    assert!(run(&store).is_empty());
}

#[test]
fn future_sale_needs_legacy_number() {
    let store = store();
    sale(&store, 10, "CV010125", ymd(2025, 1, 1));
    sale(&store, 11, "TO010100", ymd(2025, 1, 1));
    sale(&store, 12, "PM281299", ymd(2025, 1, 1));
    sale(&store, 13, "CV300624", ymd(TODAY.0, TODAY.1, TODAY.2));
    for (no, sale_id) in [(1, 10), (2, 11), (3, 12), (4, 13)] {
        statement(&store, no, sale_id, "05/04/2024", "100");
        pay(&store, no, ymd(2024, 4, 10), "100", "bacs");
    }
    assert_eq!(statement_nos(&run(&store)), vec![4, 3, 2]);
}

#[test]
fn statement_without_sale_is_dropped() {
    let store = store();
    statement(&store, 1, 99, "05/04/2024", "100");
    pay(&store, 1, ymd(2024, 4, 10), "100", "bacs");
    assert!(run(&store).is_empty());
}

#[test]
fn cutoff_is_strict() {
    let store = store();
    sale(&store, 10, "CV010424", ymd(2024, 4, 1));
    statement(&store, 1, 10, "01/03/2024", "100");
    statement(&store, 2, 10, "02/03/2024", "100");
    pay(&store, 1, ymd(2024, 4, 10), "100", "bacs");
    pay(&store, 2, ymd(2024, 4, 10), "100", "bacs");
    assert_eq!(statement_nos(&run(&store)), vec![2]);
}

#[test]
fn statement_dates_are_day_first() {
    let store = store();
    sale(&store, 10, "CV010424", ymd(2024, 4, 1));
    // 4 Feb is before the 1 March cutoff; month-first it would be 2 April.
    statement(&store, 1, 10, "04/02/2024", "100");
    // 2 April is after the cutoff; month-first it would be 4 February.
    statement(&store, 2, 10, "02/04/2024", "100");
    pay(&store, 1, ymd(2024, 4, 10), "100", "bacs");
    pay(&store, 2, ymd(2024, 4, 10), "100", "bacs");

    let rows = run(&store);
    assert_eq!(statement_nos(&rows), vec![2]);
    assert_eq!(rows[0].statement_date, Some(ymd(2024, 4, 2)));
}

#[test]
fn unreadable_statement_date_is_excluded_not_fatal() {
    let store = store();
    sale(&store, 10, "CV010424", ymd(2024, 4, 1));
    statement(&store, 1, 10, "sometime in april", "100");
    statement(&store, 2, 10, "", "100");
    statement(&store, 3, 10, "10/04/2024", "100");
    for no in 1..=3 {
        pay(&store, no, ymd(2024, 4, 10), "100", "bacs");
    }
    assert_eq!(statement_nos(&run(&store)), vec![3]);
}

#[test]
fn cheque_and_contra_payments_do_not_qualify() {
    let store = store();
    sale(&store, 10, "CV010424", ymd(2024, 4, 1));
    statement(&store, 1, 10, "05/04/2024", "100");
    statement(&store, 2, 10, "05/04/2024", "100");
    statement(&store, 3, 10, "05/04/2024", "100");
    statement(&store, 4, 10, "05/04/2024", "100");
    pay(&store, 1, ymd(2024, 4, 10), "100", "cheque");
    pay(&store, 2, ymd(2024, 4, 10), "100", "contra");
    pay(&store, 3, ymd(2024, 4, 10), "100", "xko");
    pay(&store, 4, ymd(2024, 4, 10), "100", "online");
    // Statement 5 has no payments at all.
    statement(&store, 5, 10, "05/04/2024", "100");

    let rows = run(&store);
    assert_eq!(statement_nos(&rows), vec![4]);
    assert_eq!(rows[0].bank_transfer, dec("100"));
}

#[test]
fn transfers_that_cancel_out_do_not_qualify() {
    let store = store();
    sale(&store, 10, "CV010424", ymd(2024, 4, 1));
    statement(&store, 1, 10, "05/04/2024", "100");
    pay(&store, 1, ymd(2024, 4, 10), "100", "bacs");
    pay(&store, 1, ymd(2024, 4, 10), "-100", "bacs");
    assert!(run(&store).is_empty());
}

#[test]
fn transfers_netting_to_zero_in_cents_do_not_qualify() {
    let store = store();
    sale(&store, 10, "CV010424", ymd(2024, 4, 1));
    statement(&store, 1, 10, "05/04/2024", "100");
    pay(&store, 1, ymd(2024, 4, 10), "0.1", "bacs");
    pay(&store, 1, ymd(2024, 4, 10), "0.2", "bacs");
    pay(&store, 1, ymd(2024, 4, 10), "-0.3", "bacs");
    // The same small transfers without the reversal still qualify.
    statement(&store, 2, 10, "05/04/2024", "100");
    pay(&store, 2, ymd(2024, 4, 10), "0.1", "bacs");
    pay(&store, 2, ymd(2024, 4, 10), "0.2", "bacs");

    let rows = run(&store);
    assert_eq!(statement_nos(&rows), vec![2]);
    assert_eq!(rows[0].bank_transfer, dec("0.3"));
    assert_eq!(rows[0].to_record()[12], "0.30");
}

#[test]
fn each_transfer_date_is_its_own_row() {
    let store = store();
    sale(&store, 10, "CV010424", ymd(2024, 4, 1));
    statement(&store, 1, 10, "05/04/2024", "300");
    pay(&store, 1, ymd(2024, 4, 12), "50", "bacs");
    pay(&store, 1, ymd(2024, 4, 10), "100", "bacs");
    pay(&store, 1, ymd(2024, 4, 10), "25", "bacs");
    pay(&store, 1, ymd(2024, 4, 11), "75", "cheque");

    let rows = run(&store);
    let by_date: Vec<_> = rows.iter().map(|r| (r.payment_date, r.bank_transfer)).collect();
    assert_eq!(
        by_date,
        vec![(Some(ymd(2024, 4, 10)), dec("125")), (Some(ymd(2024, 4, 12)), dec("50"))]
    );
}

#[test]
fn missing_client_still_reports() {
    let store = store();
    sale(&store, 10, "CV010424", ymd(2024, 4, 1));
    statement(&store, 1, 10, "05/04/2024", "100");
    pay(&store, 1, ymd(2024, 4, 10), "100", "bacs");
    let rows = run(&store);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].account_name, "");
    assert_eq!(rows[0].payee, "");
    assert_eq!(rows[0].vendor_ref, "V001");
}
