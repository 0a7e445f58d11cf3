//! Report projection: joins each statement to its sale, client, payment
//! summaries and lot summary, derives the display fields, and filters.
//!
//! Joins are left-outer: a statement with no sale, client, payments or lots
//! still builds a row, with those sides blank or zero. Whether the row is
//! reported is decided separately by the filter:
//!   1. statement total > 0
//!   2. sale already held (actual date <= today) or a legacy sale number
//!   3. statement date (day-first) strictly after the cutoff
//!   4. a non-zero "other" (bank transfer) payment sum
//!
//! A statement paid by transfer on several dates yields one row per date.

use crate::{
    config::ReportConfig,
    date::{display_iso, display_statement_date, parse_dmy},
    lots::{aggregate_lots, LotSummary},
    model::{Client, Sale, Snapshot, Statement},
    money::format_amount,
    payments::{aggregate_payments, PaymentSummary},
    types::{SaleId, StatementNo},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const REPORT_HEADERS: [&str; 13] = [
    "Sale Number",
    "Sale Date",
    "Vendor Ref",
    "Account Name",
    "Payee",
    "Statement No.",
    "Statement Date",
    "Amount",
    "Left to Pay",
    "Statement Notes",
    "Total",
    "Payment Date",
    "Bank Transfer",
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportRow {
    pub sale_number: String,
    pub sale_date: Option<NaiveDate>,
    pub vendor_ref: String,
    pub account_name: String,
    pub payee: String,
    pub statement_no: StatementNo,
    pub statement_date: Option<NaiveDate>,
    pub amount: Decimal,
    pub left_to_pay: Decimal,
    pub statement_notes: String,
    pub total: Decimal,
    pub payment_date: Option<NaiveDate>,
    pub bank_transfer: Decimal,
}

impl ReportRow {
    /// The 13 display columns, in REPORT_HEADERS order.
    pub fn to_record(&self) -> Vec<String> {
        vec![
            self.sale_number.clone(),
            display_iso(self.sale_date),
            self.vendor_ref.clone(),
            self.account_name.clone(),
            self.payee.clone(),
            self.statement_no.to_string(),
            display_statement_date(self.statement_date),
            format_amount(self.amount),
            format_amount(self.left_to_pay),
            self.statement_notes.clone(),
            format_amount(self.total),
            display_iso(self.payment_date),
            format_amount(self.bank_transfer),
        ]
    }
}

/// Why a candidate row was left out. The first failing condition wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rejection {
    NonPositiveTotal,
    SaleNotYetHeld,
    NotAfterCutoff,
    NoBankTransfer,
}

/// One statement with everything joined to it.
#[derive(Debug, Clone, Copy)]
pub struct StatementContext<'a> {
    pub statement: &'a Statement,
    pub sale: Option<&'a Sale>,
    pub client: Option<&'a Client>,
    pub lots: LotSummary,
    pub statement_date: Option<NaiveDate>,
}

/// Company name when present, else "Title First Surname" with blanks skipped.
pub fn account_name(client: Option<&Client>) -> String {
    let Some(c) = client else {
        return String::new();
    };
    let company = c.company_name.as_deref().unwrap_or("").trim();
    if !company.is_empty() {
        return company.to_string();
    }
    [&c.title, &c.first_name, &c.surname]
        .into_iter()
        .filter_map(|part| part.as_deref())
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Newlines dropped, carriage returns become a space.
pub fn clean_notes(notes: Option<&str>) -> String {
    notes
        .unwrap_or("")
        .chars()
        .filter(|&c| c != '\n')
        .map(|c| if c == '\r' { ' ' } else { c })
        .collect()
}

/// goods + goods VAT - (separated commission + its VAT + vendor charges + their VAT).
///
/// Commission on rates that do not separate VAT is NOT deducted here.
pub fn net_total(statement: &Statement, lots: &LotSummary) -> Decimal {
    lots.goods + lots.goods_vat
        - (lots.commission_vat_separated
            + lots.commission_vat_separated_vat
            + statement.vendor_charges
            + statement.vat_vendor_charges)
}

pub fn build_row(
    ctx: &StatementContext<'_>,
    payment_date: Option<NaiveDate>,
    payments: Option<&PaymentSummary>,
) -> ReportRow {
    let s = ctx.statement;
    ReportRow {
        sale_number: ctx.sale.map(|sale| sale.sale_number.clone()).unwrap_or_default(),
        sale_date: ctx.sale.and_then(|sale| sale.actual_date),
        vendor_ref: s.vendor_no.clone().unwrap_or_default(),
        account_name: account_name(ctx.client),
        payee: ctx
            .client
            .and_then(|c| c.account_name.as_deref())
            .map(|name| name.trim().to_string())
            .unwrap_or_default(),
        statement_no: s.statement_no,
        statement_date: ctx.statement_date,
        amount: s.total,
        left_to_pay: s.left_to_pay,
        statement_notes: clean_notes(s.notes.as_deref()),
        total: net_total(s, &ctx.lots),
        payment_date,
        bank_transfer: payments.map(|p| p.other_total).unwrap_or(Decimal::ZERO),
    }
}

pub fn rejection(
    ctx: &StatementContext<'_>,
    payments: Option<&PaymentSummary>,
    cutoff: NaiveDate,
    today: NaiveDate,
    config: &ReportConfig,
) -> Option<Rejection> {
    if ctx.statement.total <= Decimal::ZERO {
        return Some(Rejection::NonPositiveTotal);
    }

    let sale_held = ctx.sale.is_some_and(|sale| {
        sale.actual_date.is_some_and(|d| d <= today) || config.is_legacy_sale(&sale.sale_number)
    });
    if !sale_held {
        return Some(Rejection::SaleNotYetHeld);
    }

    if !ctx.statement_date.is_some_and(|d| d > cutoff) {
        return Some(Rejection::NotAfterCutoff);
    }

    if !payments.is_some_and(PaymentSummary::has_other) {
        return Some(Rejection::NoBankTransfer);
    }

    None
}

/// Run the whole report over one snapshot.
///
/// `today` is passed in rather than read from the clock so the same
/// snapshot, cutoff and day always give the same rows.
pub fn run_report(
    snapshot: &Snapshot,
    cutoff: NaiveDate,
    today: NaiveDate,
    config: &ReportConfig,
) -> Vec<ReportRow> {
    let payment_table = aggregate_payments(&snapshot.payments, config);
    let lot_table = aggregate_lots(snapshot, config);

    let sales: HashMap<SaleId, &Sale> = snapshot.sales.iter().map(|s| (s.sale_id, s)).collect();
    let clients: HashMap<&str, &Client> = snapshot
        .clients
        .iter()
        .map(|c| (c.client_ref.trim(), c))
        .collect();

    let mut rows = Vec::new();
    let mut rejected: HashMap<Rejection, usize> = HashMap::new();

    for statement in &snapshot.statements {
        let raw_date = statement.statement_date.as_deref().unwrap_or("");
        let statement_date = parse_dmy(raw_date, &config.statement_date_formats);
        if statement_date.is_none() && !raw_date.trim().is_empty() {
            log::warn!(
                "report: statement {} has unreadable date '{raw_date}', excluded by cutoff",
                statement.statement_no
            );
        }

        let ctx = StatementContext {
            statement,
            sale: statement.sale_id.and_then(|id| sales.get(&id).copied()),
            client: statement
                .vendor_no
                .as_deref()
                .and_then(|v| clients.get(v.trim()).copied()),
            lots: lot_table.get(&statement.statement_no).copied().unwrap_or_default(),
            statement_date,
        };

        let mut candidates: Vec<(Option<NaiveDate>, Option<&PaymentSummary>)> = payment_table
            .for_statement(statement.statement_no)
            .map(|(date, summary)| (date, Some(summary)))
            .collect();
        if candidates.is_empty() {
            candidates.push((None, None));
        }

        for (pay_date, summary) in candidates {
            match rejection(&ctx, summary, cutoff, today, config) {
                Some(reason) => *rejected.entry(reason).or_default() += 1,
                None => rows.push(build_row(&ctx, pay_date, summary)),
            }
        }
    }

    rows.sort_by(|a, b| {
        a.sale_number
            .cmp(&b.sale_number)
            .then(a.statement_no.cmp(&b.statement_no))
            .then(a.payment_date.cmp(&b.payment_date))
    });

    log::info!(
        "report: {} rows from {} statements (cutoff {cutoff}, today {today})",
        rows.len(),
        snapshot.statements.len()
    );
    for (reason, count) in &rejected {
        log::debug!("report: {count} candidates rejected: {reason:?}");
    }
    rows
}
