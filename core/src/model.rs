//! Upstream records as the report consumes them.
//!
//! RULE: these are read-only snapshots. Nothing in this crate writes back
//! to the accounting system; the store only inserts for fixtures and tests.
//! Money is `Decimal` throughout so sums that cancel out land on exactly zero.

use crate::types::{LotNo, SaleId, StatementNo};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Statement {
    pub statement_no: StatementNo,
    pub sale_id: Option<SaleId>,
    pub vendor_no: Option<String>,
    /// Free text as entered upstream, day/month/year.
    pub statement_date: Option<String>,
    pub total: Decimal,
    pub left_to_pay: Decimal,
    pub notes: Option<String>,
    pub vendor_charges: Decimal,
    pub vat_vendor_charges: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Sale {
    pub sale_id: SaleId,
    pub sale_number: String,
    pub actual_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Client {
    pub client_ref: String,
    pub company_name: Option<String>,
    pub title: Option<String>,
    pub first_name: Option<String>,
    pub surname: Option<String>,
    /// Bank account name, reported as the payee.
    pub account_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Payment {
    pub statement_no: StatementNo,
    pub pay_date: Option<NaiveDate>,
    pub amount: Decimal,
    pub payment_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatementLine {
    pub statement_no: StatementNo,
    pub lot_no: LotNo,
    pub hammer: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LotDetail {
    pub sale_id: SaleId,
    pub lot_no: LotNo,
    pub hammer_ex_vat: Decimal,
    pub hammer_vat: Decimal,
    pub vat_rate_id: Option<String>,
    pub commission_ex_vat: Decimal,
    pub commission_vat: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VatRate {
    pub vat_rate_id: String,
    /// Direct charges show VAT as a separate line for this rate.
    pub vat_separated: bool,
}

/// Everything one report run reads, fetched once.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub statements: Vec<Statement>,
    pub sales: Vec<Sale>,
    pub clients: Vec<Client>,
    pub payments: Vec<Payment>,
    pub statement_lines: Vec<StatementLine>,
    pub lot_details: Vec<LotDetail>,
    pub vat_rates: Vec<VatRate>,
}
