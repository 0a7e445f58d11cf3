//! Payment aggregation: one summary per (statement, pay date).
//!
//! Every payment lands in exactly one bucket:
//!   - cheque  → configured cheque types
//!   - contra  → configured contra/write-off types (contra, xko)
//!   - other   → everything else, i.e. bank transfers and unknown codes
//!
//! Type codes compare case-insensitively and ignore surrounding spaces.
//! Empty buckets sum to zero, never to "absent".

use crate::{config::ReportConfig, model::Payment, types::StatementNo};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentBucket {
    Cheque,
    Contra,
    Other,
}

impl PaymentBucket {
    pub fn classify(payment_type: &str, config: &ReportConfig) -> Self {
        let code = payment_type.trim();
        let matches = |types: &[String]| types.iter().any(|t| t.eq_ignore_ascii_case(code));
        if matches(&config.cheque_types) {
            PaymentBucket::Cheque
        } else if matches(&config.contra_types) {
            PaymentBucket::Contra
        } else {
            PaymentBucket::Other
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct PaymentSummary {
    pub cheque_total: Decimal,
    pub contra_total: Decimal,
    pub other_total: Decimal,
}

impl PaymentSummary {
    fn add(&mut self, bucket: PaymentBucket, amount: Decimal) {
        match bucket {
            PaymentBucket::Cheque => self.cheque_total += amount,
            PaymentBucket::Contra => self.contra_total += amount,
            PaymentBucket::Other => self.other_total += amount,
        }
    }

    /// A bank transfer (or other non-cheque, non-contra payment) was recorded.
    pub fn has_other(&self) -> bool {
        !self.other_total.is_zero()
    }
}

/// Grouping key. Payments without a pay date group together under `None`.
pub type PaymentKey = (StatementNo, Option<NaiveDate>);

/// Keyed lookup table of payment summaries, ordered by statement then date.
#[derive(Debug, Clone, Default)]
pub struct PaymentTable {
    groups: BTreeMap<PaymentKey, PaymentSummary>,
}

impl PaymentTable {
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(
        &self,
        statement_no: StatementNo,
        pay_date: Option<NaiveDate>,
    ) -> Option<&PaymentSummary> {
        self.groups.get(&(statement_no, pay_date))
    }

    /// All pay-date summaries for one statement, earliest date first.
    pub fn for_statement(
        &self,
        statement_no: StatementNo,
    ) -> impl Iterator<Item = (Option<NaiveDate>, &PaymentSummary)> {
        self.groups
            .range((statement_no, None)..)
            .take_while(move |((no, _), _)| *no == statement_no)
            .map(|((_, date), summary)| (*date, summary))
    }
}

pub fn aggregate_payments(payments: &[Payment], config: &ReportConfig) -> PaymentTable {
    let mut groups: BTreeMap<PaymentKey, PaymentSummary> = BTreeMap::new();

    for p in payments {
        let bucket = PaymentBucket::classify(&p.payment_type, config);
        groups
            .entry((p.statement_no, p.pay_date))
            .or_default()
            .add(bucket, p.amount);
    }

    log::debug!(
        "payments: {} payments grouped into {} (statement, pay date) summaries",
        payments.len(),
        groups.len()
    );
    PaymentTable { groups }
}
