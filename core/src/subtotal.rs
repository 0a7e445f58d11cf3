//! Sale-type sections with per-sale subtotals.
//!
//! The sale type is the leading characters of the sale number ("CV", "PM").
//! Inside a section, each run of consecutive rows for one sale is followed
//! by a subtotal line, and runs are separated by a filler line. The master
//! section chains every sale type's section with a break line after each.

use crate::{money::format_amount, report::ReportRow};
use rust_decimal::Decimal;
use std::collections::HashMap;

const COLUMNS: usize = 13;
const SEPARATOR: &str = "-";
const SECTION_BREAK: &str = "~~~~~~";

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Subtotal {
    pub amount: Decimal,
    pub left_to_pay: Decimal,
    pub total: Decimal,
    pub bank_transfer: Decimal,
}

impl Subtotal {
    fn add(&mut self, row: &ReportRow) {
        self.amount += row.amount;
        self.left_to_pay += row.left_to_pay;
        self.total += row.total;
        self.bank_transfer += row.bank_transfer;
    }

    fn to_record(self) -> Vec<String> {
        let mut record = vec![String::new(); COLUMNS];
        record[0] = "Subtotal:".into();
        record[7] = format_amount(self.amount);
        record[8] = format_amount(self.left_to_pay);
        record[10] = format_amount(self.total);
        record[12] = format_amount(self.bank_transfer);
        record
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SectionLine {
    Row(ReportRow),
    Subtotal(Subtotal),
    Separator,
    SectionBreak,
}

impl SectionLine {
    pub fn to_record(&self) -> Vec<String> {
        match self {
            SectionLine::Row(row) => row.to_record(),
            SectionLine::Subtotal(sub) => sub.to_record(),
            SectionLine::Separator => vec![SEPARATOR.to_string(); COLUMNS],
            SectionLine::SectionBreak => vec![SECTION_BREAK.to_string(); COLUMNS],
        }
    }
}

pub fn sale_type(sale_number: &str, prefix_len: usize) -> String {
    sale_number.chars().take(prefix_len).collect()
}

/// Group rows by sale type, types in first-seen order, rows in input order.
pub fn split_by_sale_type(
    rows: &[ReportRow],
    prefix_len: usize,
) -> Vec<(String, Vec<ReportRow>)> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut sections: Vec<(String, Vec<ReportRow>)> = Vec::new();
    for row in rows {
        let kind = sale_type(&row.sale_number, prefix_len);
        let slot = *index.entry(kind.clone()).or_insert_with(|| {
            sections.push((kind, Vec::new()));
            sections.len() - 1
        });
        sections[slot].1.push(row.clone());
    }
    sections
}

/// Rows with a subtotal after each run of one sale number.
pub fn with_subtotals(rows: &[ReportRow]) -> Vec<SectionLine> {
    let mut lines = Vec::with_capacity(rows.len() + 2);
    let mut current: Option<&str> = None;
    let mut sub = Subtotal::default();

    for row in rows {
        if let Some(sale) = current {
            if sale != row.sale_number {
                lines.push(SectionLine::Subtotal(sub));
                lines.push(SectionLine::Separator);
                sub = Subtotal::default();
            }
        }
        current = Some(row.sale_number.as_str());
        sub.add(row);
        lines.push(SectionLine::Row(row.clone()));
    }
    if current.is_some() {
        lines.push(SectionLine::Subtotal(sub));
    }
    lines
}

/// Every section back to back, each closed by a break line.
pub fn master_section(sections: &[(String, Vec<SectionLine>)]) -> Vec<SectionLine> {
    sections
        .iter()
        .flat_map(|(_, lines)| {
            lines
                .iter()
                .cloned()
                .chain(std::iter::once(SectionLine::SectionBreak))
        })
        .collect()
}
