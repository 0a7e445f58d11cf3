//! SQLite persistence layer.
//!
//! RULE: Only the store talks to the database.
//! Aggregators and the report work on the in-memory Snapshot and never
//! execute SQL directly.

use crate::{date::parse_iso, error::ReportResult, model::Snapshot};
use chrono::NaiveDate;
use rusqlite::{
    types::{Type, ValueRef},
    Connection, Row,
};
use rust_decimal::Decimal;
use std::str::FromStr;

mod lot;
mod payment;
mod statement;

pub struct ReportStore {
    conn: Connection,
}

impl ReportStore {
    pub fn open(path: &str) -> ReportResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI,
        )?;
        // WAL mode only for real files (shared-memory and :memory: ignore it).
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> ReportResult<Self> {
        let conn = Connection::open(":memory:")?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> ReportResult<()> {
        self.conn
            .execute_batch(include_str!("../../../migrations/001_schema.sql"))?;
        Ok(())
    }

    /// Read every record set the report needs, once.
    pub fn load_snapshot(&self) -> ReportResult<Snapshot> {
        let snapshot = Snapshot {
            statements: self.all_statements()?,
            sales: self.all_sales()?,
            clients: self.all_clients()?,
            payments: self.all_payments()?,
            statement_lines: self.all_statement_lines()?,
            lot_details: self.all_lot_details()?,
            vat_rates: self.all_vat_rates()?,
        };
        log::info!(
            "store: loaded {} statements, {} payments, {} statement lines, {} lot details",
            snapshot.statements.len(),
            snapshot.payments.len(),
            snapshot.statement_lines.len(),
            snapshot.lot_details.len(),
        );
        Ok(snapshot)
    }
}

/// Stored dates are ISO text; anything else is logged and read as absent.
fn stored_date(column: &str, raw: Option<String>) -> Option<NaiveDate> {
    let raw = raw?;
    let parsed = parse_iso(&raw);
    if parsed.is_none() && !raw.trim().is_empty() {
        log::warn!("store: unreadable {column} '{raw}', treated as absent");
    }
    parsed
}

fn date_param(date: Option<NaiveDate>) -> Option<String> {
    date.map(|d| d.format(crate::date::ISO_DATE).to_string())
}

/// Money is stored as exact decimal text. NULL reads as zero, and numbers
/// written by other tools as REAL or INTEGER are converted.
fn stored_money(row: &Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let failure = |kind: Type, e: Box<dyn std::error::Error + Send + Sync>| {
        rusqlite::Error::FromSqlConversionFailure(idx, kind, e)
    };
    match row.get_ref(idx)? {
        ValueRef::Null => Ok(Decimal::ZERO),
        ValueRef::Integer(i) => Ok(Decimal::from(i)),
        ValueRef::Real(f) => Decimal::try_from(f).map_err(|e| failure(Type::Real, Box::new(e))),
        ValueRef::Text(bytes) => {
            let text = std::str::from_utf8(bytes).map_err(|e| failure(Type::Text, Box::new(e)))?;
            Decimal::from_str(text.trim()).map_err(|e| failure(Type::Text, Box::new(e)))
        }
        ValueRef::Blob(_) => Err(failure(Type::Blob, "money stored as a blob".into())),
    }
}

fn money_param(amount: Decimal) -> String {
    amount.to_string()
}
