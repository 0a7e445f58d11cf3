use super::{money_param, stored_money, ReportStore};
use crate::{
    error::ReportResult,
    model::{LotDetail, StatementLine, VatRate},
};
use rusqlite::params;

impl ReportStore {
    // ── Statement lines ───────────────────────────────────────────

    pub fn insert_statement_line(&self, l: &StatementLine) -> ReportResult<()> {
        self.conn.execute(
            "INSERT INTO statement_line (statement_no, lot_no, hammer) VALUES (?1, ?2, ?3)",
            params![l.statement_no, l.lot_no, money_param(l.hammer)],
        )?;
        Ok(())
    }

    pub fn all_statement_lines(&self) -> ReportResult<Vec<StatementLine>> {
        let mut stmt = self.conn.prepare(
            "SELECT statement_no, lot_no, hammer FROM statement_line ORDER BY id ASC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(StatementLine {
                statement_no: row.get(0)?,
                lot_no: row.get(1)?,
                hammer: stored_money(row, 2)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    // ── Lot detail ────────────────────────────────────────────────

    pub fn insert_lot_detail(&self, d: &LotDetail) -> ReportResult<()> {
        self.conn.execute(
            "INSERT INTO lot_detail (
                sale_id, lot_no, hammer_ex_vat, hammer_vat, vat_rate_id,
                commission_ex_vat, commission_vat
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                d.sale_id,
                d.lot_no,
                money_param(d.hammer_ex_vat),
                money_param(d.hammer_vat),
                d.vat_rate_id,
                money_param(d.commission_ex_vat),
                money_param(d.commission_vat),
            ],
        )?;
        Ok(())
    }

    /// Missing money columns read as zero, matching how the sums treat them.
    pub fn all_lot_details(&self) -> ReportResult<Vec<LotDetail>> {
        let mut stmt = self.conn.prepare(
            "SELECT sale_id, lot_no,
                    hammer_ex_vat, hammer_vat, vat_rate_id,
                    commission_ex_vat, commission_vat
             FROM lot_detail ORDER BY id ASC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(LotDetail {
                sale_id: row.get(0)?,
                lot_no: row.get(1)?,
                hammer_ex_vat: stored_money(row, 2)?,
                hammer_vat: stored_money(row, 3)?,
                vat_rate_id: row.get(4)?,
                commission_ex_vat: stored_money(row, 5)?,
                commission_vat: stored_money(row, 6)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    // ── VAT rates ─────────────────────────────────────────────────

    pub fn insert_vat_rate(&self, v: &VatRate) -> ReportResult<()> {
        self.conn.execute(
            "INSERT INTO vat_rate (vat_rate_id, vat_separated) VALUES (?1, ?2)",
            params![v.vat_rate_id, if v.vat_separated { 1 } else { 0 }],
        )?;
        Ok(())
    }

    pub fn all_vat_rates(&self) -> ReportResult<Vec<VatRate>> {
        let mut stmt = self
            .conn
            .prepare("SELECT vat_rate_id, vat_separated FROM vat_rate ORDER BY vat_rate_id ASC")?;
        let rows = stmt.query_map([], |row| {
            Ok(VatRate {
                vat_rate_id: row.get(0)?,
                vat_separated: row.get::<_, i64>(1)? != 0,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}
