use super::{date_param, money_param, stored_date, stored_money, ReportStore};
use crate::{
    error::ReportResult,
    model::{Client, Sale, Statement},
};
use rusqlite::params;

impl ReportStore {
    // ── Statement ─────────────────────────────────────────────────

    pub fn insert_statement(&self, s: &Statement) -> ReportResult<()> {
        self.conn.execute(
            "INSERT INTO statement (
                statement_no, sale_id, vendor_no, statement_date, total,
                left_to_pay, notes, vendor_charges, vat_vendor_charges
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                s.statement_no,
                s.sale_id,
                s.vendor_no,
                s.statement_date,
                money_param(s.total),
                money_param(s.left_to_pay),
                s.notes,
                money_param(s.vendor_charges),
                money_param(s.vat_vendor_charges),
            ],
        )?;
        Ok(())
    }

    /// Missing vendor charges read as zero.
    pub fn all_statements(&self) -> ReportResult<Vec<Statement>> {
        let mut stmt = self.conn.prepare(
            "SELECT statement_no, sale_id, vendor_no, statement_date, total,
                    left_to_pay, notes,
                    vendor_charges, vat_vendor_charges
             FROM statement ORDER BY statement_no ASC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(Statement {
                statement_no: row.get(0)?,
                sale_id: row.get(1)?,
                vendor_no: row.get(2)?,
                statement_date: row.get(3)?,
                total: stored_money(row, 4)?,
                left_to_pay: stored_money(row, 5)?,
                notes: row.get(6)?,
                vendor_charges: stored_money(row, 7)?,
                vat_vendor_charges: stored_money(row, 8)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    // ── Sale ──────────────────────────────────────────────────────

    pub fn insert_sale(&self, s: &Sale) -> ReportResult<()> {
        self.conn.execute(
            "INSERT INTO sale (sale_id, sale_number, actual_date) VALUES (?1, ?2, ?3)",
            params![s.sale_id, s.sale_number, date_param(s.actual_date)],
        )?;
        Ok(())
    }

    pub fn all_sales(&self) -> ReportResult<Vec<Sale>> {
        let mut stmt = self.conn.prepare(
            "SELECT sale_id, sale_number, actual_date FROM sale ORDER BY sale_id ASC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(Sale {
                sale_id: row.get(0)?,
                sale_number: row.get(1)?,
                actual_date: stored_date("sale.actual_date", row.get(2)?),
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    // ── Client ────────────────────────────────────────────────────

    pub fn insert_client(&self, c: &Client) -> ReportResult<()> {
        self.conn.execute(
            "INSERT INTO client (
                client_ref, company_name, title, first_name, surname, account_name
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                c.client_ref,
                c.company_name,
                c.title,
                c.first_name,
                c.surname,
                c.account_name,
            ],
        )?;
        Ok(())
    }

    pub fn all_clients(&self) -> ReportResult<Vec<Client>> {
        let mut stmt = self.conn.prepare(
            "SELECT client_ref, company_name, title, first_name, surname, account_name
             FROM client ORDER BY client_ref ASC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(Client {
                client_ref: row.get(0)?,
                company_name: row.get(1)?,
                title: row.get(2)?,
                first_name: row.get(3)?,
                surname: row.get(4)?,
                account_name: row.get(5)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}
