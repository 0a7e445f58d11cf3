use super::{date_param, money_param, stored_date, stored_money, ReportStore};
use crate::{error::ReportResult, model::Payment};
use rusqlite::params;

impl ReportStore {
    pub fn insert_payment(&self, p: &Payment) -> ReportResult<()> {
        self.conn.execute(
            "INSERT INTO payment (statement_no, pay_date, amount, payment_type)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                p.statement_no,
                date_param(p.pay_date),
                money_param(p.amount),
                p.payment_type,
            ],
        )?;
        Ok(())
    }

    pub fn all_payments(&self) -> ReportResult<Vec<Payment>> {
        let mut stmt = self.conn.prepare(
            "SELECT statement_no, pay_date, amount, payment_type
             FROM payment ORDER BY id ASC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(Payment {
                statement_no: row.get(0)?,
                pay_date: stored_date("payment.pay_date", row.get(1)?),
                amount: stored_money(row, 2)?,
                payment_type: row.get(3)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}
