// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{
    Store, validate_card, validate_purchase, validate_recurring, validate_transaction,
};
use crate::error::{Error, Result};
use crate::models::*;
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Persistent backend over the schema in `db.rs`.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn new(conn: Connection) -> Self {
        SqliteStore { conn }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

fn dec(s: String) -> Result<Decimal> {
    s.parse::<Decimal>()
        .map_err(|_| Error::validation(format!("invalid stored decimal '{}'", s)))
}

fn dec_opt(s: Option<String>) -> Result<Option<Decimal>> {
    s.map(dec).transpose()
}

struct TxnRow {
    id: i64,
    r#type: String,
    amount: String,
    description: String,
    date: NaiveDate,
    is_recurring: bool,
    credit_card_id: Option<i64>,
    source_id: Option<i64>,
}

impl SqliteStore {
    fn txn_from_row(&self, row: TxnRow, tags: Vec<i64>) -> Result<Transaction> {
        Ok(Transaction {
            id: row.id,
            r#type: TxnType::parse(&row.r#type)?,
            amount: dec(row.amount)?,
            description: row.description,
            tags,
            date: row.date,
            is_recurring: row.is_recurring,
            credit_card_id: row.credit_card_id,
            source_id: row.source_id,
        })
    }

    fn tags_by_transaction(&self) -> Result<HashMap<i64, Vec<i64>>> {
        let mut stmt = self
            .conn
            .prepare("SELECT transaction_id, category_id FROM transaction_tags ORDER BY category_id")?;
        let mut rows = stmt.query([])?;
        let mut map: HashMap<i64, Vec<i64>> = HashMap::new();
        while let Some(r) = rows.next()? {
            let txn: i64 = r.get(0)?;
            let cat: i64 = r.get(1)?;
            map.entry(txn).or_default().push(cat);
        }
        Ok(map)
    }

    fn tags_for(&self, id: i64) -> Result<Vec<i64>> {
        let mut stmt = self.conn.prepare(
            "SELECT category_id FROM transaction_tags WHERE transaction_id=?1 ORDER BY category_id",
        )?;
        let rows = stmt.query_map(params![id], |r| r.get::<_, i64>(0))?;
        let mut tags = Vec::new();
        for t in rows {
            tags.push(t?);
        }
        Ok(tags)
    }

    fn write_tags(&mut self, id: i64, tags: &[i64]) -> Result<()> {
        self.conn
            .execute("DELETE FROM transaction_tags WHERE transaction_id=?1", params![id])?;
        for tag in tags {
            self.conn.execute(
                "INSERT OR IGNORE INTO transaction_tags(transaction_id, category_id) VALUES(?1, ?2)",
                params![id, tag],
            )?;
        }
        Ok(())
    }

    fn query_transactions(&self, where_sql: &str, args: &[&dyn rusqlite::ToSql]) -> Result<Vec<Transaction>> {
        let sql = format!(
            "SELECT id, type, amount, description, date, is_recurring, credit_card_id, source_id
             FROM transactions {} ORDER BY date DESC, id DESC",
            where_sql
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(rusqlite::params_from_iter(args.iter()))?;
        let mut raw = Vec::new();
        while let Some(r) = rows.next()? {
            raw.push(TxnRow {
                id: r.get(0)?,
                r#type: r.get(1)?,
                amount: r.get(2)?,
                description: r.get(3)?,
                date: r.get(4)?,
                is_recurring: r.get(5)?,
                credit_card_id: r.get(6)?,
                source_id: r.get(7)?,
            });
        }
        let mut tag_map = self.tags_by_transaction()?;
        let mut out = Vec::with_capacity(raw.len());
        for row in raw {
            let tags = tag_map.remove(&row.id).unwrap_or_default();
            out.push(self.txn_from_row(row, tags)?);
        }
        Ok(out)
    }

    fn card_from_row(r: &rusqlite::Row<'_>) -> rusqlite::Result<(CreditCard, [String; 6])> {
        Ok((
            CreditCard {
                id: r.get(0)?,
                bank: r.get(1)?,
                name: r.get(2)?,
                last4_digits: r.get(3)?,
                color: r.get(4)?,
                cut_day: r.get(5)?,
                payment_days: r.get(6)?,
                annual_interest_rate: Decimal::ZERO,
                moratory_interest_rate: Decimal::ZERO,
                min_payment_percentage: Decimal::ZERO,
                credit_limit: Decimal::ZERO,
                current_balance: Decimal::ZERO,
                available_credit: Decimal::ZERO,
                is_active: r.get(13)?,
            },
            [
                r.get(7)?,
                r.get(8)?,
                r.get(9)?,
                r.get(10)?,
                r.get(11)?,
                r.get(12)?,
            ],
        ))
    }

    fn finish_card((mut card, raw): (CreditCard, [String; 6])) -> Result<CreditCard> {
        let [air, mir, mpp, limit, balance, available] = raw;
        card.annual_interest_rate = dec(air)?;
        card.moratory_interest_rate = dec(mir)?;
        card.min_payment_percentage = dec(mpp)?;
        card.credit_limit = dec(limit)?;
        card.current_balance = dec(balance)?;
        card.available_credit = dec(available)?;
        Ok(card)
    }
}

const CARD_COLS: &str = "id, bank, name, last4_digits, color, cut_day, payment_days,
    annual_interest_rate, moratory_interest_rate, min_payment_percentage,
    credit_limit, current_balance, available_credit, is_active";

impl Store for SqliteStore {
    fn transactions(&self) -> Result<Vec<Transaction>> {
        self.query_transactions("", &[])
    }

    fn transaction(&self, id: i64) -> Result<Transaction> {
        let row = self
            .conn
            .query_row(
                "SELECT id, type, amount, description, date, is_recurring, credit_card_id, source_id
                 FROM transactions WHERE id=?1",
                params![id],
                |r| {
                    Ok(TxnRow {
                        id: r.get(0)?,
                        r#type: r.get(1)?,
                        amount: r.get(2)?,
                        description: r.get(3)?,
                        date: r.get(4)?,
                        is_recurring: r.get(5)?,
                        credit_card_id: r.get(6)?,
                        source_id: r.get(7)?,
                    })
                },
            )
            .optional()?
            .ok_or_else(|| Error::not_found("transaction", id))?;
        let tags = self.tags_for(id)?;
        self.txn_from_row(row, tags)
    }

    fn transactions_in_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Transaction>> {
        self.query_transactions("WHERE date>=?1 AND date<=?2", &[&start, &end])
    }

    fn create_transaction(&mut self, data: &NewTransaction) -> Result<Transaction> {
        validate_transaction(data)?;
        self.conn.execute(
            "INSERT INTO transactions(type, amount, description, date, is_recurring, credit_card_id, source_id)
             VALUES(?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                data.r#type.as_str(),
                data.amount.to_string(),
                data.description,
                data.date,
                data.is_recurring,
                data.credit_card_id,
                data.source_id
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        self.write_tags(id, &data.tags)?;
        self.transaction(id)
    }

    fn update_transaction(&mut self, id: i64, data: &NewTransaction) -> Result<Transaction> {
        validate_transaction(data)?;
        let n = self.conn.execute(
            "UPDATE transactions SET type=?1, amount=?2, description=?3, date=?4,
             is_recurring=?5, credit_card_id=?6, source_id=?7, updated_at=datetime('now')
             WHERE id=?8",
            params![
                data.r#type.as_str(),
                data.amount.to_string(),
                data.description,
                data.date,
                data.is_recurring,
                data.credit_card_id,
                data.source_id,
                id
            ],
        )?;
        if n == 0 {
            return Err(Error::not_found("transaction", id));
        }
        self.write_tags(id, &data.tags)?;
        self.transaction(id)
    }

    fn delete_transaction(&mut self, id: i64) -> Result<()> {
        let n = self
            .conn
            .execute("DELETE FROM transactions WHERE id=?1", params![id])?;
        if n == 0 {
            return Err(Error::not_found("transaction", id));
        }
        Ok(())
    }

    fn categories(&self) -> Result<Vec<Category>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, color, icon, is_custom FROM categories ORDER BY id")?;
        let rows = stmt.query_map([], |r| {
            Ok(Category {
                id: r.get(0)?,
                name: r.get(1)?,
                color: r.get(2)?,
                icon: r.get(3)?,
                is_custom: r.get(4)?,
            })
        })?;
        let mut out = Vec::new();
        for c in rows {
            out.push(c?);
        }
        Ok(out)
    }

    fn create_category(&mut self, name: &str, color: &str, icon: &str) -> Result<Category> {
        self.conn.execute(
            "INSERT INTO categories(name, color, icon, is_custom) VALUES(?1, ?2, ?3, 1)",
            params![name, color, icon],
        )?;
        let id = self.conn.last_insert_rowid();
        Ok(Category {
            id,
            name: name.into(),
            color: color.into(),
            icon: icon.into(),
            is_custom: true,
        })
    }

    fn credit_cards(&self) -> Result<Vec<CreditCard>> {
        let sql = format!("SELECT {} FROM credit_cards ORDER BY id", CARD_COLS);
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], Self::card_from_row)?;
        let mut out = Vec::new();
        for c in rows {
            out.push(Self::finish_card(c?)?);
        }
        Ok(out)
    }

    fn credit_card(&self, id: i64) -> Result<CreditCard> {
        let sql = format!("SELECT {} FROM credit_cards WHERE id=?1", CARD_COLS);
        let raw = self
            .conn
            .query_row(&sql, params![id], Self::card_from_row)
            .optional()?
            .ok_or_else(|| Error::not_found("credit card", id))?;
        Self::finish_card(raw)
    }

    fn create_credit_card(&mut self, data: &NewCreditCard) -> Result<CreditCard> {
        validate_card(data)?;
        let available = data.credit_limit - data.current_balance;
        self.conn.execute(
            "INSERT INTO credit_cards(bank, name, last4_digits, color, cut_day, payment_days,
             annual_interest_rate, moratory_interest_rate, min_payment_percentage,
             credit_limit, current_balance, available_credit)
             VALUES(?1,?2,?3,?4,?5,?6,?7,?8,?9,?10,?11,?12)",
            params![
                data.bank,
                data.name,
                data.last4_digits,
                data.color,
                data.cut_day,
                data.payment_days,
                data.annual_interest_rate.to_string(),
                data.moratory_interest_rate.to_string(),
                data.min_payment_percentage.to_string(),
                data.credit_limit.to_string(),
                data.current_balance.to_string(),
                available.to_string()
            ],
        )?;
        self.credit_card(self.conn.last_insert_rowid())
    }

    fn set_card_balance(&mut self, id: i64, balance: Decimal) -> Result<CreditCard> {
        let card = self.credit_card(id)?;
        let available = card.credit_limit - balance;
        self.conn.execute(
            "UPDATE credit_cards SET current_balance=?1, available_credit=?2,
             updated_at=datetime('now') WHERE id=?3",
            params![balance.to_string(), available.to_string(), id],
        )?;
        self.credit_card(id)
    }

    fn delete_credit_card(&mut self, id: i64) -> Result<()> {
        let n = self
            .conn
            .execute("DELETE FROM credit_cards WHERE id=?1", params![id])?;
        if n == 0 {
            return Err(Error::not_found("credit card", id));
        }
        Ok(())
    }

    fn card_payments(&self) -> Result<Vec<CreditCardPayment>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, card_id, cycle_start, cycle_end, amount, status, paid_date
             FROM credit_card_payments ORDER BY cycle_end DESC",
        )?;
        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(r) = rows.next()? {
            out.push(CreditCardPayment {
                id: r.get(0)?,
                card_id: r.get(1)?,
                cycle_start: r.get(2)?,
                cycle_end: r.get(3)?,
                amount: dec(r.get(4)?)?,
                status: PaymentStatus::parse(&r.get::<_, String>(5)?)?,
                paid_date: r.get(6)?,
            });
        }
        Ok(out)
    }

    fn upsert_card_payment(
        &mut self,
        card_id: i64,
        cycle_start: NaiveDate,
        cycle_end: NaiveDate,
        amount: Decimal,
        status: PaymentStatus,
        paid_date: Option<NaiveDate>,
    ) -> Result<CreditCardPayment> {
        self.conn.execute(
            "INSERT INTO credit_card_payments(card_id, cycle_start, cycle_end, amount, status, paid_date)
             VALUES(?1,?2,?3,?4,?5,?6)
             ON CONFLICT(card_id, cycle_start, cycle_end)
             DO UPDATE SET amount=excluded.amount, status=excluded.status, paid_date=excluded.paid_date",
            params![
                card_id,
                cycle_start,
                cycle_end,
                amount.to_string(),
                status.as_str(),
                paid_date
            ],
        )?;
        let id: i64 = self.conn.query_row(
            "SELECT id FROM credit_card_payments WHERE card_id=?1 AND cycle_start=?2 AND cycle_end=?3",
            params![card_id, cycle_start, cycle_end],
            |r| r.get(0),
        )?;
        Ok(CreditCardPayment {
            id,
            card_id,
            cycle_start,
            cycle_end,
            amount,
            status,
            paid_date,
        })
    }

    fn installment_purchases(&self) -> Result<Vec<InstallmentPurchase>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, total_amount, number_of_months, monthly_payment, start_date,
             description, credit_card_id FROM installment_purchases ORDER BY id",
        )?;
        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(r) = rows.next()? {
            out.push(InstallmentPurchase {
                id: r.get(0)?,
                name: r.get(1)?,
                total_amount: dec(r.get(2)?)?,
                number_of_months: r.get(3)?,
                monthly_payment: dec(r.get(4)?)?,
                start_date: r.get(5)?,
                description: r.get(6)?,
                credit_card_id: r.get(7)?,
            });
        }
        Ok(out)
    }

    fn installment_purchase(&self, id: i64) -> Result<InstallmentPurchase> {
        self.installment_purchases()?
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| Error::not_found("installment purchase", id))
    }

    fn create_installment_purchase(
        &mut self,
        data: &NewInstallmentPurchase,
        monthly_payment: Decimal,
    ) -> Result<InstallmentPurchase> {
        validate_purchase(data)?;
        self.conn.execute(
            "INSERT INTO installment_purchases(name, total_amount, number_of_months,
             monthly_payment, start_date, description, credit_card_id)
             VALUES(?1,?2,?3,?4,?5,?6,?7)",
            params![
                data.name,
                data.total_amount.to_string(),
                data.number_of_months,
                monthly_payment.to_string(),
                data.start_date,
                data.description,
                data.credit_card_id
            ],
        )?;
        self.installment_purchase(self.conn.last_insert_rowid())
    }

    fn update_installment_purchase(&mut self, purchase: &InstallmentPurchase) -> Result<()> {
        let n = self.conn.execute(
            "UPDATE installment_purchases SET name=?1, total_amount=?2, number_of_months=?3,
             monthly_payment=?4, start_date=?5, description=?6, credit_card_id=?7,
             updated_at=datetime('now') WHERE id=?8",
            params![
                purchase.name,
                purchase.total_amount.to_string(),
                purchase.number_of_months,
                purchase.monthly_payment.to_string(),
                purchase.start_date,
                purchase.description,
                purchase.credit_card_id,
                purchase.id
            ],
        )?;
        if n == 0 {
            return Err(Error::not_found("installment purchase", purchase.id));
        }
        Ok(())
    }

    fn delete_installment_purchase(&mut self, id: i64) -> Result<()> {
        let n = self
            .conn
            .execute("DELETE FROM installment_purchases WHERE id=?1", params![id])?;
        if n == 0 {
            return Err(Error::not_found("installment purchase", id));
        }
        Ok(())
    }

    fn installment_payments(&self) -> Result<Vec<InstallmentPayment>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, purchase_id, amount, due_date, paid_date, status, payment_number
             FROM installment_payments ORDER BY due_date, payment_number",
        )?;
        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(r) = rows.next()? {
            out.push(InstallmentPayment {
                id: r.get(0)?,
                purchase_id: r.get(1)?,
                amount: dec(r.get(2)?)?,
                due_date: r.get(3)?,
                paid_date: r.get(4)?,
                status: PaymentStatus::parse(&r.get::<_, String>(5)?)?,
                payment_number: r.get(6)?,
            });
        }
        Ok(out)
    }

    fn installment_payment(&self, id: i64) -> Result<InstallmentPayment> {
        self.installment_payments()?
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| Error::not_found("installment payment", id))
    }

    fn create_installment_payment(
        &mut self,
        data: &NewInstallmentPayment,
    ) -> Result<InstallmentPayment> {
        self.conn.execute(
            "INSERT INTO installment_payments(purchase_id, amount, due_date, status, payment_number)
             VALUES(?1,?2,?3,?4,?5)",
            params![
                data.purchase_id,
                data.amount.to_string(),
                data.due_date,
                data.status.as_str(),
                data.payment_number
            ],
        )?;
        self.installment_payment(self.conn.last_insert_rowid())
    }

    fn set_payment_status(
        &mut self,
        id: i64,
        status: PaymentStatus,
        paid_date: Option<NaiveDate>,
    ) -> Result<InstallmentPayment> {
        let n = self.conn.execute(
            "UPDATE installment_payments SET status=?1, paid_date=?2, updated_at=datetime('now')
             WHERE id=?3",
            params![status.as_str(), paid_date, id],
        )?;
        if n == 0 {
            return Err(Error::not_found("installment payment", id));
        }
        self.installment_payment(id)
    }

    fn delete_installment_payment(&mut self, id: i64) -> Result<()> {
        let n = self
            .conn
            .execute("DELETE FROM installment_payments WHERE id=?1", params![id])?;
        if n == 0 {
            return Err(Error::not_found("installment payment", id));
        }
        Ok(())
    }

    fn recurring_expenses(&self) -> Result<Vec<RecurringExpense>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, type, monthly_amount, payment_day, start_date, end_date,
             description, is_active FROM recurring_expenses ORDER BY id",
        )?;
        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(r) = rows.next()? {
            out.push(RecurringExpense {
                id: r.get(0)?,
                name: r.get(1)?,
                r#type: r.get(2)?,
                monthly_amount: dec(r.get(3)?)?,
                payment_day: r.get(4)?,
                start_date: r.get(5)?,
                end_date: r.get(6)?,
                description: r.get(7)?,
                is_active: r.get(8)?,
            });
        }
        Ok(out)
    }

    fn recurring_expense(&self, id: i64) -> Result<RecurringExpense> {
        self.recurring_expenses()?
            .into_iter()
            .find(|e| e.id == id)
            .ok_or_else(|| Error::not_found("recurring expense", id))
    }

    fn create_recurring_expense(&mut self, data: &NewRecurringExpense) -> Result<RecurringExpense> {
        validate_recurring(data)?;
        self.conn.execute(
            "INSERT INTO recurring_expenses(name, type, monthly_amount, payment_day,
             start_date, end_date, description) VALUES(?1,?2,?3,?4,?5,?6,?7)",
            params![
                data.name,
                data.r#type,
                data.monthly_amount.to_string(),
                data.payment_day,
                data.start_date,
                data.end_date,
                data.description
            ],
        )?;
        self.recurring_expense(self.conn.last_insert_rowid())
    }

    fn update_recurring_expense(&mut self, expense: &RecurringExpense) -> Result<()> {
        let n = self.conn.execute(
            "UPDATE recurring_expenses SET name=?1, type=?2, monthly_amount=?3, payment_day=?4,
             start_date=?5, end_date=?6, description=?7, is_active=?8, updated_at=datetime('now')
             WHERE id=?9",
            params![
                expense.name,
                expense.r#type,
                expense.monthly_amount.to_string(),
                expense.payment_day,
                expense.start_date,
                expense.end_date,
                expense.description,
                expense.is_active,
                expense.id
            ],
        )?;
        if n == 0 {
            return Err(Error::not_found("recurring expense", expense.id));
        }
        Ok(())
    }

    fn delete_recurring_expense(&mut self, id: i64) -> Result<()> {
        let n = self
            .conn
            .execute("DELETE FROM recurring_expenses WHERE id=?1", params![id])?;
        if n == 0 {
            return Err(Error::not_found("recurring expense", id));
        }
        Ok(())
    }

    fn fixed_expenses(&self) -> Result<Vec<FixedExpense>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, amount, frequency, start_date, end_date FROM fixed_expenses ORDER BY id",
        )?;
        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(r) = rows.next()? {
            out.push(FixedExpense {
                id: r.get(0)?,
                name: r.get(1)?,
                amount: dec(r.get(2)?)?,
                frequency: Frequency::parse(&r.get::<_, String>(3)?)?,
                start_date: r.get(4)?,
                end_date: r.get(5)?,
            });
        }
        Ok(out)
    }

    fn create_fixed_expense(&mut self, data: &NewFixedExpense) -> Result<FixedExpense> {
        if data.amount <= Decimal::ZERO {
            return Err(Error::validation("fixed expense amount must be positive"));
        }
        self.conn.execute(
            "INSERT INTO fixed_expenses(name, amount, frequency, start_date, end_date)
             VALUES(?1,?2,?3,?4,?5)",
            params![
                data.name,
                data.amount.to_string(),
                data.frequency.as_str(),
                data.start_date,
                data.end_date
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        Ok(FixedExpense {
            id,
            name: data.name.clone(),
            amount: data.amount,
            frequency: data.frequency,
            start_date: data.start_date,
            end_date: data.end_date,
        })
    }

    fn delete_fixed_expense(&mut self, id: i64) -> Result<()> {
        let n = self
            .conn
            .execute("DELETE FROM fixed_expenses WHERE id=?1", params![id])?;
        if n == 0 {
            return Err(Error::not_found("fixed expense", id));
        }
        Ok(())
    }

    fn assets(&self) -> Result<Vec<Asset>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, type, name, value, currency, annual_value_change, purchase_date, notes
             FROM assets ORDER BY id",
        )?;
        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(r) = rows.next()? {
            out.push(Asset {
                id: r.get(0)?,
                r#type: r.get(1)?,
                name: r.get(2)?,
                value: dec(r.get(3)?)?,
                currency: r.get(4)?,
                annual_value_change: r.get(5)?,
                purchase_date: r.get(6)?,
                notes: r.get(7)?,
            });
        }
        Ok(out)
    }

    fn create_asset(&mut self, data: &NewAsset) -> Result<Asset> {
        self.conn.execute(
            "INSERT INTO assets(type, name, value, currency, annual_value_change, purchase_date, notes)
             VALUES(?1,?2,?3,?4,?5,?6,?7)",
            params![
                data.r#type,
                data.name,
                data.value.to_string(),
                data.currency,
                data.annual_value_change,
                data.purchase_date,
                data.notes
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        self.assets()?
            .into_iter()
            .find(|a| a.id == id)
            .ok_or_else(|| Error::not_found("asset", id))
    }

    fn delete_asset(&mut self, id: i64) -> Result<()> {
        let n = self.conn.execute("DELETE FROM assets WHERE id=?1", params![id])?;
        if n == 0 {
            return Err(Error::not_found("asset", id));
        }
        Ok(())
    }

    fn liabilities(&self) -> Result<Vec<Liability>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, type, name, amount, interest_rate, due_date FROM liabilities ORDER BY id",
        )?;
        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(r) = rows.next()? {
            out.push(Liability {
                id: r.get(0)?,
                r#type: r.get(1)?,
                name: r.get(2)?,
                amount: dec(r.get(3)?)?,
                interest_rate: dec_opt(r.get(4)?)?,
                due_date: r.get(5)?,
            });
        }
        Ok(out)
    }

    fn create_liability(&mut self, data: &NewLiability) -> Result<Liability> {
        self.conn.execute(
            "INSERT INTO liabilities(type, name, amount, interest_rate, due_date)
             VALUES(?1,?2,?3,?4,?5)",
            params![
                data.r#type,
                data.name,
                data.amount.to_string(),
                data.interest_rate.map(|d| d.to_string()),
                data.due_date
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        self.liabilities()?
            .into_iter()
            .find(|l| l.id == id)
            .ok_or_else(|| Error::not_found("liability", id))
    }

    fn delete_liability(&mut self, id: i64) -> Result<()> {
        let n = self
            .conn
            .execute("DELETE FROM liabilities WHERE id=?1", params![id])?;
        if n == 0 {
            return Err(Error::not_found("liability", id));
        }
        Ok(())
    }

    fn investments(&self) -> Result<Vec<Investment>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, symbol, type, quantity, purchase_price, purchase_date, current_price, notes
             FROM investments ORDER BY id",
        )?;
        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(r) = rows.next()? {
            out.push(Investment {
                id: r.get(0)?,
                symbol: r.get(1)?,
                r#type: r.get(2)?,
                quantity: dec(r.get(3)?)?,
                purchase_price: dec(r.get(4)?)?,
                purchase_date: r.get(5)?,
                current_price: dec(r.get(6)?)?,
                notes: r.get(7)?,
            });
        }
        Ok(out)
    }

    fn create_investment(&mut self, data: &NewInvestment) -> Result<Investment> {
        self.conn.execute(
            "INSERT INTO investments(symbol, type, quantity, purchase_price, purchase_date, current_price, notes)
             VALUES(?1,?2,?3,?4,?5,?6,?7)",
            params![
                data.symbol,
                data.r#type,
                data.quantity.to_string(),
                data.purchase_price.to_string(),
                data.purchase_date,
                data.current_price.to_string(),
                data.notes
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        self.investments()?
            .into_iter()
            .find(|i| i.id == id)
            .ok_or_else(|| Error::not_found("investment", id))
    }

    fn set_investment_price(&mut self, id: i64, price: Decimal) -> Result<Investment> {
        let n = self.conn.execute(
            "UPDATE investments SET current_price=?1 WHERE id=?2",
            params![price.to_string(), id],
        )?;
        if n == 0 {
            return Err(Error::not_found("investment", id));
        }
        self.investments()?
            .into_iter()
            .find(|i| i.id == id)
            .ok_or_else(|| Error::not_found("investment", id))
    }

    fn delete_investment(&mut self, id: i64) -> Result<()> {
        let n = self
            .conn
            .execute("DELETE FROM investments WHERE id=?1", params![id])?;
        if n == 0 {
            return Err(Error::not_found("investment", id));
        }
        Ok(())
    }

    fn investment_opportunities(&self) -> Result<Vec<InvestmentOpportunity>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, type, name, expected_return, risk_level, min_amount, description, is_active
             FROM investment_opportunities ORDER BY id",
        )?;
        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(r) = rows.next()? {
            out.push(InvestmentOpportunity {
                id: r.get(0)?,
                r#type: r.get(1)?,
                name: r.get(2)?,
                expected_return: r.get(3)?,
                risk_level: r.get(4)?,
                min_amount: dec(r.get(5)?)?,
                description: r.get(6)?,
                is_active: r.get(7)?,
            });
        }
        Ok(out)
    }

    fn create_investment_opportunity(
        &mut self,
        data: &NewInvestmentOpportunity,
    ) -> Result<InvestmentOpportunity> {
        self.conn.execute(
            "INSERT INTO investment_opportunities(type, name, expected_return, risk_level, min_amount, description)
             VALUES(?1,?2,?3,?4,?5,?6)",
            params![
                data.r#type,
                data.name,
                data.expected_return,
                data.risk_level,
                data.min_amount.to_string(),
                data.description
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        self.investment_opportunities()?
            .into_iter()
            .find(|o| o.id == id)
            .ok_or_else(|| Error::not_found("investment opportunity", id))
    }
}
