// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Per-card cycle expense view: for each active card, what its statement due
//! in the given month amounts to and when it must be paid.

use crate::cycle;
use crate::dates;
use crate::error::Result;
use crate::models::{
    CreditCard, InstallmentPayment, InstallmentPurchase, PaymentStatus, Transaction, TxnType,
};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct CardCycleExpenses {
    pub card_id: i64,
    pub bank: String,
    pub card_name: String,
    pub cycle_start: NaiveDate,
    pub cycle_end: NaiveDate,
    pub due_date: NaiveDate,
    pub cycle_expenses: Decimal,
    pub installments_due: Decimal,
    pub total: Decimal,
    /// Negative once the due date has passed.
    pub days_until_due: i64,
    pub is_due_this_month: bool,
}

/// Expenses owed per card for the month's statement. Cards with no cycle
/// paying in the target month are skipped; cards whose cycle resolves are
/// listed even at a zero total.
pub fn credit_card_expenses(
    cards: &[CreditCard],
    transactions: &[Transaction],
    purchases: &[InstallmentPurchase],
    installment_payments: &[InstallmentPayment],
    year: i32,
    month: u32,
    today: NaiveDate,
) -> Result<Vec<CardCycleExpenses>> {
    let mut out = Vec::new();
    for card in cards.iter().filter(|c| c.is_active) {
        let Some(cyc) = cycle::find_cycle_for_payment_month(card, year, month)? else {
            continue;
        };
        let cycle_window = dates::Interval::new(cyc.start, cyc.end);

        let cycle_expenses: Decimal = transactions
            .iter()
            .filter(|t| {
                t.r#type == TxnType::Expense
                    && t.credit_card_id == Some(card.id)
                    && dates::is_within(t.date, cycle_window)
            })
            .map(|t| t.amount)
            .sum();

        let installments_due: Decimal = installment_payments
            .iter()
            .filter(|p| {
                p.status == PaymentStatus::Pending
                    && dates::is_within(p.due_date, cycle_window)
                    && purchases
                        .iter()
                        .any(|pu| pu.id == p.purchase_id && pu.credit_card_id == Some(card.id))
            })
            .map(|p| p.amount)
            .sum();

        out.push(CardCycleExpenses {
            card_id: card.id,
            bank: card.bank.clone(),
            card_name: card.name.clone(),
            cycle_start: cyc.start,
            cycle_end: cyc.end,
            due_date: cyc.due_date,
            cycle_expenses,
            installments_due,
            total: cycle_expenses + installments_due,
            days_until_due: (cyc.due_date - today).num_days(),
            is_due_this_month: (cyc.due_date.year(), cyc.due_date.month())
                == (today.year(), today.month()),
        });
    }
    Ok(out)
}
