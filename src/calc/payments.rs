// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Month-targeted payment composer: everything that must be paid during a
//! given month, from card statements through loose installments to recurring
//! obligations.
//!
//! `days_until_due` is always measured from *today*, even when the composer
//! targets another month, so past months show uniformly negative values and
//! future months uniformly positive ones.

use crate::cycle;
use crate::dates;
use crate::error::Result;
use crate::models::{
    CreditCard, CreditCardPayment, InstallmentPayment, InstallmentPurchase, PaymentStatus,
    RecurringExpense, Transaction, TxnType,
};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentKind {
    CreditCard,
    Installment,
    Recurring,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentItem {
    pub kind: PaymentKind,
    pub name: String,
    pub amount: Decimal,
    pub due_date: NaiveDate,
    pub status: PaymentStatus,
    pub days_until_due: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthPayments {
    pub items: Vec<PaymentItem>,
    pub total_payments: Decimal,
    pub month_income: Decimal,
    pub available_after_payments: Decimal,
}

fn month_index(year: i32, month: u32) -> i32 {
    year * 12 + month as i32 - 1
}

/// All payments landing in `(year, month)`.
///
/// Card statements resolve through the backward cycle search and are listed
/// even when the cycle total is zero; cards with no cycle paying in the month
/// are skipped. Non-card installments count whether already paid or still
/// pending. Recurring expenses count while active in the month, due on their
/// clamped payment day.
#[allow(clippy::too_many_arguments)]
pub fn payments_for_month(
    cards: &[CreditCard],
    card_payments: &[CreditCardPayment],
    transactions: &[Transaction],
    purchases: &[InstallmentPurchase],
    installment_payments: &[InstallmentPayment],
    recurring: &[RecurringExpense],
    year: i32,
    month: u32,
    today: NaiveDate,
) -> Result<MonthPayments> {
    let window = dates::month_interval(year, month)?;
    let mut items = Vec::new();

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
        let installments: Decimal = installment_payments
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
        let status = card_payments
            .iter()
            .find(|p| {
                p.card_id == card.id && p.cycle_start == cyc.start && p.cycle_end == cyc.end
            })
            .map(|p| p.status)
            .unwrap_or(PaymentStatus::Pending);
        items.push(PaymentItem {
            kind: PaymentKind::CreditCard,
            name: format!("{} {}", card.bank, card.name),
            amount: cycle_expenses + installments,
            due_date: cyc.due_date,
            status,
            days_until_due: (cyc.due_date - today).num_days(),
        });
    }

    for payment in installment_payments {
        if !dates::is_within(payment.due_date, window) {
            continue;
        }
        let Some(purchase) = purchases.iter().find(|p| p.id == payment.purchase_id) else {
            continue;
        };
        if purchase.credit_card_id.is_some() {
            continue;
        }
        items.push(PaymentItem {
            kind: PaymentKind::Installment,
            name: format!("{} #{}", purchase.name, payment.payment_number),
            amount: payment.amount,
            due_date: payment.due_date,
            status: payment.status,
            days_until_due: (payment.due_date - today).num_days(),
        });
    }

    let target = month_index(year, month);
    for expense in recurring.iter().filter(|e| e.is_active) {
        let start = month_index(expense.start_date.year(), expense.start_date.month());
        if start > target {
            continue;
        }
        if let Some(end) = expense.end_date {
            if month_index(end.year(), end.month()) < target {
                continue;
            }
        }
        let due = dates::clamped_day(year, month, expense.payment_day)?;
        // The scheduler has already materialized any past-or-today occurrence
        // as a transaction, so those count as settled.
        let status = if due <= today {
            PaymentStatus::Paid
        } else {
            PaymentStatus::Pending
        };
        items.push(PaymentItem {
            kind: PaymentKind::Recurring,
            name: expense.name.clone(),
            amount: expense.monthly_amount,
            due_date: due,
            status,
            days_until_due: (due - today).num_days(),
        });
    }

    let total_payments: Decimal = items.iter().map(|i| i.amount).sum();
    let month_income: Decimal = transactions
        .iter()
        .filter(|t| t.r#type == TxnType::Income && dates::is_within(t.date, window))
        .map(|t| t.amount)
        .sum();

    Ok(MonthPayments {
        items,
        total_payments,
        month_income,
        available_after_payments: month_income - total_payments,
    })
}
