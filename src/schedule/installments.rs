// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Installment purchase scheduler.
//!
//! A purchase of N months splits into N occurrences, one per month starting
//! at `start_date`. Occurrences in a past or the current month land directly
//! in the transactions table ("Pago #k"); strictly future occurrences become
//! pending `InstallmentPayment` rows. The `reconcile` pass rolls pending
//! payments forward once their month arrives, so at any point exactly N
//! occurrences exist across the two tables and their amounts sum to the
//! purchase total.

use crate::dates;
use crate::error::Result;
use crate::models::{
    InstallmentPayment, InstallmentPurchase, InstallmentPurchasePatch, NewInstallmentPayment,
    NewInstallmentPurchase, NewTransaction, PaymentStatus, TxnType,
};
use crate::store::Store;
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

/// Per-month amount, rounded to cents.
pub fn monthly_payment(total: Decimal, months: u32) -> Decimal {
    (total / Decimal::from(months)).round_dp(2)
}

/// Amount of the k-th occurrence (1-based). The final one absorbs the
/// rounding remainder so the schedule sums exactly to the total.
pub fn occurrence_amount(total: Decimal, months: u32, k: u32) -> Decimal {
    let monthly = monthly_payment(total, months);
    if k == months {
        total - monthly * Decimal::from(months - 1)
    } else {
        monthly
    }
}

fn month_index(date: NaiveDate) -> i32 {
    date.year() * 12 + date.month() as i32 - 1
}

fn generated_description(purchase: &InstallmentPurchase, k: u32) -> String {
    format!("{} - Pago #{}", purchase.name, k)
}

/// Creates the purchase and materializes its schedule against `today`.
pub fn create(
    store: &mut dyn Store,
    data: &NewInstallmentPurchase,
    today: NaiveDate,
) -> Result<InstallmentPurchase> {
    let monthly = monthly_payment(data.total_amount, data.number_of_months);
    let purchase = store.create_installment_purchase(data, monthly)?;
    materialize(store, &purchase, today)?;
    Ok(purchase)
}

fn materialize(store: &mut dyn Store, purchase: &InstallmentPurchase, today: NaiveDate) -> Result<()> {
    let current = month_index(today);
    for i in 0..purchase.number_of_months {
        let k = i + 1;
        let due = dates::add_months(purchase.start_date, i);
        let amount = occurrence_amount(purchase.total_amount, purchase.number_of_months, k);
        if month_index(due) <= current {
            store.create_transaction(&NewTransaction {
                r#type: TxnType::Expense,
                amount,
                description: generated_description(purchase, k),
                tags: Vec::new(),
                date: due,
                is_recurring: false,
                credit_card_id: purchase.credit_card_id,
                source_id: Some(purchase.id),
            })?;
        } else {
            store.create_installment_payment(&NewInstallmentPayment {
                purchase_id: purchase.id,
                amount,
                due_date: due,
                status: PaymentStatus::Pending,
                payment_number: k,
            })?;
        }
    }
    Ok(())
}

fn delete_generated(store: &mut dyn Store, purchase_id: i64) -> Result<()> {
    let generated: Vec<i64> = store
        .transactions()?
        .into_iter()
        .filter(|t| t.source_id == Some(purchase_id) && !t.is_recurring)
        .map(|t| t.id)
        .collect();
    for id in generated {
        store.delete_transaction(id)?;
    }
    let payments: Vec<i64> = store
        .installment_payments()?
        .into_iter()
        .filter(|p| p.purchase_id == purchase_id)
        .map(|p| p.id)
        .collect();
    for id in payments {
        store.delete_installment_payment(id)?;
    }
    Ok(())
}

/// Applies a partial edit. Any change rebuilds the schedule from scratch:
/// generated transactions and payments are dropped and re-planned against the
/// merged definition.
pub fn update(
    store: &mut dyn Store,
    id: i64,
    patch: &InstallmentPurchasePatch,
    today: NaiveDate,
) -> Result<InstallmentPurchase> {
    let mut purchase = store.installment_purchase(id)?;
    if let Some(name) = &patch.name {
        purchase.name = name.clone();
    }
    if let Some(total) = patch.total_amount {
        purchase.total_amount = total;
    }
    if let Some(months) = patch.number_of_months {
        purchase.number_of_months = months;
    }
    if let Some(start) = patch.start_date {
        purchase.start_date = start;
    }
    if let Some(description) = &patch.description {
        purchase.description = description.clone();
    }
    if let Some(card) = patch.credit_card_id {
        purchase.credit_card_id = card;
    }
    purchase.monthly_payment = monthly_payment(purchase.total_amount, purchase.number_of_months);
    delete_generated(store, id)?;
    store.update_installment_purchase(&purchase)?;
    materialize(store, &purchase, today)?;
    Ok(purchase)
}

/// Deletes the purchase together with everything it generated.
pub fn delete(store: &mut dyn Store, id: i64) -> Result<()> {
    store.installment_purchase(id)?;
    delete_generated(store, id)?;
    store.delete_installment_purchase(id)
}

pub fn mark_paid(
    store: &mut dyn Store,
    payment_id: i64,
    paid_date: NaiveDate,
) -> Result<InstallmentPayment> {
    store.set_payment_status(payment_id, PaymentStatus::Paid, Some(paid_date))
}

pub fn mark_unpaid(store: &mut dyn Store, payment_id: i64) -> Result<InstallmentPayment> {
    store.set_payment_status(payment_id, PaymentStatus::Pending, None)
}

/// Sum of all still-pending installment amounts.
pub fn total_pending(store: &dyn Store) -> Result<Decimal> {
    Ok(store
        .installment_payments()?
        .iter()
        .filter(|p| p.status == PaymentStatus::Pending)
        .map(|p| p.amount)
        .sum())
}

/// Rolls forward every pending payment whose due month has arrived: the
/// payment row is replaced by a realized transaction, exactly as if the
/// occurrence had been planned into the past. Returns how many were moved.
pub fn reconcile(store: &mut dyn Store, today: NaiveDate) -> Result<u32> {
    let current = month_index(today);
    let due: Vec<InstallmentPayment> = store
        .installment_payments()?
        .into_iter()
        .filter(|p| p.status == PaymentStatus::Pending && month_index(p.due_date) <= current)
        .collect();
    let mut moved = 0;
    for payment in due {
        let purchase = store.installment_purchase(payment.purchase_id)?;
        store.create_transaction(&NewTransaction {
            r#type: TxnType::Expense,
            amount: payment.amount,
            description: generated_description(&purchase, payment.payment_number),
            tags: Vec::new(),
            date: payment.due_date,
            is_recurring: false,
            credit_card_id: purchase.credit_card_id,
            source_id: Some(purchase.id),
        })?;
        store.delete_installment_payment(payment.id)?;
        moved += 1;
    }
    Ok(moved)
}
