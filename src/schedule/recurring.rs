// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Recurring expense scheduler.
//!
//! Generation walks month by month. The payment date inside each month is
//! the expense's payment day clamped to the month length, so a day-31 rent
//! still lands in February. The look-ahead horizon for future months is
//! twelve months from today.

use crate::dates;
use crate::error::Result;
use crate::models::{
    NewRecurringExpense, NewTransaction, RecurringExpense, RecurringExpensePatch, TxnType,
};
use crate::store::Store;
use chrono::{Datelike, NaiveDate};

const LOOKAHEAD_MONTHS: u32 = 12;

fn month_index(date: NaiveDate) -> i32 {
    date.year() * 12 + date.month() as i32 - 1
}

fn from_index(index: i32) -> (i32, u32) {
    (index.div_euclid(12), (index.rem_euclid(12) + 1) as u32)
}

/// Creates the expense and generates its transactions against `today`.
pub fn create(
    store: &mut dyn Store,
    data: &NewRecurringExpense,
    today: NaiveDate,
) -> Result<RecurringExpense> {
    let expense = store.create_recurring_expense(data)?;
    generate(store, &expense, today)?;
    Ok(expense)
}

fn emit(store: &mut dyn Store, expense: &RecurringExpense, date: NaiveDate) -> Result<()> {
    store.create_transaction(&NewTransaction {
        r#type: TxnType::Expense,
        amount: expense.monthly_amount,
        description: expense.name.clone(),
        tags: Vec::new(),
        date,
        is_recurring: true,
        credit_card_id: None,
        source_id: Some(expense.id),
    })?;
    Ok(())
}

fn generate(store: &mut dyn Store, expense: &RecurringExpense, today: NaiveDate) -> Result<u32> {
    let start = month_index(expense.start_date);
    let current = month_index(today);
    let end_limit = expense.end_date.map(month_index);
    let current_month_end = dates::month_interval(today.year(), today.month())?.end;
    let mut emitted = 0;

    // Past and current months.
    let mut index = start;
    while index <= current {
        if let Some(limit) = end_limit {
            if limit < index {
                break;
            }
        }
        let (y, m) = from_index(index);
        let date = dates::clamped_day(y, m, expense.payment_day)?;
        if date <= today || (y, m) == (today.year(), today.month()) {
            emit(store, expense, date)?;
            emitted += 1;
        }
        index += 1;
    }

    // Future months, twelve out at most.
    let horizon = {
        let h = month_index(dates::add_months(today, LOOKAHEAD_MONTHS));
        end_limit.map_or(h, |limit| limit.min(h))
    };
    let mut index = start.max(current + 1);
    while index <= horizon {
        let (y, m) = from_index(index);
        let date = dates::clamped_day(y, m, expense.payment_day)?;
        if date > current_month_end {
            emit(store, expense, date)?;
            emitted += 1;
        }
        index += 1;
    }
    Ok(emitted)
}

fn delete_generated(store: &mut dyn Store, expense_id: i64) -> Result<()> {
    let generated: Vec<i64> = store
        .transactions()?
        .into_iter()
        .filter(|t| t.source_id == Some(expense_id) && t.is_recurring)
        .map(|t| t.id)
        .collect();
    for id in generated {
        store.delete_transaction(id)?;
    }
    Ok(())
}

/// Applies a partial edit. If the patch touches a schedule-bearing field the
/// generated transactions are destroyed and rebuilt against the merged
/// definition; a pure toggle of `is_active` leaves them alone.
pub fn update(
    store: &mut dyn Store,
    id: i64,
    patch: &RecurringExpensePatch,
    today: NaiveDate,
) -> Result<RecurringExpense> {
    let mut expense = store.recurring_expense(id)?;
    let reshape = patch.reshapes_schedule();
    if let Some(name) = &patch.name {
        expense.name = name.clone();
    }
    if let Some(amount) = patch.monthly_amount {
        expense.monthly_amount = amount;
    }
    if let Some(day) = patch.payment_day {
        expense.payment_day = day;
    }
    if let Some(start) = patch.start_date {
        expense.start_date = start;
    }
    if let Some(end) = patch.end_date {
        expense.end_date = end;
    }
    if let Some(active) = patch.is_active {
        expense.is_active = active;
    }
    store.update_recurring_expense(&expense)?;
    if reshape {
        delete_generated(store, id)?;
        generate(store, &expense, today)?;
    }
    Ok(expense)
}

/// Deletes the expense together with every transaction it generated.
pub fn delete(store: &mut dyn Store, id: i64) -> Result<()> {
    store.recurring_expense(id)?;
    delete_generated(store, id)?;
    store.delete_recurring_expense(id)
}
