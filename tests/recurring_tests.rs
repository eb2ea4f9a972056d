// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use quincena::models::{NewRecurringExpense, RecurringExpensePatch};
use quincena::schedule::recurring;
use quincena::store::{MemStore, Store};
use rust_decimal::Decimal;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn rent(amount: &str, day: u32, start: NaiveDate, end: Option<NaiveDate>) -> NewRecurringExpense {
    NewRecurringExpense {
        name: "Renta".into(),
        r#type: "rent".into(),
        monthly_amount: dec(amount),
        payment_day: day,
        start_date: start,
        end_date: end,
        description: None,
    }
}

#[test]
fn generates_past_and_lookahead_months() {
    let mut store = MemStore::new();
    let today = d(2024, 3, 10);
    // Started in January, pays on the 1st: Jan, Feb, Mar realized plus
    // twelve look-ahead months (Apr 2024 .. Mar 2025).
    recurring::create(&mut store, &rent("5000", 1, d(2024, 1, 1), None), today).unwrap();

    let txns = store.transactions().unwrap();
    assert_eq!(txns.len(), 15);
    assert!(txns.iter().all(|t| t.is_recurring));
    assert!(txns.iter().all(|t| t.amount == dec("5000")));
    assert!(txns.iter().any(|t| t.date == d(2024, 1, 1)));
    assert!(txns.iter().any(|t| t.date == d(2025, 3, 1)));
    assert!(!txns.iter().any(|t| t.date == d(2025, 4, 1)));
}

#[test]
fn payment_day_clamps_to_february() {
    let mut store = MemStore::new();
    let today = d(2024, 3, 10);
    recurring::create(&mut store, &rent("5000", 31, d(2024, 1, 1), None), today).unwrap();
    let txns = store.transactions().unwrap();
    assert!(txns.iter().any(|t| t.date == d(2024, 2, 29)));
    assert!(txns.iter().any(|t| t.date == d(2024, 1, 31)));
}

#[test]
fn end_date_stops_generation() {
    let mut store = MemStore::new();
    let today = d(2024, 3, 10);
    recurring::create(
        &mut store,
        &rent("5000", 1, d(2024, 1, 1), Some(d(2024, 5, 31))),
        today,
    )
    .unwrap();
    let txns = store.transactions().unwrap();
    // Jan through May only.
    assert_eq!(txns.len(), 5);
    assert!(!txns.iter().any(|t| t.date > d(2024, 5, 31)));
}

#[test]
fn amount_edit_regenerates_without_stale_rows() {
    let mut store = MemStore::new();
    let today = d(2024, 3, 10);
    let created =
        recurring::create(&mut store, &rent("5000", 1, d(2024, 1, 1), None), today).unwrap();

    let patch = RecurringExpensePatch {
        monthly_amount: Some(dec("6000")),
        ..Default::default()
    };
    recurring::update(&mut store, created.id, &patch, today).unwrap();

    let txns = store.transactions().unwrap();
    assert_eq!(txns.len(), 15);
    assert!(txns.iter().all(|t| t.amount == dec("6000")));
    assert!(!txns.iter().any(|t| t.amount == dec("5000")));
}

#[test]
fn active_toggle_leaves_schedule_alone() {
    let mut store = MemStore::new();
    let today = d(2024, 3, 10);
    let created =
        recurring::create(&mut store, &rent("5000", 1, d(2024, 1, 1), None), today).unwrap();
    let before = store.transactions().unwrap().len();

    let patch = RecurringExpensePatch {
        is_active: Some(false),
        ..Default::default()
    };
    let updated = recurring::update(&mut store, created.id, &patch, today).unwrap();
    assert!(!updated.is_active);
    assert_eq!(store.transactions().unwrap().len(), before);
}

#[test]
fn delete_removes_generated_transactions() {
    let mut store = MemStore::new();
    let today = d(2024, 3, 10);
    let created =
        recurring::create(&mut store, &rent("5000", 1, d(2024, 1, 1), None), today).unwrap();
    recurring::delete(&mut store, created.id).unwrap();
    assert!(store.transactions().unwrap().is_empty());
    assert!(store.recurring_expense(created.id).is_err());
}
