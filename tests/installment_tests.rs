// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use quincena::models::{InstallmentPurchasePatch, NewInstallmentPurchase, PaymentStatus};
use quincena::schedule::installments;
use quincena::store::{MemStore, Store};
use rust_decimal::Decimal;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn purchase(total: &str, months: u32, start: NaiveDate) -> NewInstallmentPurchase {
    NewInstallmentPurchase {
        name: "Laptop".into(),
        total_amount: dec(total),
        number_of_months: months,
        start_date: start,
        description: None,
        credit_card_id: None,
    }
}

#[test]
fn schedule_splits_past_and_future() {
    let mut store = MemStore::new();
    let today = d(2024, 3, 10);
    // Start in January: Jan, Feb, Mar are realized; Apr, May, Jun pending.
    installments::create(&mut store, &purchase("6000", 6, d(2024, 1, 5)), today).unwrap();

    let txns = store.transactions().unwrap();
    let payments = store.installment_payments().unwrap();
    assert_eq!(txns.len(), 3);
    assert_eq!(payments.len(), 3);
    assert!(txns.iter().any(|t| t.description == "Laptop - Pago #1"));
    assert!(txns.iter().any(|t| t.date == d(2024, 3, 5)));
    assert_eq!(payments[0].due_date, d(2024, 4, 5));
    assert!(payments.iter().all(|p| p.status == PaymentStatus::Pending));
}

#[test]
fn occurrences_sum_exactly_to_total() {
    let mut store = MemStore::new();
    let today = d(2024, 3, 10);
    // 1000 / 3 rounds to 333.33; the last occurrence absorbs the extra cent.
    installments::create(&mut store, &purchase("1000", 3, d(2024, 3, 1)), today).unwrap();

    let txn_total: Decimal = store
        .transactions()
        .unwrap()
        .iter()
        .map(|t| t.amount)
        .sum();
    let pending_total: Decimal = store
        .installment_payments()
        .unwrap()
        .iter()
        .map(|p| p.amount)
        .sum();
    assert_eq!(txn_total + pending_total, dec("1000"));
    assert_eq!(installments::occurrence_amount(dec("1000"), 3, 1), dec("333.33"));
    assert_eq!(installments::occurrence_amount(dec("1000"), 3, 3), dec("333.34"));
}

#[test]
fn count_is_exactly_number_of_months() {
    let mut store = MemStore::new();
    let today = d(2024, 6, 1);
    installments::create(&mut store, &purchase("12000", 12, d(2024, 2, 20)), today).unwrap();
    let occurrences =
        store.transactions().unwrap().len() + store.installment_payments().unwrap().len();
    assert_eq!(occurrences, 12);
}

#[test]
fn day_31_start_clamps_in_short_months() {
    let mut store = MemStore::new();
    let today = d(2024, 1, 1);
    installments::create(&mut store, &purchase("4000", 4, d(2024, 1, 31)), today).unwrap();
    let payments = store.installment_payments().unwrap();
    assert_eq!(payments[0].due_date, d(2024, 2, 29));
    assert_eq!(payments[1].due_date, d(2024, 3, 31));
    assert_eq!(payments[2].due_date, d(2024, 4, 30));
}

#[test]
fn update_rebuilds_schedule_without_stale_rows() {
    let mut store = MemStore::new();
    let today = d(2024, 3, 10);
    let created =
        installments::create(&mut store, &purchase("6000", 6, d(2024, 1, 5)), today).unwrap();

    let patch = InstallmentPurchasePatch {
        number_of_months: Some(12),
        ..Default::default()
    };
    let updated = installments::update(&mut store, created.id, &patch, today).unwrap();
    assert_eq!(updated.monthly_payment, dec("500"));

    let occurrences =
        store.transactions().unwrap().len() + store.installment_payments().unwrap().len();
    assert_eq!(occurrences, 12);
    // No occurrence still carries the old 1000 monthly amount.
    assert!(
        store
            .transactions()
            .unwrap()
            .iter()
            .all(|t| t.amount == dec("500"))
    );
}

#[test]
fn delete_cascades_transactions_and_payments() {
    let mut store = MemStore::new();
    let today = d(2024, 3, 10);
    let created =
        installments::create(&mut store, &purchase("6000", 6, d(2024, 1, 5)), today).unwrap();
    // An unrelated hand-entered transaction must survive.
    store
        .create_transaction(&quincena::models::NewTransaction {
            r#type: quincena::models::TxnType::Expense,
            amount: dec("150"),
            description: "Tacos".into(),
            tags: vec![],
            date: today,
            is_recurring: false,
            credit_card_id: None,
            source_id: None,
        })
        .unwrap();

    installments::delete(&mut store, created.id).unwrap();
    let txns = store.transactions().unwrap();
    assert_eq!(txns.len(), 1);
    assert_eq!(txns[0].description, "Tacos");
    assert!(store.installment_payments().unwrap().is_empty());
    assert!(store.installment_purchase(created.id).is_err());
}

#[test]
fn mark_paid_and_total_pending() {
    let mut store = MemStore::new();
    let today = d(2024, 1, 1);
    installments::create(&mut store, &purchase("3000", 3, d(2024, 1, 15)), today).unwrap();
    let payments = store.installment_payments().unwrap();
    // Jan is the current month so payment #1 realized; #2 and #3 pending.
    assert_eq!(payments.len(), 2);

    installments::mark_paid(&mut store, payments[0].id, d(2024, 2, 14)).unwrap();
    assert_eq!(installments::total_pending(&store).unwrap(), dec("1000"));

    installments::mark_unpaid(&mut store, payments[0].id).unwrap();
    assert_eq!(installments::total_pending(&store).unwrap(), dec("2000"));
}

#[test]
fn reconcile_rolls_due_payments_into_transactions() {
    let mut store = MemStore::new();
    installments::create(&mut store, &purchase("6000", 6, d(2024, 1, 5)), d(2024, 1, 1)).unwrap();
    assert_eq!(store.transactions().unwrap().len(), 1);
    assert_eq!(store.installment_payments().unwrap().len(), 5);

    // Three months later, two more occurrences have come due.
    let moved = installments::reconcile(&mut store, d(2024, 3, 20)).unwrap();
    assert_eq!(moved, 2);
    assert_eq!(store.transactions().unwrap().len(), 3);
    assert_eq!(store.installment_payments().unwrap().len(), 3);

    // Occurrence count and sum survive the roll-forward.
    let total: Decimal = store
        .transactions()
        .unwrap()
        .iter()
        .map(|t| t.amount)
        .chain(store.installment_payments().unwrap().iter().map(|p| p.amount))
        .sum();
    assert_eq!(total, dec("6000"));

    // Running it again moves nothing.
    assert_eq!(installments::reconcile(&mut store, d(2024, 3, 20)).unwrap(), 0);
}
