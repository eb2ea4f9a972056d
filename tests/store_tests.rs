// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use quincena::db;
use quincena::models::*;
use quincena::store::{SqliteStore, Store};
use rust_decimal::Decimal;

fn setup() -> SqliteStore {
    SqliteStore::new(db::open_in_memory().unwrap())
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

#[test]
fn default_categories_are_seeded_once() {
    let store = setup();
    let cats = store.categories().unwrap();
    assert_eq!(cats.len(), 10);
    assert!(cats.iter().any(|c| c.name == "Otros"));
    assert!(cats.iter().all(|c| !c.is_custom));
}

#[test]
fn transaction_roundtrip_keeps_decimals_and_tags() {
    let mut store = setup();
    let cats = store.categories().unwrap();
    let tag_ids = vec![cats[0].id, cats[1].id];

    let created = store
        .create_transaction(&NewTransaction {
            r#type: TxnType::Expense,
            amount: dec("1234.56"),
            description: "Súper".into(),
            tags: tag_ids.clone(),
            date: d(2024, 3, 10),
            is_recurring: false,
            credit_card_id: None,
            source_id: None,
        })
        .unwrap();

    let fetched = store.transaction(created.id).unwrap();
    assert_eq!(fetched.amount, dec("1234.56"));
    assert_eq!(fetched.tags, tag_ids);
    assert_eq!(fetched.date, d(2024, 3, 10));
}

#[test]
fn update_replaces_tags_and_missing_id_errors() {
    let mut store = setup();
    let cats = store.categories().unwrap();
    let created = store
        .create_transaction(&NewTransaction {
            r#type: TxnType::Expense,
            amount: dec("10"),
            description: "x".into(),
            tags: vec![cats[0].id],
            date: d(2024, 3, 10),
            is_recurring: false,
            credit_card_id: None,
            source_id: None,
        })
        .unwrap();

    let updated = store
        .update_transaction(
            created.id,
            &NewTransaction {
                r#type: TxnType::Expense,
                amount: dec("20"),
                description: "y".into(),
                tags: vec![cats[2].id],
                date: d(2024, 3, 11),
                is_recurring: false,
                credit_card_id: None,
                source_id: None,
            },
        )
        .unwrap();
    assert_eq!(updated.amount, dec("20"));
    assert_eq!(updated.tags, vec![cats[2].id]);

    let missing = store.update_transaction(
        9999,
        &NewTransaction {
            r#type: TxnType::Income,
            amount: dec("1"),
            description: "z".into(),
            tags: vec![],
            date: d(2024, 3, 11),
            is_recurring: false,
            credit_card_id: None,
            source_id: None,
        },
    );
    assert!(missing.unwrap_err().is_not_found());
}

#[test]
fn validation_rejects_before_any_write() {
    let mut store = setup();
    let bad = store.create_transaction(&NewTransaction {
        r#type: TxnType::Expense,
        amount: Decimal::ZERO,
        description: "free?".into(),
        tags: vec![],
        date: d(2024, 3, 10),
        is_recurring: false,
        credit_card_id: None,
        source_id: None,
    });
    assert!(bad.is_err());
    assert!(store.transactions().unwrap().is_empty());

    let bad_card = store.create_credit_card(&NewCreditCard {
        bank: "B".into(),
        name: "C".into(),
        last4_digits: "0000".into(),
        color: "#fff".into(),
        cut_day: 32,
        payment_days: 20,
        annual_interest_rate: Decimal::ZERO,
        moratory_interest_rate: Decimal::ZERO,
        min_payment_percentage: Decimal::ZERO,
        credit_limit: dec("1000"),
        current_balance: Decimal::ZERO,
    });
    assert!(bad_card.is_err());
}

#[test]
fn card_balance_update_recomputes_available_credit() {
    let mut store = setup();
    let card = store
        .create_credit_card(&NewCreditCard {
            bank: "BBVA".into(),
            name: "Azul".into(),
            last4_digits: "1234".into(),
            color: "#004481".into(),
            cut_day: 15,
            payment_days: 20,
            annual_interest_rate: dec("45.9"),
            moratory_interest_rate: dec("60"),
            min_payment_percentage: dec("5"),
            credit_limit: dec("50000"),
            current_balance: dec("10000"),
        })
        .unwrap();
    assert_eq!(card.available_credit, dec("40000"));

    let updated = store.set_card_balance(card.id, dec("12500.50")).unwrap();
    assert_eq!(updated.available_credit, dec("37499.50"));
    assert_eq!(updated.annual_interest_rate, dec("45.9"));
}

#[test]
fn purchase_delete_cascades_to_payments() {
    let mut store = setup();
    let purchase = store
        .create_installment_purchase(
            &NewInstallmentPurchase {
                name: "TV".into(),
                total_amount: dec("9000"),
                number_of_months: 3,
                start_date: d(2024, 1, 5),
                description: None,
                credit_card_id: None,
            },
            dec("3000"),
        )
        .unwrap();
    for k in 1..=3u32 {
        store
            .create_installment_payment(&NewInstallmentPayment {
                purchase_id: purchase.id,
                amount: dec("3000"),
                due_date: d(2024, k, 5),
                status: PaymentStatus::Pending,
                payment_number: k,
            })
            .unwrap();
    }
    assert_eq!(store.installment_payments().unwrap().len(), 3);

    store.delete_installment_purchase(purchase.id).unwrap();
    assert!(store.installment_payments().unwrap().is_empty());
}

#[test]
fn card_payment_upsert_is_keyed_by_cycle() {
    let mut store = setup();
    let card = store
        .create_credit_card(&NewCreditCard {
            bank: "BBVA".into(),
            name: "Azul".into(),
            last4_digits: "1234".into(),
            color: "#004481".into(),
            cut_day: 15,
            payment_days: 20,
            annual_interest_rate: Decimal::ZERO,
            moratory_interest_rate: Decimal::ZERO,
            min_payment_percentage: Decimal::ZERO,
            credit_limit: dec("50000"),
            current_balance: Decimal::ZERO,
        })
        .unwrap();

    let first = store
        .upsert_card_payment(
            card.id,
            d(2023, 12, 16),
            d(2024, 1, 15),
            dec("4500"),
            PaymentStatus::Pending,
            None,
        )
        .unwrap();
    let second = store
        .upsert_card_payment(
            card.id,
            d(2023, 12, 16),
            d(2024, 1, 15),
            dec("4750"),
            PaymentStatus::Paid,
            Some(d(2024, 2, 3)),
        )
        .unwrap();
    assert_eq!(first.id, second.id);

    let all = store.card_payments().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].amount, dec("4750"));
    assert_eq!(all[0].status, PaymentStatus::Paid);
}

#[test]
fn opportunities_round_trip() {
    let mut store = setup();
    store
        .create_investment_opportunity(&NewInvestmentOpportunity {
            r#type: "fixed_income".into(),
            name: "Cetes 28".into(),
            expected_return: 10.5,
            risk_level: "low".into(),
            min_amount: dec("100"),
            description: None,
        })
        .unwrap();
    let all = store.investment_opportunities().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "Cetes 28");
    assert!(all[0].is_active);
    assert_eq!(all[0].min_amount, dec("100"));
}

#[test]
fn deleting_card_detaches_transactions() {
    let mut store = setup();
    let card = store
        .create_credit_card(&NewCreditCard {
            bank: "BBVA".into(),
            name: "Azul".into(),
            last4_digits: "1234".into(),
            color: "#004481".into(),
            cut_day: 15,
            payment_days: 20,
            annual_interest_rate: Decimal::ZERO,
            moratory_interest_rate: Decimal::ZERO,
            min_payment_percentage: Decimal::ZERO,
            credit_limit: dec("50000"),
            current_balance: Decimal::ZERO,
        })
        .unwrap();
    let txn = store
        .create_transaction(&NewTransaction {
            r#type: TxnType::Expense,
            amount: dec("100"),
            description: "swipe".into(),
            tags: vec![],
            date: d(2024, 3, 10),
            is_recurring: false,
            credit_card_id: Some(card.id),
            source_id: None,
        })
        .unwrap();

    store.delete_credit_card(card.id).unwrap();
    let detached = store.transaction(txn.id).unwrap();
    assert_eq!(detached.credit_card_id, None);
}
