// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use quincena::dedup;
use quincena::models::*;
use quincena::statement::{self, ExtractedTransaction};
use quincena::store::{MemStore, Store};
use rust_decimal::Decimal;
use std::io::Write;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn row(amount: &str, description: &str, category: Option<&str>) -> ExtractedTransaction {
    ExtractedTransaction {
        date: d(2024, 3, 10),
        amount: dec(amount),
        description: description.into(),
        category: category.map(|c| c.into()),
    }
}

fn store_with_card() -> (MemStore, i64) {
    let mut store = MemStore::new();
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
    (store, card.id)
}

#[test]
fn read_csv_parses_rows() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "date,amount,description,category").unwrap();
    writeln!(file, "2024-03-10,523.40,WALMART SUPER,Comida").unwrap();
    writeln!(file, "2024-03-11,85.50,OXXO GAS,").unwrap();
    file.flush().unwrap();

    let rows = statement::read_csv(file.path()).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].amount, dec("523.40"));
    assert_eq!(rows[0].category.as_deref(), Some("Comida"));
    assert_eq!(rows[1].date, d(2024, 3, 11));
}

#[test]
fn import_maps_categories_case_insensitively() {
    let (mut store, card_id) = store_with_card();
    let rows = vec![row("100", "tacos", Some("comida")), row("50", "misc", None)];
    let checks = dedup::check_batch(&rows, card_id, &store.transactions().unwrap());

    let outcome = statement::import(&mut store, card_id, &rows, &checks).unwrap();
    assert_eq!(outcome.saved, 2);

    let cats = store.categories().unwrap();
    let comida = cats.iter().find(|c| c.name == "Comida").unwrap().id;
    let otros = cats.iter().find(|c| c.name == "Otros").unwrap().id;
    let txns = store.transactions().unwrap();
    assert!(txns.iter().any(|t| t.tags == vec![comida]));
    assert!(txns.iter().any(|t| t.tags == vec![otros]));
    assert!(txns.iter().all(|t| t.credit_card_id == Some(card_id)));
}

#[test]
fn import_skips_flagged_duplicates() {
    let (mut store, card_id) = store_with_card();
    store
        .create_transaction(&NewTransaction {
            r#type: TxnType::Expense,
            amount: dec("523.40"),
            description: "WALMART SUPER".into(),
            tags: vec![],
            date: d(2024, 3, 10),
            is_recurring: false,
            credit_card_id: Some(card_id),
            source_id: None,
        })
        .unwrap();

    let rows = vec![
        row("523.40", "Walmart Super", None),
        row("85.50", "OXXO GAS", None),
    ];
    let checks = dedup::check_batch(&rows, card_id, &store.transactions().unwrap());
    let outcome = statement::import(&mut store, card_id, &rows, &checks).unwrap();
    assert_eq!(outcome.saved, 1);
    assert_eq!(outcome.skipped_duplicates, 1);
    assert_eq!(store.transactions().unwrap().len(), 2);
}

#[test]
fn import_counts_failures_and_keeps_prior_rows() {
    let (mut store, card_id) = store_with_card();
    let rows = vec![
        row("100", "tacos", None),
        // Zero amount fails validation; the batch keeps going.
        row("0", "glitch", None),
        row("50", "cafe", None),
    ];
    let checks = dedup::check_batch(&rows, card_id, &store.transactions().unwrap());
    let outcome = statement::import(&mut store, card_id, &rows, &checks).unwrap();
    assert_eq!(outcome.saved, 2);
    assert_eq!(outcome.failed, 1);
    assert_eq!(store.transactions().unwrap().len(), 2);
}
