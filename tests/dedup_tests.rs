// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use quincena::dedup;
use quincena::models::{Transaction, TxnType};
use quincena::statement::ExtractedTransaction;
use rust_decimal::Decimal;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn stored(id: i64, amount: &str, description: &str, date: NaiveDate, card: i64) -> Transaction {
    Transaction {
        id,
        r#type: TxnType::Expense,
        amount: dec(amount),
        description: description.into(),
        tags: vec![],
        date,
        is_recurring: false,
        credit_card_id: Some(card),
        source_id: None,
    }
}

fn incoming(amount: &str, description: &str, date: NaiveDate) -> ExtractedTransaction {
    ExtractedTransaction {
        date,
        amount: dec(amount),
        description: description.into(),
        category: None,
    }
}

#[test]
fn normalize_strips_case_punctuation_and_whitespace() {
    assert_eq!(dedup::normalize("WAL-MART  Súper #1234"), "walmart súper 1234");
    assert_eq!(dedup::normalize("  OXXO   GAS. "), "oxxo gas");
}

#[test]
fn exact_match_after_normalization_is_duplicate() {
    let existing = vec![stored(1, "523.40", "WALMART SUPER", d(2024, 3, 10), 1)];
    let check = dedup::check_duplicate(
        &incoming("523.40", "Walmart Super.", d(2024, 3, 10)),
        1,
        &existing,
    );
    assert!(check.is_duplicate);
    assert_eq!(check.existing_id, Some(1));
    assert!(check.reason.unwrap().contains("WALMART SUPER"));
}

#[test]
fn containment_needs_enough_length_overlap() {
    let existing = vec![stored(1, "100", "walmart super center", d(2024, 3, 10), 1)];
    // 20 of 23 characters: contained and long enough.
    let close = dedup::check_duplicate(
        &incoming("100", "walmart super center mx", d(2024, 3, 10)),
        1,
        &existing,
    );
    assert!(close.is_duplicate);

    // "walmart" alone is only 7 of 20 characters: not enough.
    let short = dedup::check_duplicate(&incoming("100", "walmart", d(2024, 3, 10)), 1, &existing);
    assert!(!short.is_duplicate);
}

#[test]
fn levenshtein_catches_small_typos() {
    assert_eq!(dedup::levenshtein("kitten", "sitting"), 3);
    let existing = vec![stored(1, "100", "walmart super", d(2024, 3, 10), 1)];
    // One transposition: similarity 11/13.
    let check = dedup::check_duplicate(
        &incoming("100", "walmart supre", d(2024, 3, 10)),
        1,
        &existing,
    );
    assert!(check.is_duplicate);

    let far = dedup::check_duplicate(&incoming("100", "oxxo gas", d(2024, 3, 10)), 1, &existing);
    assert!(!far.is_duplicate);
}

#[test]
fn amount_and_date_tolerances_gate_candidates() {
    let existing = vec![stored(1, "100.00", "walmart super", d(2024, 3, 10), 1)];
    // One cent off and one day off still qualifies.
    let near = dedup::check_duplicate(
        &incoming("100.01", "walmart super", d(2024, 3, 11)),
        1,
        &existing,
    );
    assert!(near.is_duplicate);

    // Two cents off: not a candidate, whatever the description.
    let off_amount = dedup::check_duplicate(
        &incoming("100.02", "walmart super", d(2024, 3, 10)),
        1,
        &existing,
    );
    assert!(!off_amount.is_duplicate);

    // Two days off: not a candidate.
    let off_date = dedup::check_duplicate(
        &incoming("100.00", "walmart super", d(2024, 3, 12)),
        1,
        &existing,
    );
    assert!(!off_date.is_duplicate);
}

#[test]
fn different_card_is_never_a_duplicate() {
    let existing = vec![stored(1, "100", "walmart super", d(2024, 3, 10), 2)];
    let check = dedup::check_duplicate(
        &incoming("100", "walmart super", d(2024, 3, 10)),
        1,
        &existing,
    );
    assert!(!check.is_duplicate);
}

#[test]
fn batch_evaluates_each_row_independently() {
    let existing = vec![stored(1, "100", "walmart super", d(2024, 3, 10), 1)];
    let rows = vec![
        incoming("100", "WALMART SUPER", d(2024, 3, 10)),
        incoming("85.50", "oxxo gas", d(2024, 3, 11)),
    ];
    let checks = dedup::check_batch(&rows, 1, &existing);
    assert_eq!(checks.len(), 2);
    assert!(checks[0].is_duplicate);
    assert!(!checks[1].is_duplicate);
}
