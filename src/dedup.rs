// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Duplicate detection for statement imports.
//!
//! A stored transaction is a candidate when it sits on the same card, within
//! one cent and within one calendar day of the incoming row. Candidate
//! descriptions are then compared normalized: exact match, containment with
//! enough length overlap, or Levenshtein similarity. The first matching
//! candidate decides; results are returned for the whole batch before
//! anything is persisted.

use crate::models::Transaction;
use crate::statement::ExtractedTransaction;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::Serialize;

const CONTAINMENT_MIN_RATIO: f64 = 0.7;
const SIMILARITY_MIN: f64 = 0.8;

static PUNCTUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{L}\p{N}\s]").expect("valid regex"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

#[derive(Debug, Clone, Serialize)]
pub struct DuplicateCheck {
    pub is_duplicate: bool,
    pub existing_id: Option<i64>,
    pub reason: Option<String>,
}

impl DuplicateCheck {
    fn clean() -> Self {
        DuplicateCheck {
            is_duplicate: false,
            existing_id: None,
            reason: None,
        }
    }

    fn duplicate(existing: &Transaction, how: &str) -> Self {
        DuplicateCheck {
            is_duplicate: true,
            existing_id: Some(existing.id),
            reason: Some(format!(
                "{} of \"{}\" on {}",
                how, existing.description, existing.date
            )),
        }
    }
}

/// Lowercase, punctuation stripped, whitespace collapsed.
pub fn normalize(description: &str) -> String {
    let lower = description.to_lowercase();
    let stripped = PUNCTUATION.replace_all(&lower, "");
    WHITESPACE.replace_all(stripped.trim(), " ").into_owned()
}

pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut cur = vec![0; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        cur[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            cur[j + 1] = (prev[j + 1] + 1).min(cur[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    prev[b.len()]
}

fn similar(a: &str, b: &str) -> Option<&'static str> {
    if a == b {
        return Some("exact match");
    }
    let (shorter, longer) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    if longer.contains(shorter) {
        let ratio = shorter.chars().count() as f64 / longer.chars().count() as f64;
        if ratio >= CONTAINMENT_MIN_RATIO {
            return Some("contained match");
        }
    }
    let max_len = a.chars().count().max(b.chars().count());
    if max_len > 0 {
        let similarity = 1.0 - levenshtein(a, b) as f64 / max_len as f64;
        if similarity >= SIMILARITY_MIN {
            return Some("close match");
        }
    }
    None
}

/// Compares one extracted row against the stored transactions of a card.
pub fn check_duplicate(
    candidate: &ExtractedTransaction,
    card_id: i64,
    existing: &[Transaction],
) -> DuplicateCheck {
    let tolerance = Decimal::new(1, 2);
    let normalized = normalize(&candidate.description);
    for txn in existing {
        if txn.credit_card_id != Some(card_id) {
            continue;
        }
        let amount_delta = (txn.amount - candidate.amount).abs();
        if amount_delta > tolerance {
            continue;
        }
        if (txn.date - candidate.date).num_days().abs() > 1 {
            continue;
        }
        if let Some(how) = similar(&normalized, &normalize(&txn.description)) {
            return DuplicateCheck::duplicate(txn, how);
        }
    }
    DuplicateCheck::clean()
}

/// Evaluates a whole extracted batch; one result per row, nothing persisted.
pub fn check_batch(
    extracted: &[ExtractedTransaction],
    card_id: i64,
    existing: &[Transaction],
) -> Vec<DuplicateCheck> {
    extracted
        .iter()
        .map(|row| check_duplicate(row, card_id, existing))
        .collect()
}
