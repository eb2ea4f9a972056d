// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Per-category expense bucketing.
//!
//! A transaction with several valid tags contributes its full amount to each
//! of those buckets, so bucket totals may exceed the month's expenses; the
//! percentages stay relative to real spending. Untagged (or all-invalid-tag)
//! transactions fall into a single "Sin categoría" bucket.

use crate::dates;
use crate::error::Result;
use crate::models::{Category, Transaction, TxnType};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use std::collections::BTreeMap;

pub const UNCATEGORIZED: &str = "Sin categoría";

#[derive(Debug, Clone, Serialize)]
pub struct CategoryBucket {
    pub name: String,
    pub color: String,
    pub icon: String,
    pub total: Decimal,
    /// Share of the window's real expense total, 0 when there are none.
    pub percentage: f64,
    pub transaction_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryChange {
    pub name: String,
    pub current: Decimal,
    pub previous: Decimal,
    pub change: Decimal,
    /// 0 when the previous month had nothing in this bucket.
    pub change_percentage: f64,
}

fn expense_in_window(txn: &Transaction, window: Option<dates::Interval>) -> bool {
    txn.r#type == TxnType::Expense
        && window.map_or(true, |w| dates::is_within(txn.date, w))
}

/// Buckets expenses by category, optionally restricted to one month, sorted
/// by total descending.
pub fn analyze(
    transactions: &[Transaction],
    categories: &[Category],
    year: Option<i32>,
    month: Option<u32>,
) -> Result<Vec<CategoryBucket>> {
    let window = match (year, month) {
        (Some(y), Some(m)) => Some(dates::month_interval(y, m)?),
        _ => None,
    };

    let mut totals: BTreeMap<String, (Decimal, usize)> = BTreeMap::new();
    let mut expense_total = Decimal::ZERO;

    for txn in transactions {
        if !expense_in_window(txn, window) {
            continue;
        }
        expense_total += txn.amount;
        let valid: Vec<&Category> = txn
            .tags
            .iter()
            .filter_map(|id| categories.iter().find(|c| c.id == *id))
            .collect();
        if valid.is_empty() {
            let slot = totals.entry(UNCATEGORIZED.to_string()).or_default();
            slot.0 += txn.amount;
            slot.1 += 1;
        } else {
            for cat in valid {
                let slot = totals.entry(cat.name.clone()).or_default();
                slot.0 += txn.amount;
                slot.1 += 1;
            }
        }
    }

    let mut out: Vec<CategoryBucket> = totals
        .into_iter()
        .map(|(name, (total, count))| {
            let (color, icon) = categories
                .iter()
                .find(|c| c.name == name)
                .map(|c| (c.color.clone(), c.icon.clone()))
                .unwrap_or_else(|| ("#6b7280".to_string(), "❓".to_string()));
            let percentage = if expense_total.is_zero() {
                0.0
            } else {
                (total / expense_total * Decimal::from(100))
                    .to_f64()
                    .unwrap_or(0.0)
            };
            CategoryBucket {
                name,
                color,
                icon,
                total,
                percentage,
                transaction_count: count,
            }
        })
        .collect();
    out.sort_by(|a, b| b.total.cmp(&a.total));
    Ok(out)
}

pub fn top(buckets: &[CategoryBucket], n: usize) -> Vec<CategoryBucket> {
    buckets.iter().take(n).cloned().collect()
}

/// Month-over-month comparison over the union of both months' buckets.
pub fn compare_month_to_month(
    transactions: &[Transaction],
    categories: &[Category],
    current: (i32, u32),
    previous: (i32, u32),
) -> Result<Vec<CategoryChange>> {
    let now = analyze(transactions, categories, Some(current.0), Some(current.1))?;
    let before = analyze(transactions, categories, Some(previous.0), Some(previous.1))?;

    let mut names: Vec<String> = now.iter().map(|b| b.name.clone()).collect();
    for b in &before {
        if !names.contains(&b.name) {
            names.push(b.name.clone());
        }
    }

    let mut out = Vec::with_capacity(names.len());
    for name in names {
        let cur = now
            .iter()
            .find(|b| b.name == name)
            .map(|b| b.total)
            .unwrap_or(Decimal::ZERO);
        let prev = before
            .iter()
            .find(|b| b.name == name)
            .map(|b| b.total)
            .unwrap_or(Decimal::ZERO);
        let change = cur - prev;
        let change_percentage = if prev.is_zero() {
            0.0
        } else {
            (change / prev * Decimal::from(100)).to_f64().unwrap_or(0.0)
        };
        out.push(CategoryChange {
            name,
            current: cur,
            previous: prev,
            change,
            change_percentage,
        });
    }
    Ok(out)
}
