// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::cycle;
use crate::dates;
use crate::error::Result;
use crate::models::{Asset, CreditCard, Liability, Transaction, TxnType};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct MonthlySummary {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub balance: Decimal,
    pub transaction_count: usize,
}

/// Income/expense totals for one month.
///
/// For the current month a card expense only counts once it falls on or after
/// the card's most recent cut date: anything before the cut belongs to the
/// cycle that already closed and will be paid as part of that statement, so
/// it would double-count against this month. Past months are taken as-is.
pub fn monthly_summary(
    transactions: &[Transaction],
    cards: &[CreditCard],
    year: i32,
    month: u32,
    today: NaiveDate,
) -> Result<MonthlySummary> {
    let window = dates::month_interval(year, month)?;
    let is_current_month = (year, month) == (today.year(), today.month());

    let mut total_income = Decimal::ZERO;
    let mut total_expenses = Decimal::ZERO;
    let mut transaction_count = 0;

    for txn in transactions {
        if !dates::is_within(txn.date, window) {
            continue;
        }
        match txn.r#type {
            TxnType::Income => {
                total_income += txn.amount;
                transaction_count += 1;
            }
            TxnType::Expense => {
                if is_current_month {
                    if let Some(card_id) = txn.credit_card_id {
                        if let Some(card) = cards.iter().find(|c| c.id == card_id) {
                            let last_cut = cycle::last_cut_date(card, today)?;
                            if txn.date < last_cut {
                                continue;
                            }
                        }
                    }
                }
                total_expenses += txn.amount;
                transaction_count += 1;
            }
        }
    }

    Ok(MonthlySummary {
        total_income,
        total_expenses,
        balance: total_income - total_expenses,
        transaction_count,
    })
}

/// Total income recorded in the month.
pub fn monthly_income(transactions: &[Transaction], year: i32, month: u32) -> Result<Decimal> {
    let window = dates::month_interval(year, month)?;
    Ok(transactions
        .iter()
        .filter(|t| t.r#type == TxnType::Income && dates::is_within(t.date, window))
        .map(|t| t.amount)
        .sum())
}

/// Raw asset values minus raw liability amounts. Projection helpers are for
/// display only and never feed this number.
pub fn net_worth(assets: &[Asset], liabilities: &[Liability]) -> Decimal {
    let assets_total: Decimal = assets.iter().map(|a| a.value).sum();
    let liabilities_total: Decimal = liabilities.iter().map(|l| l.amount).sum();
    assets_total - liabilities_total
}
