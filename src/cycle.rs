// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Billing-cycle resolution for credit cards.
//!
//! A card's cycle is fully determined by its cut day: the cycle ends on the
//! cut date (inclusive) and starts the day after the previous cut date, so
//! consecutive cycles never overlap. The payment for a cycle falls
//! `payment_days` calendar days after the cut, which usually lands in the
//! following month; resolving "which cycle is paid in month M" therefore
//! needs a small backward search.

use crate::dates::{self, Interval};
use crate::error::Result;
use crate::models::CreditCard;
use chrono::{Datelike, Days, NaiveDate};

/// One resolved billing cycle: `[start, end]` inclusive, cut on `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cycle {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub due_date: NaiveDate,
}

/// The card's cut date inside a given month, day clamped to month length.
pub fn cut_date_in(card: &CreditCard, year: i32, month: u32) -> Result<NaiveDate> {
    dates::clamped_day(year, month, card.cut_day)
}

/// Most recent cut date on or before `reference`.
pub fn last_cut_date(card: &CreditCard, reference: NaiveDate) -> Result<NaiveDate> {
    let this_month = cut_date_in(card, reference.year(), reference.month())?;
    if this_month > reference {
        let (y, m) = dates::shift_month(reference.year(), reference.month(), -1);
        cut_date_in(card, y, m)
    } else {
        Ok(this_month)
    }
}

/// Soonest cut date on or after `reference`.
pub fn next_cut_date(card: &CreditCard, reference: NaiveDate) -> Result<NaiveDate> {
    let this_month = cut_date_in(card, reference.year(), reference.month())?;
    if this_month < reference {
        let (y, m) = dates::shift_month(reference.year(), reference.month(), 1);
        cut_date_in(card, y, m)
    } else {
        Ok(this_month)
    }
}

/// Payment deadline for a cycle cut on `cut_date`.
pub fn payment_due_date(card: &CreditCard, cut_date: NaiveDate) -> NaiveDate {
    cut_date + Days::new(card.payment_days as u64)
}

/// The cycle ending at `cut_date`: starts the day after the previous month's
/// cut date.
pub fn cycle_ending_at(card: &CreditCard, cut_date: NaiveDate) -> Result<Cycle> {
    let (py, pm) = dates::shift_month(cut_date.year(), cut_date.month(), -1);
    let previous_cut = cut_date_in(card, py, pm)?;
    Ok(Cycle {
        start: previous_cut + Days::new(1),
        end: cut_date,
        due_date: payment_due_date(card, cut_date),
    })
}

/// The cycle `reference` falls inside: previous cut (exclusive) through the
/// next cut (inclusive). On the cut day itself the closing cycle wins.
pub fn current_cycle(card: &CreditCard, reference: NaiveDate) -> Result<Cycle> {
    let last = last_cut_date(card, reference - Days::new(1))?;
    let next = next_cut_date(card, reference)?;
    Ok(Cycle {
        start: last + Days::new(1),
        end: next,
        due_date: payment_due_date(card, next),
    })
}

/// Finds the billing cycle whose payment due date lands inside the target
/// month. Candidate cut dates are taken from two months before through one
/// month after the target; the first hit wins. `None` means no cycle of this
/// card pays in that month and the caller should skip the card.
pub fn find_cycle_for_payment_month(
    card: &CreditCard,
    year: i32,
    month: u32,
) -> Result<Option<Cycle>> {
    let target = dates::month_interval(year, month)?;
    for offset in -2..=1 {
        let (y, m) = dates::shift_month(year, month, offset);
        let cut = cut_date_in(card, y, m)?;
        let due = payment_due_date(card, cut);
        if dates::is_within(due, target) {
            return Ok(Some(cycle_ending_at(card, cut)?));
        }
    }
    Ok(None)
}

/// Inclusive cycle membership.
pub fn in_cycle(date: NaiveDate, cycle: &Cycle) -> bool {
    dates::is_within(date, Interval::new(cycle.start, cycle.end))
}
