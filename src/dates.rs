// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{Error, Result};
use chrono::{Datelike, Days, Months, NaiveDate};

/// Inclusive calendar-date interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Interval {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Interval { start, end }
    }
}

pub fn days_in_month(year: i32, month: u32) -> Result<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| Error::validation(format!("invalid month {}-{}", year, month)))?;
    let next = first + Months::new(1);
    Ok(next.pred_opt().map(|d| d.day()).unwrap_or(31))
}

/// First and last day of a calendar month.
pub fn month_interval(year: i32, month: u32) -> Result<Interval> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| Error::validation(format!("invalid month {}-{}", year, month)))?;
    let end = NaiveDate::from_ymd_opt(year, month, days_in_month(year, month)?)
        .ok_or_else(|| Error::validation(format!("invalid month {}-{}", year, month)))?;
    Ok(Interval::new(start, end))
}

/// Half-month split: days 1-15 and days 16-end.
pub fn biweekly_periods(year: i32, month: u32) -> Result<[Interval; 2]> {
    let whole = month_interval(year, month)?;
    let mid = NaiveDate::from_ymd_opt(year, month, 15)
        .ok_or_else(|| Error::validation(format!("invalid month {}-{}", year, month)))?;
    let second_start = mid + Days::new(1);
    Ok([
        Interval::new(whole.start, mid),
        Interval::new(second_start, whole.end),
    ])
}

pub fn is_within(date: NaiveDate, interval: Interval) -> bool {
    date >= interval.start && date <= interval.end
}

/// Month arithmetic with the day-of-month clamped to the target month's
/// length (Jan 31 + 1 month = Feb 28/29).
pub fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date + Months::new(months)
}

/// Walks a (year, month) pair by a signed month offset.
pub fn shift_month(year: i32, month: u32, offset: i32) -> (i32, u32) {
    let zero_based = year * 12 + month as i32 - 1 + offset;
    (zero_based.div_euclid(12), (zero_based.rem_euclid(12) + 1) as u32)
}

/// The day-of-month clamped date for a month that may be shorter than `day`.
pub fn clamped_day(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    let last = days_in_month(year, month)?;
    NaiveDate::from_ymd_opt(year, month, day.min(last))
        .ok_or_else(|| Error::validation(format!("invalid date {}-{}-{}", year, month, day)))
}

/// (year, month) of the month containing `date`.
pub fn year_month(date: NaiveDate) -> (i32, u32) {
    (date.year(), date.month())
}
