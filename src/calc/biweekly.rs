// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Biweekly spending availability.
//!
//! Each month splits into two pay periods (days 1-15 and 16-end). A period's
//! available money is half the monthly income minus the fixed expenses
//! attributable to the period minus the pending installments falling due
//! inside it.

use crate::dates;
use crate::error::{Error, Result};
use crate::models::{FixedExpense, Frequency, InstallmentPayment, PaymentStatus};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct BiweeklyAvailability {
    pub period_start: chrono::NaiveDate,
    pub period_end: chrono::NaiveDate,
    pub income_half: Decimal,
    pub fixed_expenses: Decimal,
    pub installments_due: Decimal,
    pub available: Decimal,
}

fn period_share(expense: &FixedExpense) -> Decimal {
    match expense.frequency {
        // A monthly bill weighs half on each period; a biweekly one hits
        // both in full; a yearly one spreads over the 24 periods.
        Frequency::Monthly => expense.amount / Decimal::from(2),
        Frequency::Biweekly => expense.amount,
        Frequency::Yearly => expense.amount / Decimal::from(24),
    }
}

/// Availability for period 1 (days 1-15) or 2 (day 16 onward) of a month.
pub fn availability(
    monthly_income: Decimal,
    fixed: &[FixedExpense],
    installment_payments: &[InstallmentPayment],
    year: i32,
    month: u32,
    period: u8,
) -> Result<BiweeklyAvailability> {
    let periods = dates::biweekly_periods(year, month)?;
    let window = match period {
        1 => periods[0],
        2 => periods[1],
        other => {
            return Err(Error::validation(format!(
                "biweekly period must be 1 or 2, got {}",
                other
            )));
        }
    };

    let fixed_total: Decimal = fixed
        .iter()
        .filter(|e| {
            e.start_date <= window.end && e.end_date.map_or(true, |end| end >= window.start)
        })
        .map(period_share)
        .sum();

    let installments_due: Decimal = installment_payments
        .iter()
        .filter(|p| p.status == PaymentStatus::Pending && dates::is_within(p.due_date, window))
        .map(|p| p.amount)
        .sum();

    let income_half = monthly_income / Decimal::from(2);
    Ok(BiweeklyAvailability {
        period_start: window.start,
        period_end: window.end,
        income_half,
        fixed_expenses: fixed_total,
        installments_due,
        available: income_half - fixed_total - installments_due,
    })
}
