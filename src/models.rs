// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::Error;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxnType {
    Income,
    Expense,
}

impl TxnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxnType::Income => "income",
            TxnType::Expense => "expense",
        }
    }

    pub fn parse(s: &str) -> Result<Self, Error> {
        match s {
            "income" => Ok(TxnType::Income),
            "expense" => Ok(TxnType::Expense),
            other => Err(Error::validation(format!(
                "unknown transaction type '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
        }
    }

    pub fn parse(s: &str) -> Result<Self, Error> {
        match s {
            "pending" => Ok(PaymentStatus::Pending),
            "paid" => Ok(PaymentStatus::Paid),
            other => Err(Error::validation(format!(
                "unknown payment status '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Monthly,
    Yearly,
    Biweekly,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Monthly => "monthly",
            Frequency::Yearly => "yearly",
            Frequency::Biweekly => "biweekly",
        }
    }

    pub fn parse(s: &str) -> Result<Self, Error> {
        match s {
            "monthly" => Ok(Frequency::Monthly),
            "yearly" => Ok(Frequency::Yearly),
            "biweekly" => Ok(Frequency::Biweekly),
            other => Err(Error::validation(format!("unknown frequency '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub color: String,
    pub icon: String,
    pub is_custom: bool,
}

/// A single income or expense record. `tags` holds category ids (possibly
/// empty); `source_id` points back at the installment purchase or recurring
/// expense that generated it, `None` for hand-entered transactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub r#type: TxnType,
    pub amount: Decimal,
    pub description: String,
    pub tags: Vec<i64>,
    pub date: NaiveDate,
    pub is_recurring: bool,
    pub credit_card_id: Option<i64>,
    pub source_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTransaction {
    pub r#type: TxnType,
    pub amount: Decimal,
    pub description: String,
    pub tags: Vec<i64>,
    pub date: NaiveDate,
    pub is_recurring: bool,
    pub credit_card_id: Option<i64>,
    pub source_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditCard {
    pub id: i64,
    pub bank: String,
    pub name: String,
    pub last4_digits: String,
    pub color: String,
    /// Day of month (1-31) the billing cycle closes.
    pub cut_day: u32,
    /// Calendar days after the cut date to pay without interest.
    pub payment_days: i64,
    pub annual_interest_rate: Decimal,
    pub moratory_interest_rate: Decimal,
    pub min_payment_percentage: Decimal,
    pub credit_limit: Decimal,
    pub current_balance: Decimal,
    /// Always credit_limit - current_balance; recomputed on balance change.
    pub available_credit: Decimal,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCreditCard {
    pub bank: String,
    pub name: String,
    pub last4_digits: String,
    pub color: String,
    pub cut_day: u32,
    pub payment_days: i64,
    pub annual_interest_rate: Decimal,
    pub moratory_interest_rate: Decimal,
    pub min_payment_percentage: Decimal,
    pub credit_limit: Decimal,
    pub current_balance: Decimal,
}

/// Paid/pending bookkeeping for one card billing cycle, keyed by
/// (card, cycle_start, cycle_end).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditCardPayment {
    pub id: i64,
    pub card_id: i64,
    pub cycle_start: NaiveDate,
    pub cycle_end: NaiveDate,
    pub amount: Decimal,
    pub status: PaymentStatus,
    pub paid_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallmentPurchase {
    pub id: i64,
    pub name: String,
    pub total_amount: Decimal,
    pub number_of_months: u32,
    pub monthly_payment: Decimal,
    pub start_date: NaiveDate,
    pub description: Option<String>,
    pub credit_card_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewInstallmentPurchase {
    pub name: String,
    pub total_amount: Decimal,
    pub number_of_months: u32,
    pub start_date: NaiveDate,
    pub description: Option<String>,
    pub credit_card_id: Option<i64>,
}

/// Partial update for an installment purchase; `None` leaves a field alone.
#[derive(Debug, Clone, Default)]
pub struct InstallmentPurchasePatch {
    pub name: Option<String>,
    pub total_amount: Option<Decimal>,
    pub number_of_months: Option<u32>,
    pub start_date: Option<NaiveDate>,
    pub description: Option<Option<String>>,
    pub credit_card_id: Option<Option<i64>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallmentPayment {
    pub id: i64,
    pub purchase_id: i64,
    pub amount: Decimal,
    pub due_date: NaiveDate,
    pub paid_date: Option<NaiveDate>,
    pub status: PaymentStatus,
    /// 1-based position within the purchase's schedule.
    pub payment_number: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewInstallmentPayment {
    pub purchase_id: i64,
    pub amount: Decimal,
    pub due_date: NaiveDate,
    pub status: PaymentStatus,
    pub payment_number: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurringExpense {
    pub id: i64,
    pub name: String,
    /// rent | car_loan | mortgage | other
    pub r#type: String,
    pub monthly_amount: Decimal,
    /// Day of month (1-31); clamped to shorter months at generation time.
    pub payment_day: u32,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRecurringExpense {
    pub name: String,
    pub r#type: String,
    pub monthly_amount: Decimal,
    pub payment_day: u32,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub description: Option<String>,
}

/// Partial update; editing any of the schedule-bearing fields triggers full
/// regeneration of the generated transactions.
#[derive(Debug, Clone, Default)]
pub struct RecurringExpensePatch {
    pub name: Option<String>,
    pub monthly_amount: Option<Decimal>,
    pub payment_day: Option<u32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<Option<NaiveDate>>,
    pub is_active: Option<bool>,
}

impl RecurringExpensePatch {
    /// True when the patch touches a field that drives the schedule.
    pub fn reshapes_schedule(&self) -> bool {
        self.name.is_some()
            || self.monthly_amount.is_some()
            || self.payment_day.is_some()
            || self.start_date.is_some()
            || self.end_date.is_some()
    }
}

/// Fixed obligation used by the biweekly availability view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedExpense {
    pub id: i64,
    pub name: String,
    pub amount: Decimal,
    pub frequency: Frequency,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFixedExpense {
    pub name: String,
    pub amount: Decimal,
    pub frequency: Frequency,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    pub id: i64,
    /// cash | bank | investment | other
    pub r#type: String,
    pub name: String,
    pub value: Decimal,
    pub currency: String,
    /// Signed yearly percentage used to project the current value.
    pub annual_value_change: f64,
    pub purchase_date: NaiveDate,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAsset {
    pub r#type: String,
    pub name: String,
    pub value: Decimal,
    pub currency: String,
    pub annual_value_change: f64,
    pub purchase_date: NaiveDate,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Liability {
    pub id: i64,
    /// credit_card | loan | mortgage | other
    pub r#type: String,
    pub name: String,
    pub amount: Decimal,
    pub interest_rate: Option<Decimal>,
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLiability {
    pub r#type: String,
    pub name: String,
    pub amount: Decimal,
    pub interest_rate: Option<Decimal>,
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Investment {
    pub id: i64,
    pub symbol: Option<String>,
    /// stock | bond | fund | other
    pub r#type: String,
    pub quantity: Decimal,
    pub purchase_price: Decimal,
    pub purchase_date: NaiveDate,
    pub current_price: Decimal,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewInvestment {
    pub symbol: Option<String>,
    pub r#type: String,
    pub quantity: Decimal,
    pub purchase_price: Decimal,
    pub purchase_date: NaiveDate,
    pub current_price: Decimal,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentOpportunity {
    pub id: i64,
    /// fixed_income | variable_income
    pub r#type: String,
    pub name: String,
    pub expected_return: f64,
    pub risk_level: String,
    pub min_amount: Decimal,
    pub description: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewInvestmentOpportunity {
    pub r#type: String,
    pub name: String,
    pub expected_return: f64,
    pub risk_level: String,
    pub min_amount: Decimal,
    pub description: Option<String>,
}
