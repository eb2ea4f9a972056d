// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Storage backends.
//!
//! Everything above this layer (schedulers, aggregation, commands) depends
//! only on the [`Store`] trait; the backend is picked at startup. `SqliteStore`
//! is the persistent default, `MemStore` backs `--ephemeral` runs and tests.

mod memory;
mod sqlite;

pub use memory::MemStore;
pub use sqlite::SqliteStore;

use crate::error::Result;
use crate::models::*;
use chrono::NaiveDate;
use rust_decimal::Decimal;

pub trait Store {
    // -- transactions --------------------------------------------------------
    fn transactions(&self) -> Result<Vec<Transaction>>;
    fn transaction(&self, id: i64) -> Result<Transaction>;
    fn transactions_in_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Transaction>>;
    fn create_transaction(&mut self, data: &NewTransaction) -> Result<Transaction>;
    fn update_transaction(&mut self, id: i64, data: &NewTransaction) -> Result<Transaction>;
    fn delete_transaction(&mut self, id: i64) -> Result<()>;

    // -- categories ----------------------------------------------------------
    fn categories(&self) -> Result<Vec<Category>>;
    fn create_category(&mut self, name: &str, color: &str, icon: &str) -> Result<Category>;

    // -- credit cards --------------------------------------------------------
    fn credit_cards(&self) -> Result<Vec<CreditCard>>;
    fn credit_card(&self, id: i64) -> Result<CreditCard>;
    fn create_credit_card(&mut self, data: &NewCreditCard) -> Result<CreditCard>;
    /// Sets the balance and recomputes `available_credit` in the same write.
    fn set_card_balance(&mut self, id: i64, balance: Decimal) -> Result<CreditCard>;
    fn delete_credit_card(&mut self, id: i64) -> Result<()>;

    // -- per-cycle card payment bookkeeping ----------------------------------
    fn card_payments(&self) -> Result<Vec<CreditCardPayment>>;
    fn upsert_card_payment(
        &mut self,
        card_id: i64,
        cycle_start: NaiveDate,
        cycle_end: NaiveDate,
        amount: Decimal,
        status: PaymentStatus,
        paid_date: Option<NaiveDate>,
    ) -> Result<CreditCardPayment>;

    // -- installment purchases + payments ------------------------------------
    fn installment_purchases(&self) -> Result<Vec<InstallmentPurchase>>;
    fn installment_purchase(&self, id: i64) -> Result<InstallmentPurchase>;
    fn create_installment_purchase(
        &mut self,
        data: &NewInstallmentPurchase,
        monthly_payment: Decimal,
    ) -> Result<InstallmentPurchase>;
    fn update_installment_purchase(&mut self, purchase: &InstallmentPurchase) -> Result<()>;
    /// Cascades to the purchase's payments.
    fn delete_installment_purchase(&mut self, id: i64) -> Result<()>;

    fn installment_payments(&self) -> Result<Vec<InstallmentPayment>>;
    fn installment_payment(&self, id: i64) -> Result<InstallmentPayment>;
    fn create_installment_payment(
        &mut self,
        data: &NewInstallmentPayment,
    ) -> Result<InstallmentPayment>;
    fn set_payment_status(
        &mut self,
        id: i64,
        status: PaymentStatus,
        paid_date: Option<NaiveDate>,
    ) -> Result<InstallmentPayment>;
    fn delete_installment_payment(&mut self, id: i64) -> Result<()>;

    // -- recurring expenses --------------------------------------------------
    fn recurring_expenses(&self) -> Result<Vec<RecurringExpense>>;
    fn recurring_expense(&self, id: i64) -> Result<RecurringExpense>;
    fn create_recurring_expense(&mut self, data: &NewRecurringExpense) -> Result<RecurringExpense>;
    fn update_recurring_expense(&mut self, expense: &RecurringExpense) -> Result<()>;
    fn delete_recurring_expense(&mut self, id: i64) -> Result<()>;

    // -- fixed expenses ------------------------------------------------------
    fn fixed_expenses(&self) -> Result<Vec<FixedExpense>>;
    fn create_fixed_expense(&mut self, data: &NewFixedExpense) -> Result<FixedExpense>;
    fn delete_fixed_expense(&mut self, id: i64) -> Result<()>;

    // -- assets / liabilities ------------------------------------------------
    fn assets(&self) -> Result<Vec<Asset>>;
    fn create_asset(&mut self, data: &NewAsset) -> Result<Asset>;
    fn delete_asset(&mut self, id: i64) -> Result<()>;

    fn liabilities(&self) -> Result<Vec<Liability>>;
    fn create_liability(&mut self, data: &NewLiability) -> Result<Liability>;
    fn delete_liability(&mut self, id: i64) -> Result<()>;

    // -- investments ---------------------------------------------------------
    fn investments(&self) -> Result<Vec<Investment>>;
    fn create_investment(&mut self, data: &NewInvestment) -> Result<Investment>;
    fn set_investment_price(&mut self, id: i64, price: Decimal) -> Result<Investment>;
    fn delete_investment(&mut self, id: i64) -> Result<()>;

    fn investment_opportunities(&self) -> Result<Vec<InvestmentOpportunity>>;
    fn create_investment_opportunity(
        &mut self,
        data: &NewInvestmentOpportunity,
    ) -> Result<InvestmentOpportunity>;
}

// Validation shared by both backends; rejects bad records before any write.

use crate::error::Error;

pub(crate) fn validate_transaction(t: &NewTransaction) -> Result<()> {
    if t.amount <= Decimal::ZERO {
        return Err(Error::validation("transaction amount must be positive"));
    }
    Ok(())
}

pub(crate) fn validate_card(c: &NewCreditCard) -> Result<()> {
    if !(1..=31).contains(&c.cut_day) {
        return Err(Error::validation("cut day must be between 1 and 31"));
    }
    if !(1..=60).contains(&c.payment_days) {
        return Err(Error::validation("payment days must be between 1 and 60"));
    }
    if c.credit_limit <= Decimal::ZERO {
        return Err(Error::validation("credit limit must be positive"));
    }
    Ok(())
}

pub(crate) fn validate_purchase(p: &NewInstallmentPurchase) -> Result<()> {
    if p.total_amount <= Decimal::ZERO {
        return Err(Error::validation("total amount must be positive"));
    }
    if p.number_of_months == 0 {
        return Err(Error::validation("number of months must be positive"));
    }
    Ok(())
}

pub(crate) fn validate_recurring(e: &NewRecurringExpense) -> Result<()> {
    if e.monthly_amount <= Decimal::ZERO {
        return Err(Error::validation("monthly amount must be positive"));
    }
    if !(1..=31).contains(&e.payment_day) {
        return Err(Error::validation("payment day must be between 1 and 31"));
    }
    if let Some(end) = e.end_date {
        if end <= e.start_date {
            return Err(Error::validation("end date must be after start date"));
        }
    }
    Ok(())
}
