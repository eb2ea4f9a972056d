// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{
    Store, validate_card, validate_purchase, validate_recurring, validate_transaction,
};
use crate::db::DEFAULT_CATEGORIES;
use crate::error::{Error, Result};
use crate::models::*;
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Backend for `--ephemeral` runs and tests. Holds everything in vectors and
/// mirrors the SQLite backend's ordering and cascade behavior so callers see
/// no difference.
pub struct MemStore {
    next_id: i64,
    txns: Vec<Transaction>,
    cats: Vec<Category>,
    cards: Vec<CreditCard>,
    card_payments: Vec<CreditCardPayment>,
    purchases: Vec<InstallmentPurchase>,
    payments: Vec<InstallmentPayment>,
    recurring: Vec<RecurringExpense>,
    fixed: Vec<FixedExpense>,
    assets: Vec<Asset>,
    liabilities: Vec<Liability>,
    investments: Vec<Investment>,
    opportunities: Vec<InvestmentOpportunity>,
}

impl MemStore {
    pub fn new() -> Self {
        let mut store = MemStore {
            next_id: 1,
            txns: Vec::new(),
            cats: Vec::new(),
            cards: Vec::new(),
            card_payments: Vec::new(),
            purchases: Vec::new(),
            payments: Vec::new(),
            recurring: Vec::new(),
            fixed: Vec::new(),
            assets: Vec::new(),
            liabilities: Vec::new(),
            investments: Vec::new(),
            opportunities: Vec::new(),
        };
        for (name, color, icon) in DEFAULT_CATEGORIES {
            let id = store.bump();
            store.cats.push(Category {
                id,
                name: (*name).into(),
                color: (*color).into(),
                icon: (*icon).into(),
                is_custom: false,
            });
        }
        store
    }

    fn bump(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl Default for MemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Store for MemStore {
    fn transactions(&self) -> Result<Vec<Transaction>> {
        let mut out = self.txns.clone();
        out.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        Ok(out)
    }

    fn transaction(&self, id: i64) -> Result<Transaction> {
        self.txns
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| Error::not_found("transaction", id))
    }

    fn transactions_in_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Transaction>> {
        Ok(self
            .transactions()?
            .into_iter()
            .filter(|t| t.date >= start && t.date <= end)
            .collect())
    }

    fn create_transaction(&mut self, data: &NewTransaction) -> Result<Transaction> {
        validate_transaction(data)?;
        let id = self.bump();
        let txn = Transaction {
            id,
            r#type: data.r#type,
            amount: data.amount,
            description: data.description.clone(),
            tags: data.tags.clone(),
            date: data.date,
            is_recurring: data.is_recurring,
            credit_card_id: data.credit_card_id,
            source_id: data.source_id,
        };
        self.txns.push(txn.clone());
        Ok(txn)
    }

    fn update_transaction(&mut self, id: i64, data: &NewTransaction) -> Result<Transaction> {
        validate_transaction(data)?;
        let txn = self
            .txns
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| Error::not_found("transaction", id))?;
        txn.r#type = data.r#type;
        txn.amount = data.amount;
        txn.description = data.description.clone();
        txn.tags = data.tags.clone();
        txn.date = data.date;
        txn.is_recurring = data.is_recurring;
        txn.credit_card_id = data.credit_card_id;
        txn.source_id = data.source_id;
        Ok(txn.clone())
    }

    fn delete_transaction(&mut self, id: i64) -> Result<()> {
        let before = self.txns.len();
        self.txns.retain(|t| t.id != id);
        if self.txns.len() == before {
            return Err(Error::not_found("transaction", id));
        }
        Ok(())
    }

    fn categories(&self) -> Result<Vec<Category>> {
        Ok(self.cats.clone())
    }

    fn create_category(&mut self, name: &str, color: &str, icon: &str) -> Result<Category> {
        if self.cats.iter().any(|c| c.name == name) {
            return Err(Error::validation(format!("category '{}' already exists", name)));
        }
        let id = self.bump();
        let cat = Category {
            id,
            name: name.into(),
            color: color.into(),
            icon: icon.into(),
            is_custom: true,
        };
        self.cats.push(cat.clone());
        Ok(cat)
    }

    fn credit_cards(&self) -> Result<Vec<CreditCard>> {
        Ok(self.cards.clone())
    }

    fn credit_card(&self, id: i64) -> Result<CreditCard> {
        self.cards
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| Error::not_found("credit card", id))
    }

    fn create_credit_card(&mut self, data: &NewCreditCard) -> Result<CreditCard> {
        validate_card(data)?;
        let id = self.bump();
        let card = CreditCard {
            id,
            bank: data.bank.clone(),
            name: data.name.clone(),
            last4_digits: data.last4_digits.clone(),
            color: data.color.clone(),
            cut_day: data.cut_day,
            payment_days: data.payment_days,
            annual_interest_rate: data.annual_interest_rate,
            moratory_interest_rate: data.moratory_interest_rate,
            min_payment_percentage: data.min_payment_percentage,
            credit_limit: data.credit_limit,
            current_balance: data.current_balance,
            available_credit: data.credit_limit - data.current_balance,
            is_active: true,
        };
        self.cards.push(card.clone());
        Ok(card)
    }

    fn set_card_balance(&mut self, id: i64, balance: Decimal) -> Result<CreditCard> {
        let card = self
            .cards
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| Error::not_found("credit card", id))?;
        card.current_balance = balance;
        card.available_credit = card.credit_limit - balance;
        Ok(card.clone())
    }

    fn delete_credit_card(&mut self, id: i64) -> Result<()> {
        let before = self.cards.len();
        self.cards.retain(|c| c.id != id);
        if self.cards.len() == before {
            return Err(Error::not_found("credit card", id));
        }
        // Same effect as the schema's foreign keys.
        self.card_payments.retain(|p| p.card_id != id);
        for t in &mut self.txns {
            if t.credit_card_id == Some(id) {
                t.credit_card_id = None;
            }
        }
        for p in &mut self.purchases {
            if p.credit_card_id == Some(id) {
                p.credit_card_id = None;
            }
        }
        Ok(())
    }

    fn card_payments(&self) -> Result<Vec<CreditCardPayment>> {
        let mut out = self.card_payments.clone();
        out.sort_by(|a, b| b.cycle_end.cmp(&a.cycle_end));
        Ok(out)
    }

    fn upsert_card_payment(
        &mut self,
        card_id: i64,
        cycle_start: NaiveDate,
        cycle_end: NaiveDate,
        amount: Decimal,
        status: PaymentStatus,
        paid_date: Option<NaiveDate>,
    ) -> Result<CreditCardPayment> {
        if let Some(existing) = self.card_payments.iter_mut().find(|p| {
            p.card_id == card_id && p.cycle_start == cycle_start && p.cycle_end == cycle_end
        }) {
            existing.amount = amount;
            existing.status = status;
            existing.paid_date = paid_date;
            return Ok(existing.clone());
        }
        let id = self.bump();
        let payment = CreditCardPayment {
            id,
            card_id,
            cycle_start,
            cycle_end,
            amount,
            status,
            paid_date,
        };
        self.card_payments.push(payment.clone());
        Ok(payment)
    }

    fn installment_purchases(&self) -> Result<Vec<InstallmentPurchase>> {
        Ok(self.purchases.clone())
    }

    fn installment_purchase(&self, id: i64) -> Result<InstallmentPurchase> {
        self.purchases
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| Error::not_found("installment purchase", id))
    }

    fn create_installment_purchase(
        &mut self,
        data: &NewInstallmentPurchase,
        monthly_payment: Decimal,
    ) -> Result<InstallmentPurchase> {
        validate_purchase(data)?;
        let id = self.bump();
        let purchase = InstallmentPurchase {
            id,
            name: data.name.clone(),
            total_amount: data.total_amount,
            number_of_months: data.number_of_months,
            monthly_payment,
            start_date: data.start_date,
            description: data.description.clone(),
            credit_card_id: data.credit_card_id,
        };
        self.purchases.push(purchase.clone());
        Ok(purchase)
    }

    fn update_installment_purchase(&mut self, purchase: &InstallmentPurchase) -> Result<()> {
        let slot = self
            .purchases
            .iter_mut()
            .find(|p| p.id == purchase.id)
            .ok_or_else(|| Error::not_found("installment purchase", purchase.id))?;
        *slot = purchase.clone();
        Ok(())
    }

    fn delete_installment_purchase(&mut self, id: i64) -> Result<()> {
        let before = self.purchases.len();
        self.purchases.retain(|p| p.id != id);
        if self.purchases.len() == before {
            return Err(Error::not_found("installment purchase", id));
        }
        self.payments.retain(|p| p.purchase_id != id);
        Ok(())
    }

    fn installment_payments(&self) -> Result<Vec<InstallmentPayment>> {
        let mut out = self.payments.clone();
        out.sort_by(|a, b| {
            a.due_date
                .cmp(&b.due_date)
                .then(a.payment_number.cmp(&b.payment_number))
        });
        Ok(out)
    }

    fn installment_payment(&self, id: i64) -> Result<InstallmentPayment> {
        self.payments
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| Error::not_found("installment payment", id))
    }

    fn create_installment_payment(
        &mut self,
        data: &NewInstallmentPayment,
    ) -> Result<InstallmentPayment> {
        let id = self.bump();
        let payment = InstallmentPayment {
            id,
            purchase_id: data.purchase_id,
            amount: data.amount,
            due_date: data.due_date,
            paid_date: None,
            status: data.status,
            payment_number: data.payment_number,
        };
        self.payments.push(payment.clone());
        Ok(payment)
    }

    fn set_payment_status(
        &mut self,
        id: i64,
        status: PaymentStatus,
        paid_date: Option<NaiveDate>,
    ) -> Result<InstallmentPayment> {
        let payment = self
            .payments
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| Error::not_found("installment payment", id))?;
        payment.status = status;
        payment.paid_date = paid_date;
        Ok(payment.clone())
    }

    fn delete_installment_payment(&mut self, id: i64) -> Result<()> {
        let before = self.payments.len();
        self.payments.retain(|p| p.id != id);
        if self.payments.len() == before {
            return Err(Error::not_found("installment payment", id));
        }
        Ok(())
    }

    fn recurring_expenses(&self) -> Result<Vec<RecurringExpense>> {
        Ok(self.recurring.clone())
    }

    fn recurring_expense(&self, id: i64) -> Result<RecurringExpense> {
        self.recurring
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| Error::not_found("recurring expense", id))
    }

    fn create_recurring_expense(&mut self, data: &NewRecurringExpense) -> Result<RecurringExpense> {
        validate_recurring(data)?;
        let id = self.bump();
        let expense = RecurringExpense {
            id,
            name: data.name.clone(),
            r#type: data.r#type.clone(),
            monthly_amount: data.monthly_amount,
            payment_day: data.payment_day,
            start_date: data.start_date,
            end_date: data.end_date,
            description: data.description.clone(),
            is_active: true,
        };
        self.recurring.push(expense.clone());
        Ok(expense)
    }

    fn update_recurring_expense(&mut self, expense: &RecurringExpense) -> Result<()> {
        let slot = self
            .recurring
            .iter_mut()
            .find(|e| e.id == expense.id)
            .ok_or_else(|| Error::not_found("recurring expense", expense.id))?;
        *slot = expense.clone();
        Ok(())
    }

    fn delete_recurring_expense(&mut self, id: i64) -> Result<()> {
        let before = self.recurring.len();
        self.recurring.retain(|e| e.id != id);
        if self.recurring.len() == before {
            return Err(Error::not_found("recurring expense", id));
        }
        Ok(())
    }

    fn fixed_expenses(&self) -> Result<Vec<FixedExpense>> {
        Ok(self.fixed.clone())
    }

    fn create_fixed_expense(&mut self, data: &NewFixedExpense) -> Result<FixedExpense> {
        if data.amount <= Decimal::ZERO {
            return Err(Error::validation("fixed expense amount must be positive"));
        }
        let id = self.bump();
        let expense = FixedExpense {
            id,
            name: data.name.clone(),
            amount: data.amount,
            frequency: data.frequency,
            start_date: data.start_date,
            end_date: data.end_date,
        };
        self.fixed.push(expense.clone());
        Ok(expense)
    }

    fn delete_fixed_expense(&mut self, id: i64) -> Result<()> {
        let before = self.fixed.len();
        self.fixed.retain(|e| e.id != id);
        if self.fixed.len() == before {
            return Err(Error::not_found("fixed expense", id));
        }
        Ok(())
    }

    fn assets(&self) -> Result<Vec<Asset>> {
        Ok(self.assets.clone())
    }

    fn create_asset(&mut self, data: &NewAsset) -> Result<Asset> {
        let id = self.bump();
        let asset = Asset {
            id,
            r#type: data.r#type.clone(),
            name: data.name.clone(),
            value: data.value,
            currency: data.currency.clone(),
            annual_value_change: data.annual_value_change,
            purchase_date: data.purchase_date,
            notes: data.notes.clone(),
        };
        self.assets.push(asset.clone());
        Ok(asset)
    }

    fn delete_asset(&mut self, id: i64) -> Result<()> {
        let before = self.assets.len();
        self.assets.retain(|a| a.id != id);
        if self.assets.len() == before {
            return Err(Error::not_found("asset", id));
        }
        Ok(())
    }

    fn liabilities(&self) -> Result<Vec<Liability>> {
        Ok(self.liabilities.clone())
    }

    fn create_liability(&mut self, data: &NewLiability) -> Result<Liability> {
        let id = self.bump();
        let liability = Liability {
            id,
            r#type: data.r#type.clone(),
            name: data.name.clone(),
            amount: data.amount,
            interest_rate: data.interest_rate,
            due_date: data.due_date,
        };
        self.liabilities.push(liability.clone());
        Ok(liability)
    }

    fn delete_liability(&mut self, id: i64) -> Result<()> {
        let before = self.liabilities.len();
        self.liabilities.retain(|l| l.id != id);
        if self.liabilities.len() == before {
            return Err(Error::not_found("liability", id));
        }
        Ok(())
    }

    fn investments(&self) -> Result<Vec<Investment>> {
        Ok(self.investments.clone())
    }

    fn create_investment(&mut self, data: &NewInvestment) -> Result<Investment> {
        let id = self.bump();
        let investment = Investment {
            id,
            symbol: data.symbol.clone(),
            r#type: data.r#type.clone(),
            quantity: data.quantity,
            purchase_price: data.purchase_price,
            purchase_date: data.purchase_date,
            current_price: data.current_price,
            notes: data.notes.clone(),
        };
        self.investments.push(investment.clone());
        Ok(investment)
    }

    fn set_investment_price(&mut self, id: i64, price: Decimal) -> Result<Investment> {
        let investment = self
            .investments
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| Error::not_found("investment", id))?;
        investment.current_price = price;
        Ok(investment.clone())
    }

    fn delete_investment(&mut self, id: i64) -> Result<()> {
        let before = self.investments.len();
        self.investments.retain(|i| i.id != id);
        if self.investments.len() == before {
            return Err(Error::not_found("investment", id));
        }
        Ok(())
    }

    fn investment_opportunities(&self) -> Result<Vec<InvestmentOpportunity>> {
        Ok(self.opportunities.clone())
    }

    fn create_investment_opportunity(
        &mut self,
        data: &NewInvestmentOpportunity,
    ) -> Result<InvestmentOpportunity> {
        let id = self.bump();
        let opportunity = InvestmentOpportunity {
            id,
            r#type: data.r#type.clone(),
            name: data.name.clone(),
            expected_return: data.expected_return,
            risk_level: data.risk_level.clone(),
            min_amount: data.min_amount,
            description: data.description.clone(),
            is_active: true,
        };
        self.opportunities.push(opportunity.clone());
        Ok(opportunity)
    }
}
