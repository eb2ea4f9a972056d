// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use quincena::calc::payments::{self, PaymentKind};
use quincena::models::*;
use rust_decimal::Decimal;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn card(id: i64, cut_day: u32, payment_days: i64) -> CreditCard {
    CreditCard {
        id,
        bank: "BBVA".into(),
        name: "Azul".into(),
        last4_digits: "1234".into(),
        color: "#004481".into(),
        cut_day,
        payment_days,
        annual_interest_rate: Decimal::ZERO,
        moratory_interest_rate: Decimal::ZERO,
        min_payment_percentage: Decimal::ZERO,
        credit_limit: dec("50000"),
        current_balance: Decimal::ZERO,
        available_credit: dec("50000"),
        is_active: true,
    }
}

fn card_swipe(id: i64, card_id: i64, amount: &str, date: NaiveDate) -> Transaction {
    Transaction {
        id,
        r#type: TxnType::Expense,
        amount: dec(amount),
        description: format!("swipe {}", id),
        tags: vec![],
        date,
        is_recurring: false,
        credit_card_id: Some(card_id),
        source_id: None,
    }
}

fn income(id: i64, amount: &str, date: NaiveDate) -> Transaction {
    Transaction {
        id,
        r#type: TxnType::Income,
        amount: dec(amount),
        description: "payroll".into(),
        tags: vec![],
        date,
        is_recurring: false,
        credit_card_id: None,
        source_id: None,
    }
}

fn installment(
    id: i64,
    purchase_id: i64,
    amount: &str,
    due: NaiveDate,
    status: PaymentStatus,
) -> InstallmentPayment {
    InstallmentPayment {
        id,
        purchase_id,
        amount: dec(amount),
        due_date: due,
        paid_date: None,
        status,
        payment_number: 1,
    }
}

fn purchase(id: i64, card: Option<i64>) -> InstallmentPurchase {
    InstallmentPurchase {
        id,
        name: "Laptop".into(),
        total_amount: dec("12000"),
        number_of_months: 12,
        monthly_payment: dec("1000"),
        start_date: d(2024, 1, 5),
        description: None,
        credit_card_id: card,
    }
}

#[test]
fn composes_cards_installments_and_recurring() {
    let c = card(1, 15, 20); // cut Jan 15 pays Feb 4
    let txns = vec![
        income(1, "30000", d(2024, 2, 1)),
        // Inside the Dec 16 .. Jan 15 cycle.
        card_swipe(2, 1, "3500", d(2024, 1, 10)),
        // After the cut: belongs to the next statement.
        card_swipe(3, 1, "9999", d(2024, 1, 20)),
    ];
    // A card installment due inside the cycle rides on the statement.
    let card_purchase = purchase(1, Some(1));
    let loose_purchase = purchase(2, None);
    let installment_payments = vec![
        installment(1, 1, "1000", d(2024, 1, 5), PaymentStatus::Pending),
        // Non-card installments due in February count pending or paid.
        installment(2, 2, "800", d(2024, 2, 10), PaymentStatus::Pending),
        installment(3, 2, "800", d(2024, 2, 20), PaymentStatus::Paid),
    ];
    let rent = RecurringExpense {
        id: 1,
        name: "Renta".into(),
        r#type: "rent".into(),
        monthly_amount: dec("7000"),
        payment_day: 1,
        start_date: d(2023, 6, 1),
        end_date: None,
        description: None,
        is_active: true,
    };

    let today = d(2024, 2, 2);
    let result = payments::payments_for_month(
        &[c],
        &[],
        &txns,
        &[card_purchase, loose_purchase],
        &installment_payments,
        &[rent],
        2024,
        2,
        today,
    )
    .unwrap();

    assert_eq!(result.items.len(), 4);

    let card_item = result
        .items
        .iter()
        .find(|i| i.kind == PaymentKind::CreditCard)
        .unwrap();
    assert_eq!(card_item.amount, dec("4500"));
    assert_eq!(card_item.due_date, d(2024, 2, 4));
    assert_eq!(card_item.status, PaymentStatus::Pending);
    assert_eq!(card_item.days_until_due, 2);

    let installment_items: Vec<_> = result
        .items
        .iter()
        .filter(|i| i.kind == PaymentKind::Installment)
        .collect();
    assert_eq!(installment_items.len(), 2);
    assert!(installment_items.iter().any(|i| i.status == PaymentStatus::Paid));

    let rent_item = result
        .items
        .iter()
        .find(|i| i.kind == PaymentKind::Recurring)
        .unwrap();
    assert_eq!(rent_item.due_date, d(2024, 2, 1));
    assert_eq!(rent_item.status, PaymentStatus::Paid);

    assert_eq!(result.total_payments, dec("13100"));
    assert_eq!(result.month_income, dec("30000"));
    assert_eq!(result.available_after_payments, dec("16900"));
}

#[test]
fn card_with_resolved_cycle_lists_at_zero() {
    let c = card(1, 15, 20);
    let result =
        payments::payments_for_month(&[c], &[], &[], &[], &[], &[], 2024, 2, d(2024, 2, 2))
            .unwrap();
    assert_eq!(result.items.len(), 1);
    assert_eq!(result.items[0].amount, Decimal::ZERO);
}

#[test]
fn inactive_cards_and_expired_recurring_are_skipped() {
    let mut c = card(1, 15, 20);
    c.is_active = false;
    let expired = RecurringExpense {
        id: 1,
        name: "Gimnasio".into(),
        r#type: "other".into(),
        monthly_amount: dec("500"),
        payment_day: 1,
        start_date: d(2023, 1, 1),
        end_date: Some(d(2023, 12, 31)),
        description: None,
        is_active: true,
    };
    let result = payments::payments_for_month(
        &[c],
        &[],
        &[],
        &[],
        &[],
        &[expired],
        2024,
        2,
        d(2024, 2, 2),
    )
    .unwrap();
    assert!(result.items.is_empty());
}

#[test]
fn paid_card_cycle_reports_paid_status() {
    let c = card(1, 15, 20);
    let record = CreditCardPayment {
        id: 1,
        card_id: 1,
        cycle_start: d(2023, 12, 16),
        cycle_end: d(2024, 1, 15),
        amount: dec("4500"),
        status: PaymentStatus::Paid,
        paid_date: Some(d(2024, 2, 3)),
    };
    let result = payments::payments_for_month(
        &[c],
        &[record],
        &[],
        &[],
        &[],
        &[],
        2024,
        2,
        d(2024, 2, 10),
    )
    .unwrap();
    assert_eq!(result.items[0].status, PaymentStatus::Paid);
}

#[test]
fn days_until_due_measures_from_today_even_for_past_months() {
    let c = card(1, 15, 20);
    let result =
        payments::payments_for_month(&[c], &[], &[], &[], &[], &[], 2024, 2, d(2024, 6, 1))
            .unwrap();
    assert!(result.items[0].days_until_due < 0);
}
