// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use quincena::calc::{biweekly, categories, portfolio, summary};
use quincena::models::*;
use rust_decimal::Decimal;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn txn(id: i64, r#type: TxnType, amount: &str, date: NaiveDate) -> Transaction {
    Transaction {
        id,
        r#type,
        amount: dec(amount),
        description: format!("txn {}", id),
        tags: vec![],
        date,
        is_recurring: false,
        credit_card_id: None,
        source_id: None,
    }
}

fn category(id: i64, name: &str) -> Category {
    Category {
        id,
        name: name.into(),
        color: "#000000".into(),
        icon: "📦".into(),
        is_custom: false,
    }
}

fn card(cut_day: u32) -> CreditCard {
    CreditCard {
        id: 7,
        bank: "BBVA".into(),
        name: "Azul".into(),
        last4_digits: "1234".into(),
        color: "#004481".into(),
        cut_day,
        payment_days: 20,
        annual_interest_rate: Decimal::ZERO,
        moratory_interest_rate: Decimal::ZERO,
        min_payment_percentage: Decimal::ZERO,
        credit_limit: dec("50000"),
        current_balance: Decimal::ZERO,
        available_credit: dec("50000"),
        is_active: true,
    }
}

#[test]
fn monthly_summary_sums_the_window() {
    let txns = vec![
        txn(1, TxnType::Income, "20000", d(2024, 3, 1)),
        txn(2, TxnType::Expense, "4500", d(2024, 3, 5)),
        txn(3, TxnType::Expense, "1500", d(2024, 3, 20)),
        // Outside the window.
        txn(4, TxnType::Expense, "999", d(2024, 2, 28)),
    ];
    let s = summary::monthly_summary(&txns, &[], 2024, 3, d(2024, 6, 1)).unwrap();
    assert_eq!(s.total_income, dec("20000"));
    assert_eq!(s.total_expenses, dec("6000"));
    assert_eq!(s.balance, dec("14000"));
    assert_eq!(s.transaction_count, 3);
}

#[test]
fn current_month_card_expense_before_cut_is_excluded() {
    let c = card(15);
    let mut pre_cut = txn(1, TxnType::Expense, "1000", d(2024, 3, 10));
    pre_cut.credit_card_id = Some(c.id);
    let mut post_cut = txn(2, TxnType::Expense, "2000", d(2024, 3, 20));
    post_cut.credit_card_id = Some(c.id);
    let cash = txn(3, TxnType::Expense, "300", d(2024, 3, 10));

    let today = d(2024, 3, 25);
    let s = summary::monthly_summary(&[pre_cut.clone(), post_cut, cash], &[c.clone()], 2024, 3, today)
        .unwrap();
    // The March 10 card swipe belongs to the cycle cut on March 15.
    assert_eq!(s.total_expenses, dec("2300"));
    assert_eq!(s.transaction_count, 2);

    // Viewed as a past month, everything counts.
    let later = summary::monthly_summary(
        &[pre_cut, txn(3, TxnType::Expense, "300", d(2024, 3, 10))],
        &[card(15)],
        2024,
        3,
        d(2024, 5, 1),
    )
    .unwrap();
    assert_eq!(later.total_expenses, dec("1300"));
}

#[test]
fn net_worth_subtracts_liabilities_from_raw_values() {
    let assets = vec![
        Asset {
            id: 1,
            r#type: "bank".into(),
            name: "Nómina".into(),
            value: dec("150000"),
            currency: "MXN".into(),
            annual_value_change: 5.0,
            purchase_date: d(2020, 1, 1),
            notes: None,
        },
        Asset {
            id: 2,
            r#type: "cash".into(),
            name: "Efectivo".into(),
            value: dec("50000"),
            currency: "MXN".into(),
            annual_value_change: 0.0,
            purchase_date: d(2020, 1, 1),
            notes: None,
        },
    ];
    let liabilities = vec![Liability {
        id: 1,
        r#type: "loan".into(),
        name: "Crédito auto".into(),
        amount: dec("80000"),
        interest_rate: None,
        due_date: None,
    }];
    // Raw values only: the 5% annual change on the first asset is ignored.
    assert_eq!(summary::net_worth(&assets, &liabilities), dec("120000"));
}

#[test]
fn multi_tag_expense_counts_fully_in_each_bucket() {
    let cats = vec![category(1, "Comida"), category(2, "Familia")];
    let mut t = txn(1, TxnType::Expense, "100", d(2024, 3, 5));
    t.tags = vec![1, 2];

    let buckets = categories::analyze(&[t], &cats, Some(2024), Some(3)).unwrap();
    assert_eq!(buckets.len(), 2);
    assert!(buckets.iter().all(|b| b.total == dec("100")));
    // Both buckets claim 100% of real spending.
    assert!(buckets.iter().all(|b| (b.percentage - 100.0).abs() < 1e-9));
}

#[test]
fn untagged_and_invalid_tags_fall_into_sin_categoria() {
    let cats = vec![category(1, "Comida")];
    let untagged = txn(1, TxnType::Expense, "40", d(2024, 3, 5));
    let mut invalid = txn(2, TxnType::Expense, "60", d(2024, 3, 6));
    invalid.tags = vec![999];

    let buckets = categories::analyze(&[untagged, invalid], &cats, Some(2024), Some(3)).unwrap();
    assert_eq!(buckets.len(), 1);
    assert_eq!(buckets[0].name, categories::UNCATEGORIZED);
    assert_eq!(buckets[0].total, dec("100"));
    assert_eq!(buckets[0].transaction_count, 2);
}

#[test]
fn buckets_sort_descending_and_top_truncates() {
    let cats = vec![category(1, "Comida"), category(2, "Transporte")];
    let mut food = txn(1, TxnType::Expense, "300", d(2024, 3, 5));
    food.tags = vec![1];
    let mut bus = txn(2, TxnType::Expense, "900", d(2024, 3, 6));
    bus.tags = vec![2];

    let buckets = categories::analyze(&[food, bus], &cats, Some(2024), Some(3)).unwrap();
    assert_eq!(buckets[0].name, "Transporte");
    assert_eq!(categories::top(&buckets, 1).len(), 1);
}

#[test]
fn month_comparison_unions_buckets() {
    let cats = vec![category(1, "Comida"), category(2, "Salud")];
    let mut march = txn(1, TxnType::Expense, "500", d(2024, 3, 5));
    march.tags = vec![1];
    let mut february = txn(2, TxnType::Expense, "200", d(2024, 2, 5));
    february.tags = vec![2];

    let diff = categories::compare_month_to_month(
        &[march, february],
        &cats,
        (2024, 3),
        (2024, 2),
    )
    .unwrap();
    assert_eq!(diff.len(), 2);
    let comida = diff.iter().find(|c| c.name == "Comida").unwrap();
    assert_eq!(comida.change, dec("500"));
    // Nothing in the previous month: percentage pinned to 0.
    assert_eq!(comida.change_percentage, 0.0);
    let salud = diff.iter().find(|c| c.name == "Salud").unwrap();
    assert_eq!(salud.change, dec("-200"));
    assert_eq!(salud.change_percentage, -100.0);
}

#[test]
fn biweekly_availability_splits_fixed_by_frequency() {
    // 20000 income: half is 10000. Monthly 3000 weighs 1500 per period,
    // yearly 12000 weighs 500, no installments due => 8000 available.
    let fixed = vec![
        FixedExpense {
            id: 1,
            name: "Luz".into(),
            amount: dec("3000"),
            frequency: Frequency::Monthly,
            start_date: d(2023, 1, 1),
            end_date: None,
        },
        FixedExpense {
            id: 2,
            name: "Seguro".into(),
            amount: dec("12000"),
            frequency: Frequency::Yearly,
            start_date: d(2023, 1, 1),
            end_date: None,
        },
    ];
    let a = biweekly::availability(dec("20000"), &fixed, &[], 2024, 3, 1).unwrap();
    assert_eq!(a.income_half, dec("10000"));
    assert_eq!(a.fixed_expenses, dec("2000"));
    assert_eq!(a.available, dec("8000"));
    assert_eq!(a.period_start, d(2024, 3, 1));
    assert_eq!(a.period_end, d(2024, 3, 15));
}

#[test]
fn biweekly_counts_pending_installments_in_period() {
    let payment = InstallmentPayment {
        id: 1,
        purchase_id: 1,
        amount: dec("750"),
        due_date: d(2024, 3, 20),
        paid_date: None,
        status: PaymentStatus::Pending,
        payment_number: 2,
    };
    let paid = InstallmentPayment {
        id: 2,
        purchase_id: 1,
        amount: dec("750"),
        due_date: d(2024, 3, 22),
        paid_date: Some(d(2024, 3, 22)),
        status: PaymentStatus::Paid,
        payment_number: 1,
    };
    let a = biweekly::availability(dec("10000"), &[], &[payment.clone(), paid], 2024, 3, 2).unwrap();
    assert_eq!(a.installments_due, dec("750"));
    assert_eq!(a.available, dec("4250"));
    // Period 1 does not see the day-20 payment.
    let first = biweekly::availability(dec("10000"), &[], &[payment], 2024, 3, 1).unwrap();
    assert_eq!(first.installments_due, Decimal::ZERO);
}

#[test]
fn biweekly_rejects_bad_period() {
    assert!(biweekly::availability(dec("1"), &[], &[], 2024, 3, 0).is_err());
    assert!(biweekly::availability(dec("1"), &[], &[], 2024, 3, 3).is_err());
}

fn investment(id: i64, quantity: &str, purchase: &str, current: &str) -> Investment {
    Investment {
        id,
        symbol: Some("NAFTRAC".into()),
        r#type: "fund".into(),
        quantity: dec(quantity),
        purchase_price: dec(purchase),
        purchase_date: d(2023, 1, 1),
        current_price: dec(current),
        notes: None,
    }
}

#[test]
fn portfolio_totals_and_per_holding_returns() {
    let holdings = vec![
        investment(1, "10", "100", "120"),
        investment(2, "5", "200", "180"),
    ];
    assert_eq!(portfolio::portfolio_cost(&holdings), dec("2000"));
    assert_eq!(portfolio::portfolio_value(&holdings), dec("2100"));
    assert_eq!(portfolio::portfolio_return(&holdings), dec("100"));
    assert_eq!(portfolio::investment_return(&holdings[0]), dec("200"));
    assert!((portfolio::investment_return_pct(&holdings[0]) - 20.0).abs() < 1e-9);
    assert!((portfolio::investment_return_pct(&holdings[1]) + 10.0).abs() < 1e-9);
}

#[test]
fn zero_purchase_price_reports_zero_percent() {
    let freebie = investment(1, "10", "0", "50");
    assert_eq!(portfolio::investment_return_pct(&freebie), 0.0);
}

#[test]
fn projected_asset_value_compounds_only_for_display() {
    let asset = Asset {
        id: 1,
        r#type: "other".into(),
        name: "Depto".into(),
        value: dec("1000000"),
        currency: "MXN".into(),
        annual_value_change: 10.0,
        purchase_date: d(2023, 1, 1),
        notes: None,
    };
    // One 365.25-day year at 10%.
    let projected = portfolio::projected_asset_value(&asset, d(2024, 1, 1));
    assert!(projected > dec("1090000") && projected < dec("1110000"));

    // No change rate, or a date before purchase: raw value.
    let flat = Asset {
        annual_value_change: 0.0,
        ..asset.clone()
    };
    assert_eq!(portfolio::projected_asset_value(&flat, d(2024, 1, 1)), dec("1000000"));
    assert_eq!(
        portfolio::projected_asset_value(&asset, d(2022, 6, 1)),
        dec("1000000")
    );
}
