// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::calc::{biweekly, cards, categories, payments, summary};
use crate::store::Store;
use crate::utils::{maybe_print_json, parse_decimal, parse_month, pretty_table, today};
use anyhow::{Context, Result};
use chrono::Datelike;
use serde::Serialize;

pub fn handle(store: &mut dyn Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary_report(store, sub)?,
        Some(("categories", sub)) => categories_report(store, sub)?,
        Some(("networth", sub)) => networth_report(store, sub)?,
        Some(("biweekly", sub)) => biweekly_report(store, sub)?,
        Some(("cards", sub)) => cards_report(store, sub)?,
        Some(("payments", sub)) => payments_report(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn target_month(sub: &clap::ArgMatches) -> Result<(i32, u32)> {
    match sub.get_one::<String>("month") {
        Some(raw) => parse_month(raw),
        None => {
            let now = today();
            Ok((now.year(), now.month()))
        }
    }
}

fn summary_report(store: &mut dyn Store, sub: &clap::ArgMatches) -> Result<()> {
    let (year, month) = target_month(sub)?;
    let data = summary::monthly_summary(
        &store.transactions()?,
        &store.credit_cards()?,
        year,
        month,
        today(),
    )?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        println!(
            "{}",
            pretty_table(
                &["Month", "Income", "Expenses", "Balance", "Transactions"],
                vec![vec![
                    format!("{}-{:02}", year, month),
                    data.total_income.to_string(),
                    data.total_expenses.to_string(),
                    data.balance.to_string(),
                    data.transaction_count.to_string(),
                ]],
            )
        );
    }
    Ok(())
}

fn categories_report(store: &mut dyn Store, sub: &clap::ArgMatches) -> Result<()> {
    let (year, month) = target_month(sub)?;
    let buckets = categories::analyze(
        &store.transactions()?,
        &store.categories()?,
        Some(year),
        Some(month),
    )?;
    let buckets = match sub.get_one::<String>("top") {
        Some(raw) => {
            let n = raw
                .trim()
                .parse::<usize>()
                .with_context(|| format!("Invalid count '{}'", raw))?;
            categories::top(&buckets, n)
        }
        None => buckets,
    };
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &buckets)? {
        let rows: Vec<Vec<String>> = buckets
            .iter()
            .map(|b| {
                vec![
                    format!("{} {}", b.icon, b.name),
                    b.total.to_string(),
                    format!("{:.1}%", b.percentage),
                    b.transaction_count.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Category", "Total", "Share", "Transactions"], rows)
        );
    }
    Ok(())
}

#[derive(Serialize)]
struct NetWorthRow {
    assets: String,
    liabilities: String,
    net_worth: String,
}

fn networth_report(store: &mut dyn Store, sub: &clap::ArgMatches) -> Result<()> {
    let assets = store.assets()?;
    let liabilities = store.liabilities()?;
    let assets_total: rust_decimal::Decimal = assets.iter().map(|a| a.value).sum();
    let liabilities_total: rust_decimal::Decimal = liabilities.iter().map(|l| l.amount).sum();
    let data = NetWorthRow {
        assets: assets_total.to_string(),
        liabilities: liabilities_total.to_string(),
        net_worth: summary::net_worth(&assets, &liabilities).to_string(),
    };
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        println!(
            "{}",
            pretty_table(
                &["Assets", "Liabilities", "Net worth"],
                vec![vec![data.assets, data.liabilities, data.net_worth]],
            )
        );
    }
    Ok(())
}

fn biweekly_report(store: &mut dyn Store, sub: &clap::ArgMatches) -> Result<()> {
    let (year, month) = target_month(sub)?;
    let period_raw = sub.get_one::<String>("period").unwrap();
    let period = period_raw
        .trim()
        .parse::<u8>()
        .with_context(|| format!("Invalid period '{}'", period_raw))?;
    let income = match sub.get_one::<String>("income") {
        Some(raw) => parse_decimal(raw)?,
        None => summary::monthly_income(&store.transactions()?, year, month)?,
    };
    let data = biweekly::availability(
        income,
        &store.fixed_expenses()?,
        &store.installment_payments()?,
        year,
        month,
        period,
    )?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        println!(
            "{}",
            pretty_table(
                &["Period", "Half income", "Fixed", "Installments", "Available"],
                vec![vec![
                    format!("{}..{}", data.period_start, data.period_end),
                    data.income_half.to_string(),
                    data.fixed_expenses.to_string(),
                    data.installments_due.to_string(),
                    data.available.to_string(),
                ]],
            )
        );
    }
    Ok(())
}

fn cards_report(store: &mut dyn Store, sub: &clap::ArgMatches) -> Result<()> {
    let (year, month) = target_month(sub)?;
    let data = cards::credit_card_expenses(
        &store.credit_cards()?,
        &store.transactions()?,
        &store.installment_purchases()?,
        &store.installment_payments()?,
        year,
        month,
        today(),
    )?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|c| {
                vec![
                    format!("{} {}", c.bank, c.card_name),
                    format!("{}..{}", c.cycle_start, c.cycle_end),
                    c.due_date.to_string(),
                    c.cycle_expenses.to_string(),
                    c.installments_due.to_string(),
                    c.total.to_string(),
                    c.days_until_due.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Card", "Cycle", "Due", "Expenses", "Installments", "Total", "Days left"],
                rows,
            )
        );
    }
    Ok(())
}

fn payments_report(store: &mut dyn Store, sub: &clap::ArgMatches) -> Result<()> {
    let (year, month) = target_month(sub)?;
    let data = payments::payments_for_month(
        &store.credit_cards()?,
        &store.card_payments()?,
        &store.transactions()?,
        &store.installment_purchases()?,
        &store.installment_payments()?,
        &store.recurring_expenses()?,
        year,
        month,
        today(),
    )?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows: Vec<Vec<String>> = data
            .items
            .iter()
            .map(|i| {
                vec![
                    format!("{:?}", i.kind),
                    i.name.clone(),
                    i.amount.to_string(),
                    i.due_date.to_string(),
                    i.status.as_str().to_string(),
                    i.days_until_due.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Kind", "Name", "Amount", "Due", "Status", "Days left"],
                rows,
            )
        );
        println!(
            "Total {} / income {} / left after payments {}",
            data.total_payments, data.month_income, data.available_after_payments
        );
    }
    Ok(())
}
