// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::transactions::parse_id;
use crate::cycle;
use crate::models::{NewCreditCard, PaymentStatus};
use crate::store::Store;
use crate::utils::{maybe_print_json, parse_date, parse_decimal, parse_month, pretty_table, today};
use anyhow::{Context, Result, anyhow};
use chrono::Datelike;

pub fn handle(store: &mut dyn Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("pay", sub)) => pay(store, sub)?,
        Some(("delete", sub)) => delete(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &mut dyn Store, sub: &clap::ArgMatches) -> Result<()> {
    let cut_day_raw = sub.get_one::<String>("cut-day").unwrap();
    let cut_day = cut_day_raw
        .trim()
        .parse::<u32>()
        .with_context(|| format!("Invalid cut day '{}'", cut_day_raw))?;
    let payment_days_raw = sub.get_one::<String>("payment-days").unwrap();
    let payment_days = payment_days_raw
        .trim()
        .parse::<i64>()
        .with_context(|| format!("Invalid payment days '{}'", payment_days_raw))?;

    let card = store.create_credit_card(&NewCreditCard {
        bank: sub.get_one::<String>("bank").unwrap().clone(),
        name: sub.get_one::<String>("name").unwrap().clone(),
        last4_digits: sub.get_one::<String>("last4").unwrap().clone(),
        color: sub.get_one::<String>("color").unwrap().clone(),
        cut_day,
        payment_days,
        annual_interest_rate: parse_decimal(sub.get_one::<String>("annual-rate").unwrap())?,
        moratory_interest_rate: parse_decimal(sub.get_one::<String>("moratory-rate").unwrap())?,
        min_payment_percentage: parse_decimal(sub.get_one::<String>("min-payment").unwrap())?,
        credit_limit: parse_decimal(sub.get_one::<String>("limit").unwrap())?,
        current_balance: parse_decimal(sub.get_one::<String>("balance").unwrap())?,
    })?;
    println!(
        "Registered {} {} •{} (id {}, cuts day {}, pays {} days later)",
        card.bank, card.name, card.last4_digits, card.id, card.cut_day, card.payment_days
    );
    Ok(())
}

fn list(store: &mut dyn Store, sub: &clap::ArgMatches) -> Result<()> {
    let cards = store.credit_cards()?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &cards)? {
        let rows: Vec<Vec<String>> = cards
            .iter()
            .map(|c| {
                vec![
                    c.id.to_string(),
                    c.bank.clone(),
                    c.name.clone(),
                    c.last4_digits.clone(),
                    c.cut_day.to_string(),
                    c.payment_days.to_string(),
                    c.credit_limit.to_string(),
                    c.current_balance.to_string(),
                    c.available_credit.to_string(),
                    if c.is_active { "yes".into() } else { "no".into() },
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Bank", "Name", "Last4", "Cut", "Pay days", "Limit", "Balance", "Available", "Active"],
                rows,
            )
        );
    }
    Ok(())
}

fn pay(store: &mut dyn Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(sub, "id")?;
    let now = today();
    let (year, month) = match sub.get_one::<String>("month") {
        Some(raw) => parse_month(raw)?,
        None => (now.year(), now.month()),
    };
    let paid_date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => now,
    };

    let card = store.credit_card(id)?;
    let cyc = cycle::find_cycle_for_payment_month(&card, year, month)?
        .ok_or_else(|| anyhow!("No cycle of card {} pays in {}-{:02}", id, year, month))?;

    let view = crate::calc::cards::credit_card_expenses(
        &[card],
        &store.transactions()?,
        &store.installment_purchases()?,
        &store.installment_payments()?,
        year,
        month,
        now,
    )?;
    let amount = view.first().map(|v| v.total).unwrap_or_default();

    store.upsert_card_payment(
        id,
        cyc.start,
        cyc.end,
        amount,
        PaymentStatus::Paid,
        Some(paid_date),
    )?;
    println!(
        "Marked cycle {}..{} of card {} paid on {} ({})",
        cyc.start, cyc.end, id, paid_date, amount
    );
    Ok(())
}

fn delete(store: &mut dyn Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(sub, "id")?;
    store.delete_credit_card(id)?;
    println!("Deleted card {}", id);
    Ok(())
}
