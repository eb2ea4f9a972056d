// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::transactions::{parse_id, parse_opt_id};
use crate::models::{InstallmentPurchasePatch, NewInstallmentPurchase, PaymentStatus};
use crate::schedule::installments;
use crate::store::Store;
use crate::utils::{maybe_print_json, parse_date, parse_decimal, pretty_table, today};
use anyhow::{Context, Result};
use serde::Serialize;

pub fn handle(store: &mut dyn Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("update", sub)) => update(store, sub)?,
        Some(("delete", sub)) => delete(store, sub)?,
        Some(("pay", sub)) => pay(store, sub)?,
        Some(("unpay", sub)) => unpay(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn parse_months(sub: &clap::ArgMatches, name: &str) -> Result<Option<u32>> {
    match sub.get_one::<String>(name) {
        Some(raw) => Ok(Some(
            raw.trim()
                .parse::<u32>()
                .with_context(|| format!("Invalid month count '{}'", raw))?,
        )),
        None => Ok(None),
    }
}

fn add(store: &mut dyn Store, sub: &clap::ArgMatches) -> Result<()> {
    let data = NewInstallmentPurchase {
        name: sub.get_one::<String>("name").unwrap().clone(),
        total_amount: parse_decimal(sub.get_one::<String>("total").unwrap())?,
        number_of_months: parse_months(sub, "months")?.unwrap_or(1),
        start_date: parse_date(sub.get_one::<String>("start").unwrap())?,
        description: sub.get_one::<String>("description").cloned(),
        credit_card_id: parse_opt_id(sub, "card")?,
    };
    let purchase = installments::create(store, &data, today())?;
    println!(
        "Created purchase '{}' (id {}): {} x {} monthly from {}",
        purchase.name,
        purchase.id,
        purchase.number_of_months,
        purchase.monthly_payment,
        purchase.start_date
    );
    Ok(())
}

#[derive(Serialize)]
struct PurchaseRow {
    id: i64,
    name: String,
    total: String,
    months: u32,
    monthly: String,
    start: String,
    card: String,
    pending: String,
}

fn list(store: &mut dyn Store, sub: &clap::ArgMatches) -> Result<()> {
    let payments = store.installment_payments()?;
    let data: Vec<PurchaseRow> = store
        .installment_purchases()?
        .iter()
        .map(|p| {
            let pending: rust_decimal::Decimal = payments
                .iter()
                .filter(|pay| pay.purchase_id == p.id && pay.status == PaymentStatus::Pending)
                .map(|pay| pay.amount)
                .sum();
            PurchaseRow {
                id: p.id,
                name: p.name.clone(),
                total: p.total_amount.to_string(),
                months: p.number_of_months,
                monthly: p.monthly_payment.to_string(),
                start: p.start_date.to_string(),
                card: p.credit_card_id.map(|c| c.to_string()).unwrap_or_default(),
                pending: pending.to_string(),
            }
        })
        .collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.name.clone(),
                    r.total.clone(),
                    r.months.to_string(),
                    r.monthly.clone(),
                    r.start.clone(),
                    r.card.clone(),
                    r.pending.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Name", "Total", "Months", "Monthly", "Start", "Card", "Pending"],
                rows,
            )
        );
    }
    Ok(())
}

fn update(store: &mut dyn Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(sub, "id")?;
    let mut patch = InstallmentPurchasePatch::default();
    patch.name = sub.get_one::<String>("name").cloned();
    if let Some(total) = sub.get_one::<String>("total") {
        patch.total_amount = Some(parse_decimal(total)?);
    }
    patch.number_of_months = parse_months(sub, "months")?;
    if let Some(start) = sub.get_one::<String>("start") {
        patch.start_date = Some(parse_date(start)?);
    }
    if let Some(description) = sub.get_one::<String>("description") {
        patch.description = Some(Some(description.clone()));
    }
    if let Some(card) = parse_opt_id(sub, "card")? {
        patch.credit_card_id = Some(Some(card));
    }
    let purchase = installments::update(store, id, &patch, today())?;
    println!(
        "Updated purchase {} and rebuilt its schedule ({} x {})",
        purchase.id, purchase.number_of_months, purchase.monthly_payment
    );
    Ok(())
}

fn delete(store: &mut dyn Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(sub, "id")?;
    installments::delete(store, id)?;
    println!("Deleted purchase {} and everything it generated", id);
    Ok(())
}

fn pay(store: &mut dyn Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(sub, "payment")?;
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => today(),
    };
    let payment = installments::mark_paid(store, id, date)?;
    println!(
        "Payment {} (#{}) marked paid on {}",
        payment.id, payment.payment_number, date
    );
    Ok(())
}

fn unpay(store: &mut dyn Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(sub, "payment")?;
    let payment = installments::mark_unpaid(store, id)?;
    println!("Payment {} reverted to pending", payment.id);
    Ok(())
}
