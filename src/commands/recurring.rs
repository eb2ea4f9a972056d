// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::transactions::parse_id;
use crate::models::{NewRecurringExpense, RecurringExpensePatch};
use crate::schedule::recurring;
use crate::store::Store;
use crate::utils::{maybe_print_json, parse_date, parse_decimal, pretty_table, today};
use anyhow::{Context, Result, anyhow};

pub fn handle(store: &mut dyn Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("update", sub)) => update(store, sub)?,
        Some(("delete", sub)) => delete(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn parse_day(raw: &str) -> Result<u32> {
    raw.trim()
        .parse::<u32>()
        .with_context(|| format!("Invalid payment day '{}'", raw))
}

fn add(store: &mut dyn Store, sub: &clap::ArgMatches) -> Result<()> {
    let data = NewRecurringExpense {
        name: sub.get_one::<String>("name").unwrap().clone(),
        r#type: sub.get_one::<String>("type").unwrap().clone(),
        monthly_amount: parse_decimal(sub.get_one::<String>("amount").unwrap())?,
        payment_day: parse_day(sub.get_one::<String>("day").unwrap())?,
        start_date: parse_date(sub.get_one::<String>("start").unwrap())?,
        end_date: match sub.get_one::<String>("end") {
            Some(s) => Some(parse_date(s)?),
            None => None,
        },
        description: sub.get_one::<String>("description").cloned(),
    };
    let expense = recurring::create(store, &data, today())?;
    println!(
        "Created recurring expense '{}' (id {}): {} on day {}",
        expense.name, expense.id, expense.monthly_amount, expense.payment_day
    );
    Ok(())
}

fn list(store: &mut dyn Store, sub: &clap::ArgMatches) -> Result<()> {
    let expenses = store.recurring_expenses()?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &expenses)? {
        let rows: Vec<Vec<String>> = expenses
            .iter()
            .map(|e| {
                vec![
                    e.id.to_string(),
                    e.name.clone(),
                    e.r#type.clone(),
                    e.monthly_amount.to_string(),
                    e.payment_day.to_string(),
                    e.start_date.to_string(),
                    e.end_date.map(|d| d.to_string()).unwrap_or_default(),
                    if e.is_active { "yes".into() } else { "no".into() },
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Name", "Type", "Amount", "Day", "Start", "End", "Active"],
                rows,
            )
        );
    }
    Ok(())
}

fn update(store: &mut dyn Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(sub, "id")?;
    let mut patch = RecurringExpensePatch {
        name: sub.get_one::<String>("name").cloned(),
        ..Default::default()
    };
    if let Some(amount) = sub.get_one::<String>("amount") {
        patch.monthly_amount = Some(parse_decimal(amount)?);
    }
    if let Some(day) = sub.get_one::<String>("day") {
        patch.payment_day = Some(parse_day(day)?);
    }
    if let Some(start) = sub.get_one::<String>("start") {
        patch.start_date = Some(parse_date(start)?);
    }
    if let Some(end) = sub.get_one::<String>("end") {
        patch.end_date = if end.eq_ignore_ascii_case("none") {
            Some(None)
        } else {
            Some(Some(parse_date(end)?))
        };
    }
    if let Some(active) = sub.get_one::<String>("active") {
        patch.is_active = Some(match active.trim() {
            "true" => true,
            "false" => false,
            other => return Err(anyhow!("--active expects true or false, got '{}'", other)),
        });
    }
    let expense = recurring::update(store, id, &patch, today())?;
    if patch.reshapes_schedule() {
        println!("Updated '{}' and regenerated its transactions", expense.name);
    } else {
        println!("Updated '{}'", expense.name);
    }
    Ok(())
}

fn delete(store: &mut dyn Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(sub, "id")?;
    recurring::delete(store, id)?;
    println!("Deleted recurring expense {} and its generated transactions", id);
    Ok(())
}
