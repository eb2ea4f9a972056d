// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::transactions::parse_id;
use crate::models::{Frequency, NewFixedExpense};
use crate::store::Store;
use crate::utils::{maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::Result;

pub fn handle(store: &mut dyn Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("delete", sub)) => delete(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &mut dyn Store, sub: &clap::ArgMatches) -> Result<()> {
    let data = NewFixedExpense {
        name: sub.get_one::<String>("name").unwrap().clone(),
        amount: parse_decimal(sub.get_one::<String>("amount").unwrap())?,
        frequency: Frequency::parse(sub.get_one::<String>("frequency").unwrap())?,
        start_date: parse_date(sub.get_one::<String>("start").unwrap())?,
        end_date: match sub.get_one::<String>("end") {
            Some(s) => Some(parse_date(s)?),
            None => None,
        },
    };
    let expense = store.create_fixed_expense(&data)?;
    println!(
        "Added fixed expense '{}' (id {}): {} {}",
        expense.name,
        expense.id,
        expense.amount,
        expense.frequency.as_str()
    );
    Ok(())
}

fn list(store: &mut dyn Store, sub: &clap::ArgMatches) -> Result<()> {
    let expenses = store.fixed_expenses()?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &expenses)? {
        let rows: Vec<Vec<String>> = expenses
            .iter()
            .map(|e| {
                vec![
                    e.id.to_string(),
                    e.name.clone(),
                    e.amount.to_string(),
                    e.frequency.as_str().to_string(),
                    e.start_date.to_string(),
                    e.end_date.map(|d| d.to_string()).unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Id", "Name", "Amount", "Frequency", "Start", "End"], rows)
        );
    }
    Ok(())
}

fn delete(store: &mut dyn Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(sub, "id")?;
    store.delete_fixed_expense(id)?;
    println!("Deleted fixed expense {}", id);
    Ok(())
}
