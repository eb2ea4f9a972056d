// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::transactions::parse_id;
use crate::models::NewLiability;
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
    let data = NewLiability {
        r#type: sub.get_one::<String>("type").unwrap().clone(),
        name: sub.get_one::<String>("name").unwrap().clone(),
        amount: parse_decimal(sub.get_one::<String>("amount").unwrap())?,
        interest_rate: match sub.get_one::<String>("rate") {
            Some(s) => Some(parse_decimal(s)?),
            None => None,
        },
        due_date: match sub.get_one::<String>("due") {
            Some(s) => Some(parse_date(s)?),
            None => None,
        },
    };
    let liability = store.create_liability(&data)?;
    println!(
        "Added liability '{}' (id {}): {}",
        liability.name, liability.id, liability.amount
    );
    Ok(())
}

fn list(store: &mut dyn Store, sub: &clap::ArgMatches) -> Result<()> {
    let liabilities = store.liabilities()?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &liabilities)? {
        let rows: Vec<Vec<String>> = liabilities
            .iter()
            .map(|l| {
                vec![
                    l.id.to_string(),
                    l.r#type.clone(),
                    l.name.clone(),
                    l.amount.to_string(),
                    l.interest_rate.map(|r| format!("{}%", r)).unwrap_or_default(),
                    l.due_date.map(|d| d.to_string()).unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Id", "Type", "Name", "Amount", "Rate", "Due"], rows)
        );
    }
    Ok(())
}

fn delete(store: &mut dyn Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(sub, "id")?;
    store.delete_liability(id)?;
    println!("Deleted liability {}", id);
    Ok(())
}
