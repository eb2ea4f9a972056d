// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{NewTransaction, TxnType};
use crate::store::Store;
use crate::utils::{maybe_print_json, parse_date, parse_decimal, parse_month, pretty_table, today};
use anyhow::{Context, Result};
use serde::Serialize;

pub fn handle(store: &mut dyn Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("delete", sub)) => delete(store, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn parse_id(sub: &clap::ArgMatches, name: &str) -> Result<i64> {
    let raw = sub.get_one::<String>(name).unwrap();
    raw.trim()
        .parse::<i64>()
        .with_context(|| format!("Invalid id '{}'", raw))
}

pub fn parse_opt_id(sub: &clap::ArgMatches, name: &str) -> Result<Option<i64>> {
    match sub.get_one::<String>(name) {
        Some(raw) => Ok(Some(
            raw.trim()
                .parse::<i64>()
                .with_context(|| format!("Invalid id '{}'", raw))?,
        )),
        None => Ok(None),
    }
}

fn add(store: &mut dyn Store, sub: &clap::ArgMatches) -> Result<()> {
    let r#type = TxnType::parse(sub.get_one::<String>("type").unwrap())?;
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let description = sub.get_one::<String>("description").unwrap().clone();
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => today(),
    };
    let credit_card_id = parse_opt_id(sub, "card")?;
    let tags = match sub.get_one::<String>("tags") {
        Some(raw) => raw
            .split(',')
            .map(|t| {
                t.trim()
                    .parse::<i64>()
                    .with_context(|| format!("Invalid category id '{}'", t))
            })
            .collect::<Result<Vec<i64>>>()?,
        None => Vec::new(),
    };

    let txn = store.create_transaction(&NewTransaction {
        r#type,
        amount,
        description,
        tags,
        date,
        is_recurring: false,
        credit_card_id,
        source_id: None,
    })?;
    println!(
        "Recorded {} {} on {} '{}' (id {})",
        txn.r#type.as_str(),
        txn.amount,
        txn.date,
        txn.description,
        txn.id
    );
    Ok(())
}

#[derive(Serialize)]
struct TxnRow {
    id: i64,
    date: String,
    r#type: String,
    amount: String,
    description: String,
    card: String,
    tags: String,
    generated: bool,
}

fn list(store: &mut dyn Store, sub: &clap::ArgMatches) -> Result<()> {
    let txns = match sub.get_one::<String>("month") {
        Some(raw) => {
            let (y, m) = parse_month(raw)?;
            let window = crate::dates::month_interval(y, m)?;
            store.transactions_in_range(window.start, window.end)?
        }
        None => store.transactions()?,
    };
    let data: Vec<TxnRow> = txns
        .iter()
        .map(|t| TxnRow {
            id: t.id,
            date: t.date.to_string(),
            r#type: t.r#type.as_str().to_string(),
            amount: t.amount.to_string(),
            description: t.description.clone(),
            card: t.credit_card_id.map(|c| c.to_string()).unwrap_or_default(),
            tags: t
                .tags
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(","),
            generated: t.source_id.is_some(),
        })
        .collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.r#type.clone(),
                    r.amount.clone(),
                    r.description.clone(),
                    r.card.clone(),
                    r.tags.clone(),
                    if r.generated { "yes".into() } else { String::new() },
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Type", "Amount", "Description", "Card", "Tags", "Generated"],
                rows,
            )
        );
    }
    Ok(())
}

fn delete(store: &mut dyn Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(sub, "id")?;
    store.delete_transaction(id)?;
    println!("Deleted transaction {}", id);
    Ok(())
}
