// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::transactions::parse_id;
use crate::calc::portfolio;
use crate::models::NewAsset;
use crate::store::Store;
use crate::utils::{maybe_print_json, parse_date, parse_decimal, pretty_table, today};
use anyhow::{Context, Result};

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
    let change_raw = sub.get_one::<String>("change").unwrap();
    let annual_value_change = change_raw
        .trim()
        .parse::<f64>()
        .with_context(|| format!("Invalid percentage '{}'", change_raw))?;
    let data = NewAsset {
        r#type: sub.get_one::<String>("type").unwrap().clone(),
        name: sub.get_one::<String>("name").unwrap().clone(),
        value: parse_decimal(sub.get_one::<String>("value").unwrap())?,
        currency: sub.get_one::<String>("currency").unwrap().clone(),
        annual_value_change,
        purchase_date: match sub.get_one::<String>("date") {
            Some(s) => parse_date(s)?,
            None => today(),
        },
        notes: sub.get_one::<String>("notes").cloned(),
    };
    let asset = store.create_asset(&data)?;
    println!("Added asset '{}' (id {}): {} {}", asset.name, asset.id, asset.value, asset.currency);
    Ok(())
}

fn list(store: &mut dyn Store, sub: &clap::ArgMatches) -> Result<()> {
    let assets = store.assets()?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &assets)? {
        let now = today();
        let rows: Vec<Vec<String>> = assets
            .iter()
            .map(|a| {
                vec![
                    a.id.to_string(),
                    a.r#type.clone(),
                    a.name.clone(),
                    a.value.to_string(),
                    portfolio::projected_asset_value(a, now).to_string(),
                    a.currency.clone(),
                    format!("{}%", a.annual_value_change),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Type", "Name", "Value", "Projected", "CCY", "Annual change"],
                rows,
            )
        );
    }
    Ok(())
}

fn delete(store: &mut dyn Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(sub, "id")?;
    store.delete_asset(id)?;
    println!("Deleted asset {}", id);
    Ok(())
}
