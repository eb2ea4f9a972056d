// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::transactions::parse_id;
use crate::calc::portfolio;
use crate::models::NewInvestment;
use crate::store::Store;
use crate::utils::{maybe_print_json, parse_date, parse_decimal, pretty_table, today};
use anyhow::Result;

pub fn handle(store: &mut dyn Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("price", sub)) => price(store, sub)?,
        Some(("opportunities", sub)) => opportunities(store, sub)?,
        Some(("delete", sub)) => delete(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &mut dyn Store, sub: &clap::ArgMatches) -> Result<()> {
    let purchase_price = parse_decimal(sub.get_one::<String>("price").unwrap())?;
    let current_price = match sub.get_one::<String>("current") {
        Some(s) => parse_decimal(s)?,
        None => purchase_price,
    };
    let data = NewInvestment {
        symbol: sub.get_one::<String>("symbol").cloned(),
        r#type: sub.get_one::<String>("type").unwrap().clone(),
        quantity: parse_decimal(sub.get_one::<String>("quantity").unwrap())?,
        purchase_price,
        purchase_date: match sub.get_one::<String>("date") {
            Some(s) => parse_date(s)?,
            None => today(),
        },
        current_price,
        notes: sub.get_one::<String>("notes").cloned(),
    };
    let inv = store.create_investment(&data)?;
    println!(
        "Added investment {} (id {}): {} @ {}",
        inv.symbol.as_deref().unwrap_or(&inv.r#type),
        inv.id,
        inv.quantity,
        inv.purchase_price
    );
    Ok(())
}

fn list(store: &mut dyn Store, sub: &clap::ArgMatches) -> Result<()> {
    let investments = store.investments()?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &investments)? {
        let rows: Vec<Vec<String>> = investments
            .iter()
            .map(|i| {
                vec![
                    i.id.to_string(),
                    i.symbol.clone().unwrap_or_default(),
                    i.r#type.clone(),
                    i.quantity.to_string(),
                    i.purchase_price.to_string(),
                    i.current_price.to_string(),
                    portfolio::investment_return(i).round_dp(2).to_string(),
                    format!("{:.2}%", portfolio::investment_return_pct(i)),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Symbol", "Type", "Qty", "Bought", "Now", "Return", "Return %"],
                rows,
            )
        );
        println!(
            "Portfolio: value {} / cost {} / return {}",
            portfolio::portfolio_value(&investments).round_dp(2),
            portfolio::portfolio_cost(&investments).round_dp(2),
            portfolio::portfolio_return(&investments).round_dp(2)
        );
    }
    Ok(())
}

fn price(store: &mut dyn Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(sub, "id")?;
    let price = parse_decimal(sub.get_one::<String>("price").unwrap())?;
    let inv = store.set_investment_price(id, price)?;
    println!(
        "Updated {} to {} (return {})",
        inv.symbol.as_deref().unwrap_or(&inv.r#type),
        inv.current_price,
        portfolio::investment_return(&inv).round_dp(2)
    );
    Ok(())
}

fn opportunities(store: &mut dyn Store, sub: &clap::ArgMatches) -> Result<()> {
    let opportunities = store.investment_opportunities()?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &opportunities)? {
        let rows: Vec<Vec<String>> = opportunities
            .iter()
            .filter(|o| o.is_active)
            .map(|o| {
                vec![
                    o.id.to_string(),
                    o.name.clone(),
                    o.r#type.clone(),
                    format!("{}%", o.expected_return),
                    o.risk_level.clone(),
                    o.min_amount.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Name", "Type", "Expected", "Risk", "Min amount"],
                rows,
            )
        );
    }
    Ok(())
}

fn delete(store: &mut dyn Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(sub, "id")?;
    store.delete_investment(id)?;
    println!("Deleted investment {}", id);
    Ok(())
}
