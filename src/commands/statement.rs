// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::transactions::parse_id;
use crate::cycle;
use crate::dedup;
use crate::statement::{self, BillingPeriod, ExtractedTransaction};
use crate::store::Store;
use crate::utils::{maybe_print_json, parse_date, pretty_table, today};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

pub fn handle(store: &mut dyn Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("check", sub)) => check(store, sub)?,
        Some(("import", sub)) => import(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn load_rows(
    store: &mut dyn Store,
    sub: &clap::ArgMatches,
    card_id: i64,
) -> Result<Vec<ExtractedTransaction>> {
    let file = Path::new(sub.get_one::<String>("file").unwrap());
    if sub.get_flag("csv") {
        return statement::read_csv(file);
    }
    let endpoint = match sub.get_one::<String>("endpoint") {
        Some(url) => url.clone(),
        None => std::env::var(statement::ENDPOINT_ENV).with_context(|| {
            format!(
                "No extraction endpoint: pass --endpoint or set {}",
                statement::ENDPOINT_ENV
            )
        })?,
    };
    let card = store.credit_card(card_id)?;
    let period = match (
        sub.get_one::<String>("period-start"),
        sub.get_one::<String>("period-end"),
    ) {
        (Some(start), Some(end)) => BillingPeriod {
            start: parse_date(start)?,
            end: parse_date(end)?,
        },
        _ => {
            // Default to the cycle that just closed.
            let last_cut = cycle::last_cut_date(&card, today())?;
            let cyc = cycle::cycle_ending_at(&card, last_cut)?;
            BillingPeriod {
                start: cyc.start,
                end: cyc.end,
            }
        }
    };
    statement::extract(&endpoint, file, &card, period)
}

#[derive(Serialize)]
struct CheckRow {
    date: String,
    amount: String,
    description: String,
    duplicate: bool,
    reason: String,
}

fn check(store: &mut dyn Store, sub: &clap::ArgMatches) -> Result<()> {
    let card_id = parse_id(sub, "card")?;
    let rows = load_rows(store, sub, card_id)?;
    let checks = dedup::check_batch(&rows, card_id, &store.transactions()?);
    let data: Vec<CheckRow> = rows
        .iter()
        .zip(&checks)
        .map(|(row, check)| CheckRow {
            date: row.date.to_string(),
            amount: row.amount.to_string(),
            description: row.description.clone(),
            duplicate: check.is_duplicate,
            reason: check.reason.clone().unwrap_or_default(),
        })
        .collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let table_rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.clone(),
                    r.amount.clone(),
                    r.description.clone(),
                    if r.duplicate { "DUP".into() } else { String::new() },
                    r.reason.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Date", "Amount", "Description", "Flag", "Reason"],
                table_rows,
            )
        );
    }
    Ok(())
}

fn import(store: &mut dyn Store, sub: &clap::ArgMatches) -> Result<()> {
    let card_id = parse_id(sub, "card")?;
    store.credit_card(card_id)?;
    let rows = load_rows(store, sub, card_id)?;
    let checks = dedup::check_batch(&rows, card_id, &store.transactions()?);
    let outcome = statement::import(store, card_id, &rows, &checks)?;
    println!(
        "Imported {} transactions, skipped {} duplicates, {} failed",
        outcome.saved, outcome.skipped_duplicates, outcome.failed
    );
    Ok(())
}
