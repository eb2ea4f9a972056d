// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::Store;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle(store: &mut dyn Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(store, sub)?,
        Some(("add", sub)) => add(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn list(store: &mut dyn Store, sub: &clap::ArgMatches) -> Result<()> {
    let cats = store.categories()?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &cats)? {
        let rows: Vec<Vec<String>> = cats
            .iter()
            .map(|c| {
                vec![
                    c.id.to_string(),
                    c.name.clone(),
                    c.icon.clone(),
                    c.color.clone(),
                    if c.is_custom { "yes".into() } else { String::new() },
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Id", "Name", "Icon", "Color", "Custom"], rows)
        );
    }
    Ok(())
}

fn add(store: &mut dyn Store, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let color = sub.get_one::<String>("color").unwrap();
    let icon = sub.get_one::<String>("icon").unwrap();
    let cat = store.create_category(name, color, icon)?;
    println!("Added category '{}' (id {})", cat.name, cat.id);
    Ok(())
}
