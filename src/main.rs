// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use quincena::store::{MemStore, SqliteStore, Store};
use quincena::{cli, commands, db};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let mut store: Box<dyn Store> = if matches.get_flag("ephemeral") {
        Box::new(MemStore::new())
    } else {
        Box::new(SqliteStore::new(db::open_or_init()?))
    };
    let store = store.as_mut();

    match matches.subcommand() {
        Some(("tx", sub)) => commands::transactions::handle(store, sub)?,
        Some(("category", sub)) => commands::categories::handle(store, sub)?,
        Some(("card", sub)) => commands::cards::handle(store, sub)?,
        Some(("installment", sub)) => commands::installments::handle(store, sub)?,
        Some(("recurring", sub)) => commands::recurring::handle(store, sub)?,
        Some(("fixed", sub)) => commands::fixed::handle(store, sub)?,
        Some(("asset", sub)) => commands::assets::handle(store, sub)?,
        Some(("liability", sub)) => commands::liabilities::handle(store, sub)?,
        Some(("invest", sub)) => commands::investments::handle(store, sub)?,
        Some(("report", sub)) => commands::reports::handle(store, sub)?,
        Some(("statement", sub)) => commands::statement::handle(store, sub)?,
        Some(("reconcile", _)) => commands::reconcile::handle(store)?,
        Some(("doctor", _)) => commands::doctor::handle(store)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
