// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::Store;
use anyhow::Result;

/// Consistency checks over the stored data. Read-only; prints findings.
pub fn handle(store: &mut dyn Store) -> Result<()> {
    let mut findings = 0;

    let purchases = store.installment_purchases()?;
    let recurring = store.recurring_expenses()?;
    let transactions = store.transactions()?;
    let payments = store.installment_payments()?;

    // Generated transactions whose source no longer exists.
    for txn in &transactions {
        if let Some(source) = txn.source_id {
            let alive = if txn.is_recurring {
                recurring.iter().any(|e| e.id == source)
            } else {
                purchases.iter().any(|p| p.id == source)
            };
            if !alive {
                println!(
                    "orphan: transaction {} ('{}') points at missing source {}",
                    txn.id, txn.description, source
                );
                findings += 1;
            }
        }
    }

    // Payments whose purchase is gone (cannot happen through the CLI, but a
    // hand-edited database can get here).
    for payment in &payments {
        if !purchases.iter().any(|p| p.id == payment.purchase_id) {
            println!(
                "orphan: installment payment {} points at missing purchase {}",
                payment.id, payment.purchase_id
            );
            findings += 1;
        }
    }

    // Occurrence drift: each purchase should have exactly number_of_months
    // occurrences across generated transactions and payment rows.
    for purchase in &purchases {
        let generated = transactions
            .iter()
            .filter(|t| t.source_id == Some(purchase.id) && !t.is_recurring)
            .count();
        let scheduled = payments
            .iter()
            .filter(|p| p.purchase_id == purchase.id)
            .count();
        let expected = purchase.number_of_months as usize;
        if generated + scheduled != expected {
            println!(
                "drift: purchase {} ('{}') has {} occurrences, expected {}",
                purchase.id,
                purchase.name,
                generated + scheduled,
                expected
            );
            findings += 1;
        }
    }

    for card in store.credit_cards()? {
        if !(1..=31).contains(&card.cut_day) {
            println!("card {}: cut day {} out of range", card.id, card.cut_day);
            findings += 1;
        }
        if card.available_credit != card.credit_limit - card.current_balance {
            println!(
                "card {}: available credit {} does not match limit {} - balance {}",
                card.id, card.available_credit, card.credit_limit, card.current_balance
            );
            findings += 1;
        }
    }

    if findings == 0 {
        println!("No problems found");
    } else {
        println!("{} problem(s) found", findings);
    }
    Ok(())
}
