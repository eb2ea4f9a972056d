// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::schedule::installments;
use crate::store::Store;
use crate::utils::today;
use anyhow::Result;

pub fn handle(store: &mut dyn Store) -> Result<()> {
    let moved = installments::reconcile(store, today())?;
    if moved == 0 {
        println!("Nothing to reconcile");
    } else {
        println!("Rolled {} pending payment(s) into transactions", moved);
    }
    Ok(())
}
