// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Installment and recurring-expense schedulers.
//!
//! Both materialize their definitions into the transactions table and tag
//! every generated row with `source_id` so regeneration and deletion can find
//! exactly their own output. An installment-generated transaction has
//! `is_recurring = false`, a recurring-generated one `is_recurring = true`;
//! together with `source_id` that distinguishes the two generators.

pub mod installments;
pub mod recurring;
