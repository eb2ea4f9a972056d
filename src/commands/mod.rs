// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod assets;
pub mod cards;
pub mod categories;
pub mod doctor;
pub mod fixed;
pub mod installments;
pub mod investments;
pub mod liabilities;
pub mod reconcile;
pub mod recurring;
pub mod reports;
pub mod statement;
pub mod transactions;
