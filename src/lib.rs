// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod calc;
pub mod cli;
pub mod commands;
pub mod cycle;
pub mod dates;
pub mod db;
pub mod dedup;
pub mod error;
pub mod models;
pub mod schedule;
pub mod statement;
pub mod store;
pub mod utils;
