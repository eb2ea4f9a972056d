// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Card-statement intake.
//!
//! Two sources produce the same `ExtractedTransaction` shape: an external
//! extraction service (opaque collaborator, POSTed the statement file) and a
//! local CSV file. Either way the rows run through the duplicate check before
//! `import` commits anything.

use crate::db::FALLBACK_CATEGORY;
use crate::dedup::DuplicateCheck;
use crate::models::{CreditCard, NewTransaction, TxnType};
use crate::store::Store;
use anyhow::{Context, Result, bail};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const ENDPOINT_ENV: &str = "QUINCENA_EXTRACT_ENDPOINT";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedTransaction {
    pub date: NaiveDate,
    pub amount: Decimal,
    pub description: String,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct BillingPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Serialize)]
struct ExtractRequest<'a> {
    file_base64: String,
    credit_card_id: i64,
    credit_card_name: &'a str,
    cut_date: NaiveDate,
    billing_period: BillingPeriod,
}

#[derive(Deserialize)]
struct ExtractResponse {
    success: bool,
    #[serde(default)]
    transactions: Vec<ExtractedTransaction>,
    #[serde(default)]
    error: Option<String>,
}

/// Posts the statement file to the extraction service and returns its rows.
pub fn extract(
    endpoint: &str,
    file: &Path,
    card: &CreditCard,
    billing_period: BillingPeriod,
) -> Result<Vec<ExtractedTransaction>> {
    let bytes =
        fs::read(file).with_context(|| format!("Read statement file {}", file.display()))?;
    let request = ExtractRequest {
        file_base64: BASE64.encode(&bytes),
        credit_card_id: card.id,
        credit_card_name: &card.name,
        cut_date: billing_period.end,
        billing_period,
    };
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(30))
        .user_agent("quincena/0.1")
        .build()
        .context("Build HTTP client")?;
    let response: ExtractResponse = client
        .post(endpoint)
        .json(&request)
        .send()
        .context("Call extraction service")?
        .error_for_status()
        .context("Extraction service returned an error status")?
        .json()
        .context("Parse extraction response")?;
    if !response.success {
        bail!(
            "extraction failed: {}",
            response.error.unwrap_or_else(|| "unknown error".into())
        );
    }
    Ok(response.transactions)
}

/// Reads `date,amount,description,category` rows from a local CSV file.
pub fn read_csv(path: &Path) -> Result<Vec<ExtractedTransaction>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path.display()))?;
    let mut out = Vec::new();
    for (i, record) in reader.deserialize::<ExtractedTransaction>().enumerate() {
        let row = record.with_context(|| format!("CSV row {}", i + 2))?;
        out.push(row);
    }
    Ok(out)
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportOutcome {
    pub saved: usize,
    pub skipped_duplicates: usize,
    pub failed: usize,
}

/// Commits extracted rows as card expenses, skipping flagged duplicates.
///
/// Creation is best-effort: a failed row is counted and the rest continue,
/// rows already written stay written. Category names match case-insensitively
/// against the stored set; unknown names fall back to "Otros".
pub fn import(
    store: &mut dyn Store,
    card_id: i64,
    extracted: &[ExtractedTransaction],
    checks: &[DuplicateCheck],
) -> Result<ImportOutcome> {
    let categories = store.categories()?;
    let mut outcome = ImportOutcome::default();
    for (row, check) in extracted.iter().zip(checks) {
        if check.is_duplicate {
            outcome.skipped_duplicates += 1;
            continue;
        }
        let tag = row
            .category
            .as_deref()
            .unwrap_or(FALLBACK_CATEGORY)
            .to_lowercase();
        let category = categories
            .iter()
            .find(|c| c.name.to_lowercase() == tag)
            .or_else(|| categories.iter().find(|c| c.name == FALLBACK_CATEGORY));
        let created = store.create_transaction(&NewTransaction {
            r#type: TxnType::Expense,
            amount: row.amount,
            description: row.description.clone(),
            tags: category.map(|c| vec![c.id]).unwrap_or_default(),
            date: row.date,
            is_recurring: false,
            credit_card_id: Some(card_id),
            source_id: None,
        });
        match created {
            Ok(_) => outcome.saved += 1,
            Err(_) => outcome.failed += 1,
        }
    }
    Ok(outcome)
}
