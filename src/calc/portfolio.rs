// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Asset, Investment};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};

/// Absolute gain or loss of one holding.
pub fn investment_return(inv: &Investment) -> Decimal {
    (inv.current_price - inv.purchase_price) * inv.quantity
}

/// Percentage gain or loss, 0 when the purchase price is zero.
pub fn investment_return_pct(inv: &Investment) -> f64 {
    if inv.purchase_price.is_zero() {
        return 0.0;
    }
    ((inv.current_price - inv.purchase_price) / inv.purchase_price * Decimal::from(100))
        .to_f64()
        .unwrap_or(0.0)
}

pub fn portfolio_value(investments: &[Investment]) -> Decimal {
    investments
        .iter()
        .map(|i| i.current_price * i.quantity)
        .sum()
}

pub fn portfolio_cost(investments: &[Investment]) -> Decimal {
    investments
        .iter()
        .map(|i| i.purchase_price * i.quantity)
        .sum()
}

pub fn portfolio_return(investments: &[Investment]) -> Decimal {
    portfolio_value(investments) - portfolio_cost(investments)
}

/// Compounds the stored value by the asset's annual change since purchase.
/// Display helper only; net worth always uses the raw value.
pub fn projected_asset_value(asset: &Asset, today: NaiveDate) -> Decimal {
    if asset.annual_value_change == 0.0 || today <= asset.purchase_date {
        return asset.value;
    }
    let years = (today - asset.purchase_date).num_days() as f64 / 365.25;
    let factor = (1.0 + asset.annual_value_change / 100.0).powf(years);
    let base = asset.value.to_f64().unwrap_or(0.0);
    Decimal::from_f64(base * factor)
        .map(|d| d.round_dp(2))
        .unwrap_or(asset.value)
}
