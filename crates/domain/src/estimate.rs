// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Estimate numbering and totals.

use crate::money::{format_money, line_total_from_strings, round_half_up};
use crate::types::CalculatedLineItem;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::warn;

/// Formats an estimate number as `"{year}-{sequence:04}"`.
///
/// `existing_this_year` is the number of estimates already created in
/// `year`; the new estimate takes the next sequence value.
#[must_use]
pub fn format_estimate_number(year: i32, existing_this_year: u64) -> String {
    format!("{year}-{:04}", existing_this_year.saturating_add(1))
}

/// Builds a manually entered line item and computes its total.
///
/// A missing quantity counts as 1 and a missing rate as 0.00. The stored
/// quantity and rate are the values the total was computed from.
#[must_use]
pub fn manual_line_item(
    sort_order: u32,
    description: &str,
    quantity: Option<&str>,
    rate: Option<&str>,
    notes: Option<String>,
    is_taxable: bool,
) -> CalculatedLineItem {
    let quantity: String = quantity
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .unwrap_or("1")
        .to_string();
    let rate: String = rate
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .unwrap_or("0.00")
        .to_string();
    let total: String = line_total_from_strings(&quantity, &rate);

    CalculatedLineItem {
        sort_order,
        description: description.to_string(),
        quantity,
        rate,
        total,
        notes,
        is_taxable,
    }
}

/// Stored money totals of an estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimateTotals {
    pub subtotal_amount: String,
    pub tax_amount: String,
    pub total_amount: String,
}

/// Sums the `total` of every line item, two decimal places.
#[must_use]
pub fn sum_line_item_totals(items: &[CalculatedLineItem]) -> String {
    format_money(sum_where(items, |_| true))
}

/// Computes subtotal, tax and total for a set of line items.
///
/// Tax applies only to taxable items, at `tax_rate` (a fraction, so
/// `0.0825` is 8.25%).
#[must_use]
pub fn compute_totals(items: &[CalculatedLineItem], tax_rate: Decimal) -> EstimateTotals {
    let subtotal: Decimal = sum_where(items, |_| true);
    let taxable: Decimal = sum_where(items, |item| item.is_taxable);
    let tax: Decimal = taxable
        .checked_mul(tax_rate)
        .map_or(Decimal::ZERO, |t| round_half_up(t, 2));
    let total: Decimal = subtotal.saturating_add(tax);

    EstimateTotals {
        subtotal_amount: format_money(subtotal),
        tax_amount: format_money(tax),
        total_amount: format_money(total),
    }
}

fn sum_where(items: &[CalculatedLineItem], include: impl Fn(&CalculatedLineItem) -> bool) -> Decimal {
    items
        .iter()
        .filter(|item| include(item))
        .map(|item| {
            Decimal::from_str(item.total.trim()).unwrap_or_else(|_| {
                warn!(
                    sort_order = item.sort_order,
                    total = %item.total,
                    "Non-numeric line item total, counting as 0.00"
                );
                Decimal::ZERO
            })
        })
        .fold(Decimal::ZERO, Decimal::saturating_add)
}
