// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Decimal helpers shared by the calculator and the estimate totals.
//!
//! All money math is done in `Decimal`. Rounding is half-up (midpoint away
//! from zero), matching how estimates have always been priced.

use crate::error::DomainError;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;
use tracing::warn;

/// Rounds `value` to `dp` decimal places, halves rounding up.
#[must_use]
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats a value with exactly two decimal places.
#[must_use]
pub fn format_money(value: Decimal) -> String {
    let mut rounded: Decimal = round_half_up(value, 2);
    rounded.rescale(2);
    rounded.to_string()
}

/// Formats a quantity without trailing zeros (`300.0` becomes `300`).
#[must_use]
pub fn format_quantity(value: Decimal) -> String {
    value.normalize().to_string()
}

/// Computes `round(quantity * rate, 2)`.
///
/// A product that overflows the decimal range yields zero and a warning
/// instead of an error, so one bad row never poisons an estimate.
#[must_use]
pub fn line_total(quantity: Decimal, rate: Decimal) -> Decimal {
    quantity.checked_mul(rate).map_or_else(
        || {
            warn!(%quantity, %rate, "Line total overflowed, using 0.00");
            Decimal::ZERO
        },
        |product| round_half_up(product, 2),
    )
}

/// Computes a line total from stored decimal strings.
///
/// Unparseable input is treated as `0.00`.
#[must_use]
pub fn line_total_from_strings(quantity: &str, rate: &str) -> String {
    match (Decimal::from_str(quantity.trim()), Decimal::from_str(rate.trim())) {
        (Ok(q), Ok(r)) => format_money(line_total(q, r)),
        _ => {
            warn!(quantity, rate, "Non-numeric line item value, using 0.00");
            format_money(Decimal::ZERO)
        }
    }
}

/// Parses a decimal string for the named field.
///
/// # Errors
///
/// Returns `InvalidDecimal` if the text is not a decimal number.
pub fn parse_decimal(field: &str, value: &str) -> Result<Decimal, DomainError> {
    Decimal::from_str(value.trim()).map_err(|_| DomainError::InvalidDecimal {
        field: field.to_string(),
        value: value.to_string(),
    })
}
