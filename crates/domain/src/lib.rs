// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod calculator;
mod catalog;
mod error;
mod estimate;
mod fallback;
mod money;
mod types;
mod validation;
mod wire_chart;

#[cfg(test)]
mod tests;

pub use calculator::{LINE_ITEM_COUNT, PumpSizing, calculate, required_horsepower, size_pump};
pub use catalog::Catalog;
pub use error::{CalculationError, DomainError};
pub use estimate::{
    EstimateTotals, compute_totals, format_estimate_number, manual_line_item, sum_line_item_totals,
};
pub use fallback::{FallbackBundle, FallbackItem, FallbackPrices};
pub use money::{
    format_money, format_quantity, line_total, line_total_from_strings, parse_decimal,
    round_half_up,
};

// Re-export public types
pub use types::{
    CalculatedLineItem, CatalogLaborRate, CatalogMaterial, DischargePackage, EstimateInput,
    EstimateStatus, LaborHours, LookupData, MaterialCategory, Voltage,
};
pub use validation::{
    validate_lookup_data, validate_name, validate_non_negative, validate_tax_rate,
};
pub use wire_chart::{WIRE_CHART, WireTier, parse_motor_hp, wire_gauge_for};

/// Re-exported so downstream crates use the same decimal type.
pub use rust_decimal::Decimal;
