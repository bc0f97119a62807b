// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for PumpQuote.
//!
//! Turns string-typed requests into validated domain values, runs the
//! estimate calculator against the stored catalog, and drives persistence.
//! Domain, calculator and persistence errors are translated explicitly into
//! [`ApiError`] so no lower-layer error type crosses this boundary.

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

mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{
    ApiError, translate_calculation_error, translate_domain_error, translate_persistence_error,
};
pub use handlers::{
    DEFAULT_PER_PAGE, MAX_PER_PAGE, calculate_estimate_line_items, create_client,
    create_estimate, create_labor_rate, create_material, delete_client, delete_estimate,
    delete_labor_rate, delete_material, get_client, get_estimate, get_settings, list_client_sites,
    list_clients, list_estimates, list_labor_rates, list_materials, load_catalog,
    parse_estimate_input, recalculate_estimate, replace_line_items, update_client,
    update_estimate_status, update_labor_rate, update_material, update_settings,
};
pub use request_response::{
    CalculateEstimateResponse, ClientRequest, CreateEstimateRequest, CreateEstimateResponse,
    DeleteResponse, EstimateInputRequest, LaborRateRequest, LineItemRequest, LineItemsResponse,
    MaterialRequest, ReplaceLineItemsRequest, SettingsRequest, UpdateStatusRequest,
};
