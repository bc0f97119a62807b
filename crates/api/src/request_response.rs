// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Numeric request fields are strings, parsed into decimals at the API
//! boundary so no value passes through binary floating point.

use pumpquote_domain::{CalculatedLineItem, LookupData};
use pumpquote_persistence::LineItemData;
use serde::{Deserialize, Serialize};

/// Hydraulic and electrical inputs as submitted by a client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimateInputRequest {
    /// Flow rate in gallons per minute.
    pub gpm: String,
    /// Depth the pump is set at, in feet.
    pub pump_setting: String,
    /// Pumping water level, in feet.
    pub pumping_water_level: String,
    /// Required discharge pressure, in psi.
    pub pressure_psi: String,
    /// `"240"` or `"480"`.
    pub voltage: String,
    /// Missing hour values count as zero.
    #[serde(default)]
    pub prep_time_hours: Option<String>,
    #[serde(default)]
    pub install_time_hours: Option<String>,
    #[serde(default)]
    pub start_time_hours: Option<String>,
    /// `"A"`, `"B"` or `"C"`.
    pub discharge_package: String,
}

/// Response of the calculation preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculateEstimateResponse {
    /// The eleven line items, in order.
    pub line_items: Vec<CalculatedLineItem>,
    /// Sum of the line item totals.
    pub total_amount: String,
}

/// API request to create an estimate for an existing client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateEstimateRequest {
    pub client_id: i64,
    #[serde(default)]
    pub site_address: Option<String>,
    #[serde(default)]
    pub site_coordinates: Option<String>,
    #[serde(default)]
    pub intended_use: Option<String>,
    #[serde(default)]
    pub overall_notes: Option<String>,
    #[serde(flatten)]
    pub input: EstimateInputRequest,
}

/// API response for a successful estimate creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateEstimateResponse {
    pub estimate_id: i64,
    pub estimate_number: String,
    pub site_id: i64,
    pub subtotal_amount: String,
    pub tax_amount: String,
    pub total_amount: String,
    pub line_items: Vec<CalculatedLineItem>,
}

/// One manually entered line item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItemRequest {
    pub description: String,
    /// Defaults to 1.
    #[serde(default)]
    pub quantity: Option<String>,
    /// Defaults to 0.00.
    #[serde(default)]
    pub rate: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub is_taxable: bool,
}

/// API request replacing every line item of an estimate.
///
/// Items are stored in the order given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplaceLineItemsRequest {
    pub line_items: Vec<LineItemRequest>,
}

/// Line items and totals of an estimate after a replace or recalculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItemsResponse {
    pub estimate_id: i64,
    pub subtotal_amount: String,
    pub tax_amount: String,
    pub total_amount: String,
    pub line_items: Vec<LineItemData>,
}

/// API request to change the status of an estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    /// One of `draft`, `approved`, `synced`, `sent`, `archived`.
    pub status: String,
}

/// API request to create or replace a material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialRequest {
    pub name: String,
    /// One of `Pipe`, `Motor`, `Wire`, `Concrete`, `SoundingTube`, `Bundle`.
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    pub price: String,
    #[serde(default)]
    pub lookup_data: Option<LookupData>,
    /// Defaults to active.
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// API request to create or replace a labor rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaborRateRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub rate_per_hour: String,
    /// Defaults to active.
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// API request to create or replace a client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientRequest {
    pub name: String,
    #[serde(default)]
    pub contact_name: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub contact_phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// API request replacing the settings row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsRequest {
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub company_address: Option<String>,
    #[serde(default)]
    pub company_phone: Option<String>,
    #[serde(default)]
    pub company_email: Option<String>,
    #[serde(default)]
    pub company_logo_url: Option<String>,
    /// Fraction, so `"0.0825"` is 8.25%.
    #[serde(default)]
    pub default_sales_tax_rate: Option<String>,
    #[serde(default)]
    pub email_from_name: Option<String>,
    #[serde(default)]
    pub email_from_address: Option<String>,
}

/// Generic acknowledgement for deletes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}
