// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions.
//!
//! Each handler parses its request, applies domain validation, and calls the
//! calculator and persistence layers. Handlers never see HTTP types.

use pumpquote_domain::{
    CalculatedLineItem, Catalog, CatalogLaborRate, CatalogMaterial, Decimal, DischargePackage,
    EstimateInput, EstimateStatus, EstimateTotals, FallbackPrices, LaborHours, MaterialCategory,
    Voltage, calculate, manual_line_item, parse_decimal, sum_line_item_totals,
    validate_lookup_data, validate_name, validate_non_negative, validate_tax_rate,
};
use pumpquote_persistence::{
    ClientData, CreatedEstimate, EstimateData, EstimateDetail, EstimatePage, LaborRateData,
    MaterialData, NewClient, NewEstimate, NewLaborRate, NewMaterial, NewSite, SettingsData,
    SiteData, SqlitePersistence,
};
use std::str::FromStr;
use tracing::{debug, info};

use crate::error::{
    ApiError, translate_calculation_error, translate_domain_error, translate_persistence_error,
};
use crate::request_response::{
    CalculateEstimateResponse, ClientRequest, CreateEstimateRequest, CreateEstimateResponse,
    DeleteResponse, EstimateInputRequest, LaborRateRequest, LineItemRequest, LineItemsResponse,
    MaterialRequest, ReplaceLineItemsRequest, SettingsRequest, UpdateStatusRequest,
};

/// Page size used when a listing request does not give one.
pub const DEFAULT_PER_PAGE: u32 = 20;

/// Largest page size a listing request may ask for.
pub const MAX_PER_PAGE: u32 = 100;

// ============================================================================
// Input parsing
// ============================================================================

fn parse_field(field: &str, value: &str) -> Result<Decimal, ApiError> {
    parse_decimal(field, value).map_err(translate_domain_error)
}

fn parse_hours(field: &str, value: Option<&str>) -> Result<Decimal, ApiError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(text) => parse_field(field, text),
        None => Ok(Decimal::ZERO),
    }
}

/// Parses and validates the calculator inputs of a request.
///
/// # Errors
///
/// Returns `InvalidInput` naming the first field that does not parse or
/// fails validation.
pub fn parse_estimate_input(request: &EstimateInputRequest) -> Result<EstimateInput, ApiError> {
    let voltage: Voltage = Voltage::from_str(&request.voltage).map_err(translate_domain_error)?;
    let discharge_package: DischargePackage =
        DischargePackage::from_str(&request.discharge_package).map_err(translate_domain_error)?;

    let hours: LaborHours = LaborHours {
        prep: parse_hours("prep_time_hours", request.prep_time_hours.as_deref())?,
        install: parse_hours("install_time_hours", request.install_time_hours.as_deref())?,
        start: parse_hours("start_time_hours", request.start_time_hours.as_deref())?,
    };

    EstimateInput::new(
        parse_field("gpm", &request.gpm)?,
        parse_field("pump_setting", &request.pump_setting)?,
        parse_field("pumping_water_level", &request.pumping_water_level)?,
        parse_field("pressure_psi", &request.pressure_psi)?,
        voltage,
        hours,
        discharge_package,
    )
    .map_err(translate_calculation_error)
}

/// Loads the active catalog and groups it for the calculator.
///
/// # Errors
///
/// Returns `Internal` if the catalog cannot be read.
pub fn load_catalog(persistence: &mut SqlitePersistence) -> Result<Catalog, ApiError> {
    let materials: Vec<CatalogMaterial> = persistence
        .list_active_materials()
        .map_err(translate_persistence_error)?;
    let labor_rates: Vec<CatalogLaborRate> = persistence
        .list_active_labor_rates()
        .map_err(translate_persistence_error)?;

    Ok(Catalog::from_rows(materials, labor_rates))
}

fn manual_items(items: &[LineItemRequest]) -> Result<Vec<CalculatedLineItem>, ApiError> {
    items
        .iter()
        .zip(1_u32..)
        .map(|(item, sort_order)| {
            if item.description.trim().is_empty() {
                return Err(ApiError::InvalidInput {
                    field: String::from("description"),
                    message: format!("Line item {sort_order} has no description"),
                });
            }
            let quantity: Option<&str> = item.quantity.as_deref().filter(|q| !q.trim().is_empty());
            let rate: Option<&str> = item.rate.as_deref().filter(|r| !r.trim().is_empty());
            if let Some(quantity) = quantity {
                parse_field("quantity", quantity)?;
            }
            if let Some(rate) = rate {
                parse_field("rate", rate)?;
            }

            Ok(manual_line_item(
                sort_order,
                item.description.trim(),
                quantity,
                rate,
                item.notes.clone(),
                item.is_taxable,
            ))
        })
        .collect()
}

fn line_items_response(
    persistence: &mut SqlitePersistence,
    estimate_id: i64,
    totals: EstimateTotals,
) -> Result<LineItemsResponse, ApiError> {
    let detail: EstimateDetail = persistence
        .get_estimate_detail(estimate_id)
        .map_err(translate_persistence_error)?;

    Ok(LineItemsResponse {
        estimate_id,
        subtotal_amount: totals.subtotal_amount,
        tax_amount: totals.tax_amount,
        total_amount: totals.total_amount,
        line_items: detail.line_items,
    })
}

fn deleted(message: String) -> DeleteResponse {
    DeleteResponse {
        success: true,
        message,
    }
}

// ============================================================================
// Estimates
// ============================================================================

/// Runs the calculator against the current catalog without storing anything.
///
/// # Errors
///
/// Returns `InvalidInput` for unparseable inputs and `CalculationFailed`
/// when no pipe, motor, or wire matches.
pub fn calculate_estimate_line_items(
    persistence: &mut SqlitePersistence,
    request: &EstimateInputRequest,
    fallbacks: &FallbackPrices,
) -> Result<CalculateEstimateResponse, ApiError> {
    let input: EstimateInput = parse_estimate_input(request)?;
    let catalog: Catalog = load_catalog(persistence)?;

    let line_items: Vec<CalculatedLineItem> =
        calculate(&input, &catalog, fallbacks).map_err(translate_calculation_error)?;
    let total_amount: String = sum_line_item_totals(&line_items);

    debug!(gpm = %input.gpm(), total_amount = %total_amount, "Calculated estimate preview");

    Ok(CalculateEstimateResponse {
        line_items,
        total_amount,
    })
}

/// Calculates and stores a new estimate with its site and line items.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the client does not exist, plus every
/// error of [`calculate_estimate_line_items`]. Nothing is stored on error.
pub fn create_estimate(
    persistence: &mut SqlitePersistence,
    request: &CreateEstimateRequest,
    fallbacks: &FallbackPrices,
) -> Result<CreateEstimateResponse, ApiError> {
    let input: EstimateInput = parse_estimate_input(&request.input)?;
    let catalog: Catalog = load_catalog(persistence)?;
    let line_items: Vec<CalculatedLineItem> =
        calculate(&input, &catalog, fallbacks).map_err(translate_calculation_error)?;

    let new_estimate: NewEstimate = NewEstimate {
        client_id: request.client_id,
        site: NewSite {
            address: request.site_address.clone(),
            coordinates: request.site_coordinates.clone(),
            intended_use: request.intended_use.clone(),
        },
        input,
        overall_notes: request.overall_notes.clone(),
    };

    let created: CreatedEstimate = persistence
        .create_estimate(&new_estimate, &line_items)
        .map_err(translate_persistence_error)?;
    let stored: EstimateData = persistence
        .get_estimate(created.estimate_id)
        .map_err(translate_persistence_error)?;

    info!(
        estimate_id = created.estimate_id,
        estimate_number = %created.estimate_number,
        client_id = request.client_id,
        "Created estimate"
    );

    Ok(CreateEstimateResponse {
        estimate_id: created.estimate_id,
        estimate_number: created.estimate_number,
        site_id: created.site_id,
        subtotal_amount: stored.subtotal_amount,
        tax_amount: stored.tax_amount,
        total_amount: stored.total_amount,
        line_items,
    })
}

/// Lists estimates newest first.
///
/// `page` defaults to 1 and `per_page` to [`DEFAULT_PER_PAGE`], capped at
/// [`MAX_PER_PAGE`].
///
/// # Errors
///
/// Returns `Internal` if the listing cannot be read.
pub fn list_estimates(
    persistence: &mut SqlitePersistence,
    page: Option<u32>,
    per_page: Option<u32>,
) -> Result<EstimatePage, ApiError> {
    let page: u32 = page.unwrap_or(1).max(1);
    let per_page: u32 = per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE);

    persistence
        .list_estimates(page, per_page)
        .map_err(translate_persistence_error)
}

/// # Errors
///
/// Returns `ResourceNotFound` if the estimate does not exist.
pub fn get_estimate(
    persistence: &mut SqlitePersistence,
    estimate_id: i64,
) -> Result<EstimateDetail, ApiError> {
    persistence
        .get_estimate_detail(estimate_id)
        .map_err(translate_persistence_error)
}

/// Replaces the line items of an estimate with manually entered ones.
///
/// Each item's total is recomputed from its quantity and rate, then the
/// estimate totals.
///
/// # Errors
///
/// Returns `InvalidInput` for an item without a description or with an
/// unparseable quantity or rate, and `ResourceNotFound` if the estimate
/// does not exist.
pub fn replace_line_items(
    persistence: &mut SqlitePersistence,
    estimate_id: i64,
    request: &ReplaceLineItemsRequest,
) -> Result<LineItemsResponse, ApiError> {
    let items: Vec<CalculatedLineItem> = manual_items(&request.line_items)?;

    let totals: EstimateTotals = persistence
        .replace_line_items(estimate_id, &items)
        .map_err(translate_persistence_error)?;

    line_items_response(persistence, estimate_id, totals)
}

/// Re-runs the calculator on the stored inputs of an estimate and replaces
/// its line items with the result.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the estimate does not exist and
/// `CalculationFailed` if the current catalog no longer covers the inputs.
/// The stored line items are left alone on error.
pub fn recalculate_estimate(
    persistence: &mut SqlitePersistence,
    estimate_id: i64,
    fallbacks: &FallbackPrices,
) -> Result<LineItemsResponse, ApiError> {
    let estimate: EstimateData = persistence
        .get_estimate(estimate_id)
        .map_err(translate_persistence_error)?;
    let input: EstimateInput = estimate
        .calculation_input()
        .map_err(translate_calculation_error)?;
    let catalog: Catalog = load_catalog(persistence)?;

    let items: Vec<CalculatedLineItem> =
        calculate(&input, &catalog, fallbacks).map_err(translate_calculation_error)?;
    let totals: EstimateTotals = persistence
        .replace_line_items(estimate_id, &items)
        .map_err(translate_persistence_error)?;

    info!(
        estimate_id,
        previous_total = %estimate.total_amount,
        total_amount = %totals.total_amount,
        "Recalculated estimate"
    );

    line_items_response(persistence, estimate_id, totals)
}

/// # Errors
///
/// Returns `InvalidInput` for an unknown status and `ResourceNotFound` if
/// the estimate does not exist.
pub fn update_estimate_status(
    persistence: &mut SqlitePersistence,
    estimate_id: i64,
    request: &UpdateStatusRequest,
) -> Result<EstimateData, ApiError> {
    let status: EstimateStatus =
        EstimateStatus::from_str(request.status.trim()).map_err(translate_domain_error)?;

    persistence
        .update_estimate_status(estimate_id, status)
        .map_err(translate_persistence_error)?;
    persistence
        .get_estimate(estimate_id)
        .map_err(translate_persistence_error)
}

/// # Errors
///
/// Returns `ResourceNotFound` if the estimate does not exist.
pub fn delete_estimate(
    persistence: &mut SqlitePersistence,
    estimate_id: i64,
) -> Result<DeleteResponse, ApiError> {
    persistence
        .delete_estimate(estimate_id)
        .map_err(translate_persistence_error)?;
    Ok(deleted(format!("Deleted estimate {estimate_id}")))
}

// ============================================================================
// Catalog
// ============================================================================

fn new_material(request: &MaterialRequest) -> Result<NewMaterial, ApiError> {
    validate_name("Material", &request.name).map_err(translate_domain_error)?;
    let category: MaterialCategory =
        MaterialCategory::from_str(request.category.trim()).map_err(translate_domain_error)?;
    let price: Decimal = parse_field("price", &request.price)?;
    validate_non_negative("price", price).map_err(translate_domain_error)?;
    validate_lookup_data(&request.name, category, request.lookup_data.as_ref())
        .map_err(translate_domain_error)?;

    Ok(NewMaterial {
        name: request.name.trim().to_string(),
        category,
        description: request.description.clone(),
        unit: request.unit.clone(),
        price,
        lookup_data: request.lookup_data.clone(),
        is_active: request.is_active.unwrap_or(true),
    })
}

fn new_labor_rate(request: &LaborRateRequest) -> Result<NewLaborRate, ApiError> {
    validate_name("Labor rate", &request.name).map_err(translate_domain_error)?;
    let rate_per_hour: Decimal = parse_field("rate_per_hour", &request.rate_per_hour)?;
    validate_non_negative("rate_per_hour", rate_per_hour).map_err(translate_domain_error)?;

    Ok(NewLaborRate {
        name: request.name.trim().to_string(),
        description: request.description.clone(),
        rate_per_hour,
        is_active: request.is_active.unwrap_or(true),
    })
}

/// Lists every material, inactive ones included.
///
/// # Errors
///
/// Returns `Internal` if the catalog cannot be read.
pub fn list_materials(persistence: &mut SqlitePersistence) -> Result<Vec<MaterialData>, ApiError> {
    persistence.list_materials().map_err(translate_persistence_error)
}

/// # Errors
///
/// Returns `InvalidInput` for a blank name, unknown category, bad price or
/// mismatched lookup data, and `DomainRuleViolation` for a duplicate name.
pub fn create_material(
    persistence: &mut SqlitePersistence,
    request: &MaterialRequest,
) -> Result<MaterialData, ApiError> {
    let material: NewMaterial = new_material(request)?;
    persistence
        .create_material(&material)
        .map_err(translate_persistence_error)
}

/// # Errors
///
/// As [`create_material`], plus `ResourceNotFound`.
pub fn update_material(
    persistence: &mut SqlitePersistence,
    material_id: i64,
    request: &MaterialRequest,
) -> Result<MaterialData, ApiError> {
    let material: NewMaterial = new_material(request)?;
    persistence
        .update_material(material_id, &material)
        .map_err(translate_persistence_error)
}

/// # Errors
///
/// Returns `ResourceNotFound` if the material does not exist.
pub fn delete_material(
    persistence: &mut SqlitePersistence,
    material_id: i64,
) -> Result<DeleteResponse, ApiError> {
    persistence
        .delete_material(material_id)
        .map_err(translate_persistence_error)?;
    Ok(deleted(format!("Deleted material {material_id}")))
}

/// Lists every labor rate, inactive ones included.
///
/// # Errors
///
/// Returns `Internal` if the catalog cannot be read.
pub fn list_labor_rates(
    persistence: &mut SqlitePersistence,
) -> Result<Vec<LaborRateData>, ApiError> {
    persistence
        .list_labor_rates()
        .map_err(translate_persistence_error)
}

/// # Errors
///
/// Returns `InvalidInput` for a blank name or bad rate and
/// `DomainRuleViolation` for a duplicate name.
pub fn create_labor_rate(
    persistence: &mut SqlitePersistence,
    request: &LaborRateRequest,
) -> Result<LaborRateData, ApiError> {
    let labor_rate: NewLaborRate = new_labor_rate(request)?;
    persistence
        .create_labor_rate(&labor_rate)
        .map_err(translate_persistence_error)
}

/// # Errors
///
/// As [`create_labor_rate`], plus `ResourceNotFound`.
pub fn update_labor_rate(
    persistence: &mut SqlitePersistence,
    labor_rate_id: i64,
    request: &LaborRateRequest,
) -> Result<LaborRateData, ApiError> {
    let labor_rate: NewLaborRate = new_labor_rate(request)?;
    persistence
        .update_labor_rate(labor_rate_id, &labor_rate)
        .map_err(translate_persistence_error)
}

/// # Errors
///
/// Returns `ResourceNotFound` if the labor rate does not exist.
pub fn delete_labor_rate(
    persistence: &mut SqlitePersistence,
    labor_rate_id: i64,
) -> Result<DeleteResponse, ApiError> {
    persistence
        .delete_labor_rate(labor_rate_id)
        .map_err(translate_persistence_error)?;
    Ok(deleted(format!("Deleted labor rate {labor_rate_id}")))
}

// ============================================================================
// Clients
// ============================================================================

fn new_client(request: &ClientRequest) -> Result<NewClient, ApiError> {
    validate_name("Client", &request.name).map_err(translate_domain_error)?;

    Ok(NewClient {
        name: request.name.trim().to_string(),
        contact_name: request.contact_name.clone(),
        contact_email: request.contact_email.clone(),
        contact_phone: request.contact_phone.clone(),
        address: request.address.clone(),
    })
}

/// # Errors
///
/// Returns `Internal` if the clients cannot be read.
pub fn list_clients(persistence: &mut SqlitePersistence) -> Result<Vec<ClientData>, ApiError> {
    persistence.list_clients().map_err(translate_persistence_error)
}

/// # Errors
///
/// Returns `ResourceNotFound` if the client does not exist.
pub fn get_client(
    persistence: &mut SqlitePersistence,
    client_id: i64,
) -> Result<ClientData, ApiError> {
    persistence
        .get_client(client_id)
        .map_err(translate_persistence_error)
}

/// # Errors
///
/// Returns `InvalidInput` for a blank name.
pub fn create_client(
    persistence: &mut SqlitePersistence,
    request: &ClientRequest,
) -> Result<ClientData, ApiError> {
    let client: NewClient = new_client(request)?;
    persistence
        .create_client(&client)
        .map_err(translate_persistence_error)
}

/// # Errors
///
/// Returns `InvalidInput` for a blank name and `ResourceNotFound` if the
/// client does not exist.
pub fn update_client(
    persistence: &mut SqlitePersistence,
    client_id: i64,
    request: &ClientRequest,
) -> Result<ClientData, ApiError> {
    let client: NewClient = new_client(request)?;
    persistence
        .update_client(client_id, &client)
        .map_err(translate_persistence_error)
}

/// Deletes a client with all of its sites and estimates.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the client does not exist.
pub fn delete_client(
    persistence: &mut SqlitePersistence,
    client_id: i64,
) -> Result<DeleteResponse, ApiError> {
    persistence
        .delete_client(client_id)
        .map_err(translate_persistence_error)?;
    Ok(deleted(format!("Deleted client {client_id}")))
}

/// # Errors
///
/// Returns `ResourceNotFound` if the client does not exist.
pub fn list_client_sites(
    persistence: &mut SqlitePersistence,
    client_id: i64,
) -> Result<Vec<SiteData>, ApiError> {
    persistence
        .list_sites_for_client(client_id)
        .map_err(translate_persistence_error)
}

// ============================================================================
// Settings
// ============================================================================

/// # Errors
///
/// Returns `Internal` if the settings cannot be read.
pub fn get_settings(persistence: &mut SqlitePersistence) -> Result<SettingsData, ApiError> {
    persistence.get_settings().map_err(translate_persistence_error)
}

/// Replaces the settings row. Fields left out are cleared.
///
/// # Errors
///
/// Returns `InvalidInput` if the tax rate is not a fraction between 0
/// and 1.
pub fn update_settings(
    persistence: &mut SqlitePersistence,
    request: &SettingsRequest,
) -> Result<SettingsData, ApiError> {
    let default_sales_tax_rate: Option<Decimal> = request
        .default_sales_tax_rate
        .as_deref()
        .map(str::trim)
        .filter(|rate| !rate.is_empty())
        .map(|rate| parse_field("default_sales_tax_rate", rate))
        .transpose()?;
    if let Some(rate) = default_sales_tax_rate {
        validate_tax_rate(rate).map_err(translate_domain_error)?;
    }

    let values: SettingsData = SettingsData {
        company_name: request.company_name.clone(),
        company_address: request.company_address.clone(),
        company_phone: request.company_phone.clone(),
        company_email: request.company_email.clone(),
        company_logo_url: request.company_logo_url.clone(),
        default_sales_tax_rate,
        email_from_name: request.email_from_name.clone(),
        email_from_address: request.email_from_address.clone(),
        updated_at: None,
    };

    persistence
        .save_settings(&values)
        .map_err(translate_persistence_error)
}
