// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Estimate and line item queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use num_traits::ToPrimitive;
use pumpquote_domain::{DischargePackage, EstimateStatus, Voltage, parse_decimal};
use std::str::FromStr;
use tracing::debug;

use crate::data_models::{EstimateData, EstimateDetail, EstimatePage, EstimateSummary, LineItemData};
use crate::diesel_schema::{clients, estimate_line_items, estimates};
use crate::error::PersistenceError;
use crate::queries::clients::{get_client, get_site};

#[derive(Queryable, Selectable)]
#[diesel(table_name = estimates)]
struct EstimateRow {
    estimate_id: i64,
    client_id: i64,
    site_id: i64,
    estimate_number: String,
    status: String,
    gpm: String,
    pump_setting: String,
    pumping_water_level: String,
    pressure_psi: String,
    voltage: i32,
    prep_time_hours: String,
    install_time_hours: String,
    start_time_hours: String,
    discharge_package: String,
    overall_notes: Option<String>,
    subtotal_amount: String,
    tax_rate: String,
    tax_amount: String,
    total_amount: String,
    approved_at: Option<String>,
    created_at: String,
    updated_at: String,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = estimate_line_items)]
struct LineItemRow {
    line_item_id: i64,
    estimate_id: i64,
    sort_order: i32,
    description: String,
    quantity: String,
    rate: String,
    total: String,
    notes: Option<String>,
    is_taxable: i32,
}

type SummaryRow = (i64, String, String, i64, String, String, String);

impl TryFrom<EstimateRow> for EstimateData {
    type Error = PersistenceError;

    fn try_from(row: EstimateRow) -> Result<Self, Self::Error> {
        let voltage: u32 = row.voltage.to_u32().ok_or_else(|| {
            PersistenceError::SerializationError(format!("Invalid stored voltage {}", row.voltage))
        })?;

        Ok(Self {
            estimate_id: row.estimate_id,
            client_id: row.client_id,
            site_id: row.site_id,
            status: EstimateStatus::from_str(&row.status)?,
            gpm: parse_decimal("gpm", &row.gpm)?,
            pump_setting: parse_decimal("pump_setting", &row.pump_setting)?,
            pumping_water_level: parse_decimal("pumping_water_level", &row.pumping_water_level)?,
            pressure_psi: parse_decimal("pressure_psi", &row.pressure_psi)?,
            voltage: Voltage::try_from(voltage)?,
            prep_time_hours: parse_decimal("prep_time_hours", &row.prep_time_hours)?,
            install_time_hours: parse_decimal("install_time_hours", &row.install_time_hours)?,
            start_time_hours: parse_decimal("start_time_hours", &row.start_time_hours)?,
            discharge_package: DischargePackage::from_str(&row.discharge_package)?,
            estimate_number: row.estimate_number,
            overall_notes: row.overall_notes,
            subtotal_amount: row.subtotal_amount,
            tax_rate: row.tax_rate,
            tax_amount: row.tax_amount,
            total_amount: row.total_amount,
            approved_at: row.approved_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl TryFrom<LineItemRow> for LineItemData {
    type Error = PersistenceError;

    fn try_from(row: LineItemRow) -> Result<Self, Self::Error> {
        let sort_order: u32 = row.sort_order.to_u32().ok_or_else(|| {
            PersistenceError::SerializationError(format!(
                "Invalid stored sort order {}",
                row.sort_order
            ))
        })?;

        Ok(Self {
            line_item_id: row.line_item_id,
            estimate_id: row.estimate_id,
            sort_order,
            description: row.description,
            quantity: row.quantity,
            rate: row.rate,
            total: row.total,
            notes: row.notes,
            is_taxable: row.is_taxable != 0,
        })
    }
}

/// Retrieves an estimate by ID.
///
/// # Errors
///
/// Returns `NotFound` if no such estimate exists.
pub fn get_estimate(
    conn: &mut SqliteConnection,
    estimate_id: i64,
) -> Result<EstimateData, PersistenceError> {
    let row: EstimateRow = estimates::table
        .filter(estimates::estimate_id.eq(estimate_id))
        .select(EstimateRow::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("Estimate {estimate_id}")))?;

    EstimateData::try_from(row)
}

/// Lists the line items of an estimate in sort order.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_line_items(
    conn: &mut SqliteConnection,
    estimate_id: i64,
) -> Result<Vec<LineItemData>, PersistenceError> {
    let rows: Vec<LineItemRow> = estimate_line_items::table
        .filter(estimate_line_items::estimate_id.eq(estimate_id))
        .select(LineItemRow::as_select())
        .order((
            estimate_line_items::sort_order.asc(),
            estimate_line_items::line_item_id.asc(),
        ))
        .load(conn)?;

    rows.into_iter().map(LineItemData::try_from).collect()
}

/// Retrieves an estimate with its client, site and line items.
///
/// # Errors
///
/// Returns `NotFound` if the estimate does not exist.
pub fn get_estimate_detail(
    conn: &mut SqliteConnection,
    estimate_id: i64,
) -> Result<EstimateDetail, PersistenceError> {
    let estimate: EstimateData = get_estimate(conn, estimate_id)?;

    Ok(EstimateDetail {
        client: get_client(conn, estimate.client_id)?,
        site: get_site(conn, estimate.site_id)?,
        line_items: get_line_items(conn, estimate_id)?,
        estimate,
    })
}

/// Lists estimates newest first.
///
/// `page` is 1-based. Pages past the end are empty.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_estimates(
    conn: &mut SqliteConnection,
    page: u32,
    per_page: u32,
) -> Result<EstimatePage, PersistenceError> {
    let page: u32 = page.max(1);
    let per_page: u32 = per_page.max(1);
    let offset: i64 = i64::from(page - 1) * i64::from(per_page);

    let total: i64 = estimates::table.count().get_result(conn)?;
    let rows: Vec<SummaryRow> = estimates::table
        .inner_join(clients::table)
        .select((
            estimates::estimate_id,
            estimates::estimate_number,
            estimates::status,
            estimates::client_id,
            clients::name,
            estimates::total_amount,
            estimates::created_at,
        ))
        .order((estimates::created_at.desc(), estimates::estimate_id.desc()))
        .limit(i64::from(per_page))
        .offset(offset)
        .load(conn)?;

    debug!(page, per_page, total, returned = rows.len(), "Listed estimates");

    let summaries: Vec<EstimateSummary> = rows
        .into_iter()
        .map(
            |(estimate_id, estimate_number, status, client_id, client_name, total_amount, created_at)| {
                Ok(EstimateSummary {
                    estimate_id,
                    estimate_number,
                    status: EstimateStatus::from_str(&status)?,
                    client_id,
                    client_name,
                    total_amount,
                    created_at,
                })
            },
        )
        .collect::<Result<Vec<EstimateSummary>, PersistenceError>>()?;

    Ok(EstimatePage {
        estimates: summaries,
        total_count: total.to_u64().unwrap_or(0),
        page,
        per_page,
    })
}

/// Counts estimates whose creation timestamp falls in `year`.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_estimates_in_year(
    conn: &mut SqliteConnection,
    year: i32,
) -> Result<u64, PersistenceError> {
    let count: i64 = estimates::table
        .filter(estimates::created_at.like(format!("{year}-%")))
        .count()
        .get_result(conn)?;

    Ok(count.to_u64().unwrap_or(0))
}

/// Returns whether an estimate number is already taken.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn estimate_number_exists(
    conn: &mut SqliteConnection,
    estimate_number: &str,
) -> Result<bool, PersistenceError> {
    Ok(diesel::select(diesel::dsl::exists(
        estimates::table.filter(estimates::estimate_number.eq(estimate_number)),
    ))
    .get_result(conn)?)
}
