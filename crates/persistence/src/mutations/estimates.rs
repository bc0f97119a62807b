// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Estimate mutations.
//!
//! Creating an estimate and replacing its line items each run in a single
//! immediate transaction. Either every row is written or none is.

use diesel::SqliteConnection;
use diesel::prelude::*;
use num_traits::ToPrimitive;
use pumpquote_domain::{
    CalculatedLineItem, Decimal, EstimateInput, EstimateStatus, EstimateTotals, LaborHours,
    compute_totals, format_estimate_number,
};
use time::{OffsetDateTime, UtcOffset};
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::data_models::NewEstimate;
use crate::diesel_schema::{estimate_line_items, estimates};
use crate::error::PersistenceError;
use crate::mutations::clients::create_site;
use crate::mutations::{flag, format_timestamp, stored_sort_order};
use crate::queries::clients::get_client;
use crate::queries::estimates::{count_estimates_in_year, estimate_number_exists, get_estimate};
use crate::queries::settings::current_tax_rate;

/// Identifiers of a newly created estimate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedEstimate {
    pub estimate_id: i64,
    pub site_id: i64,
    pub estimate_number: String,
}

/// Picks the next free estimate number for `year`.
///
/// The sequence starts at the number of estimates already created that
/// year plus one, skipping numbers left taken after deletions.
fn next_estimate_number(conn: &mut SqliteConnection, year: i32) -> Result<String, PersistenceError> {
    let mut existing: u64 = count_estimates_in_year(conn, year)?;
    loop {
        let candidate: String = format_estimate_number(year, existing);
        if !estimate_number_exists(conn, &candidate)? {
            return Ok(candidate);
        }
        debug!(candidate, "Estimate number taken, trying the next one");
        existing = existing.saturating_add(1);
    }
}

fn insert_line_items(
    conn: &mut SqliteConnection,
    estimate_id: i64,
    items: &[CalculatedLineItem],
    now: &str,
) -> Result<(), PersistenceError> {
    for item in items {
        diesel::insert_into(estimate_line_items::table)
            .values((
                estimate_line_items::estimate_id.eq(estimate_id),
                estimate_line_items::sort_order.eq(stored_sort_order(item.sort_order)?),
                estimate_line_items::description.eq(&item.description),
                estimate_line_items::quantity.eq(&item.quantity),
                estimate_line_items::rate.eq(&item.rate),
                estimate_line_items::total.eq(&item.total),
                estimate_line_items::notes.eq(&item.notes),
                estimate_line_items::is_taxable.eq(flag(item.is_taxable)),
                estimate_line_items::created_at.eq(now),
                estimate_line_items::updated_at.eq(now),
            ))
            .execute(conn)?;
    }
    Ok(())
}

fn totals_for(
    conn: &mut SqliteConnection,
    items: &[CalculatedLineItem],
) -> Result<(Decimal, EstimateTotals), PersistenceError> {
    let tax_rate: Decimal = current_tax_rate(conn)?;
    Ok((tax_rate, compute_totals(items, tax_rate)))
}

/// Creates an estimate, its site and its line items atomically.
///
/// The estimate number is derived from the UTC year of `now`.
///
/// # Errors
///
/// Returns `NotFound` if the client does not exist. Any failure rolls the
/// whole creation back.
pub fn create_estimate(
    conn: &mut SqliteConnection,
    estimate: &NewEstimate,
    items: &[CalculatedLineItem],
    now: OffsetDateTime,
) -> Result<CreatedEstimate, PersistenceError> {
    let timestamp: String = format_timestamp(now)?;
    let year: i32 = now.to_offset(UtcOffset::UTC).year();
    let input: &EstimateInput = &estimate.input;

    let created: CreatedEstimate = conn.immediate_transaction::<_, PersistenceError, _>(|conn| {
        get_client(conn, estimate.client_id)?;
        let site_id: i64 = create_site(conn, estimate.client_id, &estimate.site, &timestamp)?;
        let estimate_number: String = next_estimate_number(conn, year)?;
        let (tax_rate, totals) = totals_for(conn, items)?;
        let hours: LaborHours = input.hours();
        let voltage: i32 = input.voltage().volts().to_i32().ok_or_else(|| {
            PersistenceError::SerializationError(format!("Voltage {} is out of range", input.voltage()))
        })?;

        diesel::insert_into(estimates::table)
            .values((
                estimates::client_id.eq(estimate.client_id),
                estimates::site_id.eq(site_id),
                estimates::estimate_number.eq(&estimate_number),
                estimates::status.eq(EstimateStatus::Draft.as_str()),
                estimates::gpm.eq(input.gpm().to_string()),
                estimates::pump_setting.eq(input.pump_setting().to_string()),
                estimates::pumping_water_level.eq(input.pumping_water_level().to_string()),
                estimates::pressure_psi.eq(input.pressure_psi().to_string()),
                estimates::voltage.eq(voltage),
                estimates::prep_time_hours.eq(hours.prep.to_string()),
                estimates::install_time_hours.eq(hours.install.to_string()),
                estimates::start_time_hours.eq(hours.start.to_string()),
                estimates::discharge_package.eq(input.discharge_package().as_str()),
                estimates::overall_notes.eq(&estimate.overall_notes),
                estimates::subtotal_amount.eq(&totals.subtotal_amount),
                estimates::tax_rate.eq(tax_rate.normalize().to_string()),
                estimates::tax_amount.eq(&totals.tax_amount),
                estimates::total_amount.eq(&totals.total_amount),
                estimates::created_at.eq(&timestamp),
                estimates::updated_at.eq(&timestamp),
            ))
            .execute(conn)?;

        let estimate_id: i64 = conn.get_last_insert_rowid()?;
        insert_line_items(conn, estimate_id, items, &timestamp)?;

        Ok(CreatedEstimate {
            estimate_id,
            site_id,
            estimate_number,
        })
    })?;

    info!(
        estimate_id = created.estimate_id,
        estimate_number = %created.estimate_number,
        line_items = items.len(),
        "Created estimate"
    );

    Ok(created)
}

/// Replaces all line items of an estimate and recomputes its totals.
///
/// # Errors
///
/// Returns `NotFound` if the estimate does not exist. Any failure leaves
/// the previous line items in place.
pub fn replace_line_items(
    conn: &mut SqliteConnection,
    estimate_id: i64,
    items: &[CalculatedLineItem],
    now: OffsetDateTime,
) -> Result<EstimateTotals, PersistenceError> {
    let timestamp: String = format_timestamp(now)?;

    let totals: EstimateTotals = conn.immediate_transaction::<_, PersistenceError, _>(|conn| {
        get_estimate(conn, estimate_id)?;

        let removed: usize = diesel::delete(estimate_line_items::table)
            .filter(estimate_line_items::estimate_id.eq(estimate_id))
            .execute(conn)?;
        debug!(estimate_id, removed, "Removed previous line items");

        insert_line_items(conn, estimate_id, items, &timestamp)?;
        let (tax_rate, totals) = totals_for(conn, items)?;

        diesel::update(estimates::table)
            .filter(estimates::estimate_id.eq(estimate_id))
            .set((
                estimates::subtotal_amount.eq(&totals.subtotal_amount),
                estimates::tax_rate.eq(tax_rate.normalize().to_string()),
                estimates::tax_amount.eq(&totals.tax_amount),
                estimates::total_amount.eq(&totals.total_amount),
                estimates::updated_at.eq(&timestamp),
            ))
            .execute(conn)?;

        Ok(totals)
    })?;

    info!(
        estimate_id,
        line_items = items.len(),
        total_amount = %totals.total_amount,
        "Replaced estimate line items"
    );

    Ok(totals)
}

/// Sets the status of an estimate.
///
/// Moving to `approved` records the approval time.
///
/// # Errors
///
/// Returns `NotFound` if the estimate does not exist.
pub fn update_estimate_status(
    conn: &mut SqliteConnection,
    estimate_id: i64,
    status: EstimateStatus,
    now: OffsetDateTime,
) -> Result<(), PersistenceError> {
    let timestamp: String = format_timestamp(now)?;

    let rows_affected: usize = if status == EstimateStatus::Approved {
        diesel::update(estimates::table)
            .filter(estimates::estimate_id.eq(estimate_id))
            .set((
                estimates::status.eq(status.as_str()),
                estimates::approved_at.eq(Some(timestamp.clone())),
                estimates::updated_at.eq(&timestamp),
            ))
            .execute(conn)?
    } else {
        diesel::update(estimates::table)
            .filter(estimates::estimate_id.eq(estimate_id))
            .set((
                estimates::status.eq(status.as_str()),
                estimates::updated_at.eq(&timestamp),
            ))
            .execute(conn)?
    };

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!("Estimate {estimate_id}")));
    }

    info!(estimate_id, %status, "Updated estimate status");
    Ok(())
}

/// Deletes an estimate. Its line items are removed by cascade.
///
/// # Errors
///
/// Returns `NotFound` if the estimate does not exist.
pub fn delete_estimate(conn: &mut SqliteConnection, estimate_id: i64) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::delete(estimates::table)
        .filter(estimates::estimate_id.eq(estimate_id))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!("Estimate {estimate_id}")));
    }

    info!(estimate_id, "Deleted estimate");
    Ok(())
}
