// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Material and labor rate mutations.
//!
//! Names are unique per table. A conflicting insert or rename returns
//! `DuplicateName`.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::data_models::{NewLaborRate, NewMaterial};
use crate::diesel_schema::{labor_rates, materials};
use crate::error::PersistenceError;
use crate::mutations::flag;

fn lookup_json(material: &NewMaterial) -> Result<Option<String>, PersistenceError> {
    Ok(material
        .lookup_data
        .as_ref()
        .map(serde_json::to_string)
        .transpose()?)
}

/// Creates a material.
///
/// # Errors
///
/// Returns `DuplicateName` if the name is taken.
pub fn create_material(
    conn: &mut SqliteConnection,
    material: &NewMaterial,
    now: &str,
) -> Result<i64, PersistenceError> {
    let lookup_data: Option<String> = lookup_json(material)?;

    diesel::insert_into(materials::table)
        .values((
            materials::name.eq(&material.name),
            materials::category.eq(material.category.as_str()),
            materials::description.eq(&material.description),
            materials::unit.eq(&material.unit),
            materials::price.eq(material.price.to_string()),
            materials::lookup_data.eq(&lookup_data),
            materials::is_active.eq(flag(material.is_active)),
            materials::created_at.eq(now),
            materials::updated_at.eq(now),
        ))
        .execute(conn)
        .map_err(|e| PersistenceError::on_unique_violation(e, "material", &material.name))?;

    let material_id: i64 = conn.get_last_insert_rowid()?;
    info!(material_id, name = %material.name, category = %material.category, "Created material");

    Ok(material_id)
}

/// Replaces every field of a material.
///
/// # Errors
///
/// Returns `NotFound` if the material does not exist and `DuplicateName`
/// if the new name is taken by another material.
pub fn update_material(
    conn: &mut SqliteConnection,
    material_id: i64,
    material: &NewMaterial,
    now: &str,
) -> Result<(), PersistenceError> {
    let lookup_data: Option<String> = lookup_json(material)?;

    let rows_affected: usize = diesel::update(materials::table)
        .filter(materials::material_id.eq(material_id))
        .set((
            materials::name.eq(&material.name),
            materials::category.eq(material.category.as_str()),
            materials::description.eq(&material.description),
            materials::unit.eq(&material.unit),
            materials::price.eq(material.price.to_string()),
            materials::lookup_data.eq(&lookup_data),
            materials::is_active.eq(flag(material.is_active)),
            materials::updated_at.eq(now),
        ))
        .execute(conn)
        .map_err(|e| PersistenceError::on_unique_violation(e, "material", &material.name))?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!("Material {material_id}")));
    }

    info!(material_id, "Updated material");
    Ok(())
}

/// Deletes a material.
///
/// # Errors
///
/// Returns `NotFound` if the material does not exist.
pub fn delete_material(conn: &mut SqliteConnection, material_id: i64) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::delete(materials::table)
        .filter(materials::material_id.eq(material_id))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!("Material {material_id}")));
    }

    info!(material_id, "Deleted material");
    Ok(())
}

/// Creates a labor rate.
///
/// # Errors
///
/// Returns `DuplicateName` if the name is taken.
pub fn create_labor_rate(
    conn: &mut SqliteConnection,
    labor_rate: &NewLaborRate,
    now: &str,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(labor_rates::table)
        .values((
            labor_rates::name.eq(&labor_rate.name),
            labor_rates::description.eq(&labor_rate.description),
            labor_rates::rate_per_hour.eq(labor_rate.rate_per_hour.to_string()),
            labor_rates::is_active.eq(flag(labor_rate.is_active)),
            labor_rates::created_at.eq(now),
            labor_rates::updated_at.eq(now),
        ))
        .execute(conn)
        .map_err(|e| PersistenceError::on_unique_violation(e, "labor rate", &labor_rate.name))?;

    let labor_rate_id: i64 = conn.get_last_insert_rowid()?;
    info!(labor_rate_id, name = %labor_rate.name, "Created labor rate");

    Ok(labor_rate_id)
}

/// Replaces every field of a labor rate.
///
/// # Errors
///
/// Returns `NotFound` if the labor rate does not exist and `DuplicateName`
/// if the new name is taken.
pub fn update_labor_rate(
    conn: &mut SqliteConnection,
    labor_rate_id: i64,
    labor_rate: &NewLaborRate,
    now: &str,
) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::update(labor_rates::table)
        .filter(labor_rates::labor_rate_id.eq(labor_rate_id))
        .set((
            labor_rates::name.eq(&labor_rate.name),
            labor_rates::description.eq(&labor_rate.description),
            labor_rates::rate_per_hour.eq(labor_rate.rate_per_hour.to_string()),
            labor_rates::is_active.eq(flag(labor_rate.is_active)),
            labor_rates::updated_at.eq(now),
        ))
        .execute(conn)
        .map_err(|e| PersistenceError::on_unique_violation(e, "labor rate", &labor_rate.name))?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Labor rate {labor_rate_id}"
        )));
    }

    info!(labor_rate_id, "Updated labor rate");
    Ok(())
}

/// Deletes a labor rate.
///
/// # Errors
///
/// Returns `NotFound` if the labor rate does not exist.
pub fn delete_labor_rate(
    conn: &mut SqliteConnection,
    labor_rate_id: i64,
) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::delete(labor_rates::table)
        .filter(labor_rates::labor_rate_id.eq(labor_rate_id))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Labor rate {labor_rate_id}"
        )));
    }

    info!(labor_rate_id, "Deleted labor rate");
    Ok(())
}
