// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Material and labor rate queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use pumpquote_domain::{Decimal, LookupData, MaterialCategory, parse_decimal};
use serde_json::Value;
use std::str::FromStr;
use tracing::debug;

use crate::data_models::{LaborRateData, MaterialData};
use crate::diesel_schema::{labor_rates, materials};
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = materials)]
struct MaterialRow {
    material_id: i64,
    name: String,
    category: String,
    description: Option<String>,
    unit: Option<String>,
    price: String,
    lookup_data: Option<String>,
    is_active: i32,
    created_at: String,
    updated_at: String,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = labor_rates)]
struct LaborRateRow {
    labor_rate_id: i64,
    name: String,
    description: Option<String>,
    rate_per_hour: String,
    is_active: i32,
    created_at: String,
    updated_at: String,
}

impl TryFrom<MaterialRow> for MaterialData {
    type Error = PersistenceError;

    fn try_from(row: MaterialRow) -> Result<Self, Self::Error> {
        let category: MaterialCategory = MaterialCategory::from_str(&row.category)?;
        let lookup_data: Option<LookupData> = match row.lookup_data.as_deref() {
            Some(text) => parse_lookup_data(&row.name, category, text)?,
            None => None,
        };

        Ok(Self {
            material_id: row.material_id,
            price: parse_decimal("price", &row.price)?,
            name: row.name,
            category,
            description: row.description,
            unit: row.unit,
            lookup_data,
            is_active: row.is_active != 0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl TryFrom<LaborRateRow> for LaborRateData {
    type Error = PersistenceError;

    fn try_from(row: LaborRateRow) -> Result<Self, Self::Error> {
        Ok(Self {
            labor_rate_id: row.labor_rate_id,
            rate_per_hour: parse_decimal("rate_per_hour", &row.rate_per_hour)?,
            name: row.name,
            description: row.description,
            is_active: row.is_active != 0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Reads stored lookup JSON for a material.
///
/// Range values may be JSON numbers or numeric strings. A pipe without a
/// friction loss gets 0. A pipe or motor missing either end of its range
/// gets no lookup data, so the calculator never selects it.
///
/// # Errors
///
/// Returns `SerializationError` if the text is not JSON or a present value
/// is not numeric.
pub fn parse_lookup_data(
    material: &str,
    category: MaterialCategory,
    text: &str,
) -> Result<Option<LookupData>, PersistenceError> {
    let value: Value = serde_json::from_str(text)?;

    let lookup: Option<LookupData> = match category {
        MaterialCategory::Pipe => {
            match (
                json_decimal(&value, "gpmMin")?,
                json_decimal(&value, "gpmMax")?,
            ) {
                (Some(gpm_min), Some(gpm_max)) => Some(LookupData::Pipe {
                    gpm_min,
                    gpm_max,
                    friction_loss: json_decimal(&value, "frictionLoss")?
                        .unwrap_or(Decimal::ZERO),
                }),
                _ => None,
            }
        }
        MaterialCategory::Motor => {
            match (json_decimal(&value, "hpMin")?, json_decimal(&value, "hpMax")?) {
                (Some(hp_min), Some(hp_max)) => Some(LookupData::Motor { hp_min, hp_max }),
                _ => None,
            }
        }
        _ => None,
    };

    if lookup.is_none() {
        debug!(material, %category, "Material has no usable lookup range");
    }

    Ok(lookup)
}

fn json_decimal(value: &Value, key: &str) -> Result<Option<Decimal>, PersistenceError> {
    match value.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(Some(parse_decimal(key, &n.to_string())?)),
        Some(Value::String(s)) => Ok(Some(parse_decimal(key, s)?)),
        Some(other) => Err(PersistenceError::SerializationError(format!(
            "lookup value '{key}' is not numeric: {other}"
        ))),
    }
}

/// Lists materials in insertion order.
///
/// # Errors
///
/// Returns an error if the query fails or a stored value is unreadable.
pub fn list_materials(
    conn: &mut SqliteConnection,
    include_inactive: bool,
) -> Result<Vec<MaterialData>, PersistenceError> {
    let mut query = materials::table
        .select(MaterialRow::as_select())
        .order(materials::material_id.asc())
        .into_boxed();
    if !include_inactive {
        query = query.filter(materials::is_active.eq(1));
    }

    let rows: Vec<MaterialRow> = query.load(conn)?;
    debug!(count = rows.len(), include_inactive, "Loaded materials");

    rows.into_iter().map(MaterialData::try_from).collect()
}

/// Retrieves a material by ID.
///
/// # Errors
///
/// Returns `NotFound` if no such material exists.
pub fn get_material(
    conn: &mut SqliteConnection,
    material_id: i64,
) -> Result<MaterialData, PersistenceError> {
    let row: MaterialRow = materials::table
        .filter(materials::material_id.eq(material_id))
        .select(MaterialRow::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("Material {material_id}")))?;

    MaterialData::try_from(row)
}

/// Lists labor rates in insertion order.
///
/// # Errors
///
/// Returns an error if the query fails or a stored value is unreadable.
pub fn list_labor_rates(
    conn: &mut SqliteConnection,
    include_inactive: bool,
) -> Result<Vec<LaborRateData>, PersistenceError> {
    let mut query = labor_rates::table
        .select(LaborRateRow::as_select())
        .order(labor_rates::labor_rate_id.asc())
        .into_boxed();
    if !include_inactive {
        query = query.filter(labor_rates::is_active.eq(1));
    }

    let rows: Vec<LaborRateRow> = query.load(conn)?;
    debug!(count = rows.len(), include_inactive, "Loaded labor rates");

    rows.into_iter().map(LaborRateData::try_from).collect()
}

/// Retrieves a labor rate by ID.
///
/// # Errors
///
/// Returns `NotFound` if no such labor rate exists.
pub fn get_labor_rate(
    conn: &mut SqliteConnection,
    labor_rate_id: i64,
) -> Result<LaborRateData, PersistenceError> {
    let row: LaborRateRow = labor_rates::table
        .filter(labor_rates::labor_rate_id.eq(labor_rate_id))
        .select(LaborRateRow::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("Labor rate {labor_rate_id}")))?;

    LaborRateData::try_from(row)
}
