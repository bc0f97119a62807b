// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Settings queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use pumpquote_domain::{Decimal, parse_decimal};

use crate::data_models::SettingsData;
use crate::diesel_schema::settings;
use crate::error::PersistenceError;

/// The fixed primary key of the settings row.
pub const SETTINGS_ID: i64 = 1;

#[derive(Queryable, Selectable)]
#[diesel(table_name = settings)]
struct SettingsRow {
    company_name: Option<String>,
    company_address: Option<String>,
    company_phone: Option<String>,
    company_email: Option<String>,
    company_logo_url: Option<String>,
    default_sales_tax_rate: Option<String>,
    email_from_name: Option<String>,
    email_from_address: Option<String>,
    updated_at: String,
}

/// Reads the settings row. Returns all-empty settings when none was saved.
///
/// # Errors
///
/// Returns an error if the query fails or the stored tax rate is unreadable.
pub fn get_settings(conn: &mut SqliteConnection) -> Result<SettingsData, PersistenceError> {
    let row: Option<SettingsRow> = settings::table
        .filter(settings::settings_id.eq(SETTINGS_ID))
        .select(SettingsRow::as_select())
        .first(conn)
        .optional()?;

    let Some(row) = row else {
        return Ok(SettingsData::default());
    };

    let default_sales_tax_rate: Option<Decimal> = row
        .default_sales_tax_rate
        .as_deref()
        .map(|rate| parse_decimal("default_sales_tax_rate", rate))
        .transpose()?;

    Ok(SettingsData {
        company_name: row.company_name,
        company_address: row.company_address,
        company_phone: row.company_phone,
        company_email: row.company_email,
        company_logo_url: row.company_logo_url,
        default_sales_tax_rate,
        email_from_name: row.email_from_name,
        email_from_address: row.email_from_address,
        updated_at: Some(row.updated_at),
    })
}

/// The tax rate applied to taxable line items, zero when unset.
///
/// # Errors
///
/// Returns an error if the settings cannot be read.
pub fn current_tax_rate(conn: &mut SqliteConnection) -> Result<Decimal, PersistenceError> {
    Ok(get_settings(conn)?
        .default_sales_tax_rate
        .unwrap_or(Decimal::ZERO))
}
