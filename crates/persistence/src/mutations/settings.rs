// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;

use crate::data_models::SettingsData;
use crate::diesel_schema::settings;
use crate::error::PersistenceError;
use crate::queries::settings::SETTINGS_ID;

/// Writes the settings row, creating it on first save.
///
/// # Errors
///
/// Returns an error if the upsert fails.
pub fn save_settings(
    conn: &mut SqliteConnection,
    values: &SettingsData,
    now: &str,
) -> Result<(), PersistenceError> {
    let tax_rate: Option<String> = values
        .default_sales_tax_rate
        .map(|rate| rate.normalize().to_string());

    diesel::insert_into(settings::table)
        .values((
            settings::settings_id.eq(SETTINGS_ID),
            settings::company_name.eq(&values.company_name),
            settings::company_address.eq(&values.company_address),
            settings::company_phone.eq(&values.company_phone),
            settings::company_email.eq(&values.company_email),
            settings::company_logo_url.eq(&values.company_logo_url),
            settings::default_sales_tax_rate.eq(&tax_rate),
            settings::email_from_name.eq(&values.email_from_name),
            settings::email_from_address.eq(&values.email_from_address),
            settings::created_at.eq(now),
            settings::updated_at.eq(now),
        ))
        .on_conflict(settings::settings_id)
        .do_update()
        .set((
            settings::company_name.eq(&values.company_name),
            settings::company_address.eq(&values.company_address),
            settings::company_phone.eq(&values.company_phone),
            settings::company_email.eq(&values.company_email),
            settings::company_logo_url.eq(&values.company_logo_url),
            settings::default_sales_tax_rate.eq(&tax_rate),
            settings::email_from_name.eq(&values.email_from_name),
            settings::email_from_address.eq(&values.email_from_address),
            settings::updated_at.eq(now),
        ))
        .execute(conn)?;

    info!(tax_rate = ?tax_rate, "Saved settings");
    Ok(())
}
