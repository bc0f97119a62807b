// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Client and site mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::data_models::{NewClient, NewSite};
use crate::diesel_schema::{clients, sites};
use crate::error::PersistenceError;

/// Creates a client.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_client(
    conn: &mut SqliteConnection,
    client: &NewClient,
    now: &str,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(clients::table)
        .values((
            clients::name.eq(&client.name),
            clients::contact_name.eq(&client.contact_name),
            clients::contact_email.eq(&client.contact_email),
            clients::contact_phone.eq(&client.contact_phone),
            clients::address.eq(&client.address),
            clients::created_at.eq(now),
            clients::updated_at.eq(now),
        ))
        .execute(conn)?;

    let client_id: i64 = conn.get_last_insert_rowid()?;
    info!(client_id, name = %client.name, "Created client");

    Ok(client_id)
}

/// Replaces the fields of a client.
///
/// # Errors
///
/// Returns `NotFound` if the client does not exist.
pub fn update_client(
    conn: &mut SqliteConnection,
    client_id: i64,
    client: &NewClient,
    now: &str,
) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::update(clients::table)
        .filter(clients::client_id.eq(client_id))
        .set((
            clients::name.eq(&client.name),
            clients::contact_name.eq(&client.contact_name),
            clients::contact_email.eq(&client.contact_email),
            clients::contact_phone.eq(&client.contact_phone),
            clients::address.eq(&client.address),
            clients::updated_at.eq(now),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!("Client {client_id}")));
    }

    info!(client_id, "Updated client");
    Ok(())
}

/// Deletes a client. Its sites and estimates are removed by cascade.
///
/// # Errors
///
/// Returns `NotFound` if the client does not exist.
pub fn delete_client(conn: &mut SqliteConnection, client_id: i64) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::delete(clients::table)
        .filter(clients::client_id.eq(client_id))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!("Client {client_id}")));
    }

    info!(client_id, "Deleted client");
    Ok(())
}

/// Creates a site for a client.
///
/// # Errors
///
/// Returns an error if the insert fails, including when the client does
/// not exist.
pub fn create_site(
    conn: &mut SqliteConnection,
    client_id: i64,
    site: &NewSite,
    now: &str,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(sites::table)
        .values((
            sites::client_id.eq(client_id),
            sites::address.eq(&site.address),
            sites::coordinates.eq(&site.coordinates),
            sites::intended_use.eq(&site.intended_use),
            sites::created_at.eq(now),
            sites::updated_at.eq(now),
        ))
        .execute(conn)?;

    let site_id: i64 = conn.get_last_insert_rowid()?;
    info!(site_id, client_id, "Created site");

    Ok(site_id)
}
