// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Client and site queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::data_models::{ClientData, SiteData};
use crate::diesel_schema::{clients, sites};
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = clients)]
struct ClientRow {
    client_id: i64,
    name: String,
    contact_name: Option<String>,
    contact_email: Option<String>,
    contact_phone: Option<String>,
    address: Option<String>,
    created_at: String,
    updated_at: String,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = sites)]
struct SiteRow {
    site_id: i64,
    client_id: i64,
    address: Option<String>,
    coordinates: Option<String>,
    intended_use: Option<String>,
    created_at: String,
    updated_at: String,
}

impl From<ClientRow> for ClientData {
    fn from(row: ClientRow) -> Self {
        Self {
            client_id: row.client_id,
            name: row.name,
            contact_name: row.contact_name,
            contact_email: row.contact_email,
            contact_phone: row.contact_phone,
            address: row.address,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<SiteRow> for SiteData {
    fn from(row: SiteRow) -> Self {
        Self {
            site_id: row.site_id,
            client_id: row.client_id,
            address: row.address,
            coordinates: row.coordinates,
            intended_use: row.intended_use,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Lists all clients ordered by name.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_clients(conn: &mut SqliteConnection) -> Result<Vec<ClientData>, PersistenceError> {
    let rows: Vec<ClientRow> = clients::table
        .select(ClientRow::as_select())
        .order((clients::name.asc(), clients::client_id.asc()))
        .load(conn)?;

    debug!(count = rows.len(), "Loaded clients");
    Ok(rows.into_iter().map(ClientData::from).collect())
}

/// Retrieves a client by ID.
///
/// # Errors
///
/// Returns `NotFound` if no such client exists.
pub fn get_client(conn: &mut SqliteConnection, client_id: i64) -> Result<ClientData, PersistenceError> {
    clients::table
        .filter(clients::client_id.eq(client_id))
        .select(ClientRow::as_select())
        .first(conn)
        .optional()?
        .map(ClientData::from)
        .ok_or_else(|| PersistenceError::NotFound(format!("Client {client_id}")))
}

/// Retrieves a site by ID.
///
/// # Errors
///
/// Returns `NotFound` if no such site exists.
pub fn get_site(conn: &mut SqliteConnection, site_id: i64) -> Result<SiteData, PersistenceError> {
    sites::table
        .filter(sites::site_id.eq(site_id))
        .select(SiteRow::as_select())
        .first(conn)
        .optional()?
        .map(SiteData::from)
        .ok_or_else(|| PersistenceError::NotFound(format!("Site {site_id}")))
}

/// Lists the sites of a client, oldest first.
///
/// # Errors
///
/// Returns `NotFound` if the client does not exist.
pub fn list_sites_for_client(
    conn: &mut SqliteConnection,
    client_id: i64,
) -> Result<Vec<SiteData>, PersistenceError> {
    get_client(conn, client_id)?;

    let rows: Vec<SiteRow> = sites::table
        .filter(sites::client_id.eq(client_id))
        .select(SiteRow::as_select())
        .order(sites::site_id.asc())
        .load(conn)?;

    Ok(rows.into_iter().map(SiteData::from).collect())
}
