// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for PumpQuote.
//!
//! Stores the price catalog (materials and labor rates), clients and their
//! sites, estimates with their line items, and the settings row. Built on
//! Diesel with the `SQLite` backend.
//!
//! ## Storage conventions
//!
//! - Decimal values (prices, quantities, totals) are stored as text so no
//!   precision is lost.
//! - Timestamps are RFC 3339 strings in UTC.
//! - Foreign keys are enforced; deleting a client removes its sites and
//!   estimates, deleting an estimate removes its line items.
//!
//! ## Testing
//!
//! `Persistence::new_in_memory()` gives each caller its own shared-cache
//! in-memory database, so tests never see each other's rows.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use pumpquote_domain::{
    CalculatedLineItem, CatalogLaborRate, CatalogMaterial, EstimateStatus, EstimateTotals,
};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::OffsetDateTime;

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::{
    ClientData, EstimateData, EstimateDetail, EstimatePage, EstimateSummary, LaborRateData,
    LineItemData, MaterialData, NewClient, NewEstimate, NewLaborRate, NewMaterial, NewSite,
    SettingsData, SiteData,
};
pub use error::PersistenceError;
pub use mutations::estimates::CreatedEstimate;

use backend::PersistenceBackend;

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Alias used by the API and server crates.
pub type SqlitePersistence = Persistence;

/// Persistence adapter over a single `SQLite` connection.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a persistence adapter with a fresh in-memory database.
    ///
    /// Each call receives a unique database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_test_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Creates a persistence adapter backed by a database file.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        self.conn.verify_foreign_key_enforcement()
    }

    fn now() -> Result<String, PersistenceError> {
        mutations::format_timestamp(OffsetDateTime::now_utc())
    }

    // ========================================================================
    // Catalog
    // ========================================================================

    /// Active materials in the shape the calculator consumes.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored value is unreadable.
    pub fn list_active_materials(&mut self) -> Result<Vec<CatalogMaterial>, PersistenceError> {
        Ok(queries::catalog::list_materials(&mut self.conn, false)?
            .iter()
            .map(MaterialData::to_catalog_material)
            .collect())
    }

    /// Active labor rates in the shape the calculator consumes.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored value is unreadable.
    pub fn list_active_labor_rates(&mut self) -> Result<Vec<CatalogLaborRate>, PersistenceError> {
        Ok(queries::catalog::list_labor_rates(&mut self.conn, false)?
            .iter()
            .map(LaborRateData::to_catalog_labor_rate)
            .collect())
    }

    /// All materials, inactive ones included.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored value is unreadable.
    pub fn list_materials(&mut self) -> Result<Vec<MaterialData>, PersistenceError> {
        queries::catalog::list_materials(&mut self.conn, true)
    }

    /// # Errors
    ///
    /// Returns `NotFound` if no such material exists.
    pub fn get_material(&mut self, material_id: i64) -> Result<MaterialData, PersistenceError> {
        queries::catalog::get_material(&mut self.conn, material_id)
    }

    /// Creates a material and returns it.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateName` if the name is taken.
    pub fn create_material(&mut self, material: &NewMaterial) -> Result<MaterialData, PersistenceError> {
        let now: String = Self::now()?;
        let material_id: i64 = mutations::catalog::create_material(&mut self.conn, material, &now)?;
        self.get_material(material_id)
    }

    /// Replaces a material and returns the stored result.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or `DuplicateName`.
    pub fn update_material(
        &mut self,
        material_id: i64,
        material: &NewMaterial,
    ) -> Result<MaterialData, PersistenceError> {
        let now: String = Self::now()?;
        mutations::catalog::update_material(&mut self.conn, material_id, material, &now)?;
        self.get_material(material_id)
    }

    /// # Errors
    ///
    /// Returns `NotFound` if no such material exists.
    pub fn delete_material(&mut self, material_id: i64) -> Result<(), PersistenceError> {
        mutations::catalog::delete_material(&mut self.conn, material_id)
    }

    /// All labor rates, inactive ones included.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored value is unreadable.
    pub fn list_labor_rates(&mut self) -> Result<Vec<LaborRateData>, PersistenceError> {
        queries::catalog::list_labor_rates(&mut self.conn, true)
    }

    /// # Errors
    ///
    /// Returns `NotFound` if no such labor rate exists.
    pub fn get_labor_rate(&mut self, labor_rate_id: i64) -> Result<LaborRateData, PersistenceError> {
        queries::catalog::get_labor_rate(&mut self.conn, labor_rate_id)
    }

    /// Creates a labor rate and returns it.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateName` if the name is taken.
    pub fn create_labor_rate(
        &mut self,
        labor_rate: &NewLaborRate,
    ) -> Result<LaborRateData, PersistenceError> {
        let now: String = Self::now()?;
        let labor_rate_id: i64 =
            mutations::catalog::create_labor_rate(&mut self.conn, labor_rate, &now)?;
        self.get_labor_rate(labor_rate_id)
    }

    /// Replaces a labor rate and returns the stored result.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or `DuplicateName`.
    pub fn update_labor_rate(
        &mut self,
        labor_rate_id: i64,
        labor_rate: &NewLaborRate,
    ) -> Result<LaborRateData, PersistenceError> {
        let now: String = Self::now()?;
        mutations::catalog::update_labor_rate(&mut self.conn, labor_rate_id, labor_rate, &now)?;
        self.get_labor_rate(labor_rate_id)
    }

    /// # Errors
    ///
    /// Returns `NotFound` if no such labor rate exists.
    pub fn delete_labor_rate(&mut self, labor_rate_id: i64) -> Result<(), PersistenceError> {
        mutations::catalog::delete_labor_rate(&mut self.conn, labor_rate_id)
    }

    // ========================================================================
    // Clients & Sites
    // ========================================================================

    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_clients(&mut self) -> Result<Vec<ClientData>, PersistenceError> {
        queries::clients::list_clients(&mut self.conn)
    }

    /// # Errors
    ///
    /// Returns `NotFound` if no such client exists.
    pub fn get_client(&mut self, client_id: i64) -> Result<ClientData, PersistenceError> {
        queries::clients::get_client(&mut self.conn, client_id)
    }

    /// Creates a client and returns it.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_client(&mut self, client: &NewClient) -> Result<ClientData, PersistenceError> {
        let now: String = Self::now()?;
        let client_id: i64 = mutations::clients::create_client(&mut self.conn, client, &now)?;
        self.get_client(client_id)
    }

    /// Replaces a client's fields and returns the stored result.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no such client exists.
    pub fn update_client(
        &mut self,
        client_id: i64,
        client: &NewClient,
    ) -> Result<ClientData, PersistenceError> {
        let now: String = Self::now()?;
        mutations::clients::update_client(&mut self.conn, client_id, client, &now)?;
        self.get_client(client_id)
    }

    /// Deletes a client together with its sites and estimates.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no such client exists.
    pub fn delete_client(&mut self, client_id: i64) -> Result<(), PersistenceError> {
        mutations::clients::delete_client(&mut self.conn, client_id)
    }

    /// # Errors
    ///
    /// Returns `NotFound` if the client does not exist.
    pub fn list_sites_for_client(&mut self, client_id: i64) -> Result<Vec<SiteData>, PersistenceError> {
        queries::clients::list_sites_for_client(&mut self.conn, client_id)
    }

    // ========================================================================
    // Estimates
    // ========================================================================

    /// Creates an estimate with its site and line items in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the client does not exist, or any database
    /// error. Nothing is written on failure.
    pub fn create_estimate(
        &mut self,
        estimate: &NewEstimate,
        items: &[CalculatedLineItem],
    ) -> Result<CreatedEstimate, PersistenceError> {
        self.create_estimate_at(estimate, items, OffsetDateTime::now_utc())
    }

    /// Same as `create_estimate` with an explicit creation time.
    ///
    /// # Errors
    ///
    /// See `create_estimate`.
    pub fn create_estimate_at(
        &mut self,
        estimate: &NewEstimate,
        items: &[CalculatedLineItem],
        now: OffsetDateTime,
    ) -> Result<CreatedEstimate, PersistenceError> {
        mutations::estimates::create_estimate(&mut self.conn, estimate, items, now)
    }

    /// # Errors
    ///
    /// Returns `NotFound` if no such estimate exists.
    pub fn get_estimate(&mut self, estimate_id: i64) -> Result<EstimateData, PersistenceError> {
        queries::estimates::get_estimate(&mut self.conn, estimate_id)
    }

    /// Estimate with its client, site and line items in sort order.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no such estimate exists.
    pub fn get_estimate_detail(&mut self, estimate_id: i64) -> Result<EstimateDetail, PersistenceError> {
        queries::estimates::get_estimate_detail(&mut self.conn, estimate_id)
    }

    /// A page of estimates, newest first. `page` is 1-based.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_estimates(&mut self, page: u32, per_page: u32) -> Result<EstimatePage, PersistenceError> {
        queries::estimates::list_estimates(&mut self.conn, page, per_page)
    }

    /// Replaces all line items of an estimate and recomputes its totals, in
    /// one transaction.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no such estimate exists.
    pub fn replace_line_items(
        &mut self,
        estimate_id: i64,
        items: &[CalculatedLineItem],
    ) -> Result<EstimateTotals, PersistenceError> {
        mutations::estimates::replace_line_items(
            &mut self.conn,
            estimate_id,
            items,
            OffsetDateTime::now_utc(),
        )
    }

    /// # Errors
    ///
    /// Returns `NotFound` if no such estimate exists.
    pub fn update_estimate_status(
        &mut self,
        estimate_id: i64,
        status: EstimateStatus,
    ) -> Result<(), PersistenceError> {
        mutations::estimates::update_estimate_status(
            &mut self.conn,
            estimate_id,
            status,
            OffsetDateTime::now_utc(),
        )
    }

    /// Deletes an estimate together with its line items.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no such estimate exists.
    pub fn delete_estimate(&mut self, estimate_id: i64) -> Result<(), PersistenceError> {
        mutations::estimates::delete_estimate(&mut self.conn, estimate_id)
    }

    // ========================================================================
    // Settings
    // ========================================================================

    /// # Errors
    ///
    /// Returns an error if the query fails or the stored tax rate is unreadable.
    pub fn get_settings(&mut self) -> Result<SettingsData, PersistenceError> {
        queries::settings::get_settings(&mut self.conn)
    }

    /// Saves the settings row and returns the stored result.
    ///
    /// # Errors
    ///
    /// Returns an error if the upsert fails.
    pub fn save_settings(&mut self, values: &SettingsData) -> Result<SettingsData, PersistenceError> {
        let now: String = Self::now()?;
        mutations::settings::save_settings(&mut self.conn, values, &now)?;
        self.get_settings()
    }
}
