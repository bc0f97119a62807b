// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod config;

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use clap::Parser;
use pumpquote_api::{
    ApiError, CalculateEstimateResponse, ClientRequest, CreateEstimateRequest,
    CreateEstimateResponse, DeleteResponse, EstimateInputRequest, LaborRateRequest,
    LineItemsResponse, MaterialRequest, ReplaceLineItemsRequest, SettingsRequest,
    UpdateStatusRequest,
};
use pumpquote_domain::FallbackPrices;
use pumpquote_persistence::{
    ClientData, EstimateData, EstimateDetail, EstimatePage, LaborRateData, MaterialData,
    PersistenceError, SettingsData, SiteData, SqlitePersistence,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

/// PumpQuote Server - HTTP server for submersible pump estimates
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: String,

    /// JSON file overriding the fallback price table
    #[arg(long)]
    fallback_prices: Option<PathBuf>,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The persistence layer, one connection behind a lock.
    persistence: Arc<Mutex<SqlitePersistence>>,
    /// Prices used when a fixed-price catalog row is missing.
    fallbacks: Arc<FallbackPrices>,
}

/// Query parameters of the estimate listing.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
struct ListEstimatesQuery {
    page: Option<u32>,
    per_page: Option<u32>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match err {
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::CalculationFailed { .. } | ApiError::DomainRuleViolation { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::Internal { ref message } => {
                error!(error = %message, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<PersistenceError> for HttpError {
    fn from(err: PersistenceError) -> Self {
        error!(error = %err, "Persistence error");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("Persistence error: {err}"),
        }
    }
}

// ============================================================================
// Estimates
// ============================================================================

/// Handler for POST `/estimates/calculate`.
///
/// Runs the calculator and returns the line items without storing them.
async fn handle_calculate_estimate(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<EstimateInputRequest>,
) -> Result<Json<CalculateEstimateResponse>, HttpError> {
    info!(
        gpm = %req.gpm,
        pump_setting = %req.pump_setting,
        voltage = %req.voltage,
        "Handling calculate_estimate request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: CalculateEstimateResponse =
        pumpquote_api::calculate_estimate_line_items(&mut persistence, &req, &app_state.fallbacks)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/estimates`.
async fn handle_create_estimate(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateEstimateRequest>,
) -> Result<Json<CreateEstimateResponse>, HttpError> {
    info!(client_id = req.client_id, "Handling create_estimate request");

    let mut persistence = app_state.persistence.lock().await;
    let response: CreateEstimateResponse =
        pumpquote_api::create_estimate(&mut persistence, &req, &app_state.fallbacks)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/estimates`.
async fn handle_list_estimates(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ListEstimatesQuery>,
) -> Result<Json<EstimatePage>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let page: EstimatePage =
        pumpquote_api::list_estimates(&mut persistence, query.page, query.per_page)?;
    drop(persistence);

    Ok(Json(page))
}

/// Handler for GET `/estimates/{estimate_id}`.
async fn handle_get_estimate(
    AxumState(app_state): AxumState<AppState>,
    Path(estimate_id): Path<i64>,
) -> Result<Json<EstimateDetail>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let detail: EstimateDetail = pumpquote_api::get_estimate(&mut persistence, estimate_id)?;
    drop(persistence);

    Ok(Json(detail))
}

/// Handler for PUT `/estimates/{estimate_id}/line_items`.
async fn handle_replace_line_items(
    AxumState(app_state): AxumState<AppState>,
    Path(estimate_id): Path<i64>,
    Json(req): Json<ReplaceLineItemsRequest>,
) -> Result<Json<LineItemsResponse>, HttpError> {
    info!(
        estimate_id,
        line_items = req.line_items.len(),
        "Handling replace_line_items request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: LineItemsResponse =
        pumpquote_api::replace_line_items(&mut persistence, estimate_id, &req)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/estimates/{estimate_id}/recalculate`.
async fn handle_recalculate_estimate(
    AxumState(app_state): AxumState<AppState>,
    Path(estimate_id): Path<i64>,
) -> Result<Json<LineItemsResponse>, HttpError> {
    info!(estimate_id, "Handling recalculate_estimate request");

    let mut persistence = app_state.persistence.lock().await;
    let response: LineItemsResponse =
        pumpquote_api::recalculate_estimate(&mut persistence, estimate_id, &app_state.fallbacks)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for PUT `/estimates/{estimate_id}/status`.
async fn handle_update_estimate_status(
    AxumState(app_state): AxumState<AppState>,
    Path(estimate_id): Path<i64>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<EstimateData>, HttpError> {
    info!(estimate_id, status = %req.status, "Handling update_estimate_status request");

    let mut persistence = app_state.persistence.lock().await;
    let estimate: EstimateData =
        pumpquote_api::update_estimate_status(&mut persistence, estimate_id, &req)?;
    drop(persistence);

    Ok(Json(estimate))
}

/// Handler for DELETE `/estimates/{estimate_id}`.
async fn handle_delete_estimate(
    AxumState(app_state): AxumState<AppState>,
    Path(estimate_id): Path<i64>,
) -> Result<Json<DeleteResponse>, HttpError> {
    info!(estimate_id, "Handling delete_estimate request");

    let mut persistence = app_state.persistence.lock().await;
    let response: DeleteResponse = pumpquote_api::delete_estimate(&mut persistence, estimate_id)?;
    drop(persistence);

    Ok(Json(response))
}

// ============================================================================
// Catalog
// ============================================================================

async fn handle_list_materials(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Vec<MaterialData>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let materials: Vec<MaterialData> = pumpquote_api::list_materials(&mut persistence)?;
    drop(persistence);

    Ok(Json(materials))
}

async fn handle_create_material(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<MaterialRequest>,
) -> Result<Json<MaterialData>, HttpError> {
    info!(name = %req.name, category = %req.category, "Handling create_material request");

    let mut persistence = app_state.persistence.lock().await;
    let material: MaterialData = pumpquote_api::create_material(&mut persistence, &req)?;
    drop(persistence);

    Ok(Json(material))
}

async fn handle_update_material(
    AxumState(app_state): AxumState<AppState>,
    Path(material_id): Path<i64>,
    Json(req): Json<MaterialRequest>,
) -> Result<Json<MaterialData>, HttpError> {
    info!(material_id, name = %req.name, "Handling update_material request");

    let mut persistence = app_state.persistence.lock().await;
    let material: MaterialData =
        pumpquote_api::update_material(&mut persistence, material_id, &req)?;
    drop(persistence);

    Ok(Json(material))
}

async fn handle_delete_material(
    AxumState(app_state): AxumState<AppState>,
    Path(material_id): Path<i64>,
) -> Result<Json<DeleteResponse>, HttpError> {
    info!(material_id, "Handling delete_material request");

    let mut persistence = app_state.persistence.lock().await;
    let response: DeleteResponse = pumpquote_api::delete_material(&mut persistence, material_id)?;
    drop(persistence);

    Ok(Json(response))
}

async fn handle_list_labor_rates(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Vec<LaborRateData>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let labor_rates: Vec<LaborRateData> = pumpquote_api::list_labor_rates(&mut persistence)?;
    drop(persistence);

    Ok(Json(labor_rates))
}

async fn handle_create_labor_rate(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<LaborRateRequest>,
) -> Result<Json<LaborRateData>, HttpError> {
    info!(name = %req.name, "Handling create_labor_rate request");

    let mut persistence = app_state.persistence.lock().await;
    let labor_rate: LaborRateData = pumpquote_api::create_labor_rate(&mut persistence, &req)?;
    drop(persistence);

    Ok(Json(labor_rate))
}

async fn handle_update_labor_rate(
    AxumState(app_state): AxumState<AppState>,
    Path(labor_rate_id): Path<i64>,
    Json(req): Json<LaborRateRequest>,
) -> Result<Json<LaborRateData>, HttpError> {
    info!(labor_rate_id, name = %req.name, "Handling update_labor_rate request");

    let mut persistence = app_state.persistence.lock().await;
    let labor_rate: LaborRateData =
        pumpquote_api::update_labor_rate(&mut persistence, labor_rate_id, &req)?;
    drop(persistence);

    Ok(Json(labor_rate))
}

async fn handle_delete_labor_rate(
    AxumState(app_state): AxumState<AppState>,
    Path(labor_rate_id): Path<i64>,
) -> Result<Json<DeleteResponse>, HttpError> {
    info!(labor_rate_id, "Handling delete_labor_rate request");

    let mut persistence = app_state.persistence.lock().await;
    let response: DeleteResponse =
        pumpquote_api::delete_labor_rate(&mut persistence, labor_rate_id)?;
    drop(persistence);

    Ok(Json(response))
}

// ============================================================================
// Clients
// ============================================================================

async fn handle_list_clients(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Vec<ClientData>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let clients: Vec<ClientData> = pumpquote_api::list_clients(&mut persistence)?;
    drop(persistence);

    Ok(Json(clients))
}

async fn handle_create_client(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<ClientRequest>,
) -> Result<Json<ClientData>, HttpError> {
    info!(name = %req.name, "Handling create_client request");

    let mut persistence = app_state.persistence.lock().await;
    let client: ClientData = pumpquote_api::create_client(&mut persistence, &req)?;
    drop(persistence);

    Ok(Json(client))
}

async fn handle_get_client(
    AxumState(app_state): AxumState<AppState>,
    Path(client_id): Path<i64>,
) -> Result<Json<ClientData>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let client: ClientData = pumpquote_api::get_client(&mut persistence, client_id)?;
    drop(persistence);

    Ok(Json(client))
}

async fn handle_update_client(
    AxumState(app_state): AxumState<AppState>,
    Path(client_id): Path<i64>,
    Json(req): Json<ClientRequest>,
) -> Result<Json<ClientData>, HttpError> {
    info!(client_id, "Handling update_client request");

    let mut persistence = app_state.persistence.lock().await;
    let client: ClientData = pumpquote_api::update_client(&mut persistence, client_id, &req)?;
    drop(persistence);

    Ok(Json(client))
}

/// Handler for DELETE `/clients/{client_id}`.
///
/// Removes the client's sites and estimates as well.
async fn handle_delete_client(
    AxumState(app_state): AxumState<AppState>,
    Path(client_id): Path<i64>,
) -> Result<Json<DeleteResponse>, HttpError> {
    info!(client_id, "Handling delete_client request");

    let mut persistence = app_state.persistence.lock().await;
    let response: DeleteResponse = pumpquote_api::delete_client(&mut persistence, client_id)?;
    drop(persistence);

    Ok(Json(response))
}

async fn handle_list_client_sites(
    AxumState(app_state): AxumState<AppState>,
    Path(client_id): Path<i64>,
) -> Result<Json<Vec<SiteData>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let sites: Vec<SiteData> = pumpquote_api::list_client_sites(&mut persistence, client_id)?;
    drop(persistence);

    Ok(Json(sites))
}

// ============================================================================
// Settings
// ============================================================================

async fn handle_get_settings(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<SettingsData>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let settings: SettingsData = pumpquote_api::get_settings(&mut persistence)?;
    drop(persistence);

    Ok(Json(settings))
}

async fn handle_update_settings(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<SettingsRequest>,
) -> Result<Json<SettingsData>, HttpError> {
    info!("Handling update_settings request");

    let mut persistence = app_state.persistence.lock().await;
    let settings: SettingsData = pumpquote_api::update_settings(&mut persistence, &req)?;
    drop(persistence);

    Ok(Json(settings))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/estimates/calculate", post(handle_calculate_estimate))
        .route(
            "/estimates",
            post(handle_create_estimate).get(handle_list_estimates),
        )
        .route(
            "/estimates/{estimate_id}",
            get(handle_get_estimate).delete(handle_delete_estimate),
        )
        .route(
            "/estimates/{estimate_id}/line_items",
            put(handle_replace_line_items),
        )
        .route(
            "/estimates/{estimate_id}/recalculate",
            post(handle_recalculate_estimate),
        )
        .route(
            "/estimates/{estimate_id}/status",
            put(handle_update_estimate_status),
        )
        .route(
            "/materials",
            get(handle_list_materials).post(handle_create_material),
        )
        .route(
            "/materials/{material_id}",
            put(handle_update_material).delete(handle_delete_material),
        )
        .route(
            "/labor_rates",
            get(handle_list_labor_rates).post(handle_create_labor_rate),
        )
        .route(
            "/labor_rates/{labor_rate_id}",
            put(handle_update_labor_rate).delete(handle_delete_labor_rate),
        )
        .route(
            "/clients",
            get(handle_list_clients).post(handle_create_client),
        )
        .route(
            "/clients/{client_id}",
            get(handle_get_client)
                .put(handle_update_client)
                .delete(handle_delete_client),
        )
        .route("/clients/{client_id}/sites", get(handle_list_client_sites))
        .route(
            "/settings",
            get(handle_get_settings).put(handle_update_settings),
        )
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing PumpQuote Server");

    let addr: SocketAddr = config::socket_addr(&args.bind, args.port)?;
    let fallbacks: FallbackPrices = config::load_fallback_prices(args.fallback_prices.as_deref())?;

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: SqlitePersistence = if let Some(db_path) = &args.database {
        info!(path = %db_path, "Using file-based database");
        SqlitePersistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        SqlitePersistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        fallbacks: Arc::new(fallbacks),
    };

    let app: Router = build_router(app_state);

    info!(%addr, "Server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
