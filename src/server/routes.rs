//! HTTP API routes
//!
//! Defines all REST API endpoints for the server.

use crate::constants::search::RADIUS_METERS;
use crate::coord::{AddressInput, Coordinates};
use crate::error::Error;
use crate::hazard::{classify, HazardFlags, PREDICATES};
use crate::lookup::{Resolution, Snapshot};
use crate::overpass::{lenient_elements, RawElement};
use crate::server::state::AppState;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/lookup/address", post(address_handler))
        .route("/api/lookup/device", post(device_handler))
        .route("/api/lookup/coordinates", post(coordinates_handler))
        .route("/api/state", get(state_handler))
        .route("/api/categories", get(categories_handler))
        .route("/api/classify", post(classify_handler))
        .route("/api/status", get(status_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self.code.as_str() {
            "NOT_FOUND" => StatusCode::NOT_FOUND,
            "POSITION_UNAVAILABLE" => StatusCode::SERVICE_UNAVAILABLE,
            "POSITION_DENIED" => StatusCode::FORBIDDEN,
            "INVALID_COORDINATES" => StatusCode::BAD_REQUEST,
            "GEOCODING_ERROR" | "QUERY_FAILED" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status(), Json(self)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let code = match &err {
            Error::NotFound(_) => "NOT_FOUND",
            Error::PositionUnavailable => "POSITION_UNAVAILABLE",
            Error::PositionDenied(_) => "POSITION_DENIED",
            Error::InvalidCoordinates(_) => "INVALID_COORDINATES",
            Error::Geo(_) => "GEOCODING_ERROR",
            Error::QueryFailed(_) => "QUERY_FAILED",
            Error::Config(_) => "CONFIG_ERROR",
            _ => "INTERNAL_ERROR",
        };
        ApiError {
            error: err.to_string(),
            code: code.to_string(),
        }
    }
}

/// Geocode an address and look up hazards around it
///
/// POST /api/lookup/address
async fn address_handler(
    State(state): State<Arc<AppState>>,
    Json(address): Json<AddressInput>,
) -> Result<Json<Resolution>, ApiError> {
    let resolution = state.session.locate_address(address).await?;
    Ok(Json(resolution))
}

/// Look up hazards around the configured device position
///
/// POST /api/lookup/device
async fn device_handler(State(state): State<Arc<AppState>>) -> Result<Json<Resolution>, ApiError> {
    let resolution = state.session.locate_device().await?;
    Ok(Json(resolution))
}

/// Look up hazards around explicit coordinates
///
/// POST /api/lookup/coordinates
async fn coordinates_handler(
    State(state): State<Arc<AppState>>,
    Json(coordinates): Json<Coordinates>,
) -> Result<Json<Resolution>, ApiError> {
    let resolution = state.session.locate_coordinates(coordinates).await?;
    Ok(Json(resolution))
}

/// Current coordinates and flags
///
/// GET /api/state
async fn state_handler(State(state): State<Arc<AppState>>) -> Json<Snapshot> {
    Json(state.session.snapshot().await)
}

/// Categories list response
#[derive(Debug, Serialize, Deserialize)]
pub struct CategoriesResponse {
    pub categories: Vec<CategoryInfo>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryInfo {
    pub name: String,
    pub label: String,
    /// Tag predicate, `key=value` or `key=*`
    pub predicate: String,
}

/// List hazard categories with their tag predicates
///
/// GET /api/categories
async fn categories_handler() -> Json<CategoriesResponse> {
    let categories = PREDICATES
        .iter()
        .map(|(category, predicate)| CategoryInfo {
            name: category.name().to_string(),
            label: category.label().to_string(),
            predicate: predicate.to_string(),
        })
        .collect();

    Json(CategoriesResponse { categories })
}

/// Classify request body
#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    #[serde(default, deserialize_with = "lenient_elements")]
    pub elements: Vec<RawElement>,
}

/// Classify caller-supplied elements without touching the session
///
/// POST /api/classify
async fn classify_handler(Json(req): Json<ClassifyRequest>) -> Json<HazardFlags> {
    Json(classify(&req.elements))
}

/// Status response
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Server is running
    pub running: bool,
    /// Server version
    pub version: String,
    /// Feature query radius in meters
    pub radius_meters: u32,
    /// Configured position provider
    pub position_provider: String,
    /// Sequence number of the latest started lookup
    pub latest_seq: u64,
    /// Uptime in seconds
    pub uptime_secs: u64,
}

/// Server status endpoint
///
/// GET /api/status
async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        running: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        radius_meters: RADIUS_METERS,
        position_provider: state.config.location.provider.clone(),
        latest_seq: state.session.latest_seq(),
        uptime_secs: state.uptime_secs(),
    })
}
