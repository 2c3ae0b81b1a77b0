//! HTTP API for decksynergy
//!
//! Endpoints:
//! - GET /health - Health check
//! - GET /packages - Active package catalog
//! - POST /analyze - Analyse a deck, returns an analysis envelope

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::core::engine::{AnalysisEnvelope, SynergyEngine};
use crate::types::{DeckInput, PackageCatalog};

/// Error body: `{"error": "..."}`
#[derive(Debug)]
pub enum ApiError {
    /// Request body refused by the extractor, with its status
    Rejected { status: StatusCode, message: String },
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Rejected { status, message } => (status, message),
        };

        let body = serde_json::json!({ "error": message });
        (status, Json(body)).into_response()
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub packages: usize,
}

/// Create the API router
pub fn create_router(engine: Arc<SynergyEngine>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/packages", get(packages))
        .route("/analyze", post(analyze))
        .with_state(engine)
}

/// Health check endpoint
async fn health(State(engine): State<Arc<SynergyEngine>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        packages: engine.catalog().len(),
    })
}

/// Active catalog
async fn packages(State(engine): State<Arc<SynergyEngine>>) -> Json<PackageCatalog> {
    Json(engine.catalog().clone())
}

/// Analyse one deck
async fn analyze(
    State(engine): State<Arc<SynergyEngine>>,
    payload: Result<Json<DeckInput>, JsonRejection>,
) -> Result<Json<AnalysisEnvelope>, ApiError> {
    let Json(deck) = payload.map_err(|rejection| {
        warn!(status = %rejection.status(), error = %rejection.body_text(), "rejected analyze request");
        ApiError::from(rejection)
    })?;

    let report = engine.analyze(&deck.cards, &deck.quantities);
    Ok(Json(AnalysisEnvelope::new(&deck.cards, &deck.quantities, report)))
}

/// Run the API server
pub async fn run_server(
    addr: &str,
    engine: Arc<SynergyEngine>,
) -> Result<(), Box<dyn std::error::Error>> {
    let packages = engine.catalog().len();
    let router = create_router(engine);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, packages, "decksynergy API listening");
    info!("  GET  /health   - Health check");
    info!("  GET  /packages - Package catalog");
    info!("  POST /analyze  - Analyse a deck");
    axum::serve(listener, router).await?;
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
