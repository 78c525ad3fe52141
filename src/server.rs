//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{extract::State, response::Json, routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::api::{self, ApiDoc};
use crate::error::ApiError;
use crate::models::{AppConfig, WakeWindow};
use crate::services::{ArtifactStore, FrameLibrary, RotationState};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub library: Arc<FrameLibrary>,
    pub wake_window: WakeWindow,
}

/// Create application state from the loaded configuration.
pub fn create_app_state(config: &AppConfig) -> AppState {
    AppState::new(
        FrameLibrary::new(
            ArtifactStore::new(&config.output_dir, config.on_duplicate),
            RotationState::from_entropy(),
        ),
        config.wake_window,
    )
}

impl AppState {
    pub fn new(library: FrameLibrary, wake_window: WakeWindow) -> Self {
        Self {
            library: Arc::new(library),
            wake_window,
        }
    }
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/get-img-data", get(handle_get_img_data))
        .route("/status", get(handle_status))
        .route("/wakeup-interval", get(handle_wakeup_interval))
        // Health check
        .route("/health", get(|| async { "OK" }))
        .route("/api-docs/openapi.json", get(openapi_json))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

// Wrapper handlers to extract state components for the underlying API handlers

async fn handle_get_img_data(
    State(state): State<AppState>,
) -> Result<axum::response::Response, ApiError> {
    api::handle_get_img_data(State(state.library)).await
}

async fn handle_status(
    State(state): State<AppState>,
) -> Result<Json<crate::services::RotationStatus>, ApiError> {
    api::handle_status(State(state.library)).await
}

async fn handle_wakeup_interval(
    State(state): State<AppState>,
) -> Json<api::WakeupIntervalResponse> {
    api::handle_wakeup_interval(State(state.wake_window)).await
}
