//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::{DefaultBodyLimit, State},
    response::{Json, Response},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};
use utoipa::OpenApi;

use crate::api;
use crate::assets::AssetLoader;
use crate::error::ApiError;
use crate::models::AppConfig;
use crate::rendering::png_codec::{MAX_HEIGHT, MAX_WIDTH};
use crate::services::{ConfigWatcher, PaletteSwapState, RenderService, SettingsView};

// Uncompressed RGBA at the maximum accepted size
const MAX_BODY_BYTES: usize = (MAX_WIDTH * MAX_HEIGHT * 4) as usize;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "palette-swap API",
        description = "Four-colour palette swap post-processing",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(
        api::handle_render,
        api::handle_palettes,
        api::handle_get_settings,
        api::handle_put_settings,
    ),
    components(schemas(
        api::PalettesResponse,
        api::PaletteInfo,
        api::LevelInfo,
        crate::services::SettingsChange,
        SettingsView,
    )),
    tags(
        (name = "Render", description = "Palette swap of uploaded frames"),
        (name = "Palettes", description = "Configured palettes and levels"),
        (name = "Settings", description = "Active palette, level and darkness")
    )
)]
pub struct ApiDoc;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub palette_state: Arc<PaletteSwapState>,
    pub renderer: Arc<RenderService>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            palette_state: Arc::new(PaletteSwapState::new(config)),
            renderer: Arc::new(RenderService::new()),
        }
    }
}

/// Create application state from an asset loader.
pub fn create_app_state(asset_loader: &AssetLoader) -> AppState {
    let config = AppConfig::load_from_assets(asset_loader);
    let state = AppState::new(config);

    let frame = state.palette_state.snapshot();
    tracing::info!(
        palette = %frame.palette_name,
        colours = ?frame.palette.to_hex_strings(),
        "Initial palette"
    );
    state
}

/// Build the API router with all endpoints and middleware.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/render", post(handle_render))
        .route("/api/palettes", get(handle_palettes))
        .route(
            "/api/settings",
            get(handle_get_settings).put(handle_put_settings),
        )
        .route("/api-docs/openapi.json", get(handle_openapi))
        // Health check
        .route("/health", get(|| async { "OK" }))
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::if_not_present(
            axum::http::header::CACHE_CONTROL,
            axum::http::HeaderValue::from_static("no-store"),
        ))
}

/// Reload the config into `state` whenever the watcher reports a change.
pub fn spawn_config_reloader(
    watcher: &ConfigWatcher,
    state: &AppState,
    asset_loader: Arc<AssetLoader>,
) -> JoinHandle<()> {
    let mut events = watcher.subscribe();
    let palette_state = state.palette_state.clone();

    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => {
                    tracing::info!(path = %event.path.display(), "Config file changed");
                    let config = AppConfig::load_from_assets(&asset_loader);
                    palette_state.reload(config);
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "Config events lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}

// Wrapper handlers to extract state components for the underlying API handlers

async fn handle_render(
    State(state): State<AppState>,
    query: Result<
        axum::extract::Query<api::RenderQuery>,
        axum::extract::rejection::QueryRejection,
    >,
    body: axum::body::Bytes,
) -> Result<Response, ApiError> {
    api::handle_render(
        State(state.palette_state),
        State(state.renderer),
        query,
        body,
    )
    .await
}

async fn handle_palettes(State(state): State<AppState>) -> Json<api::PalettesResponse> {
    api::handle_palettes(State(state.palette_state)).await
}

async fn handle_get_settings(State(state): State<AppState>) -> Json<SettingsView> {
    api::handle_get_settings(State(state.palette_state)).await
}

async fn handle_put_settings(
    State(state): State<AppState>,
    change: Result<
        Json<crate::services::SettingsChange>,
        axum::extract::rejection::JsonRejection,
    >,
) -> Result<Json<SettingsView>, ApiError> {
    api::handle_put_settings(State(state.palette_state), change).await
}

async fn handle_openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
