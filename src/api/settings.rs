use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::services::{PaletteSwapState, SettingsChange, SettingsView};

/// A configured palette
#[derive(Debug, Serialize, ToSchema)]
pub struct PaletteInfo {
    pub name: String,
    /// sRGB hex colours, brightest bucket first
    pub colours: Vec<String>,
}

/// A configured level
#[derive(Debug, Serialize, ToSchema)]
pub struct LevelInfo {
    pub name: String,
    /// Palette the level switches to, if any
    pub palette: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PalettesResponse {
    /// Palette active before any level is entered
    pub default_palette: String,
    pub palettes: Vec<PaletteInfo>,
    pub levels: Vec<LevelInfo>,
}

/// List configured palettes and levels
///
/// Palettes that fail to parse are left out.
#[utoipa::path(
    get,
    path = "/api/palettes",
    responses(
        (status = 200, description = "Configured palettes", body = PalettesResponse),
    ),
    tag = "Palettes"
)]
pub async fn handle_palettes(
    State(state): State<Arc<PaletteSwapState>>,
) -> Json<PalettesResponse> {
    let config = state.config();

    let palettes = config
        .palette_names()
        .into_iter()
        .filter_map(|name| {
            config.palette(name).map(|palette| PaletteInfo {
                name: name.to_string(),
                colours: palette.to_hex_strings(),
            })
        })
        .collect();

    let mut levels: Vec<LevelInfo> = config
        .levels
        .iter()
        .map(|(name, level)| LevelInfo {
            name: name.clone(),
            palette: level.palette.clone(),
        })
        .collect();
    levels.sort_by(|a, b| a.name.cmp(&b.name));

    Json(PalettesResponse {
        default_palette: config.default_palette.clone(),
        palettes,
        levels,
    })
}

/// Current palette swap settings
#[utoipa::path(
    get,
    path = "/api/settings",
    responses(
        (status = 200, description = "Active snapshot", body = SettingsView),
    ),
    tag = "Settings"
)]
pub async fn handle_get_settings(State(state): State<Arc<PaletteSwapState>>) -> Json<SettingsView> {
    Json(SettingsView::from(&*state.snapshot()))
}

/// Update palette swap settings
///
/// Enter a level, select a palette, set the darkness bias or drive the
/// warp fade. All fields are optional; the update is applied as a whole or
/// not at all.
#[utoipa::path(
    put,
    path = "/api/settings",
    request_body = SettingsChange,
    responses(
        (status = 200, description = "Updated snapshot", body = SettingsView),
        (status = 400, description = "Fade out of range or conflicting fields"),
        (status = 404, description = "Unknown level or palette"),
    ),
    tag = "Settings"
)]
pub async fn handle_put_settings(
    State(state): State<Arc<PaletteSwapState>>,
    change: Result<Json<SettingsChange>, JsonRejection>,
) -> Result<Json<SettingsView>, ApiError> {
    let Json(change) = change.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let frame = state.apply(&change)?;
    tracing::info!(
        level = ?frame.level,
        palette = %frame.palette_name,
        darkness = frame.darkness,
        "Settings updated"
    );
    Ok(Json(SettingsView::from(&*frame)))
}
