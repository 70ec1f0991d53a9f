use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

use crate::error::ApiError;
use crate::services::{PaletteSwapState, RenderService};

/// One-off overrides for a single render
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RenderQuery {
    /// Palette to use instead of the active one
    #[serde(default)]
    pub palette: Option<String>,
    /// Render as if this level had been entered
    #[serde(default)]
    pub level: Option<String>,
    /// Darkness bias to use instead of the active one
    #[serde(default)]
    pub darkness: Option<i32>,
}

/// Apply the palette swap to a PNG frame
///
/// The request body is the scene image. The response is the swapped frame
/// as PNG. Query overrides apply to this request only.
#[utoipa::path(
    post,
    path = "/api/render",
    request_body(content = Vec<u8>, content_type = "image/png", description = "Scene image"),
    params(RenderQuery),
    responses(
        (status = 200, description = "Palette-swapped PNG", body = Vec<u8>, content_type = "image/png"),
        (status = 400, description = "Empty or undecodable image, or conflicting overrides"),
        (status = 404, description = "Unknown palette or level"),
    ),
    tag = "Render"
)]
pub async fn handle_render(
    State(state): State<Arc<PaletteSwapState>>,
    State(renderer): State<Arc<RenderService>>,
    query: Result<Query<RenderQuery>, QueryRejection>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    if body.is_empty() {
        return Err(ApiError::BadRequest("empty request body".to_string()));
    }

    let frame = state.frame_for(
        query.palette.as_deref(),
        query.level.as_deref(),
        query.darkness,
    )?;

    tracing::info!(
        bytes = body.len(),
        palette = %frame.palette_name,
        darkness = frame.darkness,
        "Rendering frame"
    );

    let png = renderer.render(body.to_vec(), frame.swap()).await?;

    Ok(([(header::CONTENT_TYPE, "image/png")], png).into_response())
}
