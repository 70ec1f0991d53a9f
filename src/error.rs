use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::services::StateError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Palette not found: {0}")]
    PaletteNotFound(String),

    #[error("Level not found: {0}")]
    LevelNotFound(String),

    #[error("Rendering error: {0}")]
    Render(#[from] RenderError),
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PNG decode error: {0}")]
    PngDecode(String),

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("Unsupported dimensions: {width}x{height}")]
    UnsupportedDimensions { width: u32, height: u32 },

    #[error("Palette swap error: {0}")]
    Swap(#[from] palette_mapper::SwapError),

    #[error("Render task failed: {0}")]
    Task(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<StateError> for ApiError {
    fn from(e: StateError) -> Self {
        match e {
            StateError::UnknownLevel(level) => ApiError::LevelNotFound(level),
            StateError::UnknownPalette(name) => ApiError::PaletteNotFound(name),
            StateError::InvalidFade(_) | StateError::Conflict(..) => {
                ApiError::BadRequest(e.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::PaletteNotFound(_) | ApiError::LevelNotFound(_) => StatusCode::NOT_FOUND,
            // Bad input images are the client's fault
            ApiError::Render(RenderError::PngDecode(_))
            | ApiError::Render(RenderError::UnsupportedDimensions { .. }) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "status": status.as_u16(),
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_messages() {
        assert_eq!(
            ApiError::BadRequest("empty body".to_string()).to_string(),
            "Bad request: empty body"
        );
        assert_eq!(
            ApiError::PaletteNotFound("neon".to_string()).to_string(),
            "Palette not found: neon"
        );
        assert_eq!(
            ApiError::LevelNotFound("Level_9".to_string()).to_string(),
            "Level not found: Level_9"
        );
    }

    #[test]
    fn test_render_error_messages() {
        assert_eq!(
            RenderError::UnsupportedDimensions {
                width: 0,
                height: 10
            }
            .to_string(),
            "Unsupported dimensions: 0x10"
        );
        assert_eq!(
            RenderError::PngDecode("bad signature".to_string()).to_string(),
            "PNG decode error: bad signature"
        );
        let swap = palette_mapper::SwapError::DimensionMismatch {
            expected: 4,
            actual: 3,
        };
        assert_eq!(
            RenderError::from(swap).to_string(),
            "Palette swap error: frame has 3 samples, expected 4 for its dimensions"
        );
    }

    #[test]
    fn test_api_error_from_render_error() {
        let api_error: ApiError = RenderError::PngEncode("boom".to_string()).into();
        assert!(matches!(api_error, ApiError::Render(RenderError::PngEncode(_))));
    }

    #[test]
    fn test_api_error_from_state_error() {
        assert!(matches!(
            ApiError::from(StateError::UnknownLevel("Level_9".to_string())),
            ApiError::LevelNotFound(level) if level == "Level_9"
        ));
        assert!(matches!(
            ApiError::from(StateError::UnknownPalette("neon".to_string())),
            ApiError::PaletteNotFound(_)
        ));
        assert_eq!(
            ApiError::from(StateError::InvalidFade(2.0)).to_string(),
            "Bad request: Fade fraction must be within [0, 1], got 2"
        );
    }

    #[test]
    fn test_api_error_into_response_status_codes() {
        let response = ApiError::BadRequest("x".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ApiError::PaletteNotFound("x".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = ApiError::LevelNotFound("x".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = ApiError::Render(RenderError::PngDecode("x".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ApiError::Render(RenderError::PngEncode("x".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = ApiError::Render(RenderError::Task("cancelled".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
