//! Test application factory for integration tests.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

use palette_swap::assets::AssetLoader;
use palette_swap::models::AppConfig;
use palette_swap::server::{build_router, create_app_state, AppState};
use palette_swap::services::PaletteSwapState;

/// Test application with router and direct access to the palette state
pub struct TestApp {
    router: axum::Router,
    pub palette_state: Arc<PaletteSwapState>,
}

impl TestApp {
    /// Create a new test application using the embedded config
    pub fn new() -> Self {
        Self::from_state(create_app_state(&AssetLoader::new(None)))
    }

    /// Create a test application from an inline YAML config
    pub fn with_config(yaml: &str) -> Self {
        let config = AppConfig::from_yaml(yaml).expect("Invalid test config");
        Self::from_state(AppState::new(config))
    }

    fn from_state(state: AppState) -> Self {
        let palette_state = state.palette_state.clone();
        Self {
            router: build_router(state),
            palette_state,
        }
    }

    /// Make a GET request to the given path
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Request::get(path).body(Body::empty()).unwrap())
            .await
    }

    /// Make a PUT request with JSON body
    pub async fn put_json(&self, path: &str, body: &str) -> TestResponse {
        let request = Request::put(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.request(request).await
    }

    /// Make a POST request with a PNG body
    pub async fn post_png(&self, path: &str, png: Vec<u8>) -> TestResponse {
        let request = Request::post(path)
            .header("Content-Type", "image/png")
            .body(Body::from(png))
            .unwrap();
        self.request(request).await
    }

    /// Send a request to the router
    async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Test response with convenience methods
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parse body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    /// Get body as string
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// Check if response is a PNG image
    pub fn is_png(&self) -> bool {
        self.body.len() >= 8 && &self.body[0..8] == b"\x89PNG\r\n\x1a\n"
    }
}
