//! Tests for the settings and palettes endpoints

mod common;

use axum::http::StatusCode;
use common::fixtures::{bucket_strip_png, decode_rgba, rgb_pixels, TEST_CONFIG};
use common::{assert_json_error, assert_ok, assert_png, TestApp};
use pretty_assertions::assert_eq;
use serde_json::Value;

#[tokio::test]
async fn test_get_settings_initial() {
    let app = TestApp::with_config(TEST_CONFIG);

    let response = app.get("/api/settings").await;
    assert_ok(&response);

    let json: Value = response.json();
    assert_eq!(json["palette"], "grey");
    assert_eq!(json["darkness"], 0);
    assert!(json["level"].is_null());
    assert_eq!(json["colours"][0], "#ffffff");
    assert_eq!(json["linear"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_enter_level_switches_palette() {
    let app = TestApp::with_config(TEST_CONFIG);

    let response = app
        .put_json("/api/settings", r#"{"level": "Level_0"}"#)
        .await;
    assert_ok(&response);
    let json: Value = response.json();
    assert_eq!(json["level"], "Level_0");
    assert_eq!(json["palette"], "rgb");

    // Subsequent renders use the level's palette
    let response = app.post_png("/api/render", bucket_strip_png()).await;
    assert_png(&response);
    let (_, _, rgba) = decode_rgba(&response.body);
    assert_eq!(rgb_pixels(&rgba)[1], [0, 255, 0]);
}

#[tokio::test]
async fn test_level_without_palette_keeps_colours() {
    let app = TestApp::with_config(TEST_CONFIG);

    app.put_json("/api/settings", r#"{"level": "Level_0"}"#)
        .await;
    let response = app
        .put_json("/api/settings", r#"{"level": "Level_1"}"#)
        .await;
    assert_ok(&response);

    let json: Value = response.json();
    assert_eq!(json["level"], "Level_1");
    assert_eq!(json["palette"], "rgb");
}

#[tokio::test]
async fn test_warp_fade_ramp() {
    let app = TestApp::with_config(TEST_CONFIG);

    for (fade, darkness) in [(0.0, 0), (0.3, 1), (0.5, 2), (0.8, 3)] {
        let response = app
            .put_json("/api/settings", &format!(r#"{{"fade": {fade}}}"#))
            .await;
        assert_ok(&response);
        let json: Value = response.json();
        assert_eq!(json["darkness"], darkness, "fade {fade}");
    }

    // At darkness 3 the whole frame is the darkest colour
    let response = app.post_png("/api/render", bucket_strip_png()).await;
    let (_, _, rgba) = decode_rgba(&response.body);
    assert!(rgb_pixels(&rgba).iter().all(|&p| p == [0, 0, 0]));

    let response = app
        .put_json("/api/settings", r#"{"finish_fade": true}"#)
        .await;
    assert_ok(&response);
    let json: Value = response.json();
    assert_eq!(json["darkness"], 0);
}

#[tokio::test]
async fn test_set_darkness_directly() {
    let app = TestApp::with_config(TEST_CONFIG);

    let response = app
        .put_json("/api/settings", r#"{"palette": "rgb", "darkness": -2}"#)
        .await;
    assert_ok(&response);

    let frame = app.palette_state.snapshot();
    assert_eq!(frame.palette_name, "rgb");
    assert_eq!(frame.darkness, -2);
}

#[tokio::test]
async fn test_fade_out_of_range_is_bad_request() {
    let app = TestApp::with_config(TEST_CONFIG);
    let response = app.put_json("/api/settings", r#"{"fade": 1.5}"#).await;
    assert_json_error(&response, StatusCode::BAD_REQUEST);
    assert_eq!(app.palette_state.snapshot().darkness, 0);
}

#[tokio::test]
async fn test_unknown_level_is_not_found_and_state_unchanged() {
    let app = TestApp::with_config(TEST_CONFIG);
    let response = app
        .put_json("/api/settings", r#"{"level": "Level_9", "darkness": 2}"#)
        .await;
    assert_json_error(&response, StatusCode::NOT_FOUND);

    let frame = app.palette_state.snapshot();
    assert_eq!(frame.level, None);
    assert_eq!(frame.darkness, 0);
}

#[tokio::test]
async fn test_unknown_palette_is_not_found() {
    let app = TestApp::with_config(TEST_CONFIG);
    let response = app
        .put_json("/api/settings", r#"{"palette": "neon"}"#)
        .await;
    assert_json_error(&response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = TestApp::with_config(TEST_CONFIG);
    let response = app.put_json("/api/settings", "{not json").await;
    assert_json_error(&response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_palettes() {
    let app = TestApp::with_config(TEST_CONFIG);

    let response = app.get("/api/palettes").await;
    assert_ok(&response);

    let json: Value = response.json();
    assert_eq!(json["default_palette"], "grey");
    let names: Vec<&str> = json["palettes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["grey", "rgb"]);
    assert_eq!(json["palettes"][1]["colours"][2], "#0000ff");

    assert_eq!(json["levels"][0]["name"], "Level_0");
    assert_eq!(json["levels"][0]["palette"], "rgb");
    assert!(json["levels"][1]["palette"].is_null());
}

#[tokio::test]
async fn test_embedded_config_palettes() {
    let app = TestApp::new();

    let response = app.get("/api/palettes").await;
    assert_ok(&response);

    let json: Value = response.json();
    assert_eq!(json["default_palette"], "default");
    assert_eq!(
        json["palettes"][0]["colours"],
        serde_json::json!(["#000000", "#4d4d4d", "#b3b3b3", "#ffffff"])
    );
}
