//! Assertion helpers for tests.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use faas_fixtures::imaging::{decode_png, PixelBuffer};

use super::app::TestResponse;

/// Assert response has expected status code
pub fn assert_status(response: &TestResponse, expected: StatusCode) {
    assert_eq!(
        response.status,
        expected,
        "Expected status {}, got {}. Body: {}",
        expected,
        response.status,
        response.text()
    );
}

/// Assert response is OK (200)
pub fn assert_ok(response: &TestResponse) {
    assert_status(response, StatusCode::OK);
}

/// Assert response is a PNG of the given size and return its pixels
pub fn assert_png_size(response: &TestResponse, width: u32, height: u32) -> PixelBuffer {
    assert_ok(response);
    assert!(
        response.is_png(),
        "Expected PNG image, got {} bytes starting with {:?}",
        response.body.len(),
        &response.body[..8.min(response.body.len())]
    );

    let image = decode_png(response.bytes()).expect("Response is not a decodable PNG");
    assert_eq!(
        (image.width(), image.height()),
        (width, height),
        "Unexpected image dimensions"
    );
    image
}

/// Assert response is a host error with the given status and `errorType`
pub fn assert_host_error(response: &TestResponse, status: StatusCode, error_type: &str) -> String {
    assert_status(response, status);
    let json: serde_json::Value = response.json();
    assert_eq!(
        json["errorType"].as_str(),
        Some(error_type),
        "Unexpected error body: {}",
        serde_json::to_string_pretty(&json).unwrap()
    );
    json["errorMessage"]
        .as_str()
        .expect("Expected errorMessage string")
        .to_string()
}
