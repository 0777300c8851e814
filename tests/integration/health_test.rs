//! Integration tests for the health probe.

mod helpers;

use http::StatusCode;

#[tokio::test]
async fn test_unreachable_store_reports_unhealthy() {
    let app = helpers::TestApp::offline();

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        response.body.get("status").and_then(|v| v.as_str()),
        Some("unhealthy")
    );
    assert!(
        response.body.get("error").is_some(),
        "unhealthy report should carry probe detail: {:?}",
        response.body
    );
}

#[tokio::test]
async fn test_health_is_public() {
    let app = helpers::TestApp::offline();

    // No Authorization header; the probe must still answer rather than 401.
    let response = app.request("GET", "/api/health", None, None).await;

    assert_ne!(response.status, StatusCode::UNAUTHORIZED);
}
