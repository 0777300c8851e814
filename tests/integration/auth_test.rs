//! Integration tests for authentication and role gating.
//!
//! These run against an unreachable database on purpose: token validation
//! and RBAC decisions must complete before any query is attempted.

mod helpers;

use http::StatusCode;
use jsonwebtoken::{EncodingKey, Header};

use regdesk_auth::Claims;
use regdesk_entity::user::UserRole;

#[tokio::test]
async fn test_me_without_token_is_unauthorized() {
    let app = helpers::TestApp::offline();

    let response = app.request("GET", "/api/auth/me", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "UNAUTHORIZED");
}

#[tokio::test]
async fn test_malformed_authorization_header_is_unauthorized() {
    let app = helpers::TestApp::offline();
    let token = app.token_for(UserRole::Admin);

    // Not a Bearer scheme.
    let response = app
        .request("GET", "/api/auth/me", None, Some(&format!("Basic {token}")))
        .await;

    // The raw header value is "Bearer Basic <token>", which fails decoding.
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_tampered_token_is_unauthorized() {
    let app = helpers::TestApp::offline();
    let minted = app.token_for(UserRole::Admin);

    // Corrupt the signature.
    let mut token = minted.clone();
    token.pop();
    token.push(if minted.ends_with('A') { 'B' } else { 'A' });

    let response = app.request("GET", "/api/users", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_token_is_unauthorized() {
    let app = helpers::TestApp::offline();

    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: uuid::Uuid::new_v4(),
        role: UserRole::Admin,
        iat: now - 7200,
        exp: now - 3600,
    };
    let token = jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(app.config.auth.jwt_secret.as_bytes()),
    )
    .unwrap();

    let response = app.request("GET", "/api/users", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_signed_with_wrong_secret_is_unauthorized() {
    let app = helpers::TestApp::offline();

    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: uuid::Uuid::new_v4(),
        role: UserRole::Admin,
        iat: now,
        exp: now + 3600,
    };
    let token = jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"some-other-secret"),
    )
    .unwrap();

    let response = app.request("GET", "/api/users", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_volunteer_cannot_list_users() {
    let app = helpers::TestApp::offline();
    let token = app.token_for(UserRole::Volunteer);

    let response = app.request("GET", "/api/users", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.error_code(), "FORBIDDEN");
}

#[tokio::test]
async fn test_volunteer_cannot_list_submissions() {
    let app = helpers::TestApp::offline();
    let token = app.token_for(UserRole::Volunteer);

    let response = app
        .request("GET", "/api/submissions", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_volunteer_cannot_decide_submissions() {
    let app = helpers::TestApp::offline();
    let token = app.token_for(UserRole::Volunteer);

    let response = app
        .request(
            "PUT",
            &format!("/api/submissions/{}/status", uuid::Uuid::new_v4()),
            Some(serde_json::json!({ "status": "approved" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_supervisor_cannot_read_audit_trail() {
    let app = helpers::TestApp::offline();
    let token = app.token_for(UserRole::Supervisor);

    let response = app
        .request(
            "GET",
            &format!("/api/submissions/{}/audit", uuid::Uuid::new_v4()),
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_supervisor_cannot_read_user_stats() {
    let app = helpers::TestApp::offline();
    let token = app.token_for(UserRole::Supervisor);

    let response = app
        .request("GET", "/api/users/stats", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_team_cannot_provision() {
    let app = helpers::TestApp::offline();
    let token = app.token_for(UserRole::Team);

    let response = app
        .request("POST", "/api/admin/provision", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_login_rejects_unknown_login_type() {
    let app = helpers::TestApp::offline();

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "login": "someone@example.org",
                "password": "password123",
                "login_type": "username",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_register_rejects_short_password() {
    let app = helpers::TestApp::offline();

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "full_name": "Asha Patil",
                "email": "asha@example.org",
                "phone": "9876543210",
                "password": "short",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_rejects_missing_email() {
    let app = helpers::TestApp::offline();

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "full_name": "Asha Patil",
                "email": "",
                "phone": "9876543210",
                "password": "long-enough-pass",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_status_rejects_unknown_status_before_touching_storage() {
    let app = helpers::TestApp::offline();
    let token = app.token_for(UserRole::Supervisor);

    let response = app
        .request(
            "PUT",
            &format!("/api/submissions/{}/status", uuid::Uuid::new_v4()),
            Some(serde_json::json!({ "status": "reopened" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "VALIDATION_ERROR");
}
