//! End-to-end workflow tests against a live PostgreSQL instance.
//!
//! Each test provisions the schema and starts from a clean database. Point
//! `REGDESK_TEST_DATABASE_URL` at a disposable database before unignoring.

mod helpers;

use http::StatusCode;
use serde_json::json;

use regdesk_database::provisioning::Provisioner;
use regdesk_entity::user::UserRole;

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_register_login_me_flow() {
    let app = helpers::TestApp::live().await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "full_name": "Asha Patil",
                "email": "asha@example.org",
                "phone": "9876543210",
                "password": "long-enough-pass",
                "district": "Pune",
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    // Self-registration always yields a volunteer.
    assert_eq!(
        response.body["user"]["role"].as_str(),
        Some("volunteer")
    );
    // The password hash must never leave the server.
    assert!(response.body["user"].get("password_hash").is_none());

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({
                "login": "asha@example.org",
                "password": "long-enough-pass",
                "login_type": "email",
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    let token = response.body["token"].as_str().unwrap().to_string();

    let response = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["email"].as_str(), Some("asha@example.org"));
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_phone_login() {
    let app = helpers::TestApp::live().await;
    register(&app, "ravi@example.org", "9000000001").await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({
                "login": "9000000001",
                "password": "long-enough-pass",
                "login_type": "phone",
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_wrong_password_and_unknown_user_look_identical() {
    let app = helpers::TestApp::live().await;
    register(&app, "meera@example.org", "9000000002").await;

    let wrong_password = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({
                "login": "meera@example.org",
                "password": "not-the-password",
                "login_type": "email",
            })),
            None,
        )
        .await;
    let unknown_user = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({
                "login": "nobody@example.org",
                "password": "not-the-password",
                "login_type": "email",
            })),
            None,
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.body, unknown_user.body);
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_duplicate_email_is_a_conflict() {
    let app = helpers::TestApp::live().await;
    register(&app, "dup@example.org", "9000000003").await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "full_name": "Second Account",
                "email": "dup@example.org",
                "phone": "9000000004",
                "password": "long-enough-pass",
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.error_code(), "CONFLICT");
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_submission_review_flow() {
    let app = helpers::TestApp::live().await;
    let volunteer_token = register(&app, "vol@example.org", "9000000005").await;

    let response = app
        .request(
            "POST",
            "/api/submissions",
            Some(json!({
                "applicant_name": "Kiran Jadhav",
                "applicant_details": { "age": 34 },
                "district": "Pune",
                "taluka": "Haveli",
            })),
            Some(&volunteer_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    assert_eq!(response.body["status"].as_str(), Some("pending"));
    let submission_id = response.body["id"].as_str().unwrap().to_string();

    // The reviewer must exist: the decision writes status_updated_by and an
    // audit row, both keyed to users.
    let supervisor_id = app
        .create_user_with_role("sup@example.org", "9000000099", UserRole::Supervisor)
        .await;
    let supervisor_token = app.token_for_user(supervisor_id, UserRole::Supervisor);

    // Approve.
    let response = app
        .request(
            "PUT",
            &format!("/api/submissions/{submission_id}/status"),
            Some(json!({ "status": "approved" })),
            Some(&supervisor_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["status"].as_str(), Some("approved"));
    assert!(response.body["status_updated_at"].is_string());

    // Approved is terminal: a second decision loses.
    let response = app
        .request(
            "PUT",
            &format!("/api/submissions/{submission_id}/status"),
            Some(json!({ "status": "rejected" })),
            Some(&supervisor_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);

    // The record kept its first decision.
    let response = app
        .request(
            "GET",
            &format!("/api/submissions/{submission_id}"),
            None,
            Some(&supervisor_token),
        )
        .await;
    assert_eq!(response.body["status"].as_str(), Some("approved"));

    // The decision left exactly one audit entry, readable on the trail.
    let team_token = app.token_for(UserRole::Team);
    let response = app
        .request(
            "GET",
            &format!("/api/submissions/{submission_id}/audit"),
            None,
            Some(&team_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    let entries = response.body.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["action"].as_str(), Some("submission.status_update"));
    assert_eq!(entries[0]["actor_id"], json!(supervisor_id));
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_audit_trail_of_missing_submission_is_not_found() {
    let app = helpers::TestApp::live().await;
    let token = app.token_for(UserRole::Team);

    let response = app
        .request(
            "GET",
            &format!("/api/submissions/{}/audit", uuid::Uuid::new_v4()),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_deciding_missing_submission_is_not_found() {
    let app = helpers::TestApp::live().await;
    let token = app.token_for(UserRole::Supervisor);

    let response = app
        .request(
            "PUT",
            &format!("/api/submissions/{}/status", uuid::Uuid::new_v4()),
            Some(json!({ "status": "approved" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_submission_listing_filters_and_counts() {
    let app = helpers::TestApp::live().await;
    let token = register(&app, "lister@example.org", "9000000006").await;

    for i in 0..3 {
        let response = app
            .request(
                "POST",
                "/api/submissions",
                Some(json!({
                    "applicant_name": format!("Applicant {i}"),
                    "district": if i == 0 { "Pune" } else { "Nashik" },
                })),
                Some(&token),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
    }

    let supervisor_token = app.token_for(UserRole::Supervisor);

    let response = app
        .request(
            "GET",
            "/api/submissions?district=Nashik&limit=1",
            None,
            Some(&supervisor_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    // The total counts every match, not just the page window.
    assert_eq!(response.body["total"].as_u64(), Some(2));
    assert_eq!(response.body["items"].as_array().unwrap().len(), 1);
    assert_eq!(response.body["total_pages"].as_u64(), Some(2));
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_user_listing_and_stats() {
    let app = helpers::TestApp::live().await;
    register(&app, "u1@example.org", "9000000007").await;
    register(&app, "u2@example.org", "9000000008").await;

    let supervisor_token = app.token_for(UserRole::Supervisor);
    let response = app
        .request("GET", "/api/users", None, Some(&supervisor_token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["total"].as_u64(), Some(2));

    let admin_token = app.token_for(UserRole::Admin);
    let response = app
        .request("GET", "/api/users/stats", None, Some(&admin_token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["total"].as_u64(), Some(2));
    assert_eq!(response.body["active"].as_u64(), Some(2));
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_provisioning_is_idempotent() {
    let app = helpers::TestApp::live().await;
    let admin_token = app.token_for(UserRole::Admin);

    // The schema already exists from setup, so a pass creates nothing.
    let response = app
        .request("POST", "/api/admin/provision", None, Some(&admin_token))
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["tables_created"].as_u64(), Some(0));
    assert_eq!(response.body["types_created"].as_u64(), Some(0));
    assert_eq!(response.body["errors"].as_array().unwrap().len(), 0);
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_health_is_healthy_after_provisioning() {
    let app = helpers::TestApp::live().await;

    let response = app.request("GET", "/api/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"].as_str(), Some("healthy"));
    assert_eq!(response.body["missing_tables"].as_array().unwrap().len(), 0);
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_health_names_a_missing_table_as_degraded() {
    let app = helpers::TestApp::live().await;

    sqlx::query("DROP TABLE statistics")
        .execute(&app.db_pool)
        .await
        .unwrap();

    let response = app.request("GET", "/api/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["status"].as_str(), Some("degraded"));
    assert_eq!(response.body["missing_tables"], json!(["statistics"]));

    // Restore the table so later runs start from a full schema.
    let report = Provisioner::new(app.db_pool.clone(), &app.config.database)
        .initialize()
        .await
        .unwrap();
    assert_eq!(report.tables_created, 1);
}

/// Register a volunteer and return their session token.
async fn register(app: &helpers::TestApp, email: &str, phone: &str) -> String {
    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "full_name": "Test Volunteer",
                "email": email,
                "phone": phone,
                "password": "long-enough-pass",
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    response.body["token"].as_str().unwrap().to_string()
}
