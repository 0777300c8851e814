//! Health probe handler.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use regdesk_database::provisioning::{HealthReport, HealthState};

use crate::state::AppState;

/// `GET /api/health` — storage health. Public, never errors.
///
/// Degraded still answers 200: the service is up and partially usable, and
/// load balancers should not pull it. Only an unreachable store is a 503.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthReport>) {
    let report = state.provisioner.health_status().await;
    let status = match report.status {
        HealthState::Healthy | HealthState::Degraded => StatusCode::OK,
        HealthState::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };
    (status, Json(report))
}
