//! Admin-only operational handlers.

use axum::Json;
use axum::extract::State;

use regdesk_core::error::AppError;
use regdesk_database::provisioning::ProvisioningReport;

use crate::extractors::AuthUser;
use crate::middleware::rbac;
use crate::state::AppState;

/// `POST /api/admin/provision` — run an idempotent schema provisioning
/// pass and report what was created. Admin only.
pub async fn provision(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ProvisioningReport>, AppError> {
    rbac::require_admin(&state, &auth)?;
    let report = state.provisioner.initialize().await?;
    Ok(Json(report))
}
