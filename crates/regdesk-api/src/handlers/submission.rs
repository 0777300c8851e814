//! Submission workflow handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use regdesk_core::error::AppError;
use regdesk_core::types::PageResponse;
use regdesk_entity::audit::AuditLogEntry;
use regdesk_entity::submission::{CreateSubmission, Submission};

use crate::dto::request::{CreateSubmissionRequest, ListSubmissionsQuery, UpdateStatusRequest};
use crate::extractors::AuthUser;
use crate::middleware::rbac;
use crate::state::AppState;

/// `POST /api/submissions` — record a new submission. Any authenticated user.
pub async fn create_submission(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateSubmissionRequest>,
) -> Result<(StatusCode, Json<Submission>), AppError> {
    let data = CreateSubmission {
        user_id: req.user_id.unwrap_or(auth.user_id),
        filled_by: auth.user_id,
        applicant_name: req.applicant_name,
        applicant_details: req.applicant_details,
        district: req.district,
        taluka: req.taluka,
    };
    let submission = state.submission_service.create(&auth.0, data).await?;
    Ok((StatusCode::CREATED, Json(submission)))
}

/// `GET /api/submissions` — filtered, paginated listing. Supervisor+.
pub async fn list_submissions(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListSubmissionsQuery>,
) -> Result<Json<PageResponse<Submission>>, AppError> {
    rbac::require_supervisor(&state, &auth)?;
    let page = state
        .submission_service
        .list(&query.filter()?, &query.page())
        .await?;
    Ok(Json(page))
}

/// `GET /api/submissions/{id}` — a single submission. Supervisor+.
pub async fn get_submission(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Submission>, AppError> {
    rbac::require_supervisor(&state, &auth)?;
    let submission = state.submission_service.get(id).await?;
    Ok(Json(submission))
}

/// `GET /api/submissions/{id}/audit` — decision trail for a submission.
/// Team+.
pub async fn submission_audit(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<AuditLogEntry>>, AppError> {
    rbac::require_team(&state, &auth)?;
    let entries = state.submission_service.audit_trail(id).await?;
    Ok(Json(entries))
}

/// `PUT /api/submissions/{id}/status` — decide a pending submission.
/// Supervisor+.
pub async fn update_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<Submission>, AppError> {
    rbac::require_supervisor(&state, &auth)?;
    let submission = state
        .submission_service
        .update_status(&auth.0, id, req.status()?)
        .await?;
    Ok(Json(submission))
}
