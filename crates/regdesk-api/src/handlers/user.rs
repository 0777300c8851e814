//! User administration handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use regdesk_core::error::AppError;
use regdesk_core::types::PageResponse;
use regdesk_entity::user::{User, UserStats};

use crate::dto::request::{ListUsersQuery, UpdateRoleRequest};
use crate::extractors::AuthUser;
use crate::middleware::rbac;
use crate::state::AppState;

/// `GET /api/users` — filtered, paginated user listing. Supervisor+.
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<PageResponse<User>>, AppError> {
    rbac::require_supervisor(&state, &auth)?;
    let page = state
        .user_service
        .list(&query.filter()?, &query.page())
        .await?;
    Ok(Json(page))
}

/// `GET /api/users/{id}` — a single user. Supervisor+.
pub async fn get_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, AppError> {
    rbac::require_supervisor(&state, &auth)?;
    let user = state.user_service.get(id).await?;
    Ok(Json(user))
}

/// `GET /api/users/stats` — aggregate user counts. Admin only.
pub async fn user_stats(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<UserStats>, AppError> {
    rbac::require_admin(&state, &auth)?;
    let stats = state.user_service.stats().await?;
    Ok(Json(stats))
}

/// `PUT /api/users/{id}/role` — change a user's role. Admin only.
pub async fn change_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateRoleRequest>,
) -> Result<Json<User>, AppError> {
    rbac::require_admin(&state, &auth)?;
    let user = state
        .user_service
        .update_role(&auth.0, id, req.role()?)
        .await?;
    Ok(Json(user))
}
