//! Authentication handlers: login, register, me.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use regdesk_core::error::AppError;
use regdesk_entity::user::User;
use regdesk_service::auth::{AuthSession, LoginType, Registration};

use crate::dto::request::LoginRequest;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// `POST /api/auth/login` — authenticate with email or phone plus password.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthSession>, AppError> {
    let login_type: LoginType = req.login_type.parse()?;
    let session = state
        .auth_service
        .authenticate(&req.login, &req.password, login_type)
        .await?;
    Ok(Json(session))
}

/// `POST /api/auth/register` — self-register a volunteer account.
pub async fn register(
    State(state): State<AppState>,
    Json(registration): Json<Registration>,
) -> Result<(StatusCode, Json<AuthSession>), AppError> {
    let session = state.auth_service.register(registration).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

/// `GET /api/auth/me` — the account behind the presented token.
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<User>, AppError> {
    let user = state.auth_service.current_user(auth.user_id).await?;
    Ok(Json(user))
}
