//! RBAC guards for role-gated routes.
//!
//! Guards run after authentication, so a failure here is always `Forbidden`
//! (403), never `Unauthorized` (401).

use regdesk_core::error::AppError;
use regdesk_entity::user::UserRole;

use crate::extractors::AuthUser;
use crate::state::AppState;

/// Requires the admin role.
pub fn require_admin(state: &AppState, auth: &AuthUser) -> Result<(), AppError> {
    state.rbac.require_minimum_role(&auth.role, &UserRole::Admin)
}

/// Requires at least the team role.
pub fn require_team(state: &AppState, auth: &AuthUser) -> Result<(), AppError> {
    state.rbac.require_minimum_role(&auth.role, &UserRole::Team)
}

/// Requires at least the supervisor role.
pub fn require_supervisor(state: &AppState, auth: &AuthUser) -> Result<(), AppError> {
    state
        .rbac
        .require_minimum_role(&auth.role, &UserRole::Supervisor)
}
