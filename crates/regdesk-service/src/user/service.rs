//! User listing, lookup, role administration, and statistics.

use tracing::info;
use uuid::Uuid;

use regdesk_core::error::AppError;
use regdesk_core::result::AppResult;
use regdesk_core::types::{PageRequest, PageResponse};
use regdesk_database::repositories::UserRepository;
use regdesk_entity::user::{User, UserFilter, UserRole, UserStats};

use crate::context::RequestContext;

/// User administration service.
///
/// Role gating happens in the API middleware; these operations assume the
/// caller has already been admitted.
#[derive(Debug, Clone)]
pub struct UserService {
    users: UserRepository,
}

impl UserService {
    /// Create a new user service.
    pub fn new(users: UserRepository) -> Self {
        Self { users }
    }

    /// List users matching the filter, newest first.
    pub async fn list(
        &self,
        filter: &UserFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<User>> {
        self.users.list(filter, page).await
    }

    /// Fetch a single user.
    pub async fn get(&self, id: Uuid) -> AppResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User not found: {id}")))
    }

    /// Aggregate user counts.
    pub async fn stats(&self) -> AppResult<UserStats> {
        self.users.stats().await
    }

    /// Change a user's role.
    pub async fn update_role(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        role: UserRole,
    ) -> AppResult<User> {
        let user = self.users.update_role(id, &role).await?;
        info!(actor_id = %ctx.user_id, user_id = %id, role = %role, "User role changed");
        Ok(user)
    }
}
