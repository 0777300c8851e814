//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::UserRole;

/// A registered user in the Regdesk system.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Full name.
    pub full_name: String,
    /// Email address; unique among active users.
    pub email: String,
    /// Phone number; unique among active users.
    pub phone: String,
    /// Argon2id password hash (PHC string, embeds the per-user salt).
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// User role (RBAC). Immutable except through the admin role update.
    pub role: UserRole,
    /// District the user operates in.
    pub district: Option<String>,
    /// Taluka the user operates in.
    pub taluka: Option<String>,
    /// Whether the account is active.
    pub active: bool,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Full name.
    pub full_name: String,
    /// Email address.
    pub email: String,
    /// Phone number.
    pub phone: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Assigned role.
    pub role: UserRole,
    /// District (optional).
    pub district: Option<String>,
    /// Taluka (optional).
    pub taluka: Option<String>,
}

/// Aggregate user counts grouped by role and activity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserStats {
    /// Total user rows.
    pub total: u64,
    /// Active users.
    pub active: u64,
    /// Inactive users.
    pub inactive: u64,
    /// Counts per role.
    pub by_role: Vec<RoleCount>,
}

/// A single role's user count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleCount {
    /// The role.
    pub role: UserRole,
    /// Number of users holding it.
    pub count: u64,
}
