//! JWT claims structure for session tokens.
//!
//! Tokens are stateless: validity is purely a function of the signature
//! and the expiry claim. Nothing is persisted server-side and nothing is
//! refreshed implicitly.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use regdesk_entity::user::UserRole;

/// Claims payload embedded in every session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — the user ID.
    pub sub: Uuid,
    /// User role at the time of token issuance.
    pub role: UserRole,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl Claims {
    /// Returns the user ID from the subject claim.
    pub fn user_id(&self) -> Uuid {
        self.sub
    }
}
