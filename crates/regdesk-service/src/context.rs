//! Per-request caller identity.

use uuid::Uuid;

use regdesk_entity::user::UserRole;

/// The authenticated caller of a service operation, as established by the
/// session token. Services trust this context; the API layer is responsible
/// for building it only from a verified token.
#[derive(Debug, Clone, Copy)]
pub struct RequestContext {
    /// The caller's user id.
    pub user_id: Uuid,
    /// The caller's role claim.
    pub role: UserRole,
}

impl RequestContext {
    /// Create a context for the given caller.
    pub fn new(user_id: Uuid, role: UserRole) -> Self {
        Self { user_id, role }
    }
}
