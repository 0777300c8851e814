//! Audit log entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A recorded privileged action.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AuditLogEntry {
    /// Unique entry identifier.
    pub id: Uuid,
    /// The user who performed the action.
    pub actor_id: Uuid,
    /// Action name, e.g. `"submission.status_update"`.
    pub action: String,
    /// The kind of entity acted on.
    pub entity: String,
    /// The id of the entity acted on.
    pub entity_id: Uuid,
    /// Structured action detail.
    pub detail: serde_json::Value,
    /// When the action happened.
    pub created_at: DateTime<Utc>,
}

/// Data for recording a new audit entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAuditLogEntry {
    /// The user who performed the action.
    pub actor_id: Uuid,
    /// Action name.
    pub action: String,
    /// The kind of entity acted on.
    pub entity: String,
    /// The id of the entity acted on.
    pub entity_id: Uuid,
    /// Structured action detail.
    pub detail: serde_json::Value,
}
