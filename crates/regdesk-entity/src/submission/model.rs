//! Submission entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::SubmissionStatus;

/// A registration record submitted by a volunteer.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Submission {
    /// Unique submission identifier.
    pub id: Uuid,
    /// The user the record belongs to.
    pub user_id: Uuid,
    /// The user who recorded it; may differ from the owner.
    pub filled_by: Uuid,
    /// Review status.
    pub status: SubmissionStatus,
    /// Applicant's name.
    pub applicant_name: String,
    /// Free-form applicant fields.
    pub applicant_details: serde_json::Value,
    /// District of the applicant.
    pub district: Option<String>,
    /// Taluka of the applicant.
    pub taluka: Option<String>,
    /// When the record was submitted. Immutable.
    pub submitted_at: DateTime<Utc>,
    /// When the status was last changed.
    pub status_updated_at: Option<DateTime<Utc>>,
    /// Who last changed the status.
    pub status_updated_by: Option<Uuid>,
}

/// Data required to create a new submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSubmission {
    /// Owning user.
    pub user_id: Uuid,
    /// Recording user.
    pub filled_by: Uuid,
    /// Applicant's name.
    pub applicant_name: String,
    /// Free-form applicant fields.
    pub applicant_details: serde_json::Value,
    /// District (optional).
    pub district: Option<String>,
    /// Taluka (optional).
    pub taluka: Option<String>,
}
