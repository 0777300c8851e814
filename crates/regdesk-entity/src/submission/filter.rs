//! Filter parameters for submission listings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::status::SubmissionStatus;

/// Optional equality/range filters for `get_all_submissions`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmissionFilter {
    /// Restrict to a single status.
    pub status: Option<SubmissionStatus>,
    /// Restrict to a district.
    pub district: Option<String>,
    /// Restrict to a taluka.
    pub taluka: Option<String>,
    /// Restrict to an owning user.
    pub user_id: Option<Uuid>,
    /// Restrict to a recording user.
    pub filled_by: Option<Uuid>,
    /// Submitted at or after this time.
    pub submitted_from: Option<DateTime<Utc>>,
    /// Submitted at or before this time.
    pub submitted_to: Option<DateTime<Utc>>,
    /// Case-insensitive search on applicant name.
    pub search: Option<String>,
}
