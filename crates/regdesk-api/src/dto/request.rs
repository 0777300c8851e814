//! Request body and query parameter shapes.
//!
//! Enum-valued query/body fields arrive as strings and are parsed with the
//! domain `FromStr` impls so bad values come back as 400 validation errors
//! with a message naming the accepted values.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use regdesk_core::result::AppResult;
use regdesk_core::types::PageRequest;
use regdesk_entity::submission::{SubmissionFilter, SubmissionStatus};
use regdesk_entity::user::{UserFilter, UserRole};

/// Login credentials.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// Email address or phone number, per `login_type`.
    pub login: String,
    pub password: String,
    /// `"email"` or `"phone"`.
    pub login_type: String,
}

/// New submission payload. The recording user is taken from the session,
/// never from the body.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSubmissionRequest {
    /// The user the record belongs to; defaults to the caller.
    pub user_id: Option<Uuid>,
    pub applicant_name: String,
    #[serde(default)]
    pub applicant_details: serde_json::Value,
    pub district: Option<String>,
    pub taluka: Option<String>,
}

/// Status decision for a pending submission.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStatusRequest {
    /// `"approved"` or `"rejected"` (or `"pending"`, a no-op rewrite).
    pub status: String,
}

impl UpdateStatusRequest {
    pub fn status(&self) -> AppResult<SubmissionStatus> {
        self.status.parse()
    }
}

/// Role change for a user.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: String,
}

impl UpdateRoleRequest {
    pub fn role(&self) -> AppResult<UserRole> {
        self.role.parse()
    }
}

/// Query parameters for the user listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListUsersQuery {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub role: Option<String>,
    pub district: Option<String>,
    pub taluka: Option<String>,
    pub active: Option<bool>,
    pub created_from: Option<DateTime<Utc>>,
    pub created_to: Option<DateTime<Utc>>,
    pub search: Option<String>,
}

impl ListUsersQuery {
    pub fn page(&self) -> PageRequest {
        page_from(self.limit, self.offset)
    }

    pub fn filter(&self) -> AppResult<UserFilter> {
        Ok(UserFilter {
            role: self.role.as_deref().map(str::parse).transpose()?,
            district: self.district.clone(),
            taluka: self.taluka.clone(),
            active: self.active,
            created_from: self.created_from,
            created_to: self.created_to,
            search: self.search.clone(),
        })
    }
}

/// Query parameters for the submission listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListSubmissionsQuery {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub status: Option<String>,
    pub district: Option<String>,
    pub taluka: Option<String>,
    pub user_id: Option<Uuid>,
    pub filled_by: Option<Uuid>,
    pub submitted_from: Option<DateTime<Utc>>,
    pub submitted_to: Option<DateTime<Utc>>,
    pub search: Option<String>,
}

impl ListSubmissionsQuery {
    pub fn page(&self) -> PageRequest {
        page_from(self.limit, self.offset)
    }

    pub fn filter(&self) -> AppResult<SubmissionFilter> {
        Ok(SubmissionFilter {
            status: self.status.as_deref().map(str::parse).transpose()?,
            district: self.district.clone(),
            taluka: self.taluka.clone(),
            user_id: self.user_id,
            filled_by: self.filled_by,
            submitted_from: self.submitted_from,
            submitted_to: self.submitted_to,
            search: self.search.clone(),
        })
    }
}

fn page_from(limit: Option<u64>, offset: Option<u64>) -> PageRequest {
    match limit {
        Some(limit) => PageRequest::new(limit, offset.unwrap_or(0)),
        None => PageRequest {
            offset: offset.unwrap_or(0),
            ..PageRequest::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regdesk_core::error::ErrorKind;

    #[test]
    fn test_invalid_status_string_is_a_validation_error() {
        let req = UpdateStatusRequest {
            status: "reopened".to_string(),
        };
        assert_eq!(req.status().unwrap_err().kind, ErrorKind::Validation);
    }

    #[test]
    fn test_user_query_parses_role() {
        let query = ListUsersQuery {
            role: Some("supervisor".to_string()),
            ..Default::default()
        };
        assert_eq!(query.filter().unwrap().role, Some(UserRole::Supervisor));

        let query = ListUsersQuery {
            role: Some("root".to_string()),
            ..Default::default()
        };
        assert!(query.filter().is_err());
    }

    #[test]
    fn test_page_defaults_and_clamping() {
        let query = ListSubmissionsQuery::default();
        assert_eq!(query.page().limit(), PageRequest::default().limit());

        let query = ListSubmissionsQuery {
            limit: Some(10_000),
            offset: Some(50),
            ..Default::default()
        };
        let page = query.page();
        assert_eq!(page.limit(), 100);
        assert_eq!(page.offset(), 50);
    }
}
