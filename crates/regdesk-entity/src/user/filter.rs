//! Filter parameters for user listings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::role::UserRole;

/// Optional equality/range filters for `get_users`.
///
/// Every field is optional; absent fields do not constrain the result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserFilter {
    /// Restrict to a single role.
    pub role: Option<UserRole>,
    /// Restrict to a district.
    pub district: Option<String>,
    /// Restrict to a taluka.
    pub taluka: Option<String>,
    /// Restrict by active flag.
    pub active: Option<bool>,
    /// Created at or after this time.
    pub created_from: Option<DateTime<Utc>>,
    /// Created at or before this time.
    pub created_to: Option<DateTime<Utc>>,
    /// Case-insensitive search across name, email, and phone.
    pub search: Option<String>,
}
