//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles available in the registration workflow.
///
/// Roles form a total order: Admin > Team > Supervisor > Volunteer.
/// A role satisfies any gate at or below its own level, so an admin
/// passes every check while a team member passes everything except
/// admin-only gates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Full system administrator.
    Admin,
    /// Internal team member; everything except admin-only operations.
    Team,
    /// Reviews and approves submissions in their district.
    Supervisor,
    /// Submits registration records.
    Volunteer,
}

impl UserRole {
    /// Return the privilege level (higher = more privileged).
    pub fn privilege_level(&self) -> u8 {
        match self {
            Self::Admin => 4,
            Self::Team => 3,
            Self::Supervisor => 2,
            Self::Volunteer => 1,
        }
    }

    /// Check if this role has at least the given role's privileges.
    pub fn has_at_least(&self, other: &UserRole) -> bool {
        self.privilege_level() >= other.privilege_level()
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Team => "team",
            Self::Supervisor => "supervisor",
            Self::Volunteer => "volunteer",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = regdesk_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "team" => Ok(Self::Team),
            "supervisor" => Ok(Self::Supervisor),
            "volunteer" => Ok(Self::Volunteer),
            _ => Err(regdesk_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: volunteer, supervisor, team, admin"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_privilege_ordering() {
        assert!(UserRole::Admin.has_at_least(&UserRole::Volunteer));
        assert!(UserRole::Admin.has_at_least(&UserRole::Admin));
        assert!(UserRole::Team.has_at_least(&UserRole::Supervisor));
        assert!(!UserRole::Team.has_at_least(&UserRole::Admin));
        assert!(UserRole::Supervisor.has_at_least(&UserRole::Volunteer));
        assert!(!UserRole::Volunteer.has_at_least(&UserRole::Supervisor));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("admin".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert_eq!("TEAM".parse::<UserRole>().unwrap(), UserRole::Team);
        assert!("superuser".parse::<UserRole>().is_err());
    }
}
