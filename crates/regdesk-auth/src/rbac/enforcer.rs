//! RBAC enforcement logic — minimum-role checks over the role hierarchy.

use regdesk_core::error::AppError;
use regdesk_entity::user::UserRole;

/// Enforces role-based access control for privileged operations.
///
/// The check is a single comparison over the closed role order
/// volunteer < supervisor < team < admin. It reads nothing but the role
/// claim and mutates nothing.
#[derive(Debug, Clone, Default)]
pub struct RbacEnforcer;

impl RbacEnforcer {
    /// Creates a new enforcer.
    pub fn new() -> Self {
        Self
    }

    /// Checks whether the given role is at least the specified minimum role.
    ///
    /// Returns `Ok(())` if allowed, or `Err(AppError::Forbidden)` if denied.
    /// A forbidden result is deliberately distinct from unauthorized: the
    /// caller is authenticated, just not privileged enough.
    pub fn require_minimum_role(
        &self,
        actual_role: &UserRole,
        minimum_role: &UserRole,
    ) -> Result<(), AppError> {
        if actual_role.has_at_least(minimum_role) {
            Ok(())
        } else {
            Err(AppError::forbidden(format!(
                "Role '{actual_role}' is insufficient; minimum required: '{minimum_role}'"
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regdesk_core::error::ErrorKind;

    #[test]
    fn test_admin_satisfies_every_gate() {
        let rbac = RbacEnforcer::new();
        for min in [
            UserRole::Volunteer,
            UserRole::Supervisor,
            UserRole::Team,
            UserRole::Admin,
        ] {
            assert!(rbac.require_minimum_role(&UserRole::Admin, &min).is_ok());
        }
    }

    #[test]
    fn test_volunteer_rejected_by_admin_gate() {
        let rbac = RbacEnforcer::new();
        let err = rbac
            .require_minimum_role(&UserRole::Volunteer, &UserRole::Admin)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
    }

    #[test]
    fn test_team_passes_supervisor_but_not_admin() {
        let rbac = RbacEnforcer::new();
        assert!(
            rbac.require_minimum_role(&UserRole::Team, &UserRole::Supervisor)
                .is_ok()
        );
        assert!(
            rbac.require_minimum_role(&UserRole::Team, &UserRole::Admin)
                .is_err()
        );
    }
}
