//! Submission status enumeration and transition rules.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a registration submission.
///
/// `Approved` and `Rejected` are terminal: the only legal transitions are
/// out of `Pending`. There is no re-open operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "submission_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    /// Awaiting review.
    Pending,
    /// Accepted by a reviewer. Terminal.
    Approved,
    /// Declined by a reviewer. Terminal.
    Rejected,
}

impl SubmissionStatus {
    /// Whether this status admits no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }

    /// Whether a transition from this status to `next` is legal.
    pub fn can_transition_to(&self, next: SubmissionStatus) -> bool {
        match self {
            Self::Pending => true,
            Self::Approved | Self::Rejected => *self == next,
        }
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SubmissionStatus {
    type Err = regdesk_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(regdesk_core::AppError::validation(format!(
                "Invalid submission status: '{s}'. Expected one of: pending, approved, rejected"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_transitions_anywhere() {
        assert!(SubmissionStatus::Pending.can_transition_to(SubmissionStatus::Approved));
        assert!(SubmissionStatus::Pending.can_transition_to(SubmissionStatus::Rejected));
        assert!(SubmissionStatus::Pending.can_transition_to(SubmissionStatus::Pending));
    }

    #[test]
    fn test_terminal_states_are_closed() {
        assert!(!SubmissionStatus::Approved.can_transition_to(SubmissionStatus::Rejected));
        assert!(!SubmissionStatus::Rejected.can_transition_to(SubmissionStatus::Approved));
        assert!(!SubmissionStatus::Approved.can_transition_to(SubmissionStatus::Pending));
        assert!(SubmissionStatus::Approved.is_terminal());
        assert!(SubmissionStatus::Rejected.is_terminal());
        assert!(!SubmissionStatus::Pending.is_terminal());
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "approved".parse::<SubmissionStatus>().unwrap(),
            SubmissionStatus::Approved
        );
        assert!("reopened".parse::<SubmissionStatus>().is_err());
    }
}
