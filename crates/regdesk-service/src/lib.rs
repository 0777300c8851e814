//! # regdesk-service
//!
//! Business logic over the repositories: credential authentication and
//! registration, user administration, and the submission review workflow.

pub mod auth;
pub mod context;
pub mod submission;
pub mod user;

pub use auth::AuthService;
pub use context::RequestContext;
pub use submission::SubmissionService;
pub use user::UserService;
