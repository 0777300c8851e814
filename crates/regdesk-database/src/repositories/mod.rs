//! Data access repositories.

pub mod audit;
pub mod submission;
pub mod user;

pub use audit::AuditRepository;
pub use submission::SubmissionRepository;
pub use user::UserRepository;
