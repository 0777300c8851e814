//! Submission entity, status lifecycle, and list filters.

pub mod filter;
pub mod model;
pub mod status;

pub use filter::SubmissionFilter;
pub use model::{CreateSubmission, Submission};
pub use status::SubmissionStatus;
