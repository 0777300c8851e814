//! Submission review workflow.

pub mod service;

pub use service::SubmissionService;
