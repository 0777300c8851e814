//! Maps domain `AppError` to HTTP responses.
//!
//! The `IntoResponse` impl for `AppError` lives in `regdesk-core` (next to
//! the type, as the orphan rule requires); this module re-exports the
//! response body type for API consumers.

pub use regdesk_core::error::ApiErrorResponse;
