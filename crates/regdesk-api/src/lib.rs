//! # regdesk-api
//!
//! HTTP surface of Regdesk: the axum router, authentication extractor,
//! role guards, request/response DTOs, and error-to-status mapping.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
