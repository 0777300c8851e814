//! # regdesk-entity
//!
//! Domain entities shared across the Regdesk crates: users with their
//! role hierarchy, registration submissions with their status lifecycle,
//! audit log entries, and the filter types for list queries.

pub mod audit;
pub mod submission;
pub mod user;
