//! # regdesk-database
//!
//! PostgreSQL access for Regdesk: the shared connection pool, the
//! repositories over `users`/`submissions`/`audit_logs`, the static
//! schema descriptor, and the self-provisioning + health subsystem.

pub mod connection;
pub mod provisioning;
pub mod repositories;
pub mod schema;
