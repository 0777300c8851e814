//! Authentication and registration.

pub mod service;

pub use service::{AuthService, AuthSession, LoginType, Registration};
