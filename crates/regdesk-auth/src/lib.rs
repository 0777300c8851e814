//! # regdesk-auth
//!
//! Authentication building blocks: Argon2id password hashing, stateless
//! signed session tokens (JWT), and role-based access control enforcement
//! over the volunteer < supervisor < team < admin hierarchy.

pub mod jwt;
pub mod password;
pub mod rbac;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::PasswordHasher;
pub use rbac::RbacEnforcer;
