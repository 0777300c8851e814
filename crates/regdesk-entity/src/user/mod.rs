//! User entity, role hierarchy, and list filters.

pub mod filter;
pub mod model;
pub mod role;

pub use filter::UserFilter;
pub use model::{CreateUser, RoleCount, User, UserStats};
pub use role::UserRole;
