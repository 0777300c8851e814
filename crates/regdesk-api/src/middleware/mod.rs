//! Route guards.

pub mod rbac;
