//! Request and response DTOs.

pub mod request;
