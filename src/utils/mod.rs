//! Shared utilities.

pub mod jwt;
pub mod phone;
pub mod validate;
