//! Middleware components for request processing.
//!
//! Logging, request ID tracking, error normalization, and JWT
//! authentication for the management surface.

mod auth;
mod error_handler;
mod logging;
mod request_id;

pub use auth::{auth_middleware, AuthUser};
pub use error_handler::global_error_handler;
pub use logging::logging_middleware;
pub use request_id::{request_id_middleware, RequestId};
