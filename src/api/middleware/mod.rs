//! Middleware components for request processing.

mod auth;
mod error_handler;
mod logging;
mod request_id;

pub use auth::{AuthUser, auth_middleware};
pub use error_handler::error_to_status_code;
pub use logging::logging_middleware;
pub use request_id::{REQUEST_ID_HEADER, RequestId, request_id_middleware};
