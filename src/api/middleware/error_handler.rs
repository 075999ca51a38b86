//! Error handler for converting AppError to HTTP responses.
//!
//! Internal error sources are logged here and never reach the client. The
//! rendered [`ErrorResponse`] is also stored in the response extensions so
//! the request id middleware can stamp it with the request id.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::api::dto::ErrorResponse;
use crate::error::AppError;

/// Maps an AppError variant to its HTTP status code.
pub fn error_to_status_code(error: &AppError) -> StatusCode {
    match error {
        AppError::NotFound { .. } => StatusCode::NOT_FOUND,
        AppError::Duplicate { .. } => StatusCode::CONFLICT,
        AppError::Validation { .. }
        | AppError::ValidationErrors { .. }
        | AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
        AppError::ConnectionPool { .. } => StatusCode::SERVICE_UNAVAILABLE,
        AppError::Database { .. } | AppError::Configuration { .. } | AppError::Internal { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn error_body(error: &AppError) -> ErrorResponse {
    match error {
        AppError::NotFound {
            entity,
            field,
            value,
        } => ErrorResponse::not_found_error(entity, field, value),
        AppError::Duplicate {
            entity,
            field,
            value,
        } => ErrorResponse::duplicate_error(entity, field, value),
        AppError::Validation { field, reason } => ErrorResponse::validation_error(field, reason),
        AppError::ValidationErrors { errors } => ErrorResponse::validation_errors(errors),
        AppError::BadRequest { message } => ErrorResponse::new("BAD_REQUEST", message),
        AppError::Unauthorized { message } => ErrorResponse::new("UNAUTHORIZED", message),
        AppError::Database { operation, .. } => ErrorResponse::new(
            "DATABASE_ERROR",
            &format!("Database operation failed: {}", operation),
        )
        .with_details(json!({ "operation": operation })),
        AppError::Configuration { key, .. } => {
            ErrorResponse::new("CONFIGURATION_ERROR", &format!("Configuration error: {}", key))
        }
        AppError::ConnectionPool { .. } => {
            ErrorResponse::new("SERVICE_UNAVAILABLE", "Database connection unavailable")
        }
        AppError::Internal { .. } => {
            ErrorResponse::new("INTERNAL_ERROR", "An internal error occurred")
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = error_to_status_code(&self);
        if status.is_server_error() {
            tracing::error!(error = ?self, "Request failed");
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }

        let body = error_body(&self);
        let mut response = (status, Json(body.clone())).into_response();
        response.extensions_mut().insert(body);
        response
    }
}
