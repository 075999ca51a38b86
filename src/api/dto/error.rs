//! Error response DTOs.

use serde::Serialize;
use serde_json::{Value, json};
use utoipa::ToSchema;

use crate::error::ValidationFieldError;

/// Standard error response format.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[schema(example = json!({
    "code": "NOT_FOUND",
    "message": "task with id=0b8e1c1e-4f39-4c4e-9f55-2f1b8c3f6a10 was not found",
    "request_id": "6f1b8c3f-9f55-4c4e-4f39-0b8e1c1e2a10"
}))]
pub struct ErrorResponse {
    #[schema(example = "NOT_FOUND")]
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl ErrorResponse {
    pub fn new(code: &str, message: &str) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            details: None,
            request_id: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Adds request ID to the error response for correlation.
    pub fn with_request_id(mut self, request_id: &str) -> Self {
        self.request_id = Some(request_id.to_string());
        self
    }

    pub fn not_found_error(entity: &str, field: &str, value: &str) -> Self {
        Self::new(
            "NOT_FOUND",
            &format!("{} with {}={} was not found", entity, field, value),
        )
        .with_details(json!({ "entity": entity, "field": field, "value": value }))
    }

    pub fn duplicate_error(entity: &str, field: &str, value: &str) -> Self {
        Self::new(
            "DUPLICATE_ENTRY",
            &format!("{} with {}='{}' already exists", entity, field, value),
        )
        .with_details(json!({ "entity": entity, "field": field, "value": value }))
    }

    pub fn validation_error(field: &str, reason: &str) -> Self {
        Self::new("VALIDATION_ERROR", &format!("Invalid {}: {}", field, reason))
            .with_details(json!({ "field": field, "reason": reason }))
    }

    /// One `{field, message}` entry per failed rule under `details.errors`.
    pub fn validation_errors(errors: &[ValidationFieldError]) -> Self {
        Self::new("VALIDATION_ERROR", "Request validation failed")
            .with_details(json!({ "errors": errors }))
    }
}
