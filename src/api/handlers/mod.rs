//! HTTP request handlers, one module per resource.

pub mod admin;
pub mod categories;
pub mod health;
pub mod services;
pub mod tasks;

use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Parses a path id. A value that is not a UUID cannot name an existing row,
/// so it is reported as not found rather than as a malformed request.
pub(crate) fn parse_path_id(entity: &str, raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound {
        entity: entity.to_string(),
        field: "id".to_string(),
        value: raw.to_string(),
    })
}
