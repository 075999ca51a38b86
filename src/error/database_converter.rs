use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

use crate::error::{AppError, ConstraintParser};

/// Maps Diesel errors onto structured `AppError` variants.
pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    /// Converts a Diesel error raised while running `operation`.
    pub fn convert_diesel_error(error: DieselError, operation: &str) -> AppError {
        match error {
            DieselError::DatabaseError(kind, info) => {
                Self::convert_database_error(kind, info.as_ref(), operation)
            }
            DieselError::NotFound => AppError::NotFound {
                entity: "resource".to_string(),
                field: "id".to_string(),
                value: "unknown".to_string(),
            },
            other => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::from(other),
            },
        }
    }

    fn convert_database_error(
        kind: DatabaseErrorKind,
        info: &(dyn DatabaseErrorInformation + Send + Sync),
        operation: &str,
    ) -> AppError {
        let message = info.message();
        let details = info.details();
        let constraint = info.constraint_name();

        let parsed = match kind {
            DatabaseErrorKind::UniqueViolation => {
                ConstraintParser::parse_unique_violation(message, details, constraint).map(
                    |(entity, field, value)| AppError::Duplicate {
                        entity,
                        field,
                        value,
                    },
                )
            }
            DatabaseErrorKind::ForeignKeyViolation => {
                ConstraintParser::parse_foreign_key_violation(message, details, constraint).map(
                    |(entity, field, value)| AppError::Validation {
                        field,
                        reason: format!("Invalid reference from {} with value '{}'", entity, value),
                    },
                )
            }
            DatabaseErrorKind::NotNullViolation => ConstraintParser::parse_not_null_violation(
                message,
            )
            .map(|(entity, field)| AppError::Validation {
                field,
                reason: format!("Field is required for {}", entity),
            }),
            DatabaseErrorKind::CheckViolation => {
                ConstraintParser::parse_check_violation(message, constraint).map(
                    |(entity, field)| AppError::Validation {
                        field,
                        reason: format!("Check constraint failed for {}", entity),
                    },
                )
            }
            _ => None,
        };

        parsed.unwrap_or_else(|| AppError::Database {
            operation: operation.to_string(),
            source: anyhow::Error::msg(format!("{:?}: {}", kind, message)),
        })
    }
}
