//! Outcome type at the use-case boundary.

use thiserror::Error;

use crate::error::AppError;

/// Failure side of every use case.
///
/// The first three variants are domain outcomes that handlers classify into
/// HTTP responses; `Infrastructure` carries anything the storage layer raised.
#[derive(Error, Debug)]
pub enum UseCaseError {
    #[error("{entity} with {field}={value} was not found")]
    ResourceNotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    /// `message` is already localized for the caller's language.
    #[error("{message}")]
    NotAllowed { message: String },

    #[error("{entity} with {field}={value} already exists")]
    ResourceAlreadyExists {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error(transparent)]
    Infrastructure(#[from] AppError),
}

impl UseCaseError {
    pub fn not_found(entity: &'static str, field: &'static str, value: impl ToString) -> Self {
        Self::ResourceNotFound {
            entity,
            field,
            value: value.to_string(),
        }
    }
}

impl From<UseCaseError> for AppError {
    fn from(error: UseCaseError) -> Self {
        match error {
            UseCaseError::ResourceNotFound {
                entity,
                field,
                value,
            } => AppError::NotFound {
                entity: entity.to_string(),
                field: field.to_string(),
                value,
            },
            UseCaseError::NotAllowed { message } => AppError::BadRequest { message },
            UseCaseError::ResourceAlreadyExists {
                entity,
                field,
                value,
            } => AppError::Duplicate {
                entity: entity.to_string(),
                field: field.to_string(),
                value,
            },
            UseCaseError::Infrastructure(inner) => inner,
        }
    }
}

pub type UseCaseResult<T> = Result<T, UseCaseError>;
