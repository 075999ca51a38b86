//! Task DTOs.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{AppError, AppResult, ValidationFieldError};

const FIELD: &str = "sub_sub_category_id";
const INVALID_TYPE: &str = "task.service_id.invalid_type_error";

/// Body of `POST /tasks/{task_id}/sub-sub-category`.
///
/// A missing field and a non-string value both read as `None`, so the
/// `required` rule reports them with the same message.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateTaskSubSubCategoryRequest {
    #[serde(default, deserialize_with = "string_or_none")]
    #[validate(required(message = "task.service_id.invalid_type_error"))]
    #[schema(value_type = String, example = "0b8e1c1e-4f39-4c4e-9f55-2f1b8c3f6a10")]
    pub sub_sub_category_id: Option<String>,
}

impl UpdateTaskSubSubCategoryRequest {
    /// The target id, or the same field error the `required` rule reports.
    pub fn into_id(self) -> AppResult<String> {
        self.sub_sub_category_id
            .ok_or_else(|| AppError::ValidationErrors {
                errors: vec![ValidationFieldError {
                    field: FIELD.to_string(),
                    message: INVALID_TYPE.to_string(),
                }],
            })
    }
}

fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(value) => Some(value),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> UpdateTaskSubSubCategoryRequest {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_string_value_is_kept() {
        let request = parse(r#"{"sub_sub_category_id":"abc"}"#);
        assert_eq!(request.sub_sub_category_id.as_deref(), Some("abc"));
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_missing_and_non_string_values_fail_validation() {
        for body in [
            r#"{}"#,
            r#"{"sub_sub_category_id":null}"#,
            r#"{"sub_sub_category_id":42}"#,
            r#"{"sub_sub_category_id":["a"]}"#,
        ] {
            let request = parse(body);
            assert_eq!(request.sub_sub_category_id, None, "body: {body}");
            let errors = request.validate().unwrap_err();
            let field = &errors.field_errors()["sub_sub_category_id"][0];
            assert_eq!(field.message.as_deref(), Some(INVALID_TYPE));
        }
    }

    #[test]
    fn test_into_id_returns_value_or_field_error() {
        assert_eq!(
            parse(r#"{"sub_sub_category_id":"abc"}"#).into_id().unwrap(),
            "abc"
        );

        match parse(r#"{}"#).into_id() {
            Err(AppError::ValidationErrors { errors }) => assert_eq!(
                errors,
                vec![ValidationFieldError {
                    field: FIELD.to_string(),
                    message: INVALID_TYPE.to_string(),
                }]
            ),
            other => panic!("Expected ValidationErrors, got {other:?}"),
        }
    }
}
