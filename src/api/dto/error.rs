//! Error response DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ValidationFieldError;

/// Standard error response format.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "code": "VALIDATION_ERROR",
    "message": "Request validation failed",
    "errors": [
        { "field": "price", "message": "Price must be greater than or equal to 0" }
    ]
}))]
pub struct ErrorResponse {
    /// Machine readable error code
    #[schema(example = "NOT_FOUND")]
    pub code: String,
    /// Human readable description
    pub message: String,
    /// Field-level failures, only present for validation errors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ValidationFieldError>>,
}

impl ErrorResponse {
    /// Creates a new error response with code and message.
    pub fn new(code: &str, message: &str) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            errors: None,
        }
    }

    pub fn not_found_error(entity: &str, field: &str, value: &str) -> Self {
        Self::new(
            "NOT_FOUND",
            &format!("{} with {} {} not found", capitalize(entity), field, value),
        )
    }

    pub fn duplicate_error(entity: &str, field: &str, value: &str) -> Self {
        Self::new(
            "DUPLICATE_ENTRY",
            &format!("{} with {} '{}' already exists", capitalize(entity), field, value),
        )
    }

    /// Single-field validation failure.
    pub fn validation_error(field: &str, reason: &str) -> Self {
        Self::validation_errors(vec![ValidationFieldError {
            field: field.to_string(),
            message: reason.to_string(),
        }])
    }

    /// Validation failure carrying every offending field.
    pub fn validation_errors(errors: Vec<ValidationFieldError>) -> Self {
        Self {
            code: "VALIDATION_ERROR".to_string(),
            message: "Request validation failed".to_string(),
            errors: Some(errors),
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let response = ErrorResponse::not_found_error("raqueta", "id", "42");
        assert_eq!(response.code, "NOT_FOUND");
        assert_eq!(response.message, "Raqueta with id 42 not found");
        assert!(response.errors.is_none());
    }

    #[test]
    fn test_errors_omitted_when_absent() {
        let json = serde_json::to_value(ErrorResponse::new("BAD_REQUEST", "nope")).unwrap();
        assert!(json.get("errors").is_none());
    }

    #[test]
    fn test_validation_error_lists_field() {
        let response = ErrorResponse::validation_error("brand", "Brand must not be blank");
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["errors"][0]["field"], "brand");
        assert_eq!(json["errors"][0]["message"], "Brand must not be blank");
    }
}
