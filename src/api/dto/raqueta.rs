//! Racket DTOs for API requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

// ============================================================================
// Request DTOs
// ============================================================================

/// Request body for creating or updating a racket.
///
/// Missing `brand`, `model` or `price` are reported as validation errors
/// rather than JSON parse failures. On update `brand` is validated but
/// never applied.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, Validate)]
pub struct RaquetaRequest {
    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "Brand must not be blank"),
        length(max = 255, message = "Brand must be at most 255 characters")
    )]
    #[schema(example = "Wilson", min_length = 1, max_length = 255)]
    pub brand: String,

    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "Model must not be blank"),
        length(max = 255, message = "Model must be at most 255 characters")
    )]
    #[schema(example = "Pro Staff", min_length = 1, max_length = 255)]
    pub model: String,

    #[validate(
        required(message = "Price is required"),
        range(min = 0.0, message = "Price must be greater than or equal to 0")
    )]
    #[schema(value_type = f64, minimum = 0.0, example = 199.99)]
    pub price: Option<f64>,

    #[serde(default)]
    #[schema(example = "https://img.example.com/pro-staff.png")]
    pub image_ref: Option<String>,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Query parameters for listing rackets.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct BrandQuery {
    /// Case-insensitive substring of the brand; omit to list everything
    #[param(example = "wil")]
    pub brand: Option<String>,
}

// ============================================================================
// Response DTOs
// ============================================================================

/// Response body for racket data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RaquetaResponse {
    #[schema(example = 1)]
    pub id: i64,
    pub external_id: Uuid,
    #[schema(example = "Wilson")]
    pub brand: String,
    #[schema(example = "Pro Staff")]
    pub model: String,
    #[schema(example = 199.99)]
    pub price: f64,
    pub image_ref: Option<String>,
    /// RFC 3339 timestamp
    #[schema(value_type = String, format = DateTime, example = "2024-01-01T12:00:00Z")]
    pub created_at: String,
    /// RFC 3339 timestamp
    #[schema(value_type = String, format = DateTime, example = "2024-01-01T12:00:00Z")]
    pub updated_at: String,
}
