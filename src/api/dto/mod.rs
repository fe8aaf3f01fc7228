//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by domain:
//! - `raqueta` - Racket request/response DTOs
//! - `health` - Health check DTOs
//! - `error` - Common error response DTOs

mod error;
mod health;
mod raqueta;

pub use error::ErrorResponse;
pub use health::{ComponentHealth, HealthResponse, HealthStatus};
pub use raqueta::{BrandQuery, RaquetaRequest, RaquetaResponse};
