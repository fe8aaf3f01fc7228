//! Router configuration for the API.
//!
//! This module provides centralized route registration and middleware
//! configuration for the application.

use axum::{Router, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::doc::ApiDoc;
use crate::api::handlers;
use crate::api::middleware::{global_error_handler, logging_middleware, request_id_middleware};
use crate::state::AppState;

/// Path the generated OpenAPI document is served from.
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

/// Path of the Swagger UI.
pub const SWAGGER_UI_PATH: &str = "/swagger-ui";

/// Creates the main application router with all routes and middleware.
///
/// # Middleware Order
/// Layers run outermost first:
/// 1. Request ID - generates/propagates `x-request-id`
/// 2. Logging - logs request and response with the request id
/// 3. Compression - encodes the final body, including rewritten errors
/// 4. Global error handler - turns non-JSON error bodies into `ErrorResponse`
/// 5. CORS
///
/// # Routes
/// - `/api/raquetas` - Racket CRUD operations
/// - `/health`, `/health/live`, `/health/ready` - Health probes
/// - `/swagger-ui`, `/api-docs/openapi.json` - API documentation
pub fn create_router(state: AppState) -> Router {
    let (router, api) = api_router().split_for_parts();

    router
        .merge(SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_JSON_PATH, api))
        // last added runs first
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(global_error_handler))
        .layer(CompressionLayer::new())
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}

fn api_router() -> OpenApiRouter<AppState> {
    OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest("/api/raquetas", handlers::raquetas::raqueta_routes())
        .merge(handlers::health::health_routes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn openapi() -> utoipa::openapi::OpenApi {
        api_router().split_for_parts().1
    }

    #[test]
    fn test_openapi_lists_every_endpoint() {
        let api = openapi();
        let paths: Vec<&String> = api.paths.paths.keys().collect();

        for expected in [
            "/api/raquetas",
            "/api/raquetas/{id}",
            "/api/raquetas/find/{external_id}",
            "/health",
            "/health/live",
            "/health/ready",
        ] {
            assert!(
                api.paths.paths.contains_key(expected),
                "missing {} in {:?}",
                expected,
                paths
            );
        }
    }

    #[test]
    fn test_openapi_registers_dto_schemas() {
        let api = openapi();
        let schemas = api.components.unwrap().schemas;
        for name in ["RaquetaRequest", "RaquetaResponse", "ErrorResponse", "HealthResponse"] {
            assert!(schemas.contains_key(name), "missing schema {}", name);
        }
    }

    #[test]
    fn test_create_router_builds() {
        let _router = create_router(AppState::in_memory());
    }
}
