use utoipa::OpenApi;

pub const RAQUETA_TAG: &str = "Raquetas";
pub const HEALTH_TAG: &str = "Health";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Raquetas",
        description = "CRUD API for the tennis racket catalogue",
    ),
    components(
        schemas(
            crate::api::dto::ErrorResponse,
            crate::error::ValidationFieldError,
        )
    ),
    tags(
        (name = RAQUETA_TAG, description = "Racket catalogue endpoints"),
        (name = HEALTH_TAG, description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;
