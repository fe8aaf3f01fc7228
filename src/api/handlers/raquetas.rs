//! Racket API handlers.
//!
//! Thin bindings from HTTP verbs to `RaquetaService`; status codes are the
//! only decisions made here.

use crate::api::doc::RAQUETA_TAG;
use crate::api::dto::{BrandQuery, ErrorResponse, RaquetaRequest, RaquetaResponse};
use crate::api::mapper::RaquetaMapper;
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use uuid::Uuid;

/// Creates racket routes.
///
/// Routes:
/// - GET /                     - List rackets, optionally filtered by brand
/// - POST /                    - Create racket
/// - GET /{id}                 - Get racket by id
/// - PUT /{id}                 - Update racket
/// - DELETE /{id}              - Delete racket
/// - GET /find/{external_id}   - Get racket by external UUID
pub fn raqueta_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_raquetas, create_raqueta))
        .routes(routes!(get_raqueta, update_raqueta, delete_raqueta))
        .routes(routes!(find_by_external_id))
}

/// GET /api/raquetas - List rackets
///
/// With `brand`, returns only rackets whose brand contains it,
/// ignoring case. Ordered by id.
#[utoipa::path(
    get,
    path = "",
    tag = RAQUETA_TAG,
    params(BrandQuery),
    responses(
        (status = 200, description = "List of rackets", body = Vec<RaquetaResponse>)
    )
)]
async fn list_raquetas(
    State(state): State<AppState>,
    Query(query): Query<BrandQuery>,
) -> AppResult<Json<Vec<RaquetaResponse>>> {
    let raquetas = match query.brand {
        Some(brand) => state.services.raquetas.find_all_by_brand(&brand).await?,
        None => state.services.raquetas.find_all().await?,
    };
    Ok(Json(RaquetaMapper::to_response_list(raquetas)))
}

/// GET /api/raquetas/{id} - Get racket by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = RAQUETA_TAG,
    params(
        ("id" = i64, Path, description = "Racket id")
    ),
    responses(
        (status = 200, description = "Racket found", body = RaquetaResponse),
        (status = 404, description = "Racket not found", body = ErrorResponse)
    )
)]
async fn get_raqueta(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<RaquetaResponse>> {
    let raqueta = state.services.raquetas.find_by_id(id).await?;
    Ok(Json(RaquetaMapper::to_response(raqueta)))
}

/// GET /api/raquetas/find/{external_id} - Get racket by external UUID
#[utoipa::path(
    get,
    path = "/find/{external_id}",
    tag = RAQUETA_TAG,
    params(
        ("external_id" = Uuid, Path, description = "Client-facing racket UUID")
    ),
    responses(
        (status = 200, description = "Racket found", body = RaquetaResponse),
        (status = 400, description = "Not a valid UUID", body = ErrorResponse),
        (status = 404, description = "Racket not found", body = ErrorResponse)
    )
)]
async fn find_by_external_id(
    State(state): State<AppState>,
    Path(external_id): Path<Uuid>,
) -> AppResult<Json<RaquetaResponse>> {
    let raqueta = state
        .services
        .raquetas
        .find_by_external_id(external_id)
        .await?;
    Ok(Json(RaquetaMapper::to_response(raqueta)))
}

/// POST /api/raquetas - Create racket
#[utoipa::path(
    post,
    path = "",
    tag = RAQUETA_TAG,
    request_body = RaquetaRequest,
    responses(
        (status = 201, description = "Racket created", body = RaquetaResponse),
        (status = 400, description = "Validation failed", body = ErrorResponse)
    )
)]
async fn create_raqueta(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RaquetaRequest>,
) -> AppResult<(StatusCode, Json<RaquetaResponse>)> {
    let raqueta = state
        .services
        .raquetas
        .save(RaquetaMapper::to_model(payload))
        .await?;
    Ok((StatusCode::CREATED, Json(RaquetaMapper::to_response(raqueta))))
}

/// PUT /api/raquetas/{id} - Update racket
///
/// Only `model`, `price` and `image_ref` are applied; `brand` must still
/// pass validation but is ignored.
#[utoipa::path(
    put,
    path = "/{id}",
    tag = RAQUETA_TAG,
    params(
        ("id" = i64, Path, description = "Racket id")
    ),
    request_body = RaquetaRequest,
    responses(
        (status = 200, description = "Racket updated", body = RaquetaResponse),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 404, description = "Racket not found", body = ErrorResponse)
    )
)]
async fn update_raqueta(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<RaquetaRequest>,
) -> AppResult<Json<RaquetaResponse>> {
    let raqueta = state
        .services
        .raquetas
        .update(id, RaquetaMapper::to_model(payload))
        .await?;
    Ok(Json(RaquetaMapper::to_response(raqueta)))
}

/// DELETE /api/raquetas/{id} - Delete racket
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = RAQUETA_TAG,
    params(
        ("id" = i64, Path, description = "Racket id")
    ),
    responses(
        (status = 204, description = "Racket deleted"),
        (status = 404, description = "Racket not found", body = ErrorResponse)
    )
)]
async fn delete_raqueta(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    state.services.raquetas.delete_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
