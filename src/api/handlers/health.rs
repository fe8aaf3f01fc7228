//! Health check endpoint handlers.
//!
//! Used by load balancers and orchestrators. The storage check goes
//! through the racket service so both backends are covered; with the
//! PostgreSQL backend the pool is probed directly as well.

use crate::api::doc::HEALTH_TAG;
use crate::api::dto::{ComponentHealth, HealthResponse, HealthStatus};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::Json};
use std::collections::HashMap;
use std::time::Instant;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Creates health check routes.
///
/// # Routes
/// - `GET /health` - Detailed health check
/// - `GET /health/ready` - Readiness probe
/// - `GET /health/live` - Liveness probe
pub fn health_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(health_check))
        .routes(routes!(readiness_check))
        .routes(routes!(liveness_check))
}

/// Detailed health check.
///
/// Returns 200 while every component is healthy or degraded and 503 with
/// the same body once any component is unhealthy.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Service is unhealthy", body = HealthResponse)
    ),
    tag = HEALTH_TAG
)]
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let mut checks = HashMap::new();
    checks.insert("storage".to_string(), check_storage(&state).await);
    if state.db_pool.is_some() {
        checks.insert("database".to_string(), check_database(&state).await);
    }

    let response = HealthResponse::from_checks(
        crate::pkg_version(),
        jiff::Timestamp::now().to_string(),
        checks,
    );

    let status = match response.status {
        HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };
    (status, Json(response))
}

/// Readiness probe: 200 when storage answers, 503 otherwise.
#[utoipa::path(
    get,
    path = "/health/ready",
    responses(
        (status = 200, description = "Service is ready"),
        (status = 503, description = "Service is not ready")
    ),
    tag = HEALTH_TAG
)]
pub async fn readiness_check(State(state): State<AppState>) -> StatusCode {
    match check_storage(&state).await.status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Degraded | HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Liveness probe: answering at all means the process is alive.
#[utoipa::path(
    get,
    path = "/health/live",
    responses(
        (status = 200, description = "Service is alive")
    ),
    tag = HEALTH_TAG
)]
pub async fn liveness_check() -> StatusCode {
    StatusCode::OK
}

async fn check_storage(state: &AppState) -> ComponentHealth {
    let start_time = Instant::now();

    match state.services.raquetas.count().await {
        Ok(count) => ComponentHealth::healthy(
            format!("{} rackets stored", count),
            start_time.elapsed().as_millis() as u64,
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Storage health check failed");
            ComponentHealth::unhealthy(
                "Storage unavailable",
                start_time.elapsed().as_millis() as u64,
            )
        }
    }
}

/// Probes the connection pool with `SELECT 1`.
async fn check_database(state: &AppState) -> ComponentHealth {
    use diesel_async::RunQueryDsl;

    let start_time = Instant::now();
    let Some(pool) = state.db_pool.as_ref() else {
        return ComponentHealth::unhealthy("No connection pool configured", 0);
    };

    let result = match pool.get().await {
        Ok(mut conn) => diesel::sql_query("SELECT 1")
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|e| format!("Query failed: {}", e)),
        Err(e) => Err(format!("Connection failed: {}", e)),
    };

    let elapsed = start_time.elapsed().as_millis() as u64;
    match result {
        Ok(()) => ComponentHealth::healthy("Connected", elapsed),
        Err(message) => {
            tracing::warn!(error = %message, "Database health check failed");
            ComponentHealth::unhealthy(message, elapsed)
        }
    }
}
