//! Application state for Axum web framework.
//!
//! Contains shared services and resources that are accessible
//! across all request handlers.

use crate::db::AsyncDbPool;
use crate::repositories::Repositories;
use crate::services::Services;

/// Application state containing all shared services and resources.
///
/// Cloning is cheap since services and the pool use Arc internally.
#[derive(Clone)]
pub struct AppState {
    /// All business logic services
    pub services: Services,
    /// Connection pool, present only with the PostgreSQL backend
    pub db_pool: Option<AsyncDbPool>,
}

impl AppState {
    /// Creates state backed by PostgreSQL through the given pool.
    ///
    /// # Example
    /// ```ignore
    /// let pool = establish_async_connection_pool(&settings.database).await?;
    /// let state = AppState::new(pool);
    /// ```
    pub fn new(pool: AsyncDbPool) -> Self {
        let repos = Repositories::new(pool.clone());
        Self {
            services: Services::new(repos),
            db_pool: Some(pool),
        }
    }

    /// Creates state backed by an empty in-memory store.
    pub fn in_memory() -> Self {
        Self {
            services: Services::new(Repositories::in_memory()),
            db_pool: None,
        }
    }
}
