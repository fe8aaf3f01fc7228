//! Repository layer for data access operations.
//!
//! `RaquetaRepository` is the single ownership point for racket records.
//! Two backends implement it: an in-memory table and a PostgreSQL adapter.

mod memory_repo;
mod raqueta_repo;

pub use memory_repo::InMemoryRaquetaRepository;
pub use raqueta_repo::PgRaquetaRepository;

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::db::AsyncDbPool;
use crate::error::AppResult;
use crate::models::{Raqueta, RaquetaChanges};

/// Storage contract for racket records.
///
/// Lookups report absence as `None` rather than an error. The only
/// "not found" error is raised by [`RaquetaRepository::update`].
#[async_trait]
pub trait RaquetaRepository: Send + Sync {
    /// Returns every stored racket ordered by id.
    async fn find_all(&self) -> AppResult<Vec<Raqueta>>;

    /// Finds a racket by its internal id.
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Raqueta>>;

    /// Finds the first racket carrying the given external id.
    async fn find_by_external_id(&self, external_id: Uuid) -> AppResult<Option<Raqueta>>;

    /// Checks whether a racket with the given id is stored.
    async fn exists_by_id(&self, id: i64) -> AppResult<bool>;

    /// Returns rackets whose brand contains `brand`, ignoring case.
    ///
    /// An empty filter matches every racket.
    async fn find_all_by_brand(&self, brand: &str) -> AppResult<Vec<Raqueta>>;

    /// Upsert: updates when `raqueta.id` is stored, creates otherwise.
    ///
    /// An update only changes `model`, `price`, `image_ref` and
    /// `updated_at`; identity, brand and `created_at` always come from the
    /// stored record.
    async fn save(&self, raqueta: Raqueta) -> AppResult<Raqueta>;

    /// Applies `changes` to the racket with the given id.
    ///
    /// # Errors
    /// `AppError::NotFound` when no racket has that id.
    async fn update(&self, id: i64, changes: RaquetaChanges) -> AppResult<Raqueta>;

    /// Removes the racket with the given id. Missing ids are a no-op.
    async fn delete_by_id(&self, id: i64) -> AppResult<()>;

    /// Removes the given racket by its id.
    async fn delete(&self, raqueta: &Raqueta) -> AppResult<()> {
        self.delete_by_id(raqueta.id).await
    }

    /// Number of stored rackets.
    async fn count(&self) -> AppResult<u64>;

    /// Removes every racket.
    async fn delete_all(&self) -> AppResult<()>;
}

/// Aggregates all repositories for convenient access.
///
/// Backends are shared behind `Arc`, so cloning is cheap.
#[derive(Clone)]
pub struct Repositories {
    pub raquetas: Arc<dyn RaquetaRepository>,
}

impl Repositories {
    /// Creates repositories backed by the PostgreSQL connection pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self {
            raquetas: Arc::new(PgRaquetaRepository::new(pool)),
        }
    }

    /// Creates repositories backed by an empty in-memory store.
    pub fn in_memory() -> Self {
        Self {
            raquetas: Arc::new(InMemoryRaquetaRepository::new()),
        }
    }
}
