//! Racket service for business logic operations.

use std::sync::Arc;

use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{Raqueta, demo_raquetas};
use crate::repositories::RaquetaRepository;

/// Racket service wrapping a `RaquetaRepository` backend.
#[derive(Clone)]
pub struct RaquetaService {
    repo: Arc<dyn RaquetaRepository>,
}

impl RaquetaService {
    /// Creates a new RaquetaService with the given repository.
    pub fn new(repo: Arc<dyn RaquetaRepository>) -> Self {
        Self { repo }
    }

    /// Lists every racket ordered by id.
    pub async fn find_all(&self) -> AppResult<Vec<Raqueta>> {
        tracing::info!("Finding all raquetas");
        self.repo.find_all().await
    }

    /// Gets a racket by id.
    ///
    /// # Returns
    /// The racket if found, or `NotFound` error
    pub async fn find_by_id(&self, id: i64) -> AppResult<Raqueta> {
        tracing::info!(id, "Finding raqueta by id");
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::raqueta_not_found("id", id))
    }

    /// Lists rackets whose brand contains `brand`, ignoring case.
    pub async fn find_all_by_brand(&self, brand: &str) -> AppResult<Vec<Raqueta>> {
        tracing::info!(brand, "Finding raquetas by brand");
        self.repo.find_all_by_brand(brand).await
    }

    /// Gets a racket by its external id.
    ///
    /// # Returns
    /// The racket if found, or `NotFound` error
    pub async fn find_by_external_id(&self, external_id: Uuid) -> AppResult<Raqueta> {
        tracing::info!(%external_id, "Finding raqueta by external id");
        self.repo
            .find_by_external_id(external_id)
            .await?
            .ok_or_else(|| AppError::raqueta_not_found("external_id", external_id))
    }

    /// Creates a racket, or updates it when `raqueta.id` is already stored.
    pub async fn save(&self, raqueta: Raqueta) -> AppResult<Raqueta> {
        tracing::info!(brand = %raqueta.brand, model = %raqueta.model, "Saving raqueta");
        self.repo.save(raqueta).await
    }

    /// Updates the mutable fields of the racket with the given id.
    ///
    /// Only `model`, `price` and `image_ref` are taken from `raqueta`.
    ///
    /// # Returns
    /// The updated racket, or `NotFound` error
    pub async fn update(&self, id: i64, raqueta: Raqueta) -> AppResult<Raqueta> {
        tracing::info!(id, "Updating raqueta");
        self.repo.update(id, raqueta.changes()).await
    }

    /// Deletes the racket with the given id.
    ///
    /// # Returns
    /// `NotFound` error when no racket has that id
    pub async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        tracing::info!(id, "Deleting raqueta");
        if !self.repo.exists_by_id(id).await? {
            return Err(AppError::raqueta_not_found("id", id));
        }
        self.repo.delete_by_id(id).await
    }

    /// Number of stored rackets.
    pub async fn count(&self) -> AppResult<u64> {
        self.repo.count().await
    }

    /// Inserts the demo catalogue when the store is empty.
    ///
    /// # Returns
    /// How many rackets were inserted (0 when data already existed)
    pub async fn seed_demo_data(&self) -> AppResult<usize> {
        let existing = self.repo.count().await?;
        if existing > 0 {
            tracing::info!(existing, "Store not empty, skipping demo data");
            return Ok(0);
        }

        let demo = demo_raquetas();
        let total = demo.len();
        for raqueta in demo {
            self.repo.save(raqueta).await?;
        }
        tracing::info!(inserted = total, "Demo raquetas seeded");
        Ok(total)
    }
}
