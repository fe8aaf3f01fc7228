//! In-memory racket repository.
//!
//! Records live in a `BTreeMap` keyed by id behind a single `RwLock`.
//! Every mutation holds the write lock for its whole duration, so id
//! allocation and field updates are never observed half-done.

use std::collections::BTreeMap;

use async_trait::async_trait;
use jiff::Timestamp;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::RaquetaRepository;
use crate::error::{AppError, AppResult};
use crate::models::{Raqueta, RaquetaChanges};

/// Racket repository holding records in process memory.
#[derive(Debug, Default)]
pub struct InMemoryRaquetaRepository {
    raquetas: RwLock<BTreeMap<i64, Raqueta>>,
}

impl InMemoryRaquetaRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Next id is `max(stored ids) + 1`, or 1 for an empty store.
    ///
    /// Deleting the highest id makes it available again.
    fn next_id(raquetas: &BTreeMap<i64, Raqueta>) -> i64 {
        raquetas.keys().next_back().copied().unwrap_or(0) + 1
    }

    fn create(raquetas: &mut BTreeMap<i64, Raqueta>, raqueta: Raqueta) -> Raqueta {
        let id = Self::next_id(raquetas);
        let now = Timestamp::now();
        let created = Raqueta {
            id,
            external_id: Uuid::new_v4(),
            brand: raqueta.brand,
            model: raqueta.model,
            price: raqueta.price,
            image_ref: raqueta.image_ref,
            created_at: now,
            updated_at: now,
            deleted: false,
        };
        raquetas.insert(id, created.clone());
        tracing::debug!(id, external_id = %created.external_id, "Raqueta created");
        created
    }

    fn apply_update(
        raquetas: &mut BTreeMap<i64, Raqueta>,
        id: i64,
        changes: RaquetaChanges,
    ) -> AppResult<Raqueta> {
        let stored = raquetas
            .get_mut(&id)
            .ok_or_else(|| AppError::raqueta_not_found("id", id))?;
        // never move updated_at backwards if the wall clock does
        let now = Timestamp::now().max(stored.updated_at);
        stored.apply(changes, now);
        tracing::debug!(id, "Raqueta updated");
        Ok(stored.clone())
    }
}

#[async_trait]
impl RaquetaRepository for InMemoryRaquetaRepository {
    async fn find_all(&self) -> AppResult<Vec<Raqueta>> {
        let raquetas = self.raquetas.read().await;
        Ok(raquetas.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Raqueta>> {
        let raquetas = self.raquetas.read().await;
        Ok(raquetas.get(&id).cloned())
    }

    async fn find_by_external_id(&self, external_id: Uuid) -> AppResult<Option<Raqueta>> {
        let raquetas = self.raquetas.read().await;
        Ok(raquetas
            .values()
            .find(|r| r.external_id == external_id)
            .cloned())
    }

    async fn exists_by_id(&self, id: i64) -> AppResult<bool> {
        let raquetas = self.raquetas.read().await;
        Ok(raquetas.contains_key(&id))
    }

    async fn find_all_by_brand(&self, brand: &str) -> AppResult<Vec<Raqueta>> {
        let needle = brand.to_lowercase();
        let raquetas = self.raquetas.read().await;
        Ok(raquetas
            .values()
            .filter(|r| r.brand.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn save(&self, raqueta: Raqueta) -> AppResult<Raqueta> {
        let mut raquetas = self.raquetas.write().await;
        if raquetas.contains_key(&raqueta.id) {
            let changes = raqueta.changes();
            Self::apply_update(&mut raquetas, raqueta.id, changes)
        } else {
            Ok(Self::create(&mut raquetas, raqueta))
        }
    }

    async fn update(&self, id: i64, changes: RaquetaChanges) -> AppResult<Raqueta> {
        let mut raquetas = self.raquetas.write().await;
        Self::apply_update(&mut raquetas, id, changes)
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        let mut raquetas = self.raquetas.write().await;
        if raquetas.remove(&id).is_some() {
            tracing::debug!(id, "Raqueta deleted");
        }
        Ok(())
    }

    async fn count(&self) -> AppResult<u64> {
        let raquetas = self.raquetas.read().await;
        Ok(raquetas.len() as u64)
    }

    async fn delete_all(&self) -> AppResult<()> {
        let mut raquetas = self.raquetas.write().await;
        raquetas.clear();
        Ok(())
    }
}
