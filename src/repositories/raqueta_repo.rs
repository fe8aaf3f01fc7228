//! Racket repository for async database operations.
//!
//! Provides CRUD operations for the raquetas table using diesel_async.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use jiff::Timestamp;
use uuid::Uuid;

use super::RaquetaRepository;
use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{NewRaquetaRow, Raqueta, RaquetaChanges, RaquetaChangeset, RaquetaRow};

/// Racket repository holding an async connection pool.
///
/// `AsyncDbPool` is reference counted internally, so cloning is cheap.
#[derive(Clone)]
pub struct PgRaquetaRepository {
    pool: AsyncDbPool,
}

impl PgRaquetaRepository {
    /// Creates a new PgRaquetaRepository with the given connection pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Inserts a new row; the database assigns the id.
    async fn insert(&self, raqueta: Raqueta) -> AppResult<Raqueta> {
        use crate::schema::raquetas::dsl::*;
        let mut conn = self.pool.get().await?;

        let row = NewRaquetaRow::from_unsaved(raqueta, Uuid::new_v4(), Timestamp::now());
        let created = diesel::insert_into(raquetas)
            .values(&row)
            .returning(RaquetaRow::as_returning())
            .get_result(&mut conn)
            .await?;

        tracing::debug!(id = created.id, external_id = %created.external_id, "Raqueta created");
        Ok(created.into())
    }

    /// Updates the mutable columns of an existing row, returning `None` if absent.
    async fn try_update(
        &self,
        raqueta_id: i64,
        changes: RaquetaChanges,
    ) -> AppResult<Option<Raqueta>> {
        use crate::schema::raquetas::dsl::*;
        let mut conn = self.pool.get().await?;

        let changeset = RaquetaChangeset::new(changes, Timestamp::now());
        let updated = diesel::update(raquetas.filter(id.eq(raqueta_id)))
            .set(&changeset)
            .returning(RaquetaRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()?;

        if updated.is_some() {
            tracing::debug!(id = raqueta_id, "Raqueta updated");
        }
        Ok(updated.map(Raqueta::from))
    }
}

/// Escapes LIKE wildcards so the brand filter is a plain substring match.
fn like_pattern(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len() + 2);
    escaped.push('%');
    for c in fragment.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

#[async_trait]
impl RaquetaRepository for PgRaquetaRepository {
    async fn find_all(&self) -> AppResult<Vec<Raqueta>> {
        use crate::schema::raquetas::dsl::*;
        let mut conn = self.pool.get().await?;

        let rows = raquetas
            .order(id.asc())
            .select(RaquetaRow::as_select())
            .load(&mut conn)
            .await?;
        Ok(rows.into_iter().map(Raqueta::from).collect())
    }

    async fn find_by_id(&self, raqueta_id: i64) -> AppResult<Option<Raqueta>> {
        use crate::schema::raquetas::dsl::*;
        let mut conn = self.pool.get().await?;

        let row = raquetas
            .filter(id.eq(raqueta_id))
            .select(RaquetaRow::as_select())
            .first(&mut conn)
            .await
            .optional()?;
        Ok(row.map(Raqueta::from))
    }

    async fn find_by_external_id(&self, raqueta_external_id: Uuid) -> AppResult<Option<Raqueta>> {
        use crate::schema::raquetas::dsl::*;
        let mut conn = self.pool.get().await?;

        let row = raquetas
            .filter(external_id.eq(raqueta_external_id))
            .select(RaquetaRow::as_select())
            .first(&mut conn)
            .await
            .optional()?;
        Ok(row.map(Raqueta::from))
    }

    async fn exists_by_id(&self, raqueta_id: i64) -> AppResult<bool> {
        use crate::schema::raquetas::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::select(diesel::dsl::exists(raquetas.filter(id.eq(raqueta_id))))
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn find_all_by_brand(&self, fragment: &str) -> AppResult<Vec<Raqueta>> {
        use crate::schema::raquetas::dsl::*;
        let mut conn = self.pool.get().await?;

        let rows = raquetas
            .filter(brand.ilike(like_pattern(fragment)))
            .order(id.asc())
            .select(RaquetaRow::as_select())
            .load(&mut conn)
            .await?;
        Ok(rows.into_iter().map(Raqueta::from).collect())
    }

    async fn save(&self, raqueta: Raqueta) -> AppResult<Raqueta> {
        if raqueta.id > 0 {
            if let Some(updated) = self.try_update(raqueta.id, raqueta.changes()).await? {
                return Ok(updated);
            }
        }
        self.insert(raqueta).await
    }

    async fn update(&self, raqueta_id: i64, changes: RaquetaChanges) -> AppResult<Raqueta> {
        self.try_update(raqueta_id, changes)
            .await?
            .ok_or_else(|| AppError::raqueta_not_found("id", raqueta_id))
    }

    async fn delete_by_id(&self, raqueta_id: i64) -> AppResult<()> {
        use crate::schema::raquetas::dsl::*;
        let mut conn = self.pool.get().await?;

        let affected = diesel::delete(raquetas.filter(id.eq(raqueta_id)))
            .execute(&mut conn)
            .await?;
        if affected > 0 {
            tracing::debug!(id = raqueta_id, "Raqueta deleted");
        }
        Ok(())
    }

    async fn count(&self) -> AppResult<u64> {
        use crate::schema::raquetas::dsl::*;
        let mut conn = self.pool.get().await?;

        let total: i64 = raquetas.count().get_result(&mut conn).await?;
        Ok(total.max(0) as u64)
    }

    async fn delete_all(&self) -> AppResult<()> {
        use crate::schema::raquetas::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::delete(raquetas).execute(&mut conn).await?;
        Ok(())
    }
}
