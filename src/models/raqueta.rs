//! Racket models.
//!
//! `Raqueta` is the domain entity shared by every storage backend. The
//! `*Row` types are the diesel mappings used by the PostgreSQL repository.

use diesel::prelude::*;
use jiff::Timestamp;
use jiff_diesel::ToDiesel;
use uuid::Uuid;

// ============================================================================
// Domain Entity
// ============================================================================

/// A tennis racket record.
#[derive(Debug, Clone, PartialEq)]
pub struct Raqueta {
    pub id: i64,
    pub external_id: Uuid,
    pub brand: String,
    pub model: String,
    pub price: f64,
    pub image_ref: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted: bool,
}

impl Raqueta {
    /// Builds an unsaved racket carrying only client-settable fields.
    ///
    /// `id`, `external_id` and the timestamps are placeholders that the
    /// repository create path overwrites.
    pub fn unsaved(
        brand: impl Into<String>,
        model: impl Into<String>,
        price: f64,
        image_ref: Option<String>,
    ) -> Self {
        Self {
            id: 0,
            external_id: Uuid::nil(),
            brand: brand.into(),
            model: model.into(),
            price,
            image_ref,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
            deleted: false,
        }
    }

    /// Returns the mutable part of this racket as a change set.
    pub fn changes(&self) -> RaquetaChanges {
        RaquetaChanges {
            model: self.model.clone(),
            price: self.price,
            image_ref: self.image_ref.clone(),
        }
    }

    /// Applies a change set in place and refreshes `updated_at`.
    ///
    /// Only `model`, `price` and `image_ref` are touched.
    pub fn apply(&mut self, changes: RaquetaChanges, now: Timestamp) {
        self.model = changes.model;
        self.price = changes.price;
        self.image_ref = changes.image_ref;
        self.updated_at = now;
    }
}

/// Fields an update is allowed to modify.
#[derive(Debug, Clone, PartialEq)]
pub struct RaquetaChanges {
    pub model: String,
    pub price: f64,
    pub image_ref: Option<String>,
}

// ============================================================================
// Diesel Models (Query/Insert/Update)
// ============================================================================

/// Raqueta query model for SELECT operations
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::raquetas)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RaquetaRow {
    pub id: i64,
    pub external_id: Uuid,
    pub brand: String,
    pub model: String,
    pub price: f64,
    pub image_ref: Option<String>,
    pub created_at: jiff_diesel::Timestamp,
    pub updated_at: jiff_diesel::Timestamp,
    pub deleted: bool,
}

impl From<RaquetaRow> for Raqueta {
    fn from(row: RaquetaRow) -> Self {
        Self {
            id: row.id,
            external_id: row.external_id,
            brand: row.brand,
            model: row.model,
            price: row.price,
            image_ref: row.image_ref,
            created_at: row.created_at.to_jiff(),
            updated_at: row.updated_at.to_jiff(),
            deleted: row.deleted,
        }
    }
}

/// NewRaquetaRow insert model for INSERT operations
#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::raquetas)]
pub struct NewRaquetaRow {
    pub external_id: Uuid,
    pub brand: String,
    pub model: String,
    pub price: f64,
    pub image_ref: Option<String>,
    pub created_at: jiff_diesel::Timestamp,
    pub updated_at: jiff_diesel::Timestamp,
    pub deleted: bool,
}

impl NewRaquetaRow {
    /// Prepares a fresh row from an unsaved racket.
    pub fn from_unsaved(raqueta: Raqueta, external_id: Uuid, now: Timestamp) -> Self {
        Self {
            external_id,
            brand: raqueta.brand,
            model: raqueta.model,
            price: raqueta.price,
            image_ref: raqueta.image_ref,
            created_at: now.to_diesel(),
            updated_at: now.to_diesel(),
            deleted: false,
        }
    }
}

/// RaquetaChangeset model for UPDATE operations
///
/// `image_ref` is written even when `None` so clearing the image works.
#[derive(Debug, AsChangeset, Clone)]
#[diesel(table_name = crate::schema::raquetas)]
#[diesel(treat_none_as_null = true)]
pub struct RaquetaChangeset {
    pub model: String,
    pub price: f64,
    pub image_ref: Option<String>,
    pub updated_at: jiff_diesel::Timestamp,
}

impl RaquetaChangeset {
    pub fn new(changes: RaquetaChanges, now: Timestamp) -> Self {
        Self {
            model: changes.model,
            price: changes.price,
            image_ref: changes.image_ref,
            updated_at: now.to_diesel(),
        }
    }
}
