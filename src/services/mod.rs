//! Service layer for business logic operations.
//!
//! Services sit between the HTTP handlers and the repositories and turn
//! "absent" lookups into explicit `NotFound` errors.

mod raqueta_service;

pub use raqueta_service::RaquetaService;

use crate::repositories::Repositories;

/// Aggregates all services for convenient access.
///
/// Cloning is cheap since repositories are shared behind `Arc`.
#[derive(Clone)]
pub struct Services {
    pub raquetas: RaquetaService,
}

impl Services {
    /// Creates a new Services instance from Repositories.
    pub fn new(repos: Repositories) -> Self {
        Self {
            raquetas: RaquetaService::new(repos.raquetas),
        }
    }
}
