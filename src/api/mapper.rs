//! Conversions between racket DTOs and the domain entity.

use crate::api::dto::{RaquetaRequest, RaquetaResponse};
use crate::models::Raqueta;

pub struct RaquetaMapper;

impl RaquetaMapper {
    /// Builds an unsaved entity from a validated request.
    ///
    /// Identity and timestamps are placeholders the repository overwrites.
    pub fn to_model(request: RaquetaRequest) -> Raqueta {
        Raqueta::unsaved(
            request.brand,
            request.model,
            request.price.unwrap_or_default(),
            request.image_ref,
        )
    }

    pub fn to_response(raqueta: Raqueta) -> RaquetaResponse {
        RaquetaResponse {
            id: raqueta.id,
            external_id: raqueta.external_id,
            brand: raqueta.brand,
            model: raqueta.model,
            price: raqueta.price,
            image_ref: raqueta.image_ref,
            created_at: raqueta.created_at.to_string(),
            updated_at: raqueta.updated_at.to_string(),
        }
    }

    pub fn to_response_list(raquetas: Vec<Raqueta>) -> Vec<RaquetaResponse> {
        raquetas.into_iter().map(Self::to_response).collect()
    }
}
