use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{
    api::{ActiveOfferResponse, OverlayState},
    offer::OfferOutcome,
    server::AppState,
};

/// GET /offer/active
///
/// Always answers 200; when anything upstream is missing or failing the
/// overlay is simply hidden.
pub async fn get_active_offer(State(state): State<Arc<AppState>>) -> Json<ActiveOfferResponse> {
    tracing::debug!("GET /offer/active");
    let ttl_sec = state.offers.ttl_secs();

    let response = match state.offers.resolve_active().await {
        OfferOutcome::Offer(offer) => ActiveOfferResponse {
            overlay: OverlayState {
                visible: true,
                ttl_sec,
            },
            artist: Some(offer.artist),
            product: Some(offer.product),
        },
        OfferOutcome::NoOffer(reason) => {
            tracing::debug!("No active offer: {:?}", reason);
            ActiveOfferResponse {
                overlay: OverlayState {
                    visible: false,
                    ttl_sec,
                },
                artist: None,
                product: None,
            }
        }
    };

    Json(response)
}
