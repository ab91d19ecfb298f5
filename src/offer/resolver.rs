use std::{collections::HashMap, sync::Arc};

use serde::Serialize;
use tracing::{debug, warn};

use super::{
    catalog::Catalog, links::LinkBuilder, now_playing::NowPlayingState, snapshot::ProductSnapshot,
};
use crate::{common::Lookup, store::TtlStore};

/// What a short token points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferTicket {
    pub product_id: u64,
    pub artist_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoOfferReason {
    NothingPlaying,
    UnmappedArtist,
    CatalogNotConfigured,
    CatalogFailed,
    ProductNotFound,
    NotSimple,
    OutOfStock,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtistRef {
    pub id: String,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActiveOffer {
    pub token: String,
    pub artist: ArtistRef,
    pub product: ProductSnapshot,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OfferOutcome {
    NoOffer(NoOfferReason),
    Offer(ActiveOffer),
}

/// Decides whether the current artist has a purchasable product and mints
/// short tokens for it. Owns the now-playing state it reads.
pub struct OfferResolver {
    now_playing: NowPlayingState,
    skus: HashMap<String, String>,
    catalog: Arc<dyn Catalog>,
    tokens: Arc<TtlStore<OfferTicket>>,
    links: LinkBuilder,
}

impl OfferResolver {
    pub fn new(
        skus: HashMap<String, String>,
        catalog: Arc<dyn Catalog>,
        tokens: Arc<TtlStore<OfferTicket>>,
        links: LinkBuilder,
    ) -> Self {
        Self {
            now_playing: NowPlayingState::new(),
            skus,
            catalog,
            tokens,
            links,
        }
    }

    pub fn now_playing(&self) -> &NowPlayingState {
        &self.now_playing
    }

    pub fn tokens(&self) -> &Arc<TtlStore<OfferTicket>> {
        &self.tokens
    }

    pub fn links(&self) -> &LinkBuilder {
        &self.links
    }

    pub fn ttl_secs(&self) -> u64 {
        self.tokens.ttl().as_secs()
    }

    /// Every failure along the way ends in `NoOffer`; nothing is propagated.
    pub async fn resolve_active(&self) -> OfferOutcome {
        let current = self.now_playing.get();
        let Some(artist_id) = current.artist_id.clone() else {
            return OfferOutcome::NoOffer(NoOfferReason::NothingPlaying);
        };

        let Some(sku) = self.skus.get(&artist_id) else {
            debug!("No SKU mapped for artist {}", artist_id);
            return OfferOutcome::NoOffer(NoOfferReason::UnmappedArtist);
        };

        let product = match self.catalog.find_product_by_sku(sku).await {
            Lookup::Ok(Some(product)) => product,
            Lookup::Ok(None) => {
                debug!("Catalog has no product for sku {}", sku);
                return OfferOutcome::NoOffer(NoOfferReason::ProductNotFound);
            }
            Lookup::NotConfigured => {
                return OfferOutcome::NoOffer(NoOfferReason::CatalogNotConfigured);
            }
            Lookup::Failed(reason) => {
                warn!("Catalog lookup for sku {} failed: {}", sku, reason);
                return OfferOutcome::NoOffer(NoOfferReason::CatalogFailed);
            }
        };

        if !product.is_simple() {
            debug!("Product {} is of type {}, not offering", product.id, product.kind);
            return OfferOutcome::NoOffer(NoOfferReason::NotSimple);
        }
        if !product.in_stock() {
            debug!("Product {} is {}, not offering", product.id, product.stock_status);
            return OfferOutcome::NoOffer(NoOfferReason::OutOfStock);
        }

        let token = self.tokens.mint(OfferTicket {
            product_id: product.id,
            artist_id: artist_id.clone(),
        });
        debug!("Minted token {} for product {} ({})", token, product.id, artist_id);

        OfferOutcome::Offer(ActiveOffer {
            product: ProductSnapshot::build(&product, &token, &self.links),
            token,
            artist: ArtistRef {
                id: artist_id,
                name: current.artist_name.clone(),
            },
        })
    }

    /// Looks a token up without consuming it; links stay valid until expiry.
    pub fn redeem(&self, token: &str) -> Option<OfferTicket> {
        self.tokens.get(token)
    }
}
