use std::sync::Arc;

use crate::{
    common::{AnyResult, HttpClient},
    configs::Config,
    offer::{
        Catalog, LinkBuilder, OfferResolver, OfferTicket, PngQrRenderer, QrRenderer, WooCatalog,
    },
    store::{Clock, SystemClock, TtlStore},
    stream::{HttpStreamDirectory, StreamDirectory},
};

/// Top-level application state.
pub struct AppState {
    pub config: Config,
    pub offers: OfferResolver,
    pub directory: Arc<dyn StreamDirectory>,
    pub qr: Arc<dyn QrRenderer>,
}

impl AppState {
    /// Wires the real HTTP collaborators from configuration.
    pub fn from_config(config: Config) -> AnyResult<Self> {
        let client = HttpClient::new(&config.http)?;
        let catalog = Arc::new(WooCatalog::new(client.clone(), &config.shop));
        let directory = Arc::new(HttpStreamDirectory::new(client, &config.provider));

        if config.shop.credentials().is_none() {
            tracing::warn!("Shop credentials missing; offers will never be shown");
        }
        if config.provider.api_key().is_none() {
            tracing::info!("No provider api key; stream correlation is disabled");
        }

        Ok(Self::new(
            config,
            catalog,
            directory,
            Arc::new(PngQrRenderer::default()),
            Arc::new(SystemClock),
        ))
    }

    pub fn new(
        config: Config,
        catalog: Arc<dyn Catalog>,
        directory: Arc<dyn StreamDirectory>,
        qr: Arc<dyn QrRenderer>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let mut tokens = TtlStore::<OfferTicket>::with_clock(config.offer.ttl(), clock);
        if let Some(max) = config.offer.max_tokens {
            tokens = tokens.with_max_entries(max);
        }

        let links = LinkBuilder::new(config.server.public_base(), config.shop.clone());
        let offers = OfferResolver::new(
            config.artists.clone(),
            catalog,
            Arc::new(tokens),
            links,
        );

        Self {
            config,
            offers,
            directory,
            qr,
        }
    }
}

pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
