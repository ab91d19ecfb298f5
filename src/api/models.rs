use serde::{Deserialize, Serialize};

use crate::offer::{ArtistRef, NowPlaying, ProductSnapshot};

/// Body of `POST /resolve/stream`.
#[derive(Debug, Deserialize)]
pub struct ResolveStreamRequest {
  pub m3u8: Option<String>,
}

/// Body of `POST /nowplaying`.
#[derive(Debug, Deserialize)]
pub struct NowPlayingRequest {
  pub artist_id: Option<String>,
  pub artist_name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NowPlayingResponse {
  pub ok: bool,
  pub now_playing: NowPlaying,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayState {
  pub visible: bool,
  pub ttl_sec: u64,
}

/// Response of `GET /offer/active`. `artist` and `product` are present only
/// while the overlay is visible.
#[derive(Debug, Serialize)]
pub struct ActiveOfferResponse {
  pub overlay: OverlayState,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub artist: Option<ArtistRef>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub product: Option<ProductSnapshot>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
  pub ok: bool,
  pub ts: u64,
}
