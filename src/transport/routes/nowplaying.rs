use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use tracing::info;

use crate::{
    api::{NowPlayingRequest, NowPlayingResponse},
    common::ApiError,
    offer::NowPlaying,
    server::AppState,
};

const PATH: &str = "/nowplaying";

/// POST /nowplaying
pub async fn set_now_playing(
    State(state): State<Arc<AppState>>,
    body: Result<Json<NowPlayingRequest>, JsonRejection>,
) -> Result<Json<NowPlayingResponse>, ApiError> {
    let Json(body) = body.map_err(|e| ApiError::bad_request(e.body_text(), PATH))?;
    let Some(artist_id) = body
        .artist_id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
    else {
        return Err(ApiError::bad_request("artist_id is required", PATH));
    };

    let current = state.offers.now_playing().set(artist_id, body.artist_name);
    info!(
        "Now playing: {} ({})",
        current.artist_id.as_deref().unwrap_or_default(),
        current.artist_name.as_deref().unwrap_or("unnamed")
    );

    Ok(Json(NowPlayingResponse {
        ok: true,
        now_playing: NowPlaying::clone(&current),
    }))
}

/// GET /nowplaying
pub async fn get_now_playing(State(state): State<Arc<AppState>>) -> Json<NowPlaying> {
    tracing::debug!("GET {}", PATH);
    Json(NowPlaying::clone(&state.offers.now_playing().get()))
}
