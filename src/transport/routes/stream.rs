use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

use crate::{
    api::ResolveStreamRequest,
    common::ApiError,
    server::AppState,
    stream::{self, ResolveError, StreamResolution},
};

const PATH: &str = "/resolve/stream";

/// POST /resolve/stream
pub async fn resolve_stream(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ResolveStreamRequest>, JsonRejection>,
) -> Result<Json<StreamResolution>, ApiError> {
    let Json(body) = body.map_err(|e| ApiError::bad_request(e.body_text(), PATH))?;
    let Some(m3u8) = body.m3u8.filter(|u| !u.trim().is_empty()) else {
        return Err(ApiError::bad_request("m3u8 is required", PATH));
    };
    tracing::debug!("POST {}: m3u8='{}'", PATH, m3u8);

    match stream::resolve_stream(&m3u8, state.directory.as_ref()).await {
        Ok(resolution) => Ok(Json(resolution)),
        Err(err @ ResolveError::InvalidUrl(_)) => Err(ApiError::bad_request(err.to_string(), PATH)),
        Err(err) => {
            let mut api_err = ApiError::unprocessable(err.to_string(), PATH);
            if let Some(partial) = err.partial() {
                api_err = api_err.details(partial);
            }
            Err(api_err)
        }
    }
}
