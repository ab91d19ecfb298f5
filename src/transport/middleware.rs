use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::HeaderValue,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::{common::ApiError, server::AppState};

/// Guards write routes when `server.password` is configured; open otherwise.
pub async fn check_auth(State(state): State<Arc<AppState>>, req: Request, next: Next) -> Response {
    let Some(password) = state
        .config
        .server
        .password
        .as_deref()
        .filter(|p| !p.is_empty())
    else {
        return next.run(req).await;
    };

    let auth_header = req
        .headers()
        .get("authorization")
        .and_then(|h| h.to_str().ok());
    let path = req.uri().path().to_string();

    match auth_header {
        Some(auth) if auth == password || auth.strip_prefix("Bearer ") == Some(password) => {
            next.run(req).await
        }
        Some(_) => {
            warn!("Authorization failed for {}: invalid password", path);
            ApiError::unauthorized("invalid authorization", path).into_response()
        }
        None => {
            warn!("Authorization failed for {}: missing Authorization header", path);
            ApiError::unauthorized("missing authorization", path).into_response()
        }
    }
}

pub async fn add_response_headers(req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;
    response
        .headers_mut()
        .insert("shoplink-api-version", HeaderValue::from_static("1"));
    response
}
