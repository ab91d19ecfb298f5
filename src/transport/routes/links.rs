use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::header,
    response::{Html, IntoResponse, Response},
};

use crate::{common::ApiError, server::AppState};

/// GET /b/{token}
///
/// Serves a tiny page that forwards the browser to the cart. Tokens are not
/// consumed, so the same link works until it expires.
pub async fn redirect_to_cart(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
) -> Result<Response, ApiError> {
    let path = format!("/b/{}", token);
    tracing::debug!("GET {}", path);

    let ticket = state
        .offers
        .redeem(&token)
        .ok_or_else(|| ApiError::not_found("link expired or unknown", &path))?;
    let target = state.offers.links().cart_url(ticket.product_id);

    Ok((
        [(header::CACHE_CONTROL, "no-store")],
        Html(redirect_page(&target)),
    )
        .into_response())
}

/// GET /qr/{token}.png
pub async fn qr_code(
    State(state): State<Arc<AppState>>,
    Path(file): Path<String>,
) -> Result<Response, ApiError> {
    let path = format!("/qr/{}", file);
    tracing::debug!("GET {}", path);

    let token = file
        .strip_suffix(".png")
        .ok_or_else(|| ApiError::not_found("unknown resource", &path))?;
    if state.offers.redeem(token).is_none() {
        return Err(ApiError::not_found("link expired or unknown", &path));
    }

    let short_url = state.offers.links().short_url(token);
    let png = state.qr.render(&short_url).map_err(|e| {
        tracing::error!("Failed to render QR for {}: {}", token, e);
        ApiError::internal("failed to render qr code", &path)
    })?;

    Ok((
        [
            (header::CONTENT_TYPE, "image/png"),
            (header::CACHE_CONTROL, "no-store"),
        ],
        png,
    )
        .into_response())
}

fn redirect_page(target: &str) -> String {
    let attr = escape_html(target);
    // a JSON string is a valid JS literal; `<` is escaped so it cannot close the script
    let js = serde_json::to_string(target)
        .unwrap_or_else(|_| "\"/\"".to_string())
        .replace('<', "\\u003c");

    format!(
        "<!doctype html>\n<html><head><meta charset=\"utf-8\">\
         <meta http-equiv=\"refresh\" content=\"0;url={attr}\">\
         <title>Redirecting…</title></head>\
         <body><p><a href=\"{attr}\">Continue to checkout</a></p>\
         <script>location.replace({js});</script></body></html>\n"
    )
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
