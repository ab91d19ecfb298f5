use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    server::AppState,
    transport::{
        middleware::{add_response_headers, check_auth},
        routes::{health, links, nowplaying, offer, stream},
    },
};

pub fn router(state: Arc<AppState>) -> Router {
    let set_now_playing = post(nowplaying::set_now_playing)
        .route_layer(middleware::from_fn_with_state(state.clone(), check_auth));

    Router::new()
        .route("/resolve/stream", post(stream::resolve_stream))
        .route(
            "/nowplaying",
            get(nowplaying::get_now_playing).merge(set_now_playing),
        )
        .route("/offer/active", get(offer::get_active_offer))
        .route("/b/{token}", get(links::redirect_to_cart))
        .route("/qr/{file}", get(links::qr_code))
        .route("/health", get(health::health))
        .route("/version", get(health::get_version))
        .layer(middleware::from_fn(add_response_headers))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, time::Duration};

    use async_trait::async_trait;
    use axum::{
        body::{Body, Bytes},
        http::{HeaderMap, Request, StatusCode, header},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::{
        common::Lookup,
        configs::{Config, ServerConfig, ShopConfig},
        offer::{
            PngQrRenderer, Product,
            resolver::tests::{StubCatalog, product},
        },
        store::ManualClock,
        stream::{DirectoryRecord, StreamDirectory},
    };

    struct StubDirectory(Lookup<Vec<DirectoryRecord>>);

    #[async_trait]
    impl StreamDirectory for StubDirectory {
        async fn list_live_streams(&self) -> Lookup<Vec<DirectoryRecord>> {
            self.0.clone()
        }
    }

    fn config(password: Option<&str>) -> Config {
        Config {
            server: ServerConfig {
                public_url: Some("https://relay.example.com".into()),
                password: password.map(str::to_string),
                ..Default::default()
            },
            shop: ShopConfig {
                url: "https://shop.example.com".into(),
                ..Default::default()
            },
            artists: HashMap::from([("colleenanthony".to_string(), "0002".to_string())]),
            ..Default::default()
        }
    }

    fn app_with(config: Config, catalog: Lookup<Option<Product>>) -> (Router, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(1_700_000_000_000));
        let directory = StubDirectory(Lookup::Ok(vec![DirectoryRecord {
            stream_key: "stage--".into(),
            id: "li_77".into(),
            name: None,
        }]));
        let state = AppState::new(
            config,
            Arc::new(StubCatalog(catalog)),
            Arc::new(directory),
            Arc::new(PngQrRenderer::default()),
            clock.clone(),
        );
        (router(Arc::new(state)), clock)
    }

    fn app() -> (Router, Arc<ManualClock>) {
        app_with(config(None), Lookup::Ok(Some(product("simple", "instock"))))
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).expect("request")
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, HeaderMap, Bytes) {
        let resp = app.clone().oneshot(req).await.expect("infallible");
        let status = resp.status();
        let headers = resp.headers().clone();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("body");
        (status, headers, body)
    }

    async fn send_json(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let (status, _, body) = send(app, req).await;
        (status, serde_json::from_slice(&body).expect("json body"))
    }

    #[tokio::test]
    async fn test_end_to_end_offer_flow() {
        let (app, _) = app();

        let (status, body) = send_json(
            &app,
            post_json("/nowplaying", json!({ "artist_id": "colleenanthony" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
        assert_eq!(body["nowPlaying"]["artistId"], "colleenanthony");

        let (status, offer) = send_json(&app, get("/offer/active")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(offer["overlay"]["visible"], true);
        assert_eq!(offer["overlay"]["ttlSec"], 600);
        assert_eq!(offer["artist"]["id"], "colleenanthony");
        assert_eq!(offer["product"]["id"], 42);
        assert_eq!(offer["product"]["price"], 19.99);
        assert_eq!(offer["product"]["priceFormatted"], "USD 19.99");

        let token = offer["product"]["token"].as_str().expect("token").to_string();
        assert_eq!(
            offer["product"]["shortUrl"],
            format!("https://relay.example.com/b/{}", token)
        );

        for _ in 0..2 {
            let (status, headers, body) = send(&app, get(&format!("/b/{}", token))).await;
            assert_eq!(status, StatusCode::OK);
            assert!(
                headers[header::CONTENT_TYPE]
                    .to_str()
                    .expect("content type")
                    .starts_with("text/html")
            );
            let page = String::from_utf8(body.to_vec()).expect("utf8");
            assert!(page.contains("https://shop.example.com/cart/?add-to-cart=42"));
        }

        let (status, headers, png) = send(&app, get(&format!("/qr/{}.png", token))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::CONTENT_TYPE], "image/png");
        assert!(png.starts_with(&[0x89, b'P', b'N', b'G']));
        assert_eq!(headers["shoplink-api-version"], "1");
    }

    #[tokio::test]
    async fn test_tokens_expire() {
        let (app, clock) = app();
        send(&app, post_json("/nowplaying", json!({ "artist_id": "colleenanthony" }))).await;
        let (_, offer) = send_json(&app, get("/offer/active")).await;
        let token = offer["product"]["token"].as_str().expect("token").to_string();

        clock.advance(Duration::from_secs(599));
        let (status, _, _) = send(&app, get(&format!("/b/{}", token))).await;
        assert_eq!(status, StatusCode::OK);

        clock.advance(Duration::from_secs(2));
        let (status, body) = send_json(&app, get(&format!("/b/{}", token))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["status"], 404);

        let (status, _, _) = send(&app, get(&format!("/qr/{}.png", token))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_token_and_bad_qr_suffix() {
        let (app, _) = app();
        let (status, body) = send_json(&app, get("/b/deadbeefdeadbeef")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["path"], "/b/deadbeefdeadbeef");

        let (status, _, _) = send(&app, get("/qr/deadbeefdeadbeef.jpg")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_offer_hidden_when_nothing_playing() {
        let (app, _) = app();
        let (status, offer) = send_json(&app, get("/offer/active")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(offer["overlay"]["visible"], false);
        assert!(offer.get("product").is_none());
        assert!(offer.get("artist").is_none());
    }

    #[tokio::test]
    async fn test_offer_hidden_when_catalog_fails() {
        let (app, _) = app_with(config(None), Lookup::failed("request timed out"));
        send(&app, post_json("/nowplaying", json!({ "artist_id": "colleenanthony" }))).await;

        let (status, offer) = send_json(&app, get("/offer/active")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(offer["overlay"]["visible"], false);
    }

    #[tokio::test]
    async fn test_now_playing_requires_artist_id() {
        let (app, _) = app();

        let (status, body) =
            send_json(&app, post_json("/nowplaying", json!({ "artist_name": "X" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "artist_id is required");

        let (status, _) =
            send_json(&app, post_json("/nowplaying", json!({ "artist_id": "  " }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let bad = Request::post("/nowplaying")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .expect("request");
        let (status, _) = send_json(&app, bad).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_now_playing_round_trip() {
        let (app, _) = app();
        send(
            &app,
            post_json(
                "/nowplaying",
                json!({ "artist_id": "colleenanthony", "artist_name": "Colleen Anthony" }),
            ),
        )
        .await;

        let (status, body) = send_json(&app, get("/nowplaying")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["artistName"], "Colleen Anthony");
    }

    #[tokio::test]
    async fn test_write_route_password() {
        let (app, _) = app_with(
            config(Some("s3cret")),
            Lookup::Ok(Some(product("simple", "instock"))),
        );

        let (status, _) = send_json(
            &app,
            post_json("/nowplaying", json!({ "artist_id": "colleenanthony" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let mut req = post_json("/nowplaying", json!({ "artist_id": "colleenanthony" }));
        req.headers_mut()
            .insert(header::AUTHORIZATION, "Bearer s3cret".parse().expect("header"));
        let (status, _) = send_json(&app, req).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send_json(&app, get("/nowplaying")).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_resolve_stream_route() {
        let (app, _) = app();

        let (status, body) = send_json(
            &app,
            post_json(
                "/resolve/stream",
                json!({ "m3u8": "https://cdn.example.net/live_cdn/app9/stage-/playlist.m3u8" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["appId"], "app9");
        assert_eq!(body["streamKey"], "stage");
        assert_eq!(body["streamId"], "li_77");
        assert_eq!(body["lookup"], "matched");
        assert_eq!(
            body["raw"],
            "https://cdn.example.net/live_cdn/app9/stage-/playlist.m3u8"
        );
    }

    #[tokio::test]
    async fn test_resolve_stream_errors() {
        let (app, _) = app();

        let (status, _) = send_json(&app, post_json("/resolve/stream", json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) =
            send_json(&app, post_json("/resolve/stream", json!({ "m3u8": "nope" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send_json(
            &app,
            post_json(
                "/resolve/stream",
                json!({ "m3u8": "https://cdn.example.net/hls/app/key/playlist.m3u8" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["details"]["segments"][0], "hls");
        assert_eq!(body["details"]["markerIndex"], Value::Null);
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _) = app();
        let (status, body) = send_json(&app, get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
        assert!(body["ts"].as_u64().expect("ts") > 0);
    }
}
