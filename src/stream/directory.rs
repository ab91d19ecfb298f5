use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use super::matcher::DirectoryRecord;
use crate::{common::Lookup, configs::ProviderConfig};

#[async_trait]
pub trait StreamDirectory: Send + Sync {
    /// Every live stream known to the provider, in the provider's order.
    async fn list_live_streams(&self) -> Lookup<Vec<DirectoryRecord>>;
}

/// Provider directory reached over HTTPS with a bearer token.
pub struct HttpStreamDirectory {
    client: Client,
    api_url: String,
    api_key: Option<String>,
}

impl HttpStreamDirectory {
    pub fn new(client: Client, config: &ProviderConfig) -> Self {
        Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            api_key: config.api_key().map(str::to_string),
        }
    }
}

#[async_trait]
impl StreamDirectory for HttpStreamDirectory {
    async fn list_live_streams(&self) -> Lookup<Vec<DirectoryRecord>> {
        let Some(api_key) = &self.api_key else {
            return Lookup::NotConfigured;
        };

        let url = format!("{}/live_streams", self.api_url);
        let resp = match self.client.get(&url).bearer_auth(api_key).send().await {
            Ok(r) => r,
            Err(e) => return e.into(),
        };

        if !resp.status().is_success() {
            return Lookup::failed(format!("directory returned HTTP {}", resp.status()));
        }

        let body: Value = match resp.json().await {
            Ok(v) => v,
            Err(e) => return e.into(),
        };

        match parse_directory(&body) {
            Some(records) => {
                debug!("Provider directory listed {} live streams", records.len());
                Lookup::Ok(records)
            }
            None => Lookup::failed("directory response is not a list"),
        }
    }
}

/// Accepts a bare array or an object wrapping one under `data` or
/// `live_streams`. Entries without a usable key and id are skipped.
pub fn parse_directory(body: &Value) -> Option<Vec<DirectoryRecord>> {
    let items = match body {
        Value::Array(items) => items,
        Value::Object(map) => map
            .get("data")
            .or_else(|| map.get("live_streams"))
            .and_then(Value::as_array)?,
        _ => return None,
    };

    Some(items.iter().filter_map(DirectoryRecord::from_value).collect())
}
