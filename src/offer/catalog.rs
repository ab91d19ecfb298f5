use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::{common::Lookup, configs::ShopConfig};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProductImage {
    pub src: String,
}

/// The subset of a WooCommerce product the relay needs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Product {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sku: String,
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
    #[serde(default)]
    pub stock_status: String,
    /// WooCommerce sends a string, other catalogs a number; see `snapshot::parse_price`.
    #[serde(default)]
    pub price: Option<Value>,
    #[serde(default)]
    pub permalink: Option<String>,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub images: Vec<ProductImage>,
}

fn default_kind() -> String {
    "simple".to_string()
}

impl Product {
    /// Only simple products can be added to the cart from a bare link;
    /// variable, grouped and other composite types need a choice first.
    pub fn is_simple(&self) -> bool {
        self.kind == "simple"
    }

    pub fn in_stock(&self) -> bool {
        self.stock_status == "instock"
    }

    pub fn image(&self) -> Option<&str> {
        self.images.first().map(|i| i.src.as_str())
    }
}

#[async_trait]
pub trait Catalog: Send + Sync {
    async fn find_product_by_sku(&self, sku: &str) -> Lookup<Option<Product>>;
}

/// WooCommerce REST v3 catalog, authenticated with a consumer key pair.
pub struct WooCatalog {
    client: Client,
    base_url: String,
    credentials: Option<(String, String)>,
}

impl WooCatalog {
    pub fn new(client: Client, config: &ShopConfig) -> Self {
        Self {
            client,
            base_url: config.base_url().to_string(),
            credentials: config
                .credentials()
                .map(|(k, s)| (k.to_string(), s.to_string())),
        }
    }
}

#[async_trait]
impl Catalog for WooCatalog {
    async fn find_product_by_sku(&self, sku: &str) -> Lookup<Option<Product>> {
        let Some((key, secret)) = &self.credentials else {
            return Lookup::NotConfigured;
        };

        let url = format!("{}/wp-json/wc/v3/products", self.base_url);
        let resp = match self
            .client
            .get(&url)
            .query(&[("sku", sku)])
            .basic_auth(key, Some(secret))
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => return e.into(),
        };

        if !resp.status().is_success() {
            return Lookup::failed(format!("catalog returned HTTP {}", resp.status()));
        }

        let body: Value = match resp.json().await {
            Ok(v) => v,
            Err(e) => return e.into(),
        };

        match parse_products(body) {
            Ok(products) => {
                debug!("Catalog returned {} products for sku {}", products.len(), sku);
                Lookup::Ok(products.into_iter().next())
            }
            Err(reason) => Lookup::Failed(reason),
        }
    }
}

pub fn parse_products(body: Value) -> Result<Vec<Product>, String> {
    if !body.is_array() {
        return Err("catalog response is not a list".to_string());
    }
    serde_json::from_value(body).map_err(|e| format!("malformed product: {}", e))
}
