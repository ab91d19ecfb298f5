use serde::{Deserialize, Serialize};

/// WooCommerce-compatible storefront.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ShopConfig {
  #[serde(default = "default_url")]
  pub url: String,
  #[serde(default)]
  pub consumer_key: Option<String>,
  #[serde(default)]
  pub consumer_secret: Option<String>,
  #[serde(default = "default_currency")]
  pub currency: String,
  #[serde(default = "default_cart_path")]
  pub cart_path: String,
}

impl Default for ShopConfig {
  fn default() -> Self {
    Self {
      url: default_url(),
      consumer_key: None,
      consumer_secret: None,
      currency: default_currency(),
      cart_path: default_cart_path(),
    }
  }
}

impl ShopConfig {
  pub fn base_url(&self) -> &str {
    self.url.trim_end_matches('/')
  }

  /// Key and secret, only when both are present and non-empty.
  pub fn credentials(&self) -> Option<(&str, &str)> {
    let key = self.consumer_key.as_deref().filter(|k| !k.is_empty())?;
    let secret = self.consumer_secret.as_deref().filter(|s| !s.is_empty())?;
    Some((key, secret))
  }

  pub fn cart_url(&self, product_id: u64) -> String {
    let path = self.cart_path.trim();
    let path = if path.starts_with('/') {
      path.to_string()
    } else {
      format!("/{}", path)
    };
    format!("{}{}?add-to-cart={}", self.base_url(), path, product_id)
  }
}

fn default_url() -> String {
  "http://localhost".to_string()
}

fn default_currency() -> String {
  "USD".to_string()
}

fn default_cart_path() -> String {
  "/cart/".to_string()
}
