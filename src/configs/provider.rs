use serde::{Deserialize, Serialize};

/// Live-stream provider directory. Without an `api_key` stream correlation is
/// skipped entirely.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProviderConfig {
  #[serde(default = "default_api_url")]
  pub api_url: String,
  #[serde(default)]
  pub api_key: Option<String>,
}

impl Default for ProviderConfig {
  fn default() -> Self {
    Self {
      api_url: default_api_url(),
      api_key: None,
    }
  }
}

impl ProviderConfig {
  pub fn api_key(&self) -> Option<&str> {
    self.api_key.as_deref().filter(|k| !k.is_empty())
  }
}

fn default_api_url() -> String {
  "https://api.video/v1".to_string()
}
