use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host: String,
  #[serde(default = "default_port")]
  pub port: u16,
  /// Externally reachable base URL used to build short and QR links.
  #[serde(default)]
  pub public_url: Option<String>,
  /// When set, write routes require a matching `Authorization` header.
  #[serde(default)]
  pub password: Option<String>,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host: default_host(),
      port: default_port(),
      public_url: None,
      password: None,
    }
  }
}

impl ServerConfig {
  pub fn public_base(&self) -> String {
    match &self.public_url {
      Some(url) if !url.trim().is_empty() => url.trim().trim_end_matches('/').to_string(),
      _ => format!("http://localhost:{}", self.port),
    }
  }
}

fn default_host() -> String {
  "0.0.0.0".to_string()
}

fn default_port() -> u16 {
  8080
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HttpConfig {
  #[serde(default = "default_timeout_ms")]
  pub timeout_ms: u64,
  #[serde(default)]
  pub user_agent: Option<String>,
}

impl Default for HttpConfig {
  fn default() -> Self {
    Self {
      timeout_ms: default_timeout_ms(),
      user_agent: None,
    }
  }
}

fn default_timeout_ms() -> u64 {
  5_000
}
