use std::time::Duration;

use reqwest::{Client, Error};

use crate::configs::HttpConfig;

const DEFAULT_USER_AGENT: &str = concat!("shoplink/", env!("CARGO_PKG_VERSION"));

pub struct HttpClient;

impl HttpClient {
  pub fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
  }

  /// Shared client for catalog and provider calls. The timeout bounds the
  /// whole request, so a slow upstream surfaces as a failed lookup.
  pub fn new(config: &HttpConfig) -> Result<Client, Error> {
    Client::builder()
      .user_agent(
        config
          .user_agent
          .clone()
          .unwrap_or_else(Self::default_user_agent),
      )
      .timeout(Duration::from_millis(config.timeout_ms))
      .connect_timeout(Duration::from_millis(config.timeout_ms.min(3_000)))
      .build()
  }
}
