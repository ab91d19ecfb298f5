use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct OfferConfig {
  #[serde(default = "default_token_ttl_secs")]
  pub token_ttl_secs: u64,
  /// Defaults to a thirtieth of the TTL, never below one second.
  #[serde(default)]
  pub sweep_interval_secs: Option<u64>,
  #[serde(default)]
  pub max_tokens: Option<usize>,
}

impl Default for OfferConfig {
  fn default() -> Self {
    Self {
      token_ttl_secs: default_token_ttl_secs(),
      sweep_interval_secs: None,
      max_tokens: None,
    }
  }
}

impl OfferConfig {
  pub fn ttl(&self) -> Duration {
    Duration::from_secs(self.token_ttl_secs.max(1))
  }

  pub fn sweep_interval(&self) -> Duration {
    match self.sweep_interval_secs {
      Some(secs) => Duration::from_secs(secs.max(1)),
      None => (self.ttl() / 30).max(Duration::from_secs(1)),
    }
  }
}

fn default_token_ttl_secs() -> u64 {
  600
}
