use std::{collections::HashMap, path::Path};

use serde::{Deserialize, Serialize};

use crate::common::types::AnyResult;
use crate::configs::*;

pub const CONFIG_PATH_ENV: &str = "SHOPLINK_CONFIG";

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
  #[serde(default)]
  pub server: ServerConfig,
  #[serde(default)]
  pub shop: ShopConfig,
  #[serde(default)]
  pub provider: ProviderConfig,
  #[serde(default)]
  pub offer: OfferConfig,
  #[serde(default)]
  pub http: HttpConfig,
  pub logging: Option<LoggingConfig>,
  /// Artist id to storefront SKU.
  #[serde(default)]
  pub artists: HashMap<String, String>,
}

impl Config {
  /// Reads `$SHOPLINK_CONFIG`, then `config.toml`, then `config.default.toml`.
  /// Returns the parsed config and the path it came from.
  pub fn load() -> AnyResult<(Self, String)> {
    let config_path = match std::env::var(CONFIG_PATH_ENV) {
      Ok(path) if !path.is_empty() => path,
      _ if Path::new("config.toml").exists() => "config.toml".to_string(),
      _ if Path::new("config.default.toml").exists() => "config.default.toml".to_string(),
      _ => return Err("config.toml or config.default.toml not found".into()),
    };

    let config_str = std::fs::read_to_string(&config_path)?;
    if config_str.trim().is_empty() {
      return Err(format!("{} is empty", config_path).into());
    }

    let mut config = Self::from_toml_str(&config_str)?;
    config.apply_env(|name| std::env::var(name).ok());
    Ok((config, config_path))
  }

  pub fn from_toml_str(raw: &str) -> AnyResult<Self> {
    Ok(toml::from_str(raw)?)
  }

  /// Secrets may be kept out of the file and supplied through the environment.
  pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
    let lookup = |name: &str| var(name).filter(|v| !v.is_empty());

    if let Some(key) = lookup("SHOPLINK_WC_KEY") {
      self.shop.consumer_key = Some(key);
    }
    if let Some(secret) = lookup("SHOPLINK_WC_SECRET") {
      self.shop.consumer_secret = Some(secret);
    }
    if let Some(key) = lookup("SHOPLINK_PROVIDER_KEY") {
      self.provider.api_key = Some(key);
    }
    if let Some(password) = lookup("SHOPLINK_PASSWORD") {
      self.server.password = Some(password);
    }
  }
}
