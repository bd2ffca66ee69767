//! Application configuration.
//!
//! Every field has a default, so an absent or partial TOML file is fine:
//!
//! ```toml
//! [catalog]
//! base_url = "https://fakestoreapi.com"
//! page_size = 10
//!
//! [list]
//! search_debounce_ms = 800
//! ```
//!
//! `STOREFRONT_CONFIG` names the file to load and `STOREFRONT_API_URL`
//! overrides `catalog.base_url`.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info};
use url::Url;

use crate::error::ConfigError;

pub const CONFIG_PATH_ENV: &str = "STOREFRONT_CONFIG";
pub const API_URL_ENV: &str = "STOREFRONT_API_URL";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub catalog: CatalogConfig,
    pub list: ListConfig,
    pub links: LinkConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub base_url: String,
    pub page_size: u32,
    pub timeout_secs: u64,
    pub user_agent: Option<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: "https://fakestoreapi.com".to_string(),
            page_size: 10,
            timeout_secs: 10,
            user_agent: None,
        }
    }
}

impl CatalogConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ListConfig {
    pub search_debounce_ms: u64,
    pub channel_capacity: usize,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            search_debounce_ms: 800,
            channel_capacity: 100,
        }
    }
}

impl ListConfig {
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

/// Where deep links and their web fallbacks point.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    pub scheme: String,
    pub web_host: String,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            scheme: "shoppingapp".to_string(),
            web_host: "shoppingapp.com".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "Reading config file");
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    /// Loads the file named by `STOREFRONT_CONFIG` (defaults otherwise) and
    /// applies `STOREFRONT_API_URL`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };
        if let Ok(url) = std::env::var(API_URL_ENV) {
            info!(base_url = %url, "Catalog URL overridden from environment");
            config.catalog.base_url = url;
            config.validate()?;
        }
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        Url::parse(&self.catalog.base_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("{}: {}", self.catalog.base_url, e)))?;
        Ok(())
    }
}
