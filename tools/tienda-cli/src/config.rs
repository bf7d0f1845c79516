//! CLI configuration.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tienda_client::ClientConfig;

/// Environment variable that overrides `api.base_url`.
pub const API_URL_ENV: &str = "TIENDA_API_URL";

/// Config file names searched for, in order.
pub const CONFIG_NAMES: [&str; 3] = ["tienda.toml", ".tienda.toml", "tienda.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Backend connection.
    #[serde(default)]
    pub api: ClientConfig,

    /// Local persisted store.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Product catalog file.
    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Apply environment overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                self.api.base_url = url.trim().to_string();
            }
        }
        self
    }
}

/// Where the file-backed store lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_store_path")]
    pub path: String,
}

fn default_store_path() -> String {
    ".tienda/store.json".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

/// Where the product catalog file lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_products_file")]
    pub products_file: String,
}

fn default_products_file() -> String {
    "data/products.json".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            products_file: default_products_file(),
        }
    }
}

/// Generate a default tienda.toml config file.
pub fn generate_default_config() -> String {
    r#"# Tienda configuration

[api]
base_url = "http://localhost:8080"
api_prefix = "/api/v1"
timeout_secs = 10
# basic_auth_user = "user"
# basic_auth_password = "1234"

[storage]
path = ".tienda/store.json"

[catalog]
products_file = "data/products.json"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config: CliConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8080");
        assert_eq!(config.api.api_prefix, "/api/v1");
        assert_eq!(config.storage.path, ".tienda/store.json");
        assert_eq!(config.catalog.products_file, "data/products.json");
    }

    #[test]
    fn test_partial_config() {
        let config: CliConfig = toml::from_str("[catalog]\nproducts_file = \"p.json\"\n").unwrap();
        assert_eq!(config.catalog.products_file, "p.json");
        assert_eq!(config.storage.path, ".tienda/store.json");
        assert_eq!(config.api.timeout_secs, 10);
    }

    #[test]
    fn test_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tienda.json");
        std::fs::write(&path, r#"{"api": {"base_url": "http://api.local"}}"#).unwrap();
        let config = CliConfig::load(&path).unwrap();
        assert_eq!(config.api.base_url, "http://api.local");
    }
}
