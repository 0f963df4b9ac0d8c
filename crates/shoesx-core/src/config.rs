//! Storefront configuration model.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::cart::DEFAULT_CART_KEY;

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub remote: RemoteSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct StorageSettings {
    /// Directory for local key-value files. Defaults to the platform data dir.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
    #[serde(default = "default_cart_key")]
    pub cart_key: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            dir: None,
            cart_key: default_cart_key(),
        }
    }
}

fn default_cart_key() -> String {
    DEFAULT_CART_KEY.to_string()
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct RemoteSettings {
    /// Directory holding one JSON document per user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documents_dir: Option<PathBuf>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct CatalogSettings {
    /// JSON array of product attribute maps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products_file: Option<PathBuf>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
