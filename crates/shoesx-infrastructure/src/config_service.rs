//! Configuration service.
//!
//! Loads [`StorefrontConfig`] from `config.toml` and caches it.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use shoesx_core::config::StorefrontConfig;
use shoesx_core::error::{Result, ShopError};

use crate::paths::ShoesxPaths;

/// Loads and caches the storefront configuration.
///
/// A missing file yields defaults. A file that exists but does not parse is
/// an error, so a typo never silently resets the storage location.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    config: Arc<RwLock<Option<StorefrontConfig>>>,
}

impl ConfigService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Service reading the default `config.toml` for `paths`.
    pub fn from_paths(paths: &ShoesxPaths) -> Result<Self> {
        Ok(Self::new(paths.config_file()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Gets the configuration, loading from file if not cached.
    pub fn get_config(&self) -> Result<StorefrontConfig> {
        {
            let cached = self
                .config
                .read()
                .map_err(|_| ShopError::internal("Config cache lock poisoned"))?;
            if let Some(config) = cached.as_ref() {
                return Ok(config.clone());
            }
        }

        let loaded = Self::load_config(&self.path)?;

        let mut cached = self
            .config
            .write()
            .map_err(|_| ShopError::internal("Config cache lock poisoned"))?;
        *cached = Some(loaded.clone());
        Ok(loaded)
    }

    /// Forces a reload on next access.
    pub fn invalidate_cache(&self) {
        if let Ok(mut cached) = self.config.write() {
            *cached = None;
        }
    }

    fn load_config(path: &Path) -> Result<StorefrontConfig> {
        if !path.exists() {
            tracing::debug!("[Config] {} not found, using defaults", path.display());
            return Ok(StorefrontConfig::default());
        }

        let content = fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| ShopError::config(format!("Failed to parse {}: {}", path.display(), e)))
    }
}
