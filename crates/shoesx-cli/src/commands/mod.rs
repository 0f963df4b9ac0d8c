pub mod cart;
pub mod catalog;
pub mod fit;
pub mod sync;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use shoesx_core::cart::{CartEngine, KeyValueStore};
use shoesx_core::config::StorefrontConfig;
use shoesx_infrastructure::{ConfigService, FileKeyValueStore, JsonDirDocumentStore, ShoesxPaths};

/// Resolved configuration plus the paths it was resolved against.
pub struct AppContext {
    pub config: StorefrontConfig,
    pub paths: ShoesxPaths,
}

impl AppContext {
    /// Loads `config.toml` from `config_file`, or from the default location for `paths`.
    pub fn load(paths: ShoesxPaths, config_file: Option<PathBuf>) -> Result<Self> {
        let service = match config_file {
            Some(path) => ConfigService::new(path),
            None => ConfigService::from_paths(&paths)?,
        };
        let config = service
            .get_config()
            .with_context(|| format!("Failed to load {}", service.path().display()))?;
        Ok(Self { config, paths })
    }

    pub fn storage_dir(&self) -> Result<PathBuf> {
        match &self.config.storage.dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(self.paths.store_dir()?),
        }
    }

    pub fn documents_dir(&self) -> Result<PathBuf> {
        match &self.config.remote.documents_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(self.paths.documents_dir()?),
        }
    }

    pub fn key_value_store(&self) -> Result<Arc<dyn KeyValueStore>> {
        Ok(Arc::new(FileKeyValueStore::new(self.storage_dir()?)))
    }

    pub fn cart_engine(&self) -> Result<CartEngine> {
        Ok(CartEngine::with_storage_key(
            self.key_value_store()?,
            self.config.storage.cart_key.clone(),
        ))
    }

    pub fn remote_store(&self) -> Result<JsonDirDocumentStore> {
        Ok(JsonDirDocumentStore::new(self.documents_dir()?))
    }
}
