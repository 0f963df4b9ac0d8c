//! Path resolution for ShoesX local files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/shoesx/            # Config directory
//! └── config.toml              # Storefront configuration
//!
//! ~/.local/share/shoesx/       # Data directory
//! ├── store/                   # Local key-value files (cart)
//! └── users/                   # Per-user remote documents (JSON dir backend)
//! ```
//!
//! A base override places both trees under one directory, which keeps tests
//! and ad-hoc CLI runs away from the real home directory.

use std::path::PathBuf;

use shoesx_core::error::{Result, ShopError};

const APP_DIR: &str = "shoesx";

#[derive(Debug, Clone, Default)]
pub struct ShoesxPaths {
    base: Option<PathBuf>,
}

impl ShoesxPaths {
    /// `base` replaces the platform config and data directories when set.
    pub fn new(base: Option<PathBuf>) -> Self {
        Self { base }
    }

    pub fn config_dir(&self) -> Result<PathBuf> {
        match &self.base {
            Some(base) => Ok(base.join("config")),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or_else(|| ShopError::config("Cannot find config directory")),
        }
    }

    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.base {
            Some(base) => Ok(base.join("data")),
            None => dirs::data_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or_else(|| ShopError::config("Cannot find data directory")),
        }
    }

    pub fn config_file(&self) -> Result<PathBuf> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Default location for [`crate::storage::FileKeyValueStore`].
    pub fn store_dir(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join("store"))
    }

    /// Default location for [`crate::remote::JsonDirDocumentStore`].
    pub fn documents_dir(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join("users"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_override() {
        let paths = ShoesxPaths::new(Some(PathBuf::from("/tmp/shoesx-test")));

        assert_eq!(
            paths.config_file().unwrap(),
            PathBuf::from("/tmp/shoesx-test/config/config.toml")
        );
        assert_eq!(paths.store_dir().unwrap(), PathBuf::from("/tmp/shoesx-test/data/store"));
        assert_eq!(
            paths.documents_dir().unwrap(),
            PathBuf::from("/tmp/shoesx-test/data/users")
        );
    }

    #[test]
    fn test_platform_dirs_end_with_app_name() {
        let paths = ShoesxPaths::default();
        if let Ok(dir) = paths.config_dir() {
            assert!(dir.ends_with("shoesx"));
        }
        if let Ok(dir) = paths.data_dir() {
            assert!(dir.ends_with("shoesx"));
        }
    }
}
