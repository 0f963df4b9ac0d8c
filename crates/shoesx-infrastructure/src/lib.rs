//! Infrastructure layer for the ShoesX storefront.
//!
//! Concrete implementations of the collaborator traits declared in
//! `shoesx-core`: local key-value stores, remote document stores, the
//! identity provider, plus path and configuration loading.

pub mod config_service;
pub mod identity;
pub mod paths;
pub mod remote;
pub mod storage;

pub use config_service::ConfigService;
pub use identity::WatchIdentityProvider;
pub use paths::ShoesxPaths;
pub use remote::{JsonDirDocumentStore, MemoryDocumentStore};
pub use storage::{FileKeyValueStore, MemoryKeyValueStore};
