//! Application layer for ShoesX.
//!
//! Use cases that coordinate the domain engines with identity and remote
//! storage.

pub mod cart_sync_service;
pub mod profile_service;

pub use cart_sync_service::CartSyncService;
pub use profile_service::ProfileService;
