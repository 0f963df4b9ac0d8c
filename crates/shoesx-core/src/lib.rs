//! Domain layer for the ShoesX storefront.
//!
//! Contains the cart state engine, the catalog filter/sort engine, the size
//! recommender, and the traits for the collaborators they depend on (local
//! key-value store, remote document store, identity provider).

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod fit;
pub mod identity;
pub mod remote;

// Re-export common error type
pub use error::ShopError;
