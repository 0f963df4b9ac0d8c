//! Local persistent store trait.

use crate::error::Result;

/// Default key under which the serialized cart lives.
pub const DEFAULT_CART_KEY: &str = "shoesx_cart";

/// Durable key-value storage scoped to one client profile.
///
/// Writes replace the whole value for a key; there are no partial writes.
/// Calls are synchronous so that the cart engine can persist before a
/// mutator returns.
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`, `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Deletes `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}
