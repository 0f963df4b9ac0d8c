//! Identity provider abstraction.
//!
//! The storefront only ever needs the current user's stable identifier and a
//! way to hear about sign-in / sign-out. Everything else about authentication
//! stays behind this trait.

use tokio::sync::watch;

/// Source of the signed-in user's identifier.
pub trait IdentityProvider: Send + Sync {
    /// Returns the current user identifier, `None` when signed out.
    fn current_user_id(&self) -> Option<String>;

    /// Subscribes to identity changes.
    ///
    /// The receiver yields the new identifier (or `None`) after every change.
    fn watch(&self) -> watch::Receiver<Option<String>>;
}
