//! Identity provider backed by a tokio watch channel.

use std::sync::Arc;

use tokio::sync::watch;

use shoesx_core::identity::IdentityProvider;

/// Holds the signed-in user id and broadcasts every change.
///
/// Clones share the same channel, so one handle can sign in while another
/// drives the auth listener.
#[derive(Debug, Clone)]
pub struct WatchIdentityProvider {
    sender: Arc<watch::Sender<Option<String>>>,
}

impl WatchIdentityProvider {
    pub fn new(initial: Option<String>) -> Self {
        let (sender, _) = watch::channel(initial);
        Self {
            sender: Arc::new(sender),
        }
    }

    pub fn sign_in(&self, user_id: impl Into<String>) {
        let user_id = user_id.into();
        tracing::info!("[Identity] Signed in as {}", user_id);
        self.sender.send_replace(Some(user_id));
    }

    pub fn sign_out(&self) {
        tracing::info!("[Identity] Signed out");
        self.sender.send_replace(None);
    }
}

impl Default for WatchIdentityProvider {
    fn default() -> Self {
        Self::new(None)
    }
}

impl IdentityProvider for WatchIdentityProvider {
    fn current_user_id(&self) -> Option<String> {
        self.sender.borrow().clone()
    }

    fn watch(&self) -> watch::Receiver<Option<String>> {
        self.sender.subscribe()
    }
}
