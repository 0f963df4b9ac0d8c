//! Cart synchronisation use case.
//!
//! Keeps the local cart engine and the signed-in user's remote document in
//! step: the remote cart is loaded once per sign-in, and every add-to-cart is
//! pushed while a user is signed in.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use shoesx_core::cart::{CartEngine, CartLineItem, ProductRef};
use shoesx_core::error::Result;
use shoesx_core::identity::IdentityProvider;
use shoesx_core::remote::RemoteDocumentStore;

/// Coordinates a shared [`CartEngine`] with identity and remote storage.
///
/// # Ordering
///
/// `pull` fetches the remote document without holding the cart lock and only
/// then applies it. A local mutation that lands in between is overwritten by
/// the remote cart (remote wins on load).
pub struct CartSyncService {
    cart: Arc<Mutex<CartEngine>>,
    identity: Arc<dyn IdentityProvider>,
    remote: Arc<dyn RemoteDocumentStore>,
    /// User whose remote cart has already been loaded in this session
    loaded_for: Mutex<Option<String>>,
}

impl CartSyncService {
    pub fn new(
        cart: Arc<Mutex<CartEngine>>,
        identity: Arc<dyn IdentityProvider>,
        remote: Arc<dyn RemoteDocumentStore>,
    ) -> Self {
        Self {
            cart,
            identity,
            remote,
            loaded_for: Mutex::new(None),
        }
    }

    pub fn cart(&self) -> &Arc<Mutex<CartEngine>> {
        &self.cart
    }

    /// Reacts to the current identity.
    ///
    /// Loads the remote cart for a newly signed-in user, at most once per
    /// sign-in. Signing out forgets the user but leaves the local cart as is.
    pub async fn on_auth_changed(&self) {
        let current = self.identity.current_user_id();
        let mut loaded_for = self.loaded_for.lock().await;

        match current {
            None => {
                if loaded_for.take().is_some() {
                    tracing::info!("[CartSync] Signed out, keeping local cart");
                }
            }
            Some(user_id) => {
                if loaded_for.as_deref() == Some(user_id.as_str()) {
                    return;
                }
                self.pull_for(&user_id).await;
                *loaded_for = Some(user_id);
            }
        }
    }

    /// Adds to the local cart, then pushes to remote when a user is signed in.
    ///
    /// Validation errors are returned. Remote failures are logged only.
    pub async fn add_to_cart(&self, product: &ProductRef, size: &str, quantity: u32) -> Result<Vec<CartLineItem>> {
        let items = {
            let mut cart = self.cart.lock().await;
            cart.add_item(product, size, quantity)?.to_vec()
        };
        self.push().await;
        Ok(items)
    }

    /// Mirrors the local cart into the signed-in user's document.
    ///
    /// No-op when signed out.
    pub async fn push(&self) {
        let Some(user_id) = self.identity.current_user_id() else {
            tracing::debug!("[CartSync] Not signed in, skipping push");
            return;
        };

        let patch = {
            let cart = self.cart.lock().await;
            cart.remote_patch()
        };
        let patch = match patch {
            Ok(patch) => patch,
            Err(e) => {
                tracing::error!("[CartSync] Failed to build cart patch: {}", e);
                return;
            }
        };

        match self.remote.merge(&user_id, patch).await {
            Ok(()) => tracing::debug!("[CartSync] Pushed cart for {}", user_id),
            Err(e) => tracing::error!("[CartSync] Failed to push cart: {}", e),
        }
    }

    /// Loads the signed-in user's remote cart regardless of earlier loads.
    pub async fn pull(&self) {
        let Some(user_id) = self.identity.current_user_id() else {
            tracing::debug!("[CartSync] Not signed in, skipping pull");
            return;
        };
        self.pull_for(&user_id).await;
    }

    async fn pull_for(&self, user_id: &str) {
        let document = match self.remote.get(user_id).await {
            Ok(Some(document)) => document,
            Ok(None) => {
                tracing::debug!("[CartSync] No remote document for {}", user_id);
                return;
            }
            Err(e) => {
                tracing::error!("[CartSync] Failed to load remote cart: {}", e);
                return;
            }
        };

        let mut cart = self.cart.lock().await;
        if cart.apply_remote_document(&document) {
            tracing::info!("[CartSync] Loaded remote cart for {} ({} line(s))", user_id, cart.items().len());
        }
    }

    /// Follows identity changes until the identity source goes away.
    pub async fn run_auth_listener(&self) {
        let mut changes = self.identity.watch();
        self.on_auth_changed().await;

        while changes.changed().await.is_ok() {
            self.on_auth_changed().await;
        }
        tracing::debug!("[CartSync] Identity source closed, auth listener stopped");
    }

    /// Runs [`Self::run_auth_listener`] on a background task.
    pub fn spawn_auth_listener(self: &Arc<Self>) -> JoinHandle<()> {
        let service = Arc::clone(self);
        tokio::spawn(async move { service.run_auth_listener().await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shoesx_core::cart::KeyValueStore;
    use shoesx_core::remote::Document;
    use shoesx_infrastructure::{MemoryDocumentStore, MemoryKeyValueStore, WatchIdentityProvider};

    struct Fixture {
        service: CartSyncService,
        identity: WatchIdentityProvider,
        remote: MemoryDocumentStore,
    }

    fn fixture() -> Fixture {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryKeyValueStore::new());
        let identity = WatchIdentityProvider::default();
        let remote = MemoryDocumentStore::new();
        let service = CartSyncService::new(
            Arc::new(Mutex::new(CartEngine::new(store))),
            Arc::new(identity.clone()),
            Arc::new(remote.clone()),
        );
        Fixture {
            service,
            identity,
            remote,
        }
    }

    fn product(id: &str, price: &str) -> ProductRef {
        ProductRef::new(id, format!("Shoe {}", id), price, "", "Running")
    }

    fn remote_cart_document() -> Document {
        let value = json!({
            "cart": [{
                "productId": "r1",
                "productName": "Remote Shoe",
                "productImage": "",
                "price": 80.0,
                "size": "9",
                "quantity": 2,
                "category": "Running",
                "addedAt": "2026-01-01T00:00:00Z"
            }]
        });
        match value {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[tokio::test]
    async fn test_add_to_cart_signed_out_stays_local() {
        let f = fixture();
        let items = f.service.add_to_cart(&product("p1", "$100"), "9", 1).await.unwrap();

        assert_eq!(items.len(), 1);
        assert!(f.remote.get("user-1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_add_to_cart_signed_in_pushes() {
        let f = fixture();
        f.identity.sign_in("user-1");

        f.service.add_to_cart(&product("p1", "$100"), "9", 2).await.unwrap();

        let doc = f.remote.get("user-1").await.unwrap().unwrap();
        assert_eq!(doc["cart"][0]["quantity"], json!(2));
        assert!(doc["cartUpdatedAt"].is_string());
    }

    #[tokio::test]
    async fn test_add_to_cart_invalid_is_returned_and_not_pushed() {
        let f = fixture();
        f.identity.sign_in("user-1");

        let err = f.service.add_to_cart(&product("p1", "$100"), "", 1).await.unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(f.remote.get("user-1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_push_failure_keeps_local_state() {
        let f = fixture();
        f.identity.sign_in("user-1");
        f.remote.set_offline(true);

        let items = f.service.add_to_cart(&product("p1", "$100"), "9", 1).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(f.service.cart().lock().await.item_count(), 1);
    }

    #[tokio::test]
    async fn test_sign_in_loads_remote_cart_once() {
        let f = fixture();
        f.remote.insert("user-1", remote_cart_document()).await;
        f.service.add_to_cart(&product("p1", "$100"), "9", 1).await.unwrap();

        f.identity.sign_in("user-1");
        f.service.on_auth_changed().await;
        {
            let cart = f.service.cart().lock().await;
            assert_eq!(cart.items().len(), 1);
            assert_eq!(cart.items()[0].product_id, "r1");
        }

        // later local changes are not clobbered by a repeated notification
        f.service.add_to_cart(&product("p2", "$50"), "8", 1).await.unwrap();
        f.service.on_auth_changed().await;
        assert_eq!(f.service.cart().lock().await.items().len(), 2);
    }

    #[tokio::test]
    async fn test_sign_in_without_remote_cart_keeps_local() {
        let f = fixture();
        f.service.add_to_cart(&product("p1", "$100"), "9", 1).await.unwrap();

        f.identity.sign_in("user-1");
        f.service.on_auth_changed().await;
        assert_eq!(f.service.cart().lock().await.items()[0].product_id, "p1");
    }

    #[tokio::test]
    async fn test_pull_failure_keeps_local_state() {
        let f = fixture();
        f.service.add_to_cart(&product("p1", "$100"), "9", 1).await.unwrap();
        f.remote.set_offline(true);

        f.identity.sign_in("user-1");
        f.service.pull().await;
        assert_eq!(f.service.cart().lock().await.items()[0].product_id, "p1");
    }
}
