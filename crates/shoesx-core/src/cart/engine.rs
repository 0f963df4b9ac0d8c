//! Cart state engine.
//!
//! Owns the cart line items, persists them to a [`KeyValueStore`] after every
//! mutation and fans out `(items, total, count)` to subscribers. Remote sync
//! is explicit: nothing is pushed to the document store unless the caller asks.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use super::model::{CartLineItem, ProductRef};
use super::store::{DEFAULT_CART_KEY, KeyValueStore};
use crate::error::{Result, ShopError};
use crate::remote::{CART_FIELD, CART_UPDATED_AT_FIELD, Document, DocumentPatch, RemoteDocumentStore};

/// Callback invoked with `(items, total, count)`.
///
/// Callbacks get an immutable snapshot. They cannot mutate the engine from
/// inside the notify loop; cascading mutations belong on the next event turn.
pub type CartCallback = Box<dyn Fn(&[CartLineItem], f64, u32) + Send + Sync>;

/// Handle returned by [`CartEngine::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

/// Order value at which express shipping becomes free.
pub const FREE_SHIPPING_THRESHOLD: f64 = 200.0;

/// Headline numbers shown next to the cart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub item_count: u32,
    pub total: f64,
    pub unique_categories: usize,
    /// Percentage in 88..=99, or 90 for an empty cart
    pub fit_confidence: u32,
    /// Amount still needed for free shipping, never negative
    pub free_shipping_remaining: f64,
}

impl CartSummary {
    /// Derives the summary from a subscriber snapshot.
    pub fn from_snapshot(items: &[CartLineItem], total: f64, count: u32) -> Self {
        let unique_categories = items
            .iter()
            .map(|item| item.category.as_str())
            .collect::<HashSet<_>>()
            .len();

        let fit_confidence = if items.is_empty() {
            90
        } else {
            let volume = count.saturating_mul(2).min(8);
            let variety = unique_categories.min(3) as u32;
            (88 + volume + variety).min(99)
        };

        Self {
            item_count: count,
            total,
            unique_categories,
            fit_confidence,
            free_shipping_remaining: (FREE_SHIPPING_THRESHOLD - total).max(0.0),
        }
    }

    pub fn free_shipping_unlocked(&self) -> bool {
        self.total >= FREE_SHIPPING_THRESHOLD
    }

    /// Item count padded to two digits, e.g. `04`.
    pub fn items_label(&self) -> String {
        format!("{:02}", self.item_count)
    }

    pub fn shipping_label(&self) -> String {
        if self.free_shipping_unlocked() {
            "Free express shipping unlocked".to_string()
        } else {
            format!("Add ${:.0} for free express shipping", self.free_shipping_remaining)
        }
    }
}

pub struct CartEngine {
    items: Vec<CartLineItem>,
    store: Arc<dyn KeyValueStore>,
    storage_key: String,
    /// Ids grow monotonically, so map order is registration order.
    subscribers: BTreeMap<SubscriptionId, CartCallback>,
    next_subscription: u64,
}

impl CartEngine {
    /// Creates an engine backed by `store`, loading any cart saved under the default key.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_storage_key(store, DEFAULT_CART_KEY)
    }

    /// Creates an engine that persists under a custom key.
    pub fn with_storage_key(store: Arc<dyn KeyValueStore>, storage_key: impl Into<String>) -> Self {
        let storage_key = storage_key.into();
        let items = load_from_storage(store.as_ref(), &storage_key);
        Self {
            items,
            store,
            storage_key,
            subscribers: BTreeMap::new(),
            next_subscription: 0,
        }
    }

    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Adds `quantity` of a product variant.
    ///
    /// Repeated adds of the same `(product id, size)` accumulate onto one line.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the product id or size is empty, the quantity is
    /// zero, or the display price cannot be parsed. Nothing is mutated,
    /// persisted or notified in that case.
    pub fn add_item(&mut self, product: &ProductRef, size: &str, quantity: u32) -> Result<&[CartLineItem]> {
        if product.id.trim().is_empty() {
            return Err(ShopError::invalid_argument("Product is required"));
        }
        if size.trim().is_empty() {
            return Err(ShopError::invalid_argument("Size is required"));
        }
        if quantity == 0 {
            return Err(ShopError::invalid_argument("Quantity must be at least 1"));
        }

        match self.items.iter_mut().find(|item| item.matches(&product.id, size)) {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(quantity);
            }
            None => {
                let item = CartLineItem::from_product(product, size, quantity, Utc::now())?;
                self.items.push(item);
            }
        }

        tracing::debug!("[Cart] Added {} x {} ({})", quantity, product.id, size);
        self.commit();
        Ok(&self.items)
    }

    /// Removes the `(product_id, size)` line if present. Absent keys are a no-op.
    pub fn remove_item(&mut self, product_id: &str, size: &str) -> &[CartLineItem] {
        self.items.retain(|item| !item.matches(product_id, size));
        self.commit();
        &self.items
    }

    /// Overwrites the quantity of a line. `quantity <= 0` removes it.
    pub fn update_quantity(&mut self, product_id: &str, size: &str, quantity: i64) -> &[CartLineItem] {
        if quantity <= 0 {
            return self.remove_item(product_id, size);
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);

        if let Some(item) = self.items.iter_mut().find(|item| item.matches(product_id, size)) {
            item.quantity = quantity;
            self.commit();
        }
        &self.items
    }

    /// Sum of `price * quantity` across all lines.
    pub fn total(&self) -> f64 {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    /// Sum of quantities across all lines.
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |count, item| count.saturating_add(item.quantity))
    }

    pub fn summary(&self) -> CartSummary {
        CartSummary::from_snapshot(&self.items, self.total(), self.item_count())
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.commit();
    }

    /// Registers a callback and invokes it once with the current state.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: Fn(&[CartLineItem], f64, u32) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;

        callback(&self.items, self.total(), self.item_count());
        self.subscribers.insert(id, Box::new(callback));
        id
    }

    /// Drops a subscriber. Returns false if the handle was unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.remove(&id).is_some()
    }

    /// Builds the merge-write that mirrors the current cart into a user document.
    pub fn remote_patch(&self) -> Result<DocumentPatch> {
        let cart = serde_json::to_value(&self.items)?;
        Ok(DocumentPatch::new()
            .with_field(CART_FIELD, cart)
            .with_server_timestamp(CART_UPDATED_AT_FIELD))
    }

    /// Replaces local state with the cart carried by a remote document.
    ///
    /// Returns true if the document had a cart and it was applied. A document
    /// without a cart field (or with `null`) leaves local state untouched.
    pub fn apply_remote_document(&mut self, document: &Document) -> bool {
        let Some(cart) = document.get(CART_FIELD).filter(|value| !value.is_null()) else {
            return false;
        };

        match serde_json::from_value::<Vec<CartLineItem>>(cart.clone()) {
            Ok(items) => {
                self.items = sanitize(items);
                self.commit();
                true
            }
            Err(e) => {
                tracing::error!("[Cart] Remote cart has an unexpected shape: {}", e);
                false
            }
        }
    }

    /// Pushes the cart to the user's remote document.
    ///
    /// No-op if either argument is absent. Failures are logged, never returned.
    pub async fn save_to_remote(&self, user_id: Option<&str>, remote: Option<&dyn RemoteDocumentStore>) {
        let (Some(user_id), Some(remote)) = (user_id, remote) else {
            return;
        };

        let patch = match self.remote_patch() {
            Ok(patch) => patch,
            Err(e) => {
                tracing::error!("[Cart] Failed to serialize cart for remote save: {}", e);
                return;
            }
        };

        match remote.merge(user_id, patch).await {
            Ok(()) => tracing::debug!("[Cart] Saved cart to remote for {}", user_id),
            Err(e) => tracing::error!("[Cart] Failed to save cart to remote: {}", e),
        }
    }

    /// Loads the user's remote cart, replacing local state if one exists.
    ///
    /// No-op if either argument is absent. Failures are logged, never returned,
    /// and never roll back local state.
    pub async fn load_from_remote(&mut self, user_id: Option<&str>, remote: Option<&dyn RemoteDocumentStore>) {
        let (Some(user_id), Some(remote)) = (user_id, remote) else {
            return;
        };

        match remote.get(user_id).await {
            Ok(Some(document)) => {
                if self.apply_remote_document(&document) {
                    tracing::info!("[Cart] Loaded {} line(s) from remote", self.items.len());
                }
            }
            Ok(None) => tracing::debug!("[Cart] No remote document for {}", user_id),
            Err(e) => tracing::error!("[Cart] Failed to load cart from remote: {}", e),
        }
    }

    fn commit(&self) {
        self.save_to_storage();
        self.notify();
    }

    fn save_to_storage(&self) {
        let serialized = match serde_json::to_string(&self.items) {
            Ok(serialized) => serialized,
            Err(e) => {
                tracing::error!("[Cart] Failed to serialize cart: {}", e);
                return;
            }
        };
        if let Err(e) = self.store.set(&self.storage_key, &serialized) {
            tracing::error!("[Cart] Failed to save cart to storage: {}", e);
        }
    }

    fn notify(&self) {
        let total = self.total();
        let count = self.item_count();
        for callback in self.subscribers.values() {
            callback(&self.items, total, count);
        }
    }
}

fn load_from_storage(store: &dyn KeyValueStore, key: &str) -> Vec<CartLineItem> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::error!("[Cart] Failed to load cart from storage: {}", e);
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<CartLineItem>>(&raw) {
        Ok(items) => sanitize(items),
        Err(e) => {
            tracing::warn!("[Cart] Stored cart is corrupt, starting empty: {}", e);
            Vec::new()
        }
    }
}

/// Drops zero-quantity lines and folds duplicate `(product id, size)` keys.
fn sanitize(items: Vec<CartLineItem>) -> Vec<CartLineItem> {
    let mut clean: Vec<CartLineItem> = Vec::with_capacity(items.len());
    for item in items {
        if item.quantity == 0 || item.size.is_empty() {
            continue;
        }
        match clean.iter_mut().find(|kept| kept.matches(&item.product_id, &item.size)) {
            Some(kept) => kept.quantity = kept.quantity.saturating_add(item.quantity),
            None => clean.push(item),
        }
    }
    clean
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct TestStore {
        values: Mutex<HashMap<String, String>>,
        fail_writes: bool,
    }

    impl KeyValueStore for TestStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            Ok(self.values.lock().unwrap().get(key).cloned())
        }

        fn set(&self, key: &str, value: &str) -> Result<()> {
            if self.fail_writes {
                return Err(ShopError::storage("quota exceeded"));
            }
            self.values.lock().unwrap().insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn remove(&self, key: &str) -> Result<()> {
            self.values.lock().unwrap().remove(key);
            Ok(())
        }
    }

    #[derive(Default)]
    struct TestRemote {
        documents: Mutex<HashMap<String, Document>>,
        offline: bool,
    }

    #[async_trait]
    impl RemoteDocumentStore for TestRemote {
        async fn get(&self, user_id: &str) -> Result<Option<Document>> {
            if self.offline {
                return Err(ShopError::remote_sync("offline"));
            }
            Ok(self.documents.lock().unwrap().get(user_id).cloned())
        }

        async fn merge(&self, user_id: &str, patch: DocumentPatch) -> Result<()> {
            if self.offline {
                return Err(ShopError::remote_sync("offline"));
            }
            let mut documents = self.documents.lock().unwrap();
            let document = documents.entry(user_id.to_string()).or_default();
            patch.apply_to(document, Utc::now());
            Ok(())
        }
    }

    fn shoe_a() -> ProductRef {
        ProductRef::new("p1", "Shoe A", "$100", "x", "Running")
    }

    fn engine() -> (CartEngine, Arc<TestStore>) {
        let store = Arc::new(TestStore::default());
        (CartEngine::new(store.clone()), store)
    }

    #[test]
    fn test_add_update_remove_scenario() {
        let (mut cart, _) = engine();

        cart.add_item(&shoe_a(), "UK 9", 1).unwrap();
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 1);
        assert_eq!(cart.total(), 100.0);

        cart.add_item(&shoe_a(), "UK 9", 2).unwrap();
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 3);
        assert_eq!(cart.total(), 300.0);

        cart.update_quantity("p1", "UK 9", 0);
        assert!(cart.is_empty());
        assert_eq!(cart.total(), 0.0);
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_same_product_different_size_is_separate_line() {
        let (mut cart, _) = engine();
        cart.add_item(&shoe_a(), "UK 9", 1).unwrap();
        cart.add_item(&shoe_a(), "UK 10", 1).unwrap();

        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_add_rejects_missing_fields_without_side_effects() {
        let (mut cart, store) = engine();
        let calls = Arc::new(Mutex::new(0));
        let counter = calls.clone();
        cart.subscribe(move |_, _, _| *counter.lock().unwrap() += 1);

        let err = cart.add_item(&shoe_a(), "", 1).unwrap_err();
        assert!(err.is_invalid_argument());

        let nameless = ProductRef::new("", "Ghost", "$10", "", "");
        assert!(cart.add_item(&nameless, "UK 9", 1).unwrap_err().is_invalid_argument());
        assert!(cart.add_item(&shoe_a(), "UK 9", 0).unwrap_err().is_invalid_argument());

        let bad_price = ProductRef::new("p2", "Shoe B", "call us", "", "");
        assert!(cart.add_item(&bad_price, "UK 9", 1).unwrap_err().is_invalid_argument());

        assert!(cart.is_empty());
        assert_eq!(*calls.lock().unwrap(), 1, "only the initial subscribe call");
        assert!(store.get(DEFAULT_CART_KEY).unwrap().is_none());
    }

    #[test]
    fn test_update_quantity_overwrites_and_ignores_unknown() {
        let (mut cart, _) = engine();
        cart.add_item(&shoe_a(), "UK 9", 2).unwrap();

        cart.update_quantity("p1", "UK 9", 5);
        assert_eq!(cart.items()[0].quantity, 5);

        cart.update_quantity("missing", "UK 9", 4);
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn test_update_to_negative_matches_remove() {
        let (mut a, _) = engine();
        let (mut b, _) = engine();
        for cart in [&mut a, &mut b] {
            cart.add_item(&shoe_a(), "UK 9", 1).unwrap();
            cart.add_item(&shoe_a(), "UK 8", 1).unwrap();
        }

        a.update_quantity("p1", "UK 9", -3);
        b.remove_item("p1", "UK 9");

        let strip = |items: &[CartLineItem]| {
            items
                .iter()
                .map(|i| (i.product_id.clone(), i.size.clone(), i.quantity))
                .collect::<Vec<_>>()
        };
        assert_eq!(strip(a.items()), strip(b.items()));
    }

    #[test]
    fn test_remove_missing_is_idempotent() {
        let (mut cart, _) = engine();
        cart.add_item(&shoe_a(), "UK 9", 1).unwrap();

        let first = cart.remove_item("nope", "UK 9").to_vec();
        let second = cart.remove_item("nope", "UK 9").to_vec();
        assert_eq!(first, second);
        assert_eq!(first.len(), 1);
    }

    #[test]
    fn test_totals_track_mixed_prices() {
        let (mut cart, _) = engine();
        cart.add_item(&shoe_a(), "UK 9", 2).unwrap();
        cart.add_item(&ProductRef::new("p2", "Shoe B", "$49.50", "", "Casual"), "UK 7", 3)
            .unwrap();

        assert!((cart.total() - 348.5).abs() < 1e-9);
        assert_eq!(cart.item_count(), 5);

        cart.clear();
        assert_eq!(cart.total(), 0.0);
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_subscribers_notified_in_registration_order() {
        let (mut cart, _) = engine();
        let log = Arc::new(Mutex::new(Vec::new()));

        let first = log.clone();
        cart.subscribe(move |_, _, count| first.lock().unwrap().push(("first", count)));
        let second = log.clone();
        let handle = cart.subscribe(move |_, _, count| second.lock().unwrap().push(("second", count)));

        cart.add_item(&shoe_a(), "UK 9", 2).unwrap();
        assert_eq!(
            *log.lock().unwrap(),
            vec![("first", 0), ("second", 0), ("first", 2), ("second", 2)]
        );

        assert!(cart.unsubscribe(handle));
        assert!(!cart.unsubscribe(handle));
        cart.clear();
        assert_eq!(log.lock().unwrap().last(), Some(&("first", 0)));
        assert_eq!(log.lock().unwrap().len(), 5);
    }

    #[test]
    fn test_local_round_trip_through_fresh_engine() {
        let (mut cart, store) = engine();
        cart.add_item(&shoe_a(), "UK 9", 2).unwrap();
        cart.add_item(&ProductRef::new("p2", "Shoe B", "$80", "b.png", "Casual"), "UK 6", 1)
            .unwrap();

        let reloaded = CartEngine::new(store);
        assert_eq!(reloaded.items(), cart.items());
    }

    #[test]
    fn test_corrupt_storage_yields_empty_cart() {
        let store = Arc::new(TestStore::default());
        store.set(DEFAULT_CART_KEY, "{definitely not a cart").unwrap();

        let cart = CartEngine::new(store);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_storage_failure_keeps_memory_state() {
        let store = Arc::new(TestStore {
            fail_writes: true,
            ..Default::default()
        });
        let mut cart = CartEngine::new(store);

        cart.add_item(&shoe_a(), "UK 9", 1).unwrap();
        assert_eq!(cart.item_count(), 1);
    }

    #[tokio::test]
    async fn test_remote_round_trip() {
        let remote = TestRemote::default();
        let (mut cart, _) = engine();
        cart.add_item(&shoe_a(), "UK 9", 2).unwrap();
        cart.save_to_remote(Some("user-1"), Some(&remote)).await;

        {
            let documents = remote.documents.lock().unwrap();
            let doc = &documents["user-1"];
            assert_eq!(doc[CART_FIELD][0]["quantity"], json!(2));
            assert!(doc.contains_key(CART_UPDATED_AT_FIELD));
        }

        let (mut other, other_store) = engine();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        other.subscribe(move |_, total, _| sink.lock().unwrap().push(total));

        other.load_from_remote(Some("user-1"), Some(&remote)).await;
        assert_eq!(other.items(), cart.items());
        assert_eq!(*seen.lock().unwrap(), vec![0.0, 200.0]);
        assert!(other_store.get(DEFAULT_CART_KEY).unwrap().is_some());
    }

    #[tokio::test]
    async fn test_remote_calls_without_user_or_store_are_noops() {
        let remote = TestRemote::default();
        let (mut cart, _) = engine();
        cart.add_item(&shoe_a(), "UK 9", 1).unwrap();

        cart.save_to_remote(None, Some(&remote)).await;
        cart.save_to_remote(Some("user-1"), None).await;
        assert!(remote.documents.lock().unwrap().is_empty());

        cart.load_from_remote(None, Some(&remote)).await;
        assert_eq!(cart.item_count(), 1);
    }

    #[tokio::test]
    async fn test_remote_failure_is_swallowed() {
        let remote = TestRemote {
            offline: true,
            ..Default::default()
        };
        let (mut cart, _) = engine();
        cart.add_item(&shoe_a(), "UK 9", 1).unwrap();

        cart.save_to_remote(Some("user-1"), Some(&remote)).await;
        cart.load_from_remote(Some("user-1"), Some(&remote)).await;
        assert_eq!(cart.item_count(), 1);
    }

    #[tokio::test]
    async fn test_remote_document_without_cart_leaves_state() {
        let remote = TestRemote::default();
        remote
            .merge("user-1", DocumentPatch::new().with_field("email", json!("a@b.c")))
            .await
            .unwrap();

        let (mut cart, _) = engine();
        cart.add_item(&shoe_a(), "UK 9", 1).unwrap();
        cart.load_from_remote(Some("user-1"), Some(&remote)).await;
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_apply_remote_document_with_empty_cart_clears() {
        let (mut cart, _) = engine();
        cart.add_item(&shoe_a(), "UK 9", 1).unwrap();

        let doc = json!({ "cart": [] }).as_object().cloned().unwrap();
        assert!(cart.apply_remote_document(&doc));
        assert!(cart.is_empty());
    }

    fn line(product_id: &str, size: &str, quantity: u32, category: &str) -> serde_json::Value {
        json!({
            "productId": product_id,
            "productName": "Stored",
            "price": 50.0,
            "size": size,
            "quantity": quantity,
            "category": category,
            "addedAt": "2026-01-01T00:00:00Z"
        })
    }

    fn dirty_cart() -> serde_json::Value {
        json!([
            line("p1", "UK 9", 1, "Running"),
            line("p2", "UK 8", 0, "Running"),
            line("p1", "UK 9", 2, "Running"),
            line("p3", "", 1, "Hiking"),
            line("p1", "UK 10", 1, "Running"),
        ])
    }

    fn assert_sanitized(cart: &CartEngine) {
        let lines: Vec<(&str, &str, u32)> = cart
            .items()
            .iter()
            .map(|item| (item.product_id.as_str(), item.size.as_str(), item.quantity))
            .collect();
        assert_eq!(lines, vec![("p1", "UK 9", 3), ("p1", "UK 10", 1)]);
        assert_eq!(cart.item_count(), 4);
    }

    #[test]
    fn test_stored_cart_is_sanitized_on_load() {
        let store = Arc::new(TestStore::default());
        store.set(DEFAULT_CART_KEY, &dirty_cart().to_string()).unwrap();

        let cart = CartEngine::new(store);
        assert_sanitized(&cart);
    }

    #[test]
    fn test_remote_cart_is_sanitized_on_apply() {
        let (mut cart, store) = engine();
        let doc = json!({ "cart": dirty_cart() }).as_object().cloned().unwrap();

        assert!(cart.apply_remote_document(&doc));
        assert_sanitized(&cart);

        // the sanitized form is what gets persisted
        let reloaded = CartEngine::new(store);
        assert_sanitized(&reloaded);
    }

    #[test]
    fn test_summary_of_empty_cart() {
        let (cart, _) = engine();
        let summary = cart.summary();

        assert_eq!(summary.fit_confidence, 90);
        assert_eq!(summary.unique_categories, 0);
        assert_eq!(summary.free_shipping_remaining, 200.0);
        assert!(!summary.free_shipping_unlocked());
        assert_eq!(summary.items_label(), "00");
        assert_eq!(summary.shipping_label(), "Add $200 for free express shipping");
    }

    #[test]
    fn test_summary_fit_confidence_grows_and_caps() {
        let (mut cart, _) = engine();
        cart.add_item(&shoe_a(), "UK 9", 1).unwrap();
        // 88 + 2 (one item) + 1 (one category)
        assert_eq!(cart.summary().fit_confidence, 91);

        cart.add_item(&ProductRef::new("p2", "B", "$1", "", "Hiking"), "UK 9", 1).unwrap();
        cart.add_item(&ProductRef::new("p3", "C", "$1", "", "Lifestyle"), "UK 9", 1).unwrap();
        cart.add_item(&ProductRef::new("p4", "D", "$1", "", "Trail"), "UK 9", 10).unwrap();
        let summary = cart.summary();
        assert_eq!(summary.unique_categories, 4);
        assert_eq!(summary.fit_confidence, 99);
    }

    #[test]
    fn test_summary_free_shipping_threshold() {
        let (mut cart, _) = engine();
        cart.add_item(&shoe_a(), "UK 9", 1).unwrap();
        let summary = cart.summary();
        assert_eq!(summary.free_shipping_remaining, 100.0);
        assert_eq!(summary.shipping_label(), "Add $100 for free express shipping");

        cart.add_item(&shoe_a(), "UK 9", 1).unwrap();
        let summary = cart.summary();
        assert_eq!(summary.total, 200.0);
        assert_eq!(summary.free_shipping_remaining, 0.0);
        assert!(summary.free_shipping_unlocked());
        assert_eq!(summary.shipping_label(), "Free express shipping unlocked");

        cart.add_item(&shoe_a(), "UK 9", 1).unwrap();
        assert_eq!(cart.summary().free_shipping_remaining, 0.0);
    }

    #[test]
    fn test_summary_from_subscriber_snapshot() {
        let (mut cart, _) = engine();
        cart.add_item(&shoe_a(), "UK 9", 2).unwrap();

        let seen = Arc::new(Mutex::new(None));
        let sink = seen.clone();
        cart.subscribe(move |items, total, count| {
            *sink.lock().unwrap() = Some(CartSummary::from_snapshot(items, total, count));
        });

        assert_eq!(seen.lock().unwrap().clone(), Some(cart.summary()));
    }
}
