//! In-memory remote document store.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use shoesx_core::error::{Result, ShopError};
use shoesx_core::remote::{Document, DocumentPatch, RemoteDocumentStore};

/// [`RemoteDocumentStore`] backed by a shared map. Clones see the same documents.
///
/// `set_offline(true)` makes every call fail with `RemoteSync`, which is how
/// tests exercise the log-and-continue paths.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentStore {
    documents: Arc<RwLock<HashMap<String, Document>>>,
    offline: Arc<AtomicBool>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Replaces a user's document wholesale.
    pub async fn insert(&self, user_id: impl Into<String>, document: Document) {
        self.documents.write().await.insert(user_id.into(), document);
    }

    fn check_online(&self) -> Result<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(ShopError::remote_sync("Document store is offline"));
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteDocumentStore for MemoryDocumentStore {
    async fn get(&self, user_id: &str) -> Result<Option<Document>> {
        self.check_online()?;
        Ok(self.documents.read().await.get(user_id).cloned())
    }

    async fn merge(&self, user_id: &str, patch: DocumentPatch) -> Result<()> {
        self.check_online()?;
        let mut documents = self.documents.write().await;
        let document = documents.entry(user_id.to_string()).or_default();
        patch.apply_to(document, Utc::now());
        Ok(())
    }
}
