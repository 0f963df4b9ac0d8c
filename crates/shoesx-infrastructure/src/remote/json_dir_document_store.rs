//! Remote document store persisted as one JSON file per user.
//!
//! Stands in for a hosted document database when running the CLI locally.
//! Merges are read-modify-write under a single async mutex, so two writers in
//! the same process never interleave.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use tokio::fs;
use tokio::sync::Mutex;

use shoesx_core::error::{Result, ShopError};
use shoesx_core::remote::{Document, DocumentPatch, RemoteDocumentStore};

/// ```text
/// documents_dir/
/// ├── <user_id>.json
/// └── ...
/// ```
#[derive(Debug)]
pub struct JsonDirDocumentStore {
    base_dir: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonDirDocumentStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    fn document_path(&self, user_id: &str) -> Result<PathBuf> {
        let valid = !user_id.is_empty()
            && !user_id.starts_with('.')
            && user_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '@'));
        if !valid {
            return Err(ShopError::invalid_argument(format!("Invalid user id: '{}'", user_id)));
        }
        Ok(self.base_dir.join(format!("{}.json", user_id)))
    }

    async fn read_document(path: &Path) -> Result<Option<Document>> {
        match fs::read_to_string(path).await {
            Ok(content) => {
                let document: Document = serde_json::from_str(&content).map_err(|e| {
                    ShopError::remote_sync(format!("Corrupt document {}: {}", path.display(), e))
                })?;
                Ok(Some(document))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ShopError::remote_sync(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    async fn write_document(&self, path: &Path, document: &Document) -> Result<()> {
        let content = serde_json::to_string_pretty(document)?;
        fs::create_dir_all(&self.base_dir)
            .await
            .map_err(|e| ShopError::remote_sync(format!("Failed to create documents dir: {}", e)))?;

        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, content)
            .await
            .map_err(|e| ShopError::remote_sync(format!("Failed to write document: {}", e)))?;
        fs::rename(&tmp_path, path)
            .await
            .map_err(|e| ShopError::remote_sync(format!("Failed to replace document: {}", e)))
    }
}

#[async_trait]
impl RemoteDocumentStore for JsonDirDocumentStore {
    async fn get(&self, user_id: &str) -> Result<Option<Document>> {
        let path = self.document_path(user_id)?;
        Self::read_document(&path).await
    }

    async fn merge(&self, user_id: &str, patch: DocumentPatch) -> Result<()> {
        let path = self.document_path(user_id)?;
        let _guard = self.write_lock.lock().await;

        let mut document = Self::read_document(&path).await?.unwrap_or_default();
        patch.apply_to(&mut document, Utc::now());
        self.write_document(&path, &document).await?;

        tracing::debug!("[Remote] Merged {} field(s) into {}", patch.fields().len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_merge_then_get() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonDirDocumentStore::new(temp_dir.path().join("documents"));

        assert!(store.get("user-1").await.unwrap().is_none());

        store
            .merge("user-1", DocumentPatch::new().with_field("email", json!("a@b.c")))
            .await
            .unwrap();
        store
            .merge(
                "user-1",
                DocumentPatch::new()
                    .with_field("cart", json!([{"productId": "p1"}]))
                    .with_server_timestamp("cartUpdatedAt"),
            )
            .await
            .unwrap();

        let doc = store.get("user-1").await.unwrap().unwrap();
        assert_eq!(doc["email"], json!("a@b.c"));
        assert_eq!(doc["cart"][0]["productId"], json!("p1"));
        assert!(doc["cartUpdatedAt"].is_string());
        assert!(!temp_dir.path().join("documents/user-1.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_corrupt_document_is_remote_sync_error() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("u.json"), "{not json").unwrap();

        let store = JsonDirDocumentStore::new(temp_dir.path());
        assert!(store.get("u").await.unwrap_err().is_remote_sync());
    }

    #[tokio::test]
    async fn test_rejects_path_like_user_ids() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonDirDocumentStore::new(temp_dir.path());
        assert!(store.get("../etc").await.unwrap_err().is_invalid_argument());
    }
}
