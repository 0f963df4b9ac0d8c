//! Remote per-user document store abstraction.
//!
//! The store is addressed by user identifier and holds one JSON document per
//! user. Writes are partial merges; reads return the whole document.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};

use crate::error::Result;

/// A full user document as returned by [`RemoteDocumentStore::get`].
pub type Document = Map<String, Value>;

/// Field holding the user's cart line items.
pub const CART_FIELD: &str = "cart";
/// Server-stamped time of the last cart push.
pub const CART_UPDATED_AT_FIELD: &str = "cartUpdatedAt";
/// Field holding the user's foot measurements.
pub const MEASUREMENTS_FIELD: &str = "measurements";
/// Server-stamped time of the last profile write.
pub const UPDATED_AT_FIELD: &str = "updatedAt";

/// A partial write to a user document.
///
/// `fields` are merged into the document. Fields listed in
/// `server_timestamps` are stamped with the store's own clock when the patch
/// is applied, never with a client-supplied value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentPatch {
    fields: Document,
    server_timestamps: Vec<String>,
}

impl DocumentPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a plain field to the patch.
    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    /// Marks a field to be stamped with the server time.
    pub fn with_server_timestamp(mut self, name: impl Into<String>) -> Self {
        self.server_timestamps.push(name.into());
        self
    }

    pub fn fields(&self) -> &Document {
        &self.fields
    }

    pub fn server_timestamp_fields(&self) -> &[String] {
        &self.server_timestamps
    }

    /// Merges this patch into `document`, stamping timestamp fields with `now`.
    ///
    /// Nested objects merge key by key; every other value (arrays included)
    /// replaces what was there.
    pub fn apply_to(&self, document: &mut Document, now: DateTime<Utc>) {
        for (name, value) in &self.fields {
            merge_value(document, name, value);
        }
        let stamp = Value::String(now.to_rfc3339_opts(SecondsFormat::Millis, true));
        for name in &self.server_timestamps {
            document.insert(name.clone(), stamp.clone());
        }
    }
}

fn merge_value(target: &mut Document, name: &str, value: &Value) {
    match (target.get_mut(name), value) {
        (Some(Value::Object(existing)), Value::Object(incoming)) => {
            for (key, nested) in incoming {
                merge_value(existing, key, nested);
            }
        }
        _ => {
            target.insert(name.to_string(), value.clone());
        }
    }
}

/// Per-user document service.
///
/// Implementations report transport problems as `ShopError::RemoteSync`.
#[async_trait]
pub trait RemoteDocumentStore: Send + Sync {
    /// Reads the whole document for `user_id`, `None` if it does not exist.
    async fn get(&self, user_id: &str) -> Result<Option<Document>>;

    /// Merge-writes `patch` into the document for `user_id`, creating it if needed.
    async fn merge(&self, user_id: &str, patch: DocumentPatch) -> Result<()>;
}
