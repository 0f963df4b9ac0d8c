//! Profile measurements use case.

use std::sync::Arc;

use shoesx_core::error::Result;
use shoesx_core::fit::{FootMeasurements, SizeRecommendation, recommend_size};
use shoesx_core::remote::{DocumentPatch, MEASUREMENTS_FIELD, RemoteDocumentStore, UPDATED_AT_FIELD};

/// Reads and writes foot measurements on the user's remote document.
pub struct ProfileService {
    remote: Arc<dyn RemoteDocumentStore>,
}

impl ProfileService {
    pub fn new(remote: Arc<dyn RemoteDocumentStore>) -> Self {
        Self { remote }
    }

    /// Validates and merge-writes `measurements`, stamping `updatedAt`.
    ///
    /// Other fields on the document (including the cart) are left untouched.
    pub async fn save_measurements(&self, user_id: &str, measurements: &FootMeasurements) -> Result<()> {
        measurements.validate()?;

        let patch = DocumentPatch::new()
            .with_field(MEASUREMENTS_FIELD, serde_json::to_value(measurements)?)
            .with_server_timestamp(UPDATED_AT_FIELD);
        self.remote.merge(user_id, patch).await?;

        tracing::info!("[Profile] Saved measurements for {}", user_id);
        Ok(())
    }

    /// Returns the stored measurements, `None` if the user has none.
    pub async fn load_measurements(&self, user_id: &str) -> Result<Option<FootMeasurements>> {
        let Some(document) = self.remote.get(user_id).await? else {
            return Ok(None);
        };
        match document.get(MEASUREMENTS_FIELD) {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(value) => Ok(Some(serde_json::from_value(value.clone())?)),
        }
    }

    /// Size recommendation from the stored measurements.
    pub async fn recommend_for(&self, user_id: &str, category: &str) -> Result<Option<SizeRecommendation>> {
        match self.load_measurements(user_id).await? {
            Some(measurements) => recommend_size(&measurements, category).map(Some),
            None => Ok(None),
        }
    }
}
