//! Bounded most-recent-first history of shown lens ids

use std::sync::Arc;

use serde_json::Value;

use crate::core::error::Result;
use crate::core::types::LensId;
use crate::storage::kv::{KeyValueStore, RECENT_LENS_IDS_KEY};

/// Put `id` at the front and keep at most `window` entries
///
/// Earlier occurrences of `id` are left in place and age out through
/// truncation.
pub fn push_recent(mut history: Vec<LensId>, id: LensId, window: usize) -> Vec<LensId> {
    history.insert(0, id);
    history.truncate(window);
    history
}

/// History persisted under a single key
///
/// The window is passed per call since settings may change between
/// writes. Reads never re-truncate.
#[derive(Clone)]
pub struct RecencyStore {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl RecencyStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(store, RECENT_LENS_IDS_KEY)
    }

    pub fn with_key(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Current history, empty if nothing was recorded yet
    pub async fn read(&self) -> Result<Vec<LensId>> {
        match self.store.get(&self.key).await? {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(value) => Ok(serde_json::from_value(value)?),
        }
    }

    /// Record `id` as just shown and persist the truncated history
    ///
    /// Returns the history that was written.
    pub async fn record(&self, id: LensId, window: usize) -> Result<Vec<LensId>> {
        let history = push_recent(self.read().await?, id, window);
        self.store
            .set(&self.key, serde_json::to_value(&history)?)
            .await?;
        tracing::debug!(len = history.len(), window, "Recorded recent lens");
        Ok(history)
    }

    /// Forget every recorded id
    pub async fn clear(&self) -> Result<()> {
        self.store.set(&self.key, Value::Array(Vec::new())).await
    }
}
