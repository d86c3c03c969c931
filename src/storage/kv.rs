//! Key-value storage seam
//!
//! Everything persisted by a session goes through this trait: the recent
//! lens history, the settings record and the draft text.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::core::error::Result;

/// Storage key for the most-recent-first history of shown lens ids
pub const RECENT_LENS_IDS_KEY: &str = "recentLensIds";

/// Storage key for the user settings record
pub const SETTINGS_KEY: &str = "settings";

/// Storage key for the unsent draft text
pub const DRAFT_INPUT_KEY: &str = "draftInput";

/// Async get/set store with last-write-wins semantics
///
/// `get` returns `None` for a key that has never been written. Failures
/// are reported as `LensError::StorageUnavailable` and never retried.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Replace the value under `key` in a single write
    async fn set(&self, key: &str, value: Value) -> Result<()>;
}

/// Process-local store, lost when the session ends
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        self.values.write().await.insert(key.to_string(), value);
        Ok(())
    }
}
