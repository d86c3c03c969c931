//! Key-value store persisted as one JSON object on disk

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use crate::core::error::{LensError, Result};
use crate::storage::kv::KeyValueStore;

/// File-backed store
///
/// All keys live in a single JSON object. Writes go to a sibling temp
/// file which is then renamed over the original, so readers see either
/// the old object or the new one.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<Map<String, Value>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(unavailable(&self.path, "read", e)),
        };

        if contents.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&contents) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(LensError::StorageUnavailable(format!(
                "{:?} does not hold a JSON object",
                self.path
            ))),
            Err(e) => Err(unavailable(&self.path, "parse", e)),
        }
    }

    async fn write_all(&self, map: &Map<String, Value>) -> Result<()> {
        let contents = serde_json::to_string_pretty(map)?;
        let tmp_path = self.path.with_extension("json.tmp");

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| unavailable(parent, "create directory", e))?;
            }
        }

        tokio::fs::write(&tmp_path, contents)
            .await
            .map_err(|e| unavailable(&tmp_path, "write", e))?;
        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|e| unavailable(&self.path, "replace", e))?;
        Ok(())
    }
}

fn unavailable(path: &Path, action: &str, err: impl std::fmt::Display) -> LensError {
    LensError::StorageUnavailable(format!("Failed to {} {:?}: {}", action, path, err))
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let mut map = self.read_all().await?;
        Ok(map.remove(key))
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut map = self.read_all().await?;
        map.insert(key.to_string(), value);
        self.write_all(&map).await?;
        tracing::trace!(key, path = %self.path.display(), "Persisted key");
        Ok(())
    }
}
