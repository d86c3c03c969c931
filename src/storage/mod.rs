//! Persistence behind the `KeyValueStore` seam

pub mod file;
pub mod kv;
pub mod recency;
pub mod settings;

pub use file::JsonFileStore;
pub use kv::{KeyValueStore, MemoryStore, DRAFT_INPUT_KEY, RECENT_LENS_IDS_KEY, SETTINGS_KEY};
pub use recency::{push_recent, RecencyStore};
pub use settings::{DraftStore, SettingsStore};
