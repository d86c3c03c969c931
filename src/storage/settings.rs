//! Settings and draft text persistence

use std::sync::Arc;

use serde_json::Value;

use crate::core::config::Settings;
use crate::core::error::Result;
use crate::storage::kv::{KeyValueStore, DRAFT_INPUT_KEY, SETTINGS_KEY};

/// Reads and writes the settings record
#[derive(Clone)]
pub struct SettingsStore {
    store: Arc<dyn KeyValueStore>,
    defaults: Settings,
}

impl SettingsStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_defaults(store, Settings::default())
    }

    /// Use `defaults` when nothing has been saved yet
    pub fn with_defaults(store: Arc<dyn KeyValueStore>, defaults: Settings) -> Self {
        Self { store, defaults }
    }

    pub fn defaults(&self) -> &Settings {
        &self.defaults
    }

    /// Saved settings, or the defaults on first read
    pub async fn load(&self) -> Result<Settings> {
        match self.store.get(SETTINGS_KEY).await? {
            None => Ok(self.defaults.clone()),
            Some(value) => Ok(Settings::from_value(&value)),
        }
    }

    pub async fn save(&self, settings: &Settings) -> Result<()> {
        self.store.set(SETTINGS_KEY, settings.to_value()).await
    }

    /// Layer explicit overrides on the saved settings and persist them
    ///
    /// An unreadable store starts from the defaults and a failed write is
    /// logged. Returns the settings to use if the store stays unreadable.
    pub async fn apply_overrides(
        &self,
        anti_repeat_n: Option<usize>,
        show_input: Option<bool>,
    ) -> Settings {
        let mut settings = match self.load().await {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(error = %e, "Could not read settings, overriding defaults");
                self.defaults.clone()
            }
        };

        if anti_repeat_n.is_none() && show_input.is_none() {
            return settings;
        }
        if let Some(n) = anti_repeat_n {
            settings.anti_repeat_n = n;
        }
        if let Some(show) = show_input {
            settings.show_input = show;
        }

        match self.save(&settings).await {
            Ok(()) => tracing::info!(
                anti_repeat_n = settings.anti_repeat_n,
                show_input = settings.show_input,
                "Saved settings"
            ),
            Err(e) => tracing::warn!(error = %e, "Settings override not saved"),
        }
        settings
    }
}

/// Reads and writes the draft input text
#[derive(Clone)]
pub struct DraftStore {
    store: Arc<dyn KeyValueStore>,
}

impl DraftStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Saved draft, empty when none
    pub async fn load(&self) -> Result<String> {
        Ok(match self.store.get(DRAFT_INPUT_KEY).await? {
            Some(Value::String(text)) => text,
            _ => String::new(),
        })
    }

    pub async fn save(&self, text: &str) -> Result<()> {
        self.store
            .set(DRAFT_INPUT_KEY, Value::String(text.to_string()))
            .await
    }
}
