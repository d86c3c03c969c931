//! Process configuration and persisted user settings
//!
//! `PopupConfig` is read once from TOML at startup and says where things
//! live. `Settings` is the user-facing record kept in the key-value store
//! under the settings key.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::{LensError, Result};

/// Anti-repeat window used when no settings have been persisted yet
pub const DEFAULT_ANTI_REPEAT_N: usize = 7;

/// Deck shipped with the binary
pub const DEFAULT_DECK_PATH: &str = "data/lenses.en.json";

/// Store file used when none is configured
pub const DEFAULT_STORE_PATH: &str = "lens-store.json";

/// Log filter used when neither RUST_LOG nor the config sets one
pub const DEFAULT_LOG_FILTER: &str = "lens=info";

/// User settings persisted under the settings key
///
/// Stored as `{ "antiRepeatN": .., "showInput": .. }`, read back through
/// `from_value` so malformed records are normalized instead of rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Window size N; the recorded history is truncated to this length
    pub anti_repeat_n: usize,
    /// Whether the draft input area is shown
    pub show_input: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            anti_repeat_n: DEFAULT_ANTI_REPEAT_N,
            show_input: true,
        }
    }
}

impl Settings {
    /// Build settings from a persisted value
    ///
    /// `antiRepeatN` that is missing, non-numeric or negative becomes 0
    /// (no anti-repeat). Fractional values are floored. A missing
    /// `showInput` keeps its default of true. This is the only place
    /// malformed settings are normalized.
    pub fn from_value(value: &Value) -> Self {
        let anti_repeat_n = match value.get("antiRepeatN") {
            Some(Value::Number(n)) => {
                if let Some(u) = n.as_u64() {
                    usize::try_from(u).unwrap_or(usize::MAX)
                } else {
                    match n.as_f64() {
                        Some(f) if f.is_finite() && f >= 0.0 => f.floor() as usize,
                        _ => 0,
                    }
                }
            }
            _ => 0,
        };

        let show_input = value
            .get("showInput")
            .and_then(Value::as_bool)
            .unwrap_or(true);

        Self {
            anti_repeat_n,
            show_input,
        }
    }

    pub fn to_value(&self) -> Value {
        serde_json::json!({
            "antiRepeatN": self.anti_repeat_n,
            "showInput": self.show_input,
        })
    }
}

/// Configuration for a popup session
///
/// Every field has a default, so an empty TOML file is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopupConfig {
    /// JSON file holding the deck
    pub deck_path: PathBuf,

    /// JSON file backing the key-value store
    pub store_path: PathBuf,

    /// Fixed seed for the selection rng; entropy when absent
    pub seed: Option<u64>,

    /// tracing-subscriber filter directive
    pub log_filter: String,

    /// Settings written on first run, before the user has saved any
    pub initial_settings: Option<InitialSettings>,
}

/// Optional first-run settings in the TOML config
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitialSettings {
    pub anti_repeat_n: Option<usize>,
    pub show_input: Option<bool>,
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            deck_path: PathBuf::from(DEFAULT_DECK_PATH),
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            seed: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            initial_settings: None,
        }
    }
}

impl PopupConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| LensError::Config(format!("Failed to parse config TOML: {}", e)))
    }

    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            LensError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;
        Self::from_toml_str(&contents)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.deck_path.as_os_str().is_empty() {
            return Err("deck_path must not be empty".into());
        }

        if self.store_path.as_os_str().is_empty() {
            return Err("store_path must not be empty".into());
        }

        if self.deck_path == self.store_path {
            return Err(format!(
                "deck_path and store_path must differ (both {:?})",
                self.deck_path
            ));
        }

        Ok(())
    }

    /// Settings to persist when the store has none yet
    pub fn first_run_settings(&self) -> Settings {
        let mut settings = Settings::default();
        if let Some(initial) = &self.initial_settings {
            if let Some(n) = initial.anti_repeat_n {
                settings.anti_repeat_n = n;
            }
            if let Some(show) = initial.show_input {
                settings.show_input = show;
            }
        }
        settings
    }
}
