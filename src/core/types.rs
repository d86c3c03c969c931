//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a lens within its deck
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LensId(pub String);

impl LensId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LensId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LensId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for LensId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A single displayable perspective
///
/// The principle is shown up front; prompts and the counter-perspective
/// are revealed when the user expands the reflect view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lens {
    pub id: LensId,
    pub principle: String,
    /// Reflection prompts, in display order
    #[serde(default)]
    pub prompts: Vec<String>,
    /// Counter-perspective text
    #[serde(default)]
    pub counter: String,
}

impl Lens {
    pub fn new(id: impl Into<LensId>, principle: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            principle: principle.into(),
            prompts: Vec::new(),
            counter: String::new(),
        }
    }

    pub fn with_prompts<I, S>(mut self, prompts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prompts = prompts.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_counter(mut self, counter: impl Into<String>) -> Self {
        self.counter = counter.into();
        self
    }
}
