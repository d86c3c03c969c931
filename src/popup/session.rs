//! A single popup session
//!
//! Owns the transient state (lens on screen, reflect view, draft text)
//! and sequences every refresh as read settings, read history, select,
//! record. The selection is shown even when recording it fails; the
//! outcome reports whether the history write went through.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;

use crate::core::config::Settings;
use crate::core::error::Result;
use crate::core::types::{Lens, LensId};
use crate::deck::Deck;
use crate::selection::select_next;
use crate::storage::{DraftStore, KeyValueStore, RecencyStore, SettingsStore};

/// Result of asking for a new lens
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// A lens is now on screen
    Shown {
        id: LensId,
        /// False when the history write failed
        recorded: bool,
    },
    /// The deck is empty; nothing was shown
    Empty,
}

pub struct LensSession {
    deck: Deck,
    recency: RecencyStore,
    settings: SettingsStore,
    drafts: DraftStore,
    rng: ChaCha8Rng,
    current: Option<Lens>,
    reflect_expanded: bool,
    draft: String,
    show_input: bool,
}

impl LensSession {
    /// Session over `store` with settings defaults of `defaults`
    ///
    /// A `seed` makes every pick reproducible.
    pub fn new(
        deck: Deck,
        store: Arc<dyn KeyValueStore>,
        defaults: Settings,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let show_input = defaults.show_input;

        Self {
            deck,
            recency: RecencyStore::new(store.clone()),
            settings: SettingsStore::with_defaults(store.clone(), defaults),
            drafts: DraftStore::new(store),
            rng,
            current: None,
            reflect_expanded: false,
            draft: String::new(),
            show_input,
        }
    }

    /// Open the popup: restore the draft and show the first lens
    pub async fn start(&mut self) -> RefreshOutcome {
        let settings = self.load_settings().await;
        self.show_input = settings.show_input;

        if self.show_input {
            match self.drafts.load().await {
                Ok(draft) => self.draft = draft,
                Err(e) => tracing::warn!(error = %e, "Could not restore draft"),
            }
        }

        self.refresh().await
    }

    /// Replace the lens on screen with a new one
    pub async fn refresh(&mut self) -> RefreshOutcome {
        let settings = self.load_settings().await;
        let history = match self.recency.read().await {
            Ok(history) => history,
            Err(e) => {
                tracing::warn!(error = %e, "Could not read history, using empty history");
                Vec::new()
            }
        };

        let current_id = self.current.as_ref().map(|lens| lens.id.clone());
        let Some(next) = select_next(
            self.deck.lenses(),
            &history,
            settings.anti_repeat_n,
            current_id.as_ref(),
            &mut self.rng,
        ) else {
            tracing::info!("Deck is empty, nothing to display");
            return RefreshOutcome::Empty;
        };

        let next = next.clone();
        let id = next.id.clone();
        self.current = Some(next);
        self.reflect_expanded = false;

        let recorded = match self.recency.record(id.clone(), settings.anti_repeat_n).await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(error = %e, lens = %id, "Shown lens was not recorded");
                false
            }
        };

        tracing::debug!(lens = %id, recorded, "Showing lens");
        RefreshOutcome::Shown { id, recorded }
    }

    /// Flip the reflect view, or force it open or closed
    pub fn toggle_reflect(&mut self, force: Option<bool>) -> bool {
        self.reflect_expanded = force.unwrap_or(!self.reflect_expanded);
        self.reflect_expanded
    }

    /// Update the draft and persist it
    pub async fn set_draft(&mut self, text: impl Into<String>) -> Result<()> {
        self.draft = text.into();
        self.drafts.save(&self.draft).await
    }

    /// Forget the recorded history
    pub async fn reset_history(&self) -> Result<()> {
        self.recency.clear().await
    }

    pub async fn history(&self) -> Result<Vec<LensId>> {
        self.recency.read().await
    }

    /// Text for the copy action, if a lens is on screen
    pub fn copy_text(&self) -> Option<String> {
        self.current.as_ref().map(crate::popup::render::share_text)
    }

    pub fn current(&self) -> Option<&Lens> {
        self.current.as_ref()
    }

    pub fn reflect_expanded(&self) -> bool {
        self.reflect_expanded
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn show_input(&self) -> bool {
        self.show_input
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    async fn load_settings(&self) -> Settings {
        match self.settings.load().await {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(error = %e, "Could not read settings, using defaults");
                self.settings.defaults().clone()
            }
        }
    }
}
