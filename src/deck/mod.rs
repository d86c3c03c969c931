//! The read-only collection of lenses for a session
//!
//! A deck is loaded once at session start and never mutated afterwards.

pub mod loader;

pub use loader::{load_deck, parse_deck};

use crate::core::types::{Lens, LensId};

/// Ordered, immutable set of lenses
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deck {
    lenses: Vec<Lens>,
}

impl Deck {
    pub fn new(lenses: Vec<Lens>) -> Self {
        Self { lenses }
    }

    pub fn lenses(&self) -> &[Lens] {
        &self.lenses
    }

    pub fn len(&self) -> usize {
        self.lenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lenses.is_empty()
    }

    pub fn get(&self, id: &LensId) -> Option<&Lens> {
        self.lenses.iter().find(|lens| &lens.id == id)
    }
}

impl FromIterator<Lens> for Deck {
    fn from_iter<I: IntoIterator<Item = Lens>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
