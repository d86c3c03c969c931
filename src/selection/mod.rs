//! Lens selection

pub mod engine;

pub use engine::{eligible_lenses, select_next, EligibilityTier};
