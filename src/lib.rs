//! Lens - rotating perspectives with anti-repeat selection

pub mod core;
pub mod deck;
pub mod popup;
pub mod selection;
pub mod storage;
