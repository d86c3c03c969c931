//! The popup: session orchestration and card rendering

pub mod render;
pub mod session;

pub use render::{render_card, share_text, EMPTY_STATE};
pub use session::{LensSession, RefreshOutcome};
