pub mod config;
pub mod error;
pub mod types;

pub use config::{PopupConfig, Settings};
pub use error::{LensError, Result};
pub use types::{Lens, LensId};
