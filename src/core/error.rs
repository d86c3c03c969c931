use thiserror::Error;

#[derive(Error, Debug)]
pub enum LensError {
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Deck load error: {0}")]
    DeckLoad(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LensError>;
