//! Error types for the relay.
//!
//! [`RelayError`] is the top-level error; storage failures convert from [`StorageError`].

use storage::StorageError;
use thiserror::Error;

/// Top-level error for the relay: storage, Telegram transport or config.
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Telegram error: {0}")]
    Telegram(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl From<teloxide::RequestError> for RelayError {
    fn from(e: teloxide::RequestError) -> Self {
        RelayError::Telegram(e.to_string())
    }
}

/// Result type for relay operations; uses [`RelayError`].
pub type Result<T> = std::result::Result<T, RelayError>;
