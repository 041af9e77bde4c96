//! Storage error types.
//!
//! Used by repository implementations and callers of storage APIs.

use relay_core::RelayBotError;
use thiserror::Error;

/// Errors that can occur when loading or saving the relay config.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Corrupt config file: {0}")]
    Corrupt(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<StorageError> for RelayBotError {
    fn from(e: StorageError) -> Self {
        RelayBotError::Persistence(e.to_string())
    }
}
