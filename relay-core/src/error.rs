//! Error types for the relay bot.
//!
//! [`RelayBotError`] is the error a [`crate::Handler`] returns. [`FetchError`] and [`RelayError`]
//! classify failures of the two external calls a sweep makes; [`UsageError`] carries the usage line
//! for a misused command.

use thiserror::Error;

/// Handler error: a command could not be carried out.
#[derive(Error, Debug)]
pub enum RelayBotError {
    #[error("Relay error: {0}")]
    Relay(#[from] RelayError),

    /// The config could not be saved; the change was not applied.
    /// relay-storage converts its `StorageError` into this variant.
    #[error("Persistence error: {0}")]
    Persistence(String),
}

/// Bad command arguments. Displays as the usage line that is sent back to the chat.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{usage}")]
pub struct UsageError {
    pub usage: &'static str,
}

impl UsageError {
    pub fn new(usage: &'static str) -> Self {
        Self { usage }
    }
}

/// Content retrieval failed. The sweep logs it and moves on to the next account.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),

    #[error("account not found: {0}")]
    NotFound(String),

    #[error("rate limited (retry after {retry_after_secs:?}s)")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("fetch timed out after {0}s")]
    Timeout(u64),
}

impl FetchError {
    /// Short, stable label used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Network(_) => "network",
            FetchError::NotFound(_) => "not_found",
            FetchError::RateLimited { .. } => "rate_limited",
            FetchError::Unauthorized(_) => "unauthorized",
            FetchError::Api { .. } => "api",
            FetchError::Parse(_) => "parse",
            FetchError::Timeout(_) => "timeout",
        }
    }
}

/// Delivering a message to Telegram failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RelayError {
    #[error("channel not set")]
    ChannelNotSet,

    #[error("send failed: {0}")]
    Send(String),

    #[error("send timed out after {0}s")]
    Timeout(u64),
}

/// Result type for handlers; uses [`RelayBotError`].
pub type Result<T> = std::result::Result<T, RelayBotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_error_displays_usage_line() {
        let err = UsageError::new("Usage: /setchannel @channelname");
        assert_eq!(err.to_string(), "Usage: /setchannel @channelname");
    }

    #[test]
    fn test_fetch_error_kind() {
        assert_eq!(FetchError::NotFound("bob".into()).kind(), "not_found");
        assert_eq!(
            FetchError::RateLimited {
                retry_after_secs: Some(10)
            }
            .kind(),
            "rate_limited"
        );
        assert_eq!(FetchError::Timeout(30).kind(), "timeout");
    }

    #[test]
    fn test_top_level_error_from_relay_error() {
        let err: RelayBotError = RelayError::ChannelNotSet.into();
        assert_eq!(err.to_string(), "Relay error: channel not set");
    }
}
