//! Core types: user, chat, message, handler response, Handler trait, and the relayed post.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User identity (id, username, names).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Chat (channel or private) identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub chat_type: String,
}

/// A single incoming text message (usually an admin command).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Handler result for the chain. `Reply(text)` carries the text that was sent back so later handlers can log it in `after()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Pass to next handler.
    Continue,
    /// Stop the chain; no response body.
    Stop,
    /// Skip this handler, try next.
    Ignore,
    /// Stop the chain and attach reply text.
    Reply(String),
}

/// Converts a transport-specific user type to core [`User`].
pub trait ToCoreUser: Send + Sync {
    fn to_core(&self) -> User;
}

/// Converts a transport-specific message type to core [`Message`].
pub trait ToCoreMessage: Send + Sync {
    fn to_core(&self) -> Message;
}

/// Single handler concept: optional before / handle / after. Chain runs all before → handle until Stop/Reply → all after (reverse).
#[async_trait]
pub trait Handler: Send + Sync {
    /// Runs before the handle phase. Return false to stop the chain.
    async fn before(&self, _message: &Message) -> crate::error::Result<bool> {
        Ok(true)
    }
    /// Processes the message. Return Stop or Reply to end the handle phase. Default: Continue.
    async fn handle(&self, _message: &Message) -> crate::error::Result<HandlerResponse> {
        Ok(HandlerResponse::Continue)
    }
    /// Runs after the handle phase (reverse order), with the final response.
    async fn after(
        &self,
        _message: &Message,
        _response: &HandlerResponse,
    ) -> crate::error::Result<()> {
        Ok(())
    }
}

/// Most recent post of a tracked account. The text never contains hyperlink tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    id: String,
    text: String,
}

impl Post {
    /// Builds a post from its id and raw content; hyperlink tokens are stripped from the content.
    pub fn new(id: impl Into<String>, content: &str) -> Self {
        Self {
            id: id.into(),
            text: strip_links(content),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Drops every whitespace-separated word starting with `http` and re-joins the rest with single spaces.
pub fn strip_links(content: &str) -> String {
    content
        .split_whitespace()
        .filter(|word| !word.starts_with("http"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalizes an account handle: surrounding whitespace and leading `@` characters are removed.
pub fn normalize_account(raw: &str) -> String {
    raw.trim().trim_start_matches('@').to_string()
}

/// Twitter handles are 1 to 15 ASCII letters, digits or underscores.
pub fn is_valid_account(account: &str) -> bool {
    (1..=15).contains(&account.len())
        && account.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

/// Text sent to the channel for one relayed post.
pub fn format_relay_text(account: &str, text: &str) -> String {
    format!("@{}: {}", account, text)
}

/// Telegram destination parsed from the configured channel string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelRef {
    /// Numeric chat id, e.g. `-1001234567890`.
    Id(i64),
    /// Public username, always with a leading `@`.
    Username(String),
}

impl ChannelRef {
    /// Parses a configured channel. Returns None when unset (empty or blank).
    /// Numeric strings become [`ChannelRef::Id`]; anything else is a username, `@` added if missing.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        if let Ok(id) = raw.parse::<i64>() {
            return Some(ChannelRef::Id(id));
        }
        if raw.starts_with('@') {
            Some(ChannelRef::Username(raw.to_string()))
        } else {
            Some(ChannelRef::Username(format!("@{}", raw)))
        }
    }
}

impl std::fmt::Display for ChannelRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChannelRef::Id(id) => write!(f, "{}", id),
            ChannelRef::Username(name) => write!(f, "{}", name),
        }
    }
}
