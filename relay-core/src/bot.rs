//! Bot abstraction for sending messages.
//!
//! [`Bot`] is transport-agnostic; relay-telegram implements it over teloxide and tests substitute
//! recording implementations.

use crate::error::RelayError;
use crate::types::{ChannelRef, Chat, Message};
use async_trait::async_trait;

/// Abstraction for outbound messages. Implementations map to a transport (e.g. Telegram).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text message to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<(), RelayError>;
    /// Sends a text message to the relay channel (username or numeric id).
    async fn send_to_channel(&self, channel: &ChannelRef, text: &str) -> Result<(), RelayError>;
    /// Sends a reply to the given message (same chat).
    async fn reply_to(&self, message: &Message, text: &str) -> Result<(), RelayError> {
        self.send_message(&message.chat, text).await
    }
}
