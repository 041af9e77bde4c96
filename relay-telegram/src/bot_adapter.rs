//! Wraps teloxide::Bot and implements [`relay_core::Bot`]. Production code sends messages via Telegram; tests can substitute another Bot impl.

use async_trait::async_trait;
use relay_core::{Bot as CoreBot, ChannelRef, Chat, RelayError};
use teloxide::{prelude::*, types::ChatId, types::Recipient};

/// Thin wrapper around teloxide::Bot that implements relay-core's Bot trait.
#[derive(Clone)]
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }

    /// Returns the underlying teloxide::Bot for direct API use when needed.
    pub fn inner(&self) -> &teloxide::Bot {
        &self.bot
    }
}

/// Maps a configured channel to a teloxide recipient.
pub fn to_recipient(channel: &ChannelRef) -> Recipient {
    match channel {
        ChannelRef::Id(id) => Recipient::Id(ChatId(*id)),
        ChannelRef::Username(name) => Recipient::ChannelUsername(name.clone()),
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<(), RelayError> {
        self.bot
            .send_message(ChatId(chat.id), text.to_string())
            .await
            .map_err(|e| RelayError::Send(e.to_string()))?;
        Ok(())
    }

    async fn send_to_channel(&self, channel: &ChannelRef, text: &str) -> Result<(), RelayError> {
        self.bot
            .send_message(to_recipient(channel), text.to_string())
            .await
            .map_err(|e| RelayError::Send(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_recipient() {
        assert_eq!(
            to_recipient(&ChannelRef::Id(-100123)),
            Recipient::Id(ChatId(-100123))
        );
        assert_eq!(
            to_recipient(&ChannelRef::Username("@news".to_string())),
            Recipient::ChannelUsername("@news".to_string())
        );
    }
}
