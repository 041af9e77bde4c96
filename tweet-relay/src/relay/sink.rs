//! Relay sink: formats a post and delivers it to the configured channel.

use relay_core::{format_relay_text, Bot, ChannelRef, RelayError};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct RelaySink {
    bot: Arc<dyn Bot>,
    send_timeout: Duration,
}

impl RelaySink {
    pub fn new(bot: Arc<dyn Bot>, send_timeout: Duration) -> Self {
        Self { bot, send_timeout }
    }

    /// Sends `"@{account}: {text}"` to `channel` (`@username` or numeric chat id).
    #[instrument(skip(self, text))]
    pub async fn relay(&self, channel: &str, account: &str, text: &str) -> Result<(), RelayError> {
        let target = ChannelRef::parse(channel).ok_or(RelayError::ChannelNotSet)?;
        let message = format_relay_text(account, text);

        match timeout(self.send_timeout, self.bot.send_to_channel(&target, &message)).await {
            Ok(result) => {
                if result.is_ok() {
                    debug!(channel = %target, "Message delivered");
                }
                result
            }
            Err(_) => Err(RelayError::Timeout(self.send_timeout.as_secs())),
        }
    }
}
