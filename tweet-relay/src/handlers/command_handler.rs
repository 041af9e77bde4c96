//! Command handler: parses admin commands, executes them against the shared config and the
//! sweeper, and replies in the same chat.

use async_trait::async_trait;
use relay_core::{Bot, Handler, HandlerResponse, Message, RelayError, Result};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use crate::commands::{self, Command};
use crate::relay::Sweeper;
use crate::state::SharedConfig;

#[derive(Clone)]
pub struct CommandHandler {
    bot: Arc<dyn Bot>,
    config: SharedConfig,
    sweeper: Sweeper,
}

impl CommandHandler {
    pub fn new(bot: Arc<dyn Bot>, config: SharedConfig, sweeper: Sweeper) -> Self {
        Self {
            bot,
            config,
            sweeper,
        }
    }

    /// Executes `command` and returns the reply text. Fails with
    /// [`relay_core::RelayBotError::Persistence`] when a mutation could not be saved; the config
    /// is then unchanged.
    #[instrument(skip(self, command), fields(command = command.name()))]
    pub async fn execute(&self, command: Command) -> Result<String> {
        let reply = match command {
            Command::Start => commands::START_REPLY.to_string(),
            Command::Help => commands::HELP_TEXT.to_string(),
            Command::SetChannel(channel) => {
                self.config
                    .update(|c| c.set_channel(channel.as_str()))
                    .await?;
                info!(channel = %channel, "Channel updated");
                commands::channel_set_reply(&channel)
            }
            Command::AddTwitter(account) => {
                if self.config.update(|c| c.add_account(account.as_str())).await? {
                    info!(account = %account, "Account added");
                    commands::added_reply(&account)
                } else {
                    commands::ALREADY_TRACKED_REPLY.to_string()
                }
            }
            Command::RemoveTwitter(account) => {
                if self.config.update(|c| c.remove_account(&account)).await? {
                    info!(account = %account, "Account removed");
                    commands::removed_reply(&account)
                } else {
                    commands::NOT_FOUND_REPLY.to_string()
                }
            }
            Command::ListTwitters => commands::format_account_list(&self.config.snapshot().await),
            Command::Status => commands::format_status(&self.config.snapshot().await),
            Command::Fetch => self.fetch().await?,
        };
        Ok(reply)
    }

    async fn fetch(&self) -> Result<String> {
        if self.config.snapshot().await.channel().is_none() {
            return Ok(commands::CHANNEL_NOT_SET_REPLY.to_string());
        }
        if self.sweeper.is_running() {
            info!("Sweep in progress; waiting for it before fetching");
        }
        match self.sweeper.sweep().await {
            Ok(report) => Ok(commands::fetch_complete_reply(report.relayed)),
            // Channel cleared while waiting for the running sweep.
            Err(RelayError::ChannelNotSet) => Ok(commands::CHANNEL_NOT_SET_REPLY.to_string()),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl Handler for CommandHandler {
    #[instrument(skip(self, message), fields(chat_id = message.chat.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let parsed = match Command::parse(&message.content) {
            Some(parsed) => parsed,
            None => return Ok(HandlerResponse::Ignore),
        };

        let reply = match parsed {
            Ok(command) => match self.execute(command).await {
                Ok(reply) => reply,
                Err(e) => {
                    error!(error = %e, content = %message.content, "Command failed");
                    commands::command_failed_reply(&e)
                }
            },
            Err(usage) => {
                warn!(content = %message.content, "Command misused");
                usage.to_string()
            }
        };

        if let Err(e) = self.bot.reply_to(message, &reply).await {
            error!(error = %e, chat_id = message.chat.id, "Failed to send reply");
        }
        Ok(HandlerResponse::Reply(reply))
    }
}
