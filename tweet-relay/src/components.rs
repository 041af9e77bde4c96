//! Component factory: builds RelayComponents from config. Isolates assembly logic from runner.

use anyhow::Result;
use handler_chain::HandlerChain;
use relay_core::{Bot, PostFetcher};
use relay_storage::{ConfigRepository, JsonConfigStore};
use relay_telegram::{TelegramBotAdapter, TelegramConfig};
use std::sync::Arc;
use tracing::{error, info, instrument};
use twitter_client::TwitterClient;

use crate::config::{BotConfig, RelaySettings};
use crate::handlers::{CommandHandler, LoggingHandler};
use crate::relay::{SweepSettings, Sweeper};
use crate::state::SharedConfig;

/// Shared pieces used by the command surface and the poll loop.
#[derive(Clone)]
pub struct RelayComponents {
    pub config: SharedConfig,
    pub bot: Arc<dyn Bot>,
    pub fetcher: Arc<dyn PostFetcher>,
    pub sweeper: Sweeper,
}

/// Collaborators that talk to the outside world. Production values come from
/// [`production_services`]; tests pass in-memory substitutes.
pub struct RelayServices {
    pub repo: Arc<dyn ConfigRepository>,
    pub bot: Arc<dyn Bot>,
    pub fetcher: Arc<dyn PostFetcher>,
}

pub fn sweep_settings(settings: &RelaySettings) -> SweepSettings {
    SweepSettings {
        fetch_timeout: settings.fetch_timeout(),
        send_timeout: settings.send_timeout(),
        first_sight: settings.first_sight_policy,
    }
}

/// Teloxide bot built from the Telegram part of the config (token, optional API URL).
pub fn build_teloxide_bot(config: &BotConfig) -> teloxide::Bot {
    TelegramConfig {
        bot_token: config.bot_token().to_string(),
        telegram_api_url: config.telegram_api_url().map(str::to_string),
    }
    .build_bot()
}

/// JSON state file, Twitter API client and Telegram adapter around `teloxide_bot`.
pub fn production_services(config: &BotConfig, teloxide_bot: teloxide::Bot) -> RelayServices {
    let relay = config.relay();
    RelayServices {
        repo: Arc::new(JsonConfigStore::new(relay.config_file.as_str())),
        bot: Arc::new(TelegramBotAdapter::new(teloxide_bot)),
        fetcher: Arc::new(TwitterClient::with_base_url(
            relay.twitter_bearer_token.clone(),
            relay.twitter_api_url.clone(),
        )),
    }
}

/// Loads the persisted config and wires the sweeper.
#[instrument(skip(settings, services))]
pub async fn build_relay_components(
    settings: &RelaySettings,
    services: RelayServices,
) -> Result<RelayComponents> {
    let config = SharedConfig::load(services.repo).await.map_err(|e| {
        error!(error = %e, config_file = %settings.config_file, "Failed to load relay config");
        anyhow::anyhow!("Failed to load relay config: {}", e)
    })?;

    let sweeper = Sweeper::new(
        config.clone(),
        services.fetcher.clone(),
        services.bot.clone(),
        sweep_settings(settings),
    );

    info!(
        first_sight_policy = %settings.first_sight_policy,
        fetch_timeout_secs = settings.fetch_timeout_secs,
        send_timeout_secs = settings.send_timeout_secs,
        "Relay components ready"
    );

    Ok(RelayComponents {
        config,
        bot: services.bot,
        fetcher: services.fetcher,
        sweeper,
    })
}

/// Logging first, then command execution.
pub fn build_handler_chain(components: &RelayComponents) -> HandlerChain {
    HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(Arc::new(CommandHandler::new(
            components.bot.clone(),
            components.config.clone(),
            components.sweeper.clone(),
        )))
}
