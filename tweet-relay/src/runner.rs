use anyhow::Result;
use handler_chain::HandlerChain;
use relay_core::{init_tracing, Message as CoreMessage};
use relay_telegram::run_repl;
use tokio::sync::watch;
use tracing::{error, info, instrument};

use super::components::{
    build_handler_chain, build_relay_components, build_teloxide_bot, production_services,
    RelayComponents, RelayServices,
};
use super::config::BotConfig;
use super::poller::Poller;

/// RelayBot: config, components, and handler chain.
pub struct RelayBot {
    pub config: BotConfig,
    pub components: RelayComponents,
    pub handler_chain: HandlerChain,
}

impl RelayBot {
    /// Builds the bot with the given services (state store, Telegram, fetcher).
    pub async fn new_with(config: BotConfig, services: RelayServices) -> Result<Self> {
        let components = build_relay_components(config.relay(), services).await?;
        let handler_chain = build_handler_chain(&components);
        Ok(Self {
            config,
            components,
            handler_chain,
        })
    }

    /// Poll loop over this bot's config and sweeper.
    pub fn poller(&self) -> Poller {
        Poller::new(
            self.components.config.clone(),
            self.components.sweeper.clone(),
            self.config.relay().poll_interval(),
        )
    }

    /// Drive handler chain with core Message (for integration tests).
    #[doc(hidden)]
    pub async fn handle_core_message(&self, message: &CoreMessage) -> Result<()> {
        if let Err(e) = self.handler_chain.handle(message).await {
            error!(error = %e, user_id = message.user.id, "Handler chain failed");
        }
        Ok(())
    }
}

/// Main entry: validate config, init logging, build components, start the poll loop, then run
/// the REPL. The poll loop is told to stop once the REPL returns.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_tracing(config.log_file())?;

    info!(
        config_file = %config.config_file(),
        twitter_api_url = %config.relay().twitter_api_url,
        poll_interval_secs = config.relay().poll_interval_secs,
        "Initializing bot"
    );

    let teloxide_bot = build_teloxide_bot(&config);
    let services = production_services(&config, teloxide_bot.clone());
    let relay_bot = RelayBot::new_with(config, services).await?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let poll_task = relay_bot.poller().spawn(shutdown_rx);

    info!("Bot started successfully");
    let repl_result = run_repl(teloxide_bot, relay_bot.handler_chain.clone()).await;

    if shutdown_tx.send(true).is_err() {
        info!("Poll loop already stopped");
    }
    if let Err(e) = poll_task.await {
        error!(error = %e, "Poll loop task failed");
    }

    repl_result
}
