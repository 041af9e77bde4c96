//! # Tweet relay bot
//!
//! Polls tracked Twitter accounts and relays new posts to one Telegram channel. Admin commands
//! (`/setchannel`, `/addtwitter`, `/fetch`, ...) arrive through the handler chain; the poll loop
//! runs next to them and shares the same config and sweeper.

pub mod cli;
pub mod commands;
pub mod components;
pub mod config;
pub mod handlers;
pub mod poller;
pub mod relay;
pub mod runner;
pub mod state;

pub use cli::{load_config, status_report, Cli, Commands};
pub use commands::Command;
pub use components::{
    build_handler_chain, build_relay_components, RelayComponents, RelayServices,
};
pub use config::{BaseConfig, BotConfig, RelaySettings};
pub use handlers::{CommandHandler, LoggingHandler};
pub use poller::Poller;
pub use relay::{DedupFilter, FirstSightPolicy, RelaySink, SweepReport, SweepSettings, Sweeper};
pub use runner::{run_bot, RelayBot};
pub use state::SharedConfig;
