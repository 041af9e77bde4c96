//! Bot configuration: BaseConfig (Telegram + log) + RelaySettings (Twitter, state file, polling).

mod base;
mod bot_config;
mod relay_settings;


pub use base::BaseConfig;
pub use bot_config::BotConfig;
pub use relay_settings::RelaySettings;
pub(crate) use relay_settings::config_file_from_env;
