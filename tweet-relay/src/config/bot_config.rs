//! BotConfig: BaseConfig + RelaySettings. Use load() for env-based loading.

use anyhow::Result;

use super::{BaseConfig, RelaySettings};
use crate::relay::FirstSightPolicy;

/// Bot config: BaseConfig + relay settings. Use BotConfig::load() for env-based loading.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub base: BaseConfig,
    pub relay: RelaySettings,
}

impl BotConfig {
    /// Load full config from environment variables. If `token` is provided it overrides BOT_TOKEN.
    /// Call validate() after load to check config before init.
    pub fn load(token: Option<String>) -> Result<Self> {
        let base = BaseConfig::load(token)?;
        let relay = RelaySettings::from_env()?;
        Ok(Self { base, relay })
    }

    /// Validate config. Call after load() to fail fast before init.
    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        self.relay.validate()
    }

    pub fn base(&self) -> &BaseConfig {
        &self.base
    }
    pub fn relay(&self) -> &RelaySettings {
        &self.relay
    }

    pub fn bot_token(&self) -> &str {
        &self.base.bot_token
    }
    pub fn log_file(&self) -> &str {
        &self.base.log_file
    }
    pub fn telegram_api_url(&self) -> Option<&str> {
        self.base.telegram_api_url.as_deref()
    }
    pub fn config_file(&self) -> &str {
        &self.relay.config_file
    }
    pub fn first_sight_policy(&self) -> FirstSightPolicy {
        self.relay.first_sight_policy
    }
}
