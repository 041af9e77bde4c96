//! Minimal framework config: token and optional API URL. Loaded from env: BOT_TOKEN
//! (or TELEGRAM_TOKEN), TELEGRAM_API_URL (or TELOXIDE_API_URL).

use anyhow::Result;
use std::env;
use tracing::error;

/// Minimal Telegram bot config (connectivity only).
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub telegram_api_url: Option<String>,
}

impl TelegramConfig {
    /// Loads from env: BOT_TOKEN (or TELEGRAM_TOKEN) required; TELEGRAM_API_URL optional.
    pub fn from_env() -> Result<Self> {
        let bot_token = env::var("BOT_TOKEN")
            .or_else(|_| env::var("TELEGRAM_TOKEN"))
            .map_err(|_| anyhow::anyhow!("BOT_TOKEN not set"))?;
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        Ok(Self {
            bot_token,
            telegram_api_url,
        })
    }

    /// Builds config with the given token and the default API URL.
    pub fn with_token(bot_token: String) -> Self {
        Self {
            bot_token,
            telegram_api_url: None,
        }
    }

    /// Creates the teloxide Bot, pointed at `telegram_api_url` when it is a valid URL.
    pub fn build_bot(&self) -> teloxide::Bot {
        let bot = teloxide::Bot::new(self.bot_token.clone());
        match self.telegram_api_url.as_deref() {
            Some(url_str) => match reqwest::Url::parse(url_str) {
                Ok(url) => bot.set_api_url(url),
                Err(e) => {
                    error!(error = %e, url = %url_str, "Invalid TELEGRAM_API_URL, using default");
                    bot
                }
            },
            None => bot,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    /// **Test: with_token sets bot_token; telegram_api_url is None.**
    #[test]
    fn test_with_token() {
        let config = TelegramConfig::with_token("test_token".to_string());
        assert_eq!(config.bot_token, "test_token");
        assert!(config.telegram_api_url.is_none());
    }

    /// **Test: TELEGRAM_TOKEN is accepted when BOT_TOKEN is absent.**
    #[test]
    #[serial]
    fn test_from_env_telegram_token_alias() {
        env::remove_var("BOT_TOKEN");
        env::set_var("TELEGRAM_TOKEN", "legacy_token");
        env::remove_var("TELEGRAM_API_URL");
        env::remove_var("TELOXIDE_API_URL");

        let config = TelegramConfig::from_env().unwrap();
        assert_eq!(config.bot_token, "legacy_token");
        assert!(config.telegram_api_url.is_none());

        env::remove_var("TELEGRAM_TOKEN");
        assert!(TelegramConfig::from_env().is_err());
    }

    /// **Test: build_bot uses the configured API URL.**
    #[test]
    fn test_build_bot_with_api_url() {
        let mut config = TelegramConfig::with_token("test_token".to_string());
        config.telegram_api_url = Some("http://127.0.0.1:8081/".to_string());
        let bot = config.build_bot();
        assert_eq!(bot.api_url().as_str(), "http://127.0.0.1:8081/");
    }
}
