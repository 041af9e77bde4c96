//! Relay settings: Twitter access, state file, poll interval, timeouts, first-sight policy.

use anyhow::Result;
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::relay::FirstSightPolicy;

const DEFAULT_TWITTER_API_URL: &str = "https://api.twitter.com";
const DEFAULT_CONFIG_FILE: &str = "config.json";
const DEFAULT_POLL_INTERVAL_SECS: u64 = 60;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct RelaySettings {
    /// TWITTER_BEARER_TOKEN
    pub twitter_bearer_token: String,
    /// TWITTER_API_URL
    pub twitter_api_url: String,
    /// CONFIG_FILE: where channel, accounts and last-seen ids are persisted
    pub config_file: String,
    /// POLL_INTERVAL_SECS
    pub poll_interval_secs: u64,
    /// FETCH_TIMEOUT_SECS
    pub fetch_timeout_secs: u64,
    /// SEND_TIMEOUT_SECS
    pub send_timeout_secs: u64,
    /// FIRST_SIGHT_POLICY: relay | baseline
    pub first_sight_policy: FirstSightPolicy,
}

impl RelaySettings {
    /// Loads from env. Numeric values that fail to parse fall back to their defaults; an unknown
    /// FIRST_SIGHT_POLICY is an error.
    pub fn from_env() -> Result<Self> {
        let first_sight_policy = match env::var("FIRST_SIGHT_POLICY") {
            Ok(raw) => FirstSightPolicy::from_str(&raw).map_err(|e| anyhow::anyhow!(e))?,
            Err(_) => FirstSightPolicy::default(),
        };

        Ok(Self {
            twitter_bearer_token: env::var("TWITTER_BEARER_TOKEN").unwrap_or_default(),
            twitter_api_url: env::var("TWITTER_API_URL")
                .unwrap_or_else(|_| DEFAULT_TWITTER_API_URL.to_string()),
            config_file: config_file_from_env(),
            poll_interval_secs: secs_from_env("POLL_INTERVAL_SECS", DEFAULT_POLL_INTERVAL_SECS),
            fetch_timeout_secs: secs_from_env("FETCH_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS),
            send_timeout_secs: secs_from_env("SEND_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS),
            first_sight_policy,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.twitter_bearer_token.trim().is_empty() {
            anyhow::bail!("TWITTER_BEARER_TOKEN not set");
        }
        if reqwest::Url::parse(&self.twitter_api_url).is_err() {
            anyhow::bail!("TWITTER_API_URL is not a valid URL: {}", self.twitter_api_url);
        }
        if self.poll_interval_secs == 0 {
            anyhow::bail!("POLL_INTERVAL_SECS must be greater than 0");
        }
        if self.fetch_timeout_secs == 0 || self.send_timeout_secs == 0 {
            anyhow::bail!("FETCH_TIMEOUT_SECS and SEND_TIMEOUT_SECS must be greater than 0");
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn send_timeout(&self) -> Duration {
        Duration::from_secs(self.send_timeout_secs)
    }
}

/// CONFIG_FILE or `config.json`. Shared with the offline `status` command.
pub(crate) fn config_file_from_env() -> String {
    env::var("CONFIG_FILE").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string())
}

fn secs_from_env(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}
