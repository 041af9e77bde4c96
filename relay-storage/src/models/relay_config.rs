//! Relay config record.
//!
//! Serialized as `{"channel": "...", "twitters": [...], "last_tweets": {...}}`; every field
//! defaults to empty so older or hand-edited files still load.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Telegram destination; empty means unset.
    #[serde(default)]
    pub channel: String,
    /// Tracked account handles (no leading `@`), in the order they were added.
    #[serde(default)]
    pub twitters: Vec<String>,
    /// Last relayed post id per account.
    #[serde(default)]
    pub last_tweets: BTreeMap<String, String>,
}

impl RelayConfig {
    /// The configured channel, or None when unset.
    pub fn channel(&self) -> Option<&str> {
        let channel = self.channel.trim();
        if channel.is_empty() {
            None
        } else {
            Some(channel)
        }
    }

    pub fn set_channel(&mut self, channel: impl Into<String>) {
        self.channel = channel.into();
    }

    pub fn is_tracked(&self, account: &str) -> bool {
        self.twitters.iter().any(|a| a == account)
    }

    /// Adds `account` if absent. Returns false when it was already tracked.
    pub fn add_account(&mut self, account: impl Into<String>) -> bool {
        let account = account.into();
        if self.is_tracked(&account) {
            return false;
        }
        self.twitters.push(account);
        true
    }

    /// Removes `account` and its last-seen entry. Returns false when it was not tracked.
    pub fn remove_account(&mut self, account: &str) -> bool {
        let before = self.twitters.len();
        self.twitters.retain(|a| a != account);
        if self.twitters.len() == before {
            return false;
        }
        self.last_tweets.remove(account);
        true
    }

    pub fn last_seen(&self, account: &str) -> Option<&str> {
        self.last_tweets.get(account).map(String::as_str)
    }

    pub fn record_seen(&mut self, account: impl Into<String>, post_id: impl Into<String>) {
        self.last_tweets.insert(account.into(), post_id.into());
    }
}
