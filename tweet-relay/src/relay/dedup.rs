//! Last-seen bookkeeping: decides whether a fetched post is new and records it.

use relay_core::Post;
use relay_storage::{RelayConfig, StorageError};
use std::fmt;
use std::str::FromStr;

use crate::state::SharedConfig;

/// What to do with the first post ever seen for an account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FirstSightPolicy {
    /// Record and relay it.
    #[default]
    Relay,
    /// Record it as the baseline without relaying.
    Baseline,
}

impl FromStr for FirstSightPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "relay" => Ok(FirstSightPolicy::Relay),
            "baseline" => Ok(FirstSightPolicy::Baseline),
            other => Err(format!(
                "unknown FIRST_SIGHT_POLICY '{}', expected relay or baseline",
                other
            )),
        }
    }
}

impl fmt::Display for FirstSightPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FirstSightPolicy::Relay => write!(f, "relay"),
            FirstSightPolicy::Baseline => write!(f, "baseline"),
        }
    }
}

/// Outcome of checking one fetched post against the last-seen map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seen {
    /// Recorded as the new last-seen id. `first_sight` is true when the account had no entry.
    New { first_sight: bool },
    /// Same id as the stored one.
    Duplicate,
    /// The account was removed while its post was being fetched; nothing recorded.
    Untracked,
}

/// Applies the dedup decision to `config`, recording the id when the post is new.
pub fn check_and_record(config: &mut RelayConfig, account: &str, post: &Post) -> Seen {
    if !config.is_tracked(account) {
        return Seen::Untracked;
    }
    let first_sight = match config.last_seen(account) {
        Some(id) if id == post.id() => return Seen::Duplicate,
        previous => previous.is_none(),
    };
    config.record_seen(account, post.id());
    Seen::New { first_sight }
}

/// Dedup filter over the shared config. Every "new" decision is persisted before it is returned.
#[derive(Clone)]
pub struct DedupFilter {
    config: SharedConfig,
}

impl DedupFilter {
    pub fn new(config: SharedConfig) -> Self {
        Self { config }
    }

    /// True iff `post` differs from the last-seen id of `account`; the id is recorded when true.
    pub async fn is_new(&self, account: &str, post: &Post) -> Result<bool, StorageError> {
        Ok(matches!(self.check(account, post).await?, Seen::New { .. }))
    }

    /// Like [`DedupFilter::is_new`], reporting whether this was the account's first sight.
    pub async fn check(&self, account: &str, post: &Post) -> Result<Seen, StorageError> {
        self.config
            .update(|config| check_and_record(config, account, post))
            .await
    }
}
