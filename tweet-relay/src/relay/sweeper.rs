//! One pass over every tracked account: fetch the newest post, dedup it, relay it.
//!
//! Used by both the poll loop and `/fetch`. A sweep lock makes sure two sweeps never overlap;
//! the config lock is only taken for the snapshot and for each dedup update, never across a
//! fetch or a send.

use relay_core::{Bot, FetchError, Post, PostFetcher, RelayError};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::timeout;
use tracing::{debug, error, info, instrument, warn};

use super::dedup::{DedupFilter, FirstSightPolicy, Seen};
use super::sink::RelaySink;
use crate::state::SharedConfig;

/// Timeouts and first-sight policy for a [`Sweeper`].
#[derive(Debug, Clone, Copy)]
pub struct SweepSettings {
    pub fetch_timeout: Duration,
    pub send_timeout: Duration,
    pub first_sight: FirstSightPolicy,
}

impl Default for SweepSettings {
    fn default() -> Self {
        Self {
            fetch_timeout: Duration::from_secs(30),
            send_timeout: Duration::from_secs(30),
            first_sight: FirstSightPolicy::Relay,
        }
    }
}

/// Per-sweep counters. Only `relayed` is reported back to the chat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub accounts: usize,
    pub relayed: usize,
    pub duplicates: usize,
    pub baselined: usize,
    pub empty: usize,
    pub fetch_errors: usize,
    pub relay_errors: usize,
    pub persistence_errors: usize,
}

#[derive(Clone)]
pub struct Sweeper {
    config: SharedConfig,
    fetcher: Arc<dyn PostFetcher>,
    dedup: DedupFilter,
    sink: RelaySink,
    settings: SweepSettings,
    lock: Arc<Mutex<()>>,
}

impl Sweeper {
    pub fn new(
        config: SharedConfig,
        fetcher: Arc<dyn PostFetcher>,
        bot: Arc<dyn Bot>,
        settings: SweepSettings,
    ) -> Self {
        Self {
            dedup: DedupFilter::new(config.clone()),
            sink: RelaySink::new(bot, settings.send_timeout),
            config,
            fetcher,
            settings,
            lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn settings(&self) -> &SweepSettings {
        &self.settings
    }

    /// True while a sweep holds the lock.
    pub fn is_running(&self) -> bool {
        self.lock.try_lock().is_err()
    }

    /// Runs one sweep, waiting for any sweep already in progress to finish first.
    ///
    /// Accounts are processed in the order of the snapshot taken once the lock is held. Fails
    /// only with [`RelayError::ChannelNotSet`]; every per-account failure is logged and counted.
    #[instrument(skip(self))]
    pub async fn sweep(&self) -> Result<SweepReport, RelayError> {
        let _guard = self.lock.lock().await;

        let snapshot = self.config.snapshot().await;
        let channel = snapshot
            .channel()
            .ok_or(RelayError::ChannelNotSet)?
            .to_string();

        let mut report = SweepReport {
            accounts: snapshot.twitters.len(),
            ..SweepReport::default()
        };
        for account in &snapshot.twitters {
            self.process_account(&channel, account, &mut report).await;
        }

        info!(
            accounts = report.accounts,
            relayed = report.relayed,
            duplicates = report.duplicates,
            fetch_errors = report.fetch_errors,
            relay_errors = report.relay_errors,
            "Sweep finished"
        );
        Ok(report)
    }

    async fn process_account(&self, channel: &str, account: &str, report: &mut SweepReport) {
        let post = match self.fetch(account).await {
            Ok(Some(post)) => post,
            Ok(None) => {
                debug!(account = %account, "No posts");
                return;
            }
            Err(e) => {
                warn!(account = %account, kind = e.kind(), error = %e, "Fetch failed");
                report.fetch_errors += 1;
                return;
            }
        };

        let seen = match self.dedup.check(account, &post).await {
            Ok(seen) => seen,
            Err(e) => {
                error!(
                    account = %account,
                    post_id = %post.id(),
                    error = %e,
                    "Failed to record last-seen id; post not relayed"
                );
                report.persistence_errors += 1;
                return;
            }
        };

        match seen {
            Seen::Duplicate => {
                report.duplicates += 1;
                return;
            }
            Seen::Untracked => {
                debug!(account = %account, "Account removed during sweep; result discarded");
                return;
            }
            Seen::New { first_sight: true }
                if self.settings.first_sight == FirstSightPolicy::Baseline =>
            {
                info!(account = %account, post_id = %post.id(), "Recorded baseline post");
                report.baselined += 1;
                return;
            }
            Seen::New { .. } => {}
        }

        if post.text().is_empty() {
            debug!(account = %account, post_id = %post.id(), "Post has no text after link removal");
            report.empty += 1;
            return;
        }

        match self.sink.relay(channel, account, post.text()).await {
            Ok(()) => {
                info!(account = %account, post_id = %post.id(), "Relayed post");
                report.relayed += 1;
            }
            Err(e) => {
                error!(account = %account, post_id = %post.id(), error = %e, "Relay failed");
                report.relay_errors += 1;
            }
        }
    }

    async fn fetch(&self, account: &str) -> Result<Option<Post>, FetchError> {
        match timeout(self.settings.fetch_timeout, self.fetcher.fetch_latest(account)).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout(self.settings.fetch_timeout.as_secs())),
        }
    }
}
