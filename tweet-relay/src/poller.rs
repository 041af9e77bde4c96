//! Poll loop: sweeps every tracked account on a fixed interval until shut down.

use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, instrument, warn};

use crate::relay::{SweepReport, Sweeper};
use crate::state::SharedConfig;

pub struct Poller {
    config: SharedConfig,
    sweeper: Sweeper,
    interval: Duration,
}

impl Poller {
    pub fn new(config: SharedConfig, sweeper: Sweeper, interval: Duration) -> Self {
        Self {
            config,
            sweeper,
            interval,
        }
    }

    /// Spawns [`Poller::run`] on the runtime.
    pub fn spawn(self, shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(self.run(shutdown))
    }

    /// Ticks immediately, then every `interval`. Ticks missed while a sweep was running are
    /// skipped. Returns when `shutdown` becomes true or its sender is dropped.
    ///
    /// A sweep is not cancelled: a shutdown sent while one is running is seen only after it
    /// finishes, which is bounded by the fetch and send timeouts for each account.
    #[instrument(skip(self, shutdown), fields(interval_secs = self.interval.as_secs()))]
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        info!("Poll loop started");

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.tick().await;
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        info!("Poll loop stopped");
    }

    /// One poll cycle. Returns None when there was nothing to sweep.
    pub async fn tick(&self) -> Option<SweepReport> {
        let snapshot = self.config.snapshot().await;
        if snapshot.channel().is_none() || snapshot.twitters.is_empty() {
            debug!(
                channel_set = snapshot.channel().is_some(),
                accounts = snapshot.twitters.len(),
                "Nothing to poll"
            );
            return None;
        }

        match self.sweeper.sweep().await {
            Ok(report) => Some(report),
            Err(e) => {
                warn!(error = %e, "Poll sweep skipped");
                None
            }
        }
    }
}
