//! Process-wide relay config handle shared by the command surface and the poll loop.
//!
//! The in-memory record only changes after the repository accepted the new version, so memory
//! and durable storage never diverge.

use relay_storage::{ConfigRepository, RelayConfig, StorageError};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, instrument};

#[derive(Clone)]
pub struct SharedConfig {
    repo: Arc<dyn ConfigRepository>,
    current: Arc<Mutex<RelayConfig>>,
}

impl SharedConfig {
    /// Loads the persisted record (the JSON store creates a default file on first run).
    #[instrument(skip(repo))]
    pub async fn load(repo: Arc<dyn ConfigRepository>) -> Result<Self, StorageError> {
        let config = repo.load().await?;
        debug!(
            accounts = config.twitters.len(),
            channel_set = config.channel().is_some(),
            "Relay config loaded"
        );
        Ok(Self {
            repo,
            current: Arc::new(Mutex::new(config)),
        })
    }

    /// Clone of the current record for read-only use.
    pub async fn snapshot(&self) -> RelayConfig {
        self.current.lock().await.clone()
    }

    /// Applies `f` to a copy of the record and persists it. The copy replaces the in-memory record
    /// only if the save succeeds. Nothing is written when `f` leaves the record unchanged.
    pub async fn update<T, F>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&mut RelayConfig) -> T,
    {
        let mut current = self.current.lock().await;
        let mut draft = current.clone();
        let out = f(&mut draft);
        if draft == *current {
            return Ok(out);
        }
        if let Err(e) = self.repo.save(&draft).await {
            error!(error = %e, "Failed to persist relay config; change discarded");
            return Err(e);
        }
        *current = draft;
        Ok(out)
    }
}
