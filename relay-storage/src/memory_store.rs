//! In-memory config repository. Nothing touches the filesystem; used by tests and dry runs.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::error::StorageError;
use crate::models::RelayConfig;
use crate::repository::ConfigRepository;

/// Keeps the "persisted" record in memory. Counts saves and can be told to fail them.
#[derive(Debug, Clone, Default)]
pub struct InMemoryConfigStore {
    inner: Arc<Mutex<RelayConfig>>,
    save_count: Arc<AtomicUsize>,
    fail_saves: Arc<AtomicBool>,
}

impl InMemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with `config` already persisted.
    pub fn with_config(config: RelayConfig) -> Self {
        Self {
            inner: Arc::new(Mutex::new(config)),
            ..Self::default()
        }
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.save_count.load(Ordering::SeqCst)
    }

    /// When true every save returns [`StorageError::Io`] and leaves the stored record untouched.
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Currently persisted record.
    pub async fn persisted(&self) -> RelayConfig {
        self.inner.lock().await.clone()
    }
}

#[async_trait]
impl ConfigRepository for InMemoryConfigStore {
    async fn load(&self) -> Result<RelayConfig, StorageError> {
        Ok(self.inner.lock().await.clone())
    }

    async fn save(&self, config: &RelayConfig) -> Result<(), StorageError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StorageError::Io("simulated write failure".to_string()));
        }
        *self.inner.lock().await = config.clone();
        self.save_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
