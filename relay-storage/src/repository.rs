use async_trait::async_trait;

use crate::error::StorageError;
use crate::models::RelayConfig;

/// Durable home of the relay config. `save` always writes the full record.
#[async_trait]
pub trait ConfigRepository: Send + Sync {
    /// Loads the record; creates and persists a default one when none exists yet.
    async fn load(&self) -> Result<RelayConfig, StorageError>;
    /// Overwrites the stored record with `config`.
    async fn save(&self, config: &RelayConfig) -> Result<(), StorageError>;
}
