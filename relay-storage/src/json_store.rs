//! JSON file store for the relay config.
//!
//! The whole record is rewritten on every save: serialized to `<path>.tmp`, then renamed over
//! `<path>`, so readers only ever see a complete file.

use async_trait::async_trait;
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

use crate::error::StorageError;
use crate::models::RelayConfig;
use crate::repository::ConfigRepository;

#[derive(Debug, Clone)]
pub struct JsonConfigStore {
    path: PathBuf,
}

impl JsonConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut tmp: OsString = self.path.as_os_str().to_owned();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }
}

#[async_trait]
impl ConfigRepository for JsonConfigStore {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn load(&self) -> Result<RelayConfig, StorageError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => {
                let config: RelayConfig = serde_json::from_slice(&bytes).map_err(|e| {
                    StorageError::Corrupt(format!("{}: {}", self.path.display(), e))
                })?;
                debug!(
                    accounts = config.twitters.len(),
                    channel_set = config.channel().is_some(),
                    "Loaded relay config"
                );
                Ok(config)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("Config file not found, creating default");
                let config = RelayConfig::default();
                self.save(&config).await?;
                Ok(config)
            }
            Err(e) => Err(StorageError::Io(format!("{}: {}", self.path.display(), e))),
        }
    }

    #[instrument(skip(self, config), fields(path = %self.path.display()))]
    async fn save(&self, config: &RelayConfig) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec_pretty(config)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| StorageError::Io(format!("{}: {}", parent.display(), e)))?;
            }
        }

        let tmp = self.temp_path();
        tokio::fs::write(&tmp, &bytes)
            .await
            .map_err(|e| StorageError::Io(format!("{}: {}", tmp.display(), e)))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| StorageError::Io(format!("{}: {}", self.path.display(), e)))?;

        debug!(bytes = bytes.len(), "Saved relay config");
        Ok(())
    }
}
