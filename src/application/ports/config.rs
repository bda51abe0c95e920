//! Persistent settings port

use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// Where the user's saved settings live
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Read the stored settings. A missing file yields an all-`None` config.
    async fn load(&self) -> Result<AppConfig, ConfigError>;

    /// Replace the stored settings, creating parent directories as needed
    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError>;

    fn path(&self) -> PathBuf;

    fn exists(&self) -> bool;

    /// Write [`AppConfig::defaults`]. Refuses to overwrite an existing file.
    async fn init(&self) -> Result<(), ConfigError>;

    /// Like [`ConfigStore::load`], but an unreadable or malformed file counts as empty
    async fn load_or_empty(&self) -> AppConfig {
        self.load().await.unwrap_or_else(|_| AppConfig::empty())
    }
}
