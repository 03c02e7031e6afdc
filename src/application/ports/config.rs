//! Persistent user settings

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// Where `dream-synth config` reads and writes its settings.
///
/// Keys absent from storage come back as `None` so the caller can layer
/// environment and command-line values on top.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    async fn load(&self) -> Result<AppConfig, ConfigError>;

    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError>;

    /// Location shown by `config path`
    fn path(&self) -> PathBuf;

    /// Write the default settings. Refuses to overwrite an existing file.
    async fn init(&self) -> Result<(), ConfigError>;

    /// Stored settings, or an empty config when they cannot be read
    async fn load_or_empty(&self) -> AppConfig {
        match self.load().await {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, path = %self.path().display(), "Ignoring unreadable config file");
                AppConfig::empty()
            }
        }
    }
}
