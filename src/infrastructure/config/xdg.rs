//! Settings file under the user's config directory

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use crate::application::ports::ConfigStore;
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

const APP_DIR: &str = "dream-synth";
const FILE_NAME: &str = "config.toml";

/// `$XDG_CONFIG_HOME/dream-synth/config.toml`, or the platform equivalent
pub struct XdgConfigStore {
    path: PathBuf,
}

impl XdgConfigStore {
    pub fn new() -> Self {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from(".config"));
        Self::in_dir(base.join(APP_DIR))
    }

    /// Store `config.toml` inside `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::with_path(dir.as_ref().join(FILE_NAME))
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn decode(content: &str) -> Result<AppConfig, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    fn encode(config: &AppConfig) -> Result<String, ConfigError> {
        toml::to_string_pretty(config).map_err(|e| ConfigError::WriteError(e.to_string()))
    }
}

impl Default for XdgConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

fn write_error(e: std::io::Error) -> ConfigError {
    ConfigError::WriteError(e.to_string())
}

#[async_trait]
impl ConfigStore for XdgConfigStore {
    async fn load(&self) -> Result<AppConfig, ConfigError> {
        match fs::read_to_string(&self.path).await {
            Ok(content) => Self::decode(&content),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(AppConfig::empty()),
            Err(e) => Err(ConfigError::ReadError(e.to_string())),
        }
    }

    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await.map_err(write_error)?;
        }

        // Write beside the target, then rename over it
        let staging = self.path.with_extension("toml.tmp");
        fs::write(&staging, Self::encode(config)?)
            .await
            .map_err(write_error)?;
        fs::rename(&staging, &self.path).await.map_err(write_error)?;

        debug!(path = %self.path.display(), "Config saved");
        Ok(())
    }

    fn path(&self) -> PathBuf {
        self.path.clone()
    }

    async fn init(&self) -> Result<(), ConfigError> {
        if fs::try_exists(&self.path).await.unwrap_or(false) {
            return Err(ConfigError::AlreadyExists(
                self.path.display().to_string(),
            ));
        }
        self.save(&AppConfig::defaults()).await
    }
}
