//! TOML secrets file adapter
//!
//! Reads a flat table of `provider = "key"` pairs, for example:
//!
//! ```toml
//! groq = "gsk_..."
//! clipdrop = "..."
//! mistral = "..."
//! ```

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use crate::application::ports::{SecretStore, SecretStoreError};

/// Secret store backed by a TOML file in the config directory
pub struct TomlSecretStore {
    path: PathBuf,
}

impl TomlSecretStore {
    /// Create a store at the default location
    pub fn new() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("dream-synth");

        Self {
            path: config_dir.join("secrets.toml"),
        }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn parse(content: &str) -> Result<HashMap<String, String>, SecretStoreError> {
        toml::from_str(content).map_err(|e| SecretStoreError::ParseFailed(e.to_string()))
    }
}

impl Default for TomlSecretStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SecretStore for TomlSecretStore {
    async fn get(&self, key: &str) -> Result<Option<String>, SecretStoreError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|e| SecretStoreError::ReadFailed(e.to_string()))?;

        let mut secrets = Self::parse(&content)?;
        Ok(secrets.remove(key))
    }
}
