//! Secret store port interface

use async_trait::async_trait;
use thiserror::Error;

/// Secret store errors
#[derive(Debug, Clone, Error)]
pub enum SecretStoreError {
    #[error("Failed to read secrets file: {0}")]
    ReadFailed(String),

    #[error("Failed to parse secrets file: {0}")]
    ParseFailed(String),
}

/// Port for looking up named secrets outside the environment
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Look up a secret by key.
    ///
    /// # Returns
    /// `Ok(None)` when the store has no such key
    async fn get(&self, key: &str) -> Result<Option<String>, SecretStoreError>;
}

/// Blanket implementation for boxed secret stores
#[async_trait]
impl SecretStore for Box<dyn SecretStore> {
    async fn get(&self, key: &str) -> Result<Option<String>, SecretStoreError> {
        self.as_ref().get(key).await
    }
}
