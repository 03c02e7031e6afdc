//! Credential resolution
//!
//! API keys are looked up through an ordered chain: the `<NAME>_API_KEY`
//! environment variable first, then the secret store under the lowercase
//! provider name. The provider never prompts; when nothing is found it
//! reports the key as missing and the hosting application decides how to
//! collect it. In production a missing key is a configuration error.

use std::fmt;

use thiserror::Error;
use tracing::{error, info, warn};

use super::ports::SecretStore;

/// Environment variable holding the deployment environment name
pub const ENVIRONMENT_VAR: &str = "ENVIRONMENT";

/// Value of [`ENVIRONMENT_VAR`] that enables production mode
pub const PRODUCTION: &str = "production";

/// Function used to read environment variables
pub type EnvLookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// A resolved API key. Its `Debug` output never shows the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Access the secret value
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Where a credential was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialChannel {
    Environment,
    SecretStore,
    Prompt,
}

impl CredentialChannel {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Environment => "environment",
            Self::SecretStore => "secret store",
            Self::Prompt => "prompt",
        }
    }
}

impl fmt::Display for CredentialChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Credential resolution errors
#[derive(Debug, Clone, Error)]
pub enum CredentialError {
    /// Production mode and no key in the environment or the secret store
    #[error("{name} API key is not configured in production")]
    NotConfigured { name: String },

    /// Development mode and no key found; the caller may collect one interactively
    #[error("{name} API key not found. Set {env_var} or add '{secret_key}' to the secrets file")]
    Missing {
        name: String,
        env_var: String,
        secret_key: String,
    },
}

/// Name of the environment variable holding the key for `name`
pub fn env_var_name(name: &str) -> String {
    format!("{}_API_KEY", name.to_uppercase())
}

/// Key under which the secret store holds the credential for `name`
pub fn secret_key_name(name: &str) -> String {
    name.to_lowercase()
}

/// Resolves named API keys through the environment and a secret store.
pub struct CredentialProvider<S: SecretStore> {
    secrets: S,
    env: EnvLookup,
    production: bool,
}

impl<S: SecretStore> CredentialProvider<S> {
    /// Create a provider reading the process environment
    pub fn new(secrets: S, production: bool) -> Self {
        Self::with_env(
            secrets,
            production,
            Box::new(|key: &str| std::env::var(key).ok()),
        )
    }

    /// Create a provider with a custom environment lookup
    pub fn with_env(secrets: S, production: bool, env: EnvLookup) -> Self {
        Self {
            secrets,
            env,
            production,
        }
    }

    /// Resolve the API key for a provider name such as "Groq".
    pub async fn resolve(&self, name: &str) -> Result<ApiKey, CredentialError> {
        let env_var = env_var_name(name);
        if let Some(value) = (self.env)(env_var.as_str()).filter(|v| !v.trim().is_empty()) {
            info!(provider = name, channel = %CredentialChannel::Environment, "API key resolved");
            return Ok(ApiKey::new(value));
        }

        let secret_key = secret_key_name(name);
        match self.secrets.get(&secret_key).await {
            Ok(Some(value)) if !value.trim().is_empty() => {
                info!(provider = name, channel = %CredentialChannel::SecretStore, "API key resolved");
                return Ok(ApiKey::new(value));
            }
            Ok(_) => {}
            Err(e) => warn!(provider = name, error = %e, "Unable to read secret store"),
        }

        if self.production {
            error!(provider = name, "API key not configured in production");
            return Err(CredentialError::NotConfigured {
                name: name.to_string(),
            });
        }

        warn!(provider = name, "API key not found in configuration");
        Err(CredentialError::Missing {
            name: name.to_string(),
            env_var,
            secret_key,
        })
    }
}

/// Whether the environment marks this process as production
pub fn is_production_environment(env: impl Fn(&str) -> Option<String>) -> bool {
    env(ENVIRONMENT_VAR).is_some_and(|value| value == PRODUCTION)
}
