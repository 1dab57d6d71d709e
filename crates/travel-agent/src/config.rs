//! Application Configuration
//!
//! Connection settings for the chat completion endpoint, read once at
//! startup from the process environment (after `.env` has been loaded).

use thiserror::Error;

pub const ENDPOINT_VAR: &str = "GITHUB_ENDPOINT";
pub const TOKEN_VAR: &str = "GITHUB_TOKEN";
pub const MODEL_VAR: &str = "GITHUB_MODEL_ID";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),
}

/// Endpoint, credential and model for the agent's chat client
#[derive(Clone)]
pub struct AppConfig {
    /// API base URL, e.g. `https://models.inference.ai.azure.com`
    pub endpoint: String,

    /// API token
    pub token: String,

    /// Model identifier, e.g. `gpt-4o-mini`
    pub model_id: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("endpoint", &self.endpoint)
            .field("token", &"<redacted>")
            .field("model_id", &self.model_id)
            .finish()
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Empty values count as missing.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let require = |key: &'static str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        Ok(Self {
            endpoint: require(ENDPOINT_VAR)?,
            token: require(TOKEN_VAR)?,
            model_id: require(MODEL_VAR)?,
        })
    }
}
