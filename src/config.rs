//! Startup configuration read once from the environment.

use std::fmt;
use std::time::Duration;
use crate::utils::ConfigError;

/// Primary credential variable.
pub const API_KEY_VAR: &str = "API_KEY";
/// Fallback credential variable.
pub const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";
pub const MODEL_VAR: &str = "DEPTH_LIGHT_MODEL";
pub const ENDPOINT_VAR: &str = "DEPTH_LIGHT_ENDPOINT";
pub const TIMEOUT_VAR: &str = "DEPTH_LIGHT_TIMEOUT_SECS";

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image-preview";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Generation service settings.
#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub model: String,
    pub endpoint: String,
    pub request_timeout: Duration,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl Config {
    /// Loads from the process environment. A missing credential is fatal.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let api_key = non_empty(API_KEY_VAR)
            .or_else(|| non_empty(GEMINI_API_KEY_VAR))
            .ok_or_else(|| ConfigError::MissingCredential(API_KEY_VAR.to_string()))?;

        let model = non_empty(MODEL_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let endpoint = non_empty(ENDPOINT_VAR).unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        let timeout_secs = match non_empty(TIMEOUT_VAR) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(0) => {
                    return Err(ConfigError::InvalidValue {
                        name: TIMEOUT_VAR.to_string(),
                        reason: "must be greater than zero".to_string(),
                    });
                }
                Ok(secs) => secs,
                Err(e) => {
                    return Err(ConfigError::InvalidValue {
                        name: TIMEOUT_VAR.to_string(),
                        reason: e.to_string(),
                    });
                }
            },
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            api_key,
            model,
            endpoint,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}
