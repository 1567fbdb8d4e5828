//! Registry client configuration sourced from the environment.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::defaults;
use crate::error::{Error, Result};

/// Connection settings for the Model Registry REST service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// `host:port` of the registry service
    pub host: String,
    /// `http` or `https`
    pub scheme: String,
    /// REST API base path
    pub base_path: String,
    /// Per-request timeout; `None` leaves requests unbounded
    pub timeout: Option<Duration>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            host: defaults::MODEL_REGISTRY_BASE_URL.to_string(),
            scheme: defaults::MODEL_REGISTRY_SCHEME.to_string(),
            base_path: defaults::MODEL_REGISTRY_BASE_PATH.to_string(),
            timeout: None,
        }
    }
}

impl RegistryConfig {
    /// Read host, scheme and timeout from the environment.
    ///
    /// A variable set to an empty string is taken verbatim; only an unset
    /// variable falls back to its default. A timeout that is not a whole
    /// number of seconds is ignored with a warning.
    pub fn from_env() -> Self {
        let timeout = std::env::var(defaults::MODEL_REGISTRY_TIMEOUT_ENV)
            .ok()
            .and_then(|raw| match raw.trim().parse::<u64>() {
                Ok(secs) => Some(Duration::from_secs(secs)),
                Err(_) => {
                    log::warn!(
                        "Ignoring invalid {} value '{}'",
                        defaults::MODEL_REGISTRY_TIMEOUT_ENV,
                        raw
                    );
                    None
                }
            });

        Self {
            host: env_or(
                defaults::MODEL_REGISTRY_BASE_URL_ENV,
                defaults::MODEL_REGISTRY_BASE_URL,
            ),
            scheme: env_or(
                defaults::MODEL_REGISTRY_SCHEME_ENV,
                defaults::MODEL_REGISTRY_SCHEME,
            ),
            base_path: defaults::MODEL_REGISTRY_BASE_PATH.to_string(),
            timeout,
        }
    }

    /// Base URL all REST endpoints are resolved against.
    pub fn base_url(&self) -> Result<Url> {
        if self.scheme.is_empty() {
            return Err(Error::Config("model registry scheme is empty".into()));
        }
        if self.host.is_empty() {
            return Err(Error::Config("model registry host is empty".into()));
        }

        let raw = format!(
            "{}://{}/{}",
            self.scheme,
            self.host,
            self.base_path.trim_matches('/')
        );
        Url::parse(&raw)
            .map_err(|e| Error::Config(format!("invalid model registry URL '{}': {}", raw, e)))
    }
}

// Unset falls back to the default, set-but-empty does not.
fn env_or(key: &str, default: &str) -> String {
    match std::env::var(key) {
        Ok(value) => value,
        Err(_) => default.to_string(),
    }
}
