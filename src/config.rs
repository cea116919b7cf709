//! Client configuration
//!
//! `ClientConfig` is created once, before the client is built, and is
//! immutable afterwards. It can be assembled with a builder or loaded from
//! a YAML file:
//!
//! ```yaml
//! url: https://mds.example.com/provider
//! token: secret-token
//! headers:
//!   X-Provider-Region: west
//! timeout: 10
//! max_attempts: 5
//! delay: 0.5
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Default `Authorization` header type
pub const DEFAULT_AUTH_TYPE: &str = "Bearer";

/// Auth type that selects HTTP Basic credentials instead of a header
pub const BASIC_AUTH_TYPE: &str = "HttpBasicAuth";

/// Configuration for a provider client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// The provider's base MDS endpoint URL
    pub url: String,

    /// `Authorization` header type, or `HttpBasicAuth` for basic credentials
    #[serde(default = "default_auth_type")]
    pub auth_type: String,

    /// Access token sent as `Authorization: <auth_type> <token>`
    #[serde(default)]
    pub token: Option<String>,

    /// Username for basic auth
    #[serde(default)]
    pub user: Option<String>,

    /// Password for basic auth
    #[serde(default)]
    pub password: Option<String>,

    /// Additional request headers
    #[serde(default)]
    pub headers: BTreeMap<String, String>,

    /// Per-request timeout
    #[serde(default = "default_timeout", with = "duration_secs")]
    pub timeout: Duration,

    /// Maximum number of times a request is attempted when it times out
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Wait before every request attempt
    #[serde(default = "default_delay", with = "duration_secs")]
    pub delay: Duration,
}

fn default_auth_type() -> String {
    DEFAULT_AUTH_TYPE.to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_max_attempts() -> u32 {
    5
}

fn default_delay() -> Duration {
    Duration::from_secs(1)
}

impl ClientConfig {
    /// Create a new config builder for the given base URL
    pub fn builder(url: impl Into<String>) -> ClientConfigBuilder {
        ClientConfigBuilder {
            config: ClientConfig {
                url: url.into(),
                auth_type: default_auth_type(),
                token: None,
                user: None,
                password: None,
                headers: BTreeMap::new(),
                timeout: default_timeout(),
                max_attempts: default_max_attempts(),
                delay: default_delay(),
            },
        }
    }

    /// Whether `auth_type` selects HTTP Basic credentials
    pub fn is_basic_auth(&self) -> bool {
        self.auth_type.eq_ignore_ascii_case(BASIC_AUTH_TYPE)
    }

    /// Check the settings that do not involve credentials
    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(Error::invalid_value("url", "must not be empty"));
        }
        if self.max_attempts == 0 {
            return Err(Error::invalid_value("max_attempts", "must be at least 1"));
        }
        if self.auth_type.trim().is_empty() {
            return Err(Error::invalid_value("auth_type", "must not be empty"));
        }
        Ok(())
    }
}

/// Builder for [`ClientConfig`]
#[derive(Debug, Clone)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the `Authorization` header type
    #[must_use]
    pub fn auth_type(mut self, auth_type: impl Into<String>) -> Self {
        self.config.auth_type = auth_type.into();
        self
    }

    /// Set the access token
    #[must_use]
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.config.token = Some(token.into());
        self
    }

    /// Use HTTP Basic credentials
    #[must_use]
    pub fn basic_auth(mut self, user: impl Into<String>, password: Option<String>) -> Self {
        self.config.auth_type = BASIC_AUTH_TYPE.to_string();
        self.config.user = Some(user.into());
        self.config.password = password;
        self
    }

    /// Add an extra request header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.headers.insert(key.into(), value.into());
        self
    }

    /// Set the per-request timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the maximum number of attempts per request
    #[must_use]
    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.config.max_attempts = max_attempts;
        self
    }

    /// Set the wait before each request attempt
    #[must_use]
    pub fn delay(mut self, delay: Duration) -> Self {
        self.config.delay = delay;
        self
    }

    /// Build the config
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

/// Load a client configuration from a YAML file
pub fn load_config(path: impl AsRef<Path>) -> Result<ClientConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        Error::config(format!(
            "Failed to read config file '{}': {}",
            path.display(),
            e
        ))
    })?;
    load_config_from_str(&content)
}

/// Load a client configuration from a YAML string
pub fn load_config_from_str(yaml: &str) -> Result<ClientConfig> {
    let config: ClientConfig = serde_yaml::from_str(yaml)?;
    config.validate()?;
    Ok(config)
}

/// (De)serialize a `Duration` as seconds, integer or fractional
mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        if value.subsec_nanos() == 0 {
            serializer.serialize_u64(value.as_secs())
        } else {
            serializer.serialize_f64(value.as_secs_f64())
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
    }
}
