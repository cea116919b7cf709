//! Authenticator implementation
//!
//! Builds the default header set once and applies it, together with any
//! transport-level credentials, to each request.

use super::types::Credentials;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::RequestBuilder;

/// Authenticator handles applying authentication to HTTP requests
#[derive(Debug, Clone)]
pub struct Authenticator {
    /// Resolved credentials
    credentials: Credentials,
    /// Headers sent with every request
    default_headers: HeaderMap,
}

impl Authenticator {
    /// Create an authenticator from the client configuration
    ///
    /// Fails eagerly on missing or contradictory credentials and on
    /// header names or values that cannot be sent.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let credentials = Credentials::from_config(config)?;

        let mut default_headers = HeaderMap::new();
        for (key, value) in &config.headers {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|e| Error::invalid_value("headers", format!("'{key}': {e}")))?;
            // Authorization is owned by the credentials
            if name == AUTHORIZATION {
                continue;
            }
            let value = HeaderValue::from_str(value)
                .map_err(|e| Error::invalid_value("headers", format!("'{key}': {e}")))?;
            default_headers.insert(name, value);
        }

        if let Credentials::Token { auth_type, token } = &credentials {
            let mut value = HeaderValue::from_str(&format!("{auth_type} {token}"))
                .map_err(|e| Error::invalid_value("token", e.to_string()))?;
            value.set_sensitive(true);
            default_headers.insert(AUTHORIZATION, value);
        }

        Ok(Self {
            credentials,
            default_headers,
        })
    }

    /// Apply headers and credentials to a request builder
    pub fn apply(&self, req: RequestBuilder) -> RequestBuilder {
        let req = req.headers(self.default_headers.clone());
        match &self.credentials {
            Credentials::Basic { username, password } => req.basic_auth(username, password.as_ref()),
            Credentials::Token { .. } => req,
        }
    }

    /// Headers sent with every request
    pub fn default_headers(&self) -> &HeaderMap {
        &self.default_headers
    }

    /// Get the resolved credentials
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }
}
