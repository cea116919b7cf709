//! Credential types
//!
//! Resolved from the raw config fields. Exactly one credential mode is
//! ever present.

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use std::fmt;

/// Credentials resolved from a client configuration
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Header authentication: `Authorization: <auth_type> <token>`
    Token {
        /// Header type, e.g. `Bearer`
        auth_type: String,
        /// The access token
        token: String,
    },

    /// HTTP Basic authentication
    Basic {
        /// Username
        username: String,
        /// Password
        password: Option<String>,
    },
}

impl Credentials {
    /// Resolve the credential mode selected by `config.auth_type`
    ///
    /// Fails when no credential is present, when both a token and a
    /// username/password are present, or when the selected mode lacks
    /// its credential.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let token = non_empty(config.token.as_deref());
        let user = non_empty(config.user.as_deref());
        let password = config.password.clone();

        if token.is_none() && user.is_none() {
            return Err(Error::config("Username or token is required"));
        }
        if token.is_some() && (user.is_some() || password.is_some()) {
            return Err(Error::config(
                "Both a token and basic credentials were supplied; use exactly one",
            ));
        }

        if config.is_basic_auth() {
            let username = user.ok_or_else(|| {
                Error::config(format!("auth_type '{}' requires a username", config.auth_type))
            })?;
            Ok(Self::Basic {
                username: username.to_string(),
                password,
            })
        } else {
            let token = token.ok_or_else(|| {
                Error::config(format!("auth_type '{}' requires a token", config.auth_type))
            })?;
            Ok(Self::Token {
                auth_type: config.auth_type.trim().to_string(),
                token: token.to_string(),
            })
        }
    }

    /// Whether these are HTTP Basic credentials
    pub fn is_basic(&self) -> bool {
        matches!(self, Self::Basic { .. })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Token { auth_type, .. } => f
                .debug_struct("Token")
                .field("auth_type", auth_type)
                .field("token", &"<redacted>")
                .finish(),
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
        }
    }
}
