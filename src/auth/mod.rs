//! Authentication module
//!
//! Supports: token header (`Authorization: <type> <token>`) and HTTP Basic.
//!
//! The `Authenticator` is derived once from a [`ClientConfig`](crate::config::ClientConfig)
//! and applied to every outgoing request. Building it never touches the network.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::Credentials;
