//! HTTP module
//!
//! Provides the authenticated request context and the per-page retry loop.
//!
//! # Features
//!
//! - **Courtesy delay**: a fixed wait before every request attempt
//! - **Timeout retries**: timed-out requests are retried up to `max_attempts`
//! - **Fail fast**: any other transport error or non-200 status aborts
//! - **Authentication**: integration with the auth module

mod client;

pub use client::HttpClient;
