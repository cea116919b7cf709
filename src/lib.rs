// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::needless_pass_by_value)]

//! # MDS Provider Client
//!
//! A client for Mobility Data Specification (MDS) Provider APIs.
//!
//! ## Features
//!
//! - **Token or Basic auth**: `Authorization: <type> <token>` or HTTP Basic
//! - **Pagination**: follows `links.next` until the provider runs dry
//! - **Timeout retries**: fixed courtesy delay, bounded attempts
//! - **Typed records**: `StatusChange` and `Trip`, with unknown fields kept
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mds_provider_client::{ClientConfig, ProviderClient, Result, TripsQuery};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = ClientConfig::builder("https://mds.example.com/provider")
//!         .token("secret-token")
//!         .build();
//!     let client = ProviderClient::new(config)?;
//!
//!     let trips = client
//!         .get_trips(&TripsQuery::new().start_time(1_533_081_600_i64))
//!         .await?;
//!     println!("{} trips", trips.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                     ProviderClient                       │
//! │   get_status_changes()   get_trips()   fetch_raw()       │
//! └──────────────────────────────────────────────────────────┘
//!                              │
//! ┌─────────────┬──────────────┴──────┬─────────────────────┐
//! │    Query    │      Pagination     │        HTTP         │
//! ├─────────────┼─────────────────────┼─────────────────────┤
//! │ time → secs │ data.<endpoint>     │ delay before attempt│
//! │ bbox        │ links.next          │ retry on timeout    │
//! │ extra       │ empty page = stop   │ Auth (token/basic)  │
//! └─────────────┴─────────────────────┴─────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types: endpoints, timestamps, bounding boxes
pub mod types;

/// Client configuration and YAML loading
pub mod config;

/// Authentication
pub mod auth;

/// HTTP client with timeout retries
pub mod http;

/// Page envelope parsing and the paginated fetcher
pub mod pagination;

/// Query builders
pub mod query;

/// Typed records
pub mod records;

/// Provider client
pub mod client;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use client::ProviderClient;
pub use config::{load_config, load_config_from_str, ClientConfig};
pub use error::{Error, Result};
pub use query::{StatusChangesQuery, TripsQuery};
pub use records::{Record, StatusChange, Trip};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
