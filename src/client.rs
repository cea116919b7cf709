//! Provider client
//!
//! The public entry point: one client per provider, built from a
//! [`ClientConfig`]. Each call returns its own records; nothing is stored
//! on the client between calls.

use crate::config::ClientConfig;
use crate::error::Result;
use crate::pagination::Fetcher;
use crate::query::{StatusChangesQuery, TripsQuery};
use crate::records::{Record, StatusChange, Trip};
use crate::types::{Endpoint, JsonValue, QueryParams};

/// Client for MDS Provider APIs
///
/// Cheap to clone and safe to share between tasks.
#[derive(Debug, Clone)]
pub struct ProviderClient {
    config: ClientConfig,
    fetcher: Fetcher,
}

impl ProviderClient {
    /// Create a client, validating the configuration and credentials
    pub fn new(config: ClientConfig) -> Result<Self> {
        let fetcher = Fetcher::new(&config)?;
        Ok(Self { config, fetcher })
    }

    /// Get the configuration this client was built from
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Request status changes
    pub async fn get_status_changes(&self, query: &StatusChangesQuery) -> Result<Vec<StatusChange>> {
        self.fetch_typed(&query.to_params(), query.paging).await
    }

    /// Request trips
    pub async fn get_trips(&self, query: &TripsQuery) -> Result<Vec<Trip>> {
        self.fetch_typed(&query.to_params(), query.paging).await
    }

    /// Request untyped records from any endpoint
    pub async fn fetch_raw(
        &self,
        endpoint: Endpoint,
        params: &QueryParams,
        follow_pages: bool,
    ) -> Result<Vec<JsonValue>> {
        self.fetcher.fetch(endpoint, params, follow_pages).await
    }

    async fn fetch_typed<R: Record>(&self, params: &QueryParams, follow_pages: bool) -> Result<Vec<R>> {
        let values = self.fetch_raw(R::ENDPOINT, params, follow_pages).await?;
        R::from_values(&self.fetcher.endpoint_url(R::ENDPOINT), values)
    }
}
