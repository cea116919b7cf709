//! Paginated fetch engine
//!
//! Walks the pages of one endpoint and accumulates their records.

use super::types::{NextPage, PageEnvelope, PaginationState};
use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::HttpClient;
use crate::types::{Endpoint, JsonValue, QueryParams};
use tracing::{debug, info};
use url::Url;

/// Fetches every page of an endpoint
#[derive(Debug, Clone)]
pub struct Fetcher {
    http: HttpClient,
    base_url: String,
}

impl Fetcher {
    /// Create a fetcher for the provider described by `config`
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Url::parse(&config.url)?;
        let http = HttpClient::new(config)?;
        Ok(Self {
            http,
            base_url: config.url.clone(),
        })
    }

    /// URL of an endpoint, joined with exactly one slash
    pub fn endpoint_url(&self, endpoint: Endpoint) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), endpoint)
    }

    /// Fetch records from `endpoint`
    ///
    /// `params` go out with the first request only; `next` links already
    /// carry the filter and cursor state. With `follow_pages` false only the
    /// first page is read. Any failure discards the records gathered so far.
    pub async fn fetch(
        &self,
        endpoint: Endpoint,
        params: &QueryParams,
        follow_pages: bool,
    ) -> Result<Vec<JsonValue>> {
        let no_params = QueryParams::new();
        let mut query = params;
        let mut url = self.endpoint_url(endpoint);
        let mut records = Vec::new();
        let mut state = PaginationState::new();

        while !state.done {
            let body = self.http.get_body(&url, query).await?;
            let page = PageEnvelope::parse(endpoint, &url, &body)?;
            state.add_page(page.records.len());
            info!(
                "Got payload with {} {} (page {})",
                page.records.len(),
                endpoint,
                state.pages
            );

            let next = page.next_page(follow_pages);
            records.extend(page.records);

            match next {
                NextPage::Continue { url: next_url } => {
                    url = Url::parse(&url)?.join(&next_url)?.to_string();
                    query = &no_params;
                }
                NextPage::Done => state.mark_done(),
            }
        }

        debug!(
            "Fetched {} {} across {} page(s)",
            state.total_fetched, endpoint, state.pages
        );
        Ok(records)
    }
}
