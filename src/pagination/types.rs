//! Pagination types
//!
//! The page envelope and the state tracked while walking pages.

use crate::error::{Error, Result};
use crate::types::{Endpoint, JsonObject, JsonValue};
use serde::Deserialize;

/// Result of the next page computation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPage {
    /// More pages available at this URL
    Continue {
        /// The provider-supplied `next` link
        url: String,
    },
    /// No more pages
    Done,
}

impl NextPage {
    /// Create a continuation with a new URL
    pub fn with_url(url: impl Into<String>) -> Self {
        Self::Continue { url: url.into() }
    }

    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Check if this is a continue result
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue { .. })
    }
}

/// One parsed page of a provider response
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageEnvelope {
    /// Records found under `data.<endpoint>`, in order
    pub records: Vec<JsonValue>,
    /// The `links.next` URL, if any
    pub next: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawEnvelope {
    #[serde(default)]
    data: Option<JsonObject>,
    #[serde(default)]
    links: Option<RawLinks>,
}

#[derive(Debug, Deserialize)]
struct RawLinks {
    #[serde(default)]
    next: Option<String>,
}

impl PageEnvelope {
    /// Parse a response body for `endpoint`
    ///
    /// A missing or null `data`, `data.<endpoint>` or `links` is not an
    /// error. Bodies that are not JSON objects, or whose fields have the
    /// wrong type, are malformed.
    pub fn parse(endpoint: Endpoint, url: &str, body: &str) -> Result<Self> {
        let raw: RawEnvelope =
            serde_json::from_str(body).map_err(|e| Error::malformed(url, e.to_string()))?;

        let records = match raw.data.and_then(|mut d| d.remove(endpoint.as_str())) {
            None | Some(JsonValue::Null) => Vec::new(),
            Some(JsonValue::Array(records)) => records,
            Some(other) => {
                return Err(Error::malformed(
                    url,
                    format!(
                        "expected an array at data.{}, found {}",
                        endpoint,
                        json_type_name(&other)
                    ),
                ))
            }
        };

        let next = raw
            .links
            .and_then(|links| links.next)
            .filter(|next| !next.trim().is_empty());

        Ok(Self { records, next })
    }

    /// Whether this page carries no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Decide where pagination goes after this page
    ///
    /// An empty page ends pagination even if it links to another page.
    pub fn next_page(&self, follow_pages: bool) -> NextPage {
        if self.is_empty() || !follow_pages {
            return NextPage::Done;
        }
        match &self.next {
            Some(url) => NextPage::with_url(url.clone()),
            None => NextPage::Done,
        }
    }
}

fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}

/// Tracks pagination state during one fetch
#[derive(Debug, Clone, Default)]
pub struct PaginationState {
    /// Pages received so far
    pub pages: u32,
    /// Total records fetched so far
    pub total_fetched: u64,
    /// Is pagination complete?
    pub done: bool,
}

impl PaginationState {
    /// Create a new pagination state
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a received page
    pub fn add_page(&mut self, records: usize) {
        self.pages += 1;
        self.total_fetched += records as u64;
    }

    /// Mark pagination as complete
    pub fn mark_done(&mut self) {
        self.done = true;
    }
}
