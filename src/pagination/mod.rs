//! Pagination module
//!
//! Follows `links.next` until the provider runs out of pages.
//!
//! # Overview
//!
//! Each response is parsed into a [`PageEnvelope`]. Records found under
//! `data.<endpoint>` are appended to the result in order. Pagination stops
//! on the first empty page, when there is no `next` link, or after the
//! first page when paging is disabled. Requests that follow a `next` link
//! carry no query parameters of their own.

mod fetcher;
mod types;

pub use fetcher::Fetcher;
pub use types::{NextPage, PageEnvelope, PaginationState};
