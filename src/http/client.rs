//! HTTP client with delay and timeout retries
//!
//! Provides the request context shared by every fetch:
//! - Authentication and default headers applied to each request
//! - A fixed delay before each attempt
//! - Retries on timeout, immediate failure on everything else
//! - Diagnostics logged for non-200 responses

use crate::auth::Authenticator;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::types::QueryParams;
use reqwest::header::HeaderMap;
use reqwest::{Client, Method, StatusCode};
use std::time::Duration;
use tracing::{debug, error, warn};

/// HTTP client bound to one provider configuration
///
/// Read-only after construction, so it can be shared across tasks.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    authenticator: Authenticator,
    timeout: Duration,
    max_attempts: u32,
    delay: Duration,
}

/// Outcome of a single request attempt
enum Attempt {
    Done(String),
    TimedOut,
}

impl HttpClient {
    /// Create an HTTP client from the client configuration
    ///
    /// Resolves credentials eagerly; no request is sent.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let authenticator = Authenticator::new(config)?;

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(format!("mds-provider-client/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            authenticator,
            timeout: config.timeout,
            max_attempts: config.max_attempts,
            delay: config.delay,
        })
    }

    /// GET `url` and return the body of a 200 response
    ///
    /// Waits `delay` before every attempt, including the first. Timeouts
    /// (while connecting, waiting or reading the body) are retried until
    /// `max_attempts` is reached. Empty `query` sends no query string.
    pub async fn get_body(&self, url: &str, query: &QueryParams) -> Result<String> {
        let mut attempt = 0;

        loop {
            attempt += 1;

            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }

            match self.attempt(url, query).await? {
                Attempt::Done(body) => return Ok(body),
                Attempt::TimedOut if attempt < self.max_attempts => {
                    warn!(
                        "Request timeout after {:?}, attempt {}/{}, trying again: GET {}",
                        self.timeout, attempt, self.max_attempts, url
                    );
                }
                Attempt::TimedOut => {
                    error!(
                        "Request timeout, giving up after {} attempt(s): GET {}",
                        attempt, url
                    );
                    return Err(Error::Timeout {
                        url: url.to_string(),
                        attempts: attempt,
                    });
                }
            }
        }
    }

    async fn attempt(&self, url: &str, query: &QueryParams) -> Result<Attempt> {
        let mut req = self.authenticator.apply(self.client.get(url));
        if !query.is_empty() {
            req = req.query(query);
        }

        debug!("GET {} params={:?}", url, query);

        let response = match req.send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => return Ok(Attempt::TimedOut),
            Err(e) => return Err(transport_error(url, e)),
        };

        let status = response.status();
        let final_url = response.url().to_string();
        let headers = response.headers().clone();

        // The status is final once received; the body only feeds diagnostics
        if status != StatusCode::OK {
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<unreadable body: {e}>"));
            describe_failure(&Method::GET, &final_url, status, &headers, &body);
            return Err(Error::request_failed(
                Method::GET.as_str(),
                final_url,
                status.as_u16(),
                body,
            ));
        }

        match response.text().await {
            Ok(body) => Ok(Attempt::Done(body)),
            Err(e) if e.is_timeout() => Ok(Attempt::TimedOut),
            Err(e) => Err(transport_error(&final_url, e)),
        }
    }
}

/// Log a transport failure that is not retried
fn transport_error(url: &str, e: reqwest::Error) -> Error {
    error!("GET {} failed: {}", url, e);
    Error::Http(e)
}

/// Log the details of a failed response
fn describe_failure(method: &Method, url: &str, status: StatusCode, headers: &HeaderMap, body: &str) {
    error!(
        "Requested {} {}, Response Code: {}",
        method,
        url,
        status.as_u16()
    );
    for (name, value) in headers {
        error!("  {}: {}", name, value.to_str().unwrap_or("<binary>"));
    }
    if !body.is_empty() {
        error!("Response body: {}", body);
    }
}
