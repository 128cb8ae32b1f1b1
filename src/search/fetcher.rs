//! HTTP fetcher implementation
//!
//! This module handles the single GET a worker issues for its target:
//! - Building the shared HTTP client with the per-request timeout
//! - Turning the target into a URL
//! - Reading the whole body as text
//! - Classifying failures
//!
//! There is exactly one attempt per target.

use crate::url::request_url;
use crate::UrlError;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use thiserror::Error;

/// Default per-request timeout
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Default user agent sent with every request
pub const DEFAULT_USER_AGENT: &str = concat!("site-searcher/", env!("CARGO_PKG_VERSION"));

/// Maximum number of redirects followed for one target
const MAX_REDIRECTS: usize = 10;

/// Idle connections kept per host; a connection closes with its request
const POOL_MAX_IDLE_PER_HOST: usize = 0;

/// A fetch that did not produce a body
///
/// The `Display` text is what ends up in the report, so every variant names
/// the target it failed for.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The target could not be turned into a URL
    #[error("{target}: invalid target: {source}")]
    InvalidTarget { target: String, source: UrlError },

    /// Timeout, refused connection, DNS failure or any other transport error
    #[error("Get {url}, fetch error: {source}")]
    Request { url: String, source: reqwest::Error },

    /// The response arrived but its body could not be read
    #[error("{target}: reading error: {source}")]
    Read { target: String, source: reqwest::Error },
}

impl FetchError {
    /// Returns true if the failure was caused by the request timeout
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Request { source, .. } | Self::Read { source, .. } => source.is_timeout(),
            Self::InvalidTarget { .. } => false,
        }
    }

    /// Returns true if the connection could not be established
    pub fn is_connect(&self) -> bool {
        matches!(self, Self::Request { source, .. } if source.is_connect())
    }
}

/// A successfully read response
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub url: String,

    /// HTTP status code; any status counts as fetched
    pub status_code: u16,

    /// Response body decoded as text
    pub body: String,
}

/// Builds an HTTP client with proper configuration
///
/// The timeout covers the whole request, from connecting to reading the last
/// byte of the body. Connections are closed once their response has been
/// read, so open sockets never outnumber the requests in flight.
///
/// # Arguments
///
/// * `user_agent` - User-Agent header value
/// * `timeout` - Per-request timeout
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use site_searcher::search::{build_http_client, DEFAULT_REQUEST_TIMEOUT, DEFAULT_USER_AGENT};
///
/// let client = build_http_client(DEFAULT_USER_AGENT, DEFAULT_REQUEST_TIMEOUT).unwrap();
/// ```
pub fn build_http_client(user_agent: &str, timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .connect_timeout(timeout)
        .redirect(Policy::limited(MAX_REDIRECTS))
        .pool_max_idle_per_host(POOL_MAX_IDLE_PER_HOST)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a target's page and reads its body
///
/// # Request Flow
///
/// 1. Build the URL (`http://` is assumed when the target has no scheme)
/// 2. Send the GET request
/// 3. Read the entire body, whatever the status code
/// 4. Decode the body using the `Content-Type` charset (UTF-8 by default);
///    undecodable bytes become U+FFFD instead of failing
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `target` - The ranked-list target
///
/// # Returns
///
/// * `Ok(FetchedPage)` - The body was read
/// * `Err(FetchError)` - The target was invalid, the request failed, or the
///   body could not be read
pub async fn fetch_body(client: &Client, target: &str) -> Result<FetchedPage, FetchError> {
    let url = request_url(target).map_err(|source| FetchError::InvalidTarget {
        target: target.to_string(),
        source,
    })?;

    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    let final_url = response.url().to_string();

    if !status.is_success() {
        tracing::debug!("{} answered HTTP {}", final_url, status.as_u16());
    }

    let body = response.text().await.map_err(|source| FetchError::Read {
        target: target.to_string(),
        source,
    })?;

    Ok(FetchedPage {
        url: final_url,
        status_code: status.as_u16(),
        body,
    })
}
