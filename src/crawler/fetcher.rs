//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the HTTP client with the configured user agent and timeouts
//! - GET requests for results pages
//! - Error classification
//!
//! Every fetch is a single attempt. Anything but `200 OK` ends the crawl.

use crate::config::{CrawlerConfig, UserAgentConfig};
use crate::SweepError;
use reqwest::{redirect::Policy, Client, StatusCode};
use std::time::Duration;

/// Maximum redirect hops followed for a single page
const MAX_REDIRECTS: usize = 10;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `crawler` - Timeouts for each request
/// * `user_agent` - The identity sent in the `User-Agent` header
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use listing_sweep::config::{CrawlerConfig, UserAgentConfig};
/// use listing_sweep::crawler::build_http_client;
///
/// let client = build_http_client(&CrawlerConfig::default(), &UserAgentConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    crawler: &CrawlerConfig,
    user_agent: &UserAgentConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.value.as_str())
        .timeout(Duration::from_secs(crawler.request_timeout))
        .connect_timeout(Duration::from_secs(crawler.connect_timeout))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a results page and returns its raw body
///
/// # Error Classification
///
/// | Condition | Result |
/// |-----------|--------|
/// | HTTP 200 | Body bytes |
/// | Any other status | `SweepError::Fetch` with status and reason |
/// | Timeout | `SweepError::Timeout` |
/// | Connection/TLS/body error | `SweepError::Http` |
///
/// Redirects are followed by the client, so the status checked is the one
/// of the final response.
pub async fn fetch_page(client: &Client, url: &str) -> Result<Vec<u8>, SweepError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| classify_error(url, e))?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(SweepError::Fetch {
            url: url.to_string(),
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
        });
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| classify_error(url, e))?;

    tracing::debug!("Fetched {} ({} bytes)", url, body.len());

    Ok(body.to_vec())
}

/// Maps a transport error onto the crawl error taxonomy
fn classify_error(url: &str, error: reqwest::Error) -> SweepError {
    if error.is_timeout() {
        SweepError::Timeout {
            url: url.to_string(),
        }
    } else {
        SweepError::Http {
            url: url.to_string(),
            source: error,
        }
    }
}
