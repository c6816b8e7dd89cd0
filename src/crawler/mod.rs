//! Crawler module for fetching and reading results pages
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with a fixed client identity
//! - Listing extraction and field cleanup
//! - Challenge detection
//! - Page count parsing and next-page derivation
//! - The session loop that ties them together

mod captcha;
mod extractor;
mod fetcher;
mod pagination;
mod selectors;
mod session;

pub use captcha::{detect_captcha, guard_captcha};
pub use extractor::{parse_page, ListingExtractor, Listings};
pub use fetcher::{build_http_client, fetch_page};
pub use pagination::{read_page_count, resolve_next_page, PageCount};
pub use selectors::Selectors;
pub use session::{CrawlOutcome, CrawlReport, CrawlSession};

use crate::config::Config;
use crate::output::RecordSink;
use crate::url::SearchQuery;

/// Runs a complete crawl for one search
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Validate the configuration and build the search URL
/// 2. Build the HTTP client
/// 3. Fetch, guard and extract every results page in turn
/// 4. Stream each new record to `sink`
///
/// Setup failures are reported the same way as crawl failures, as an
/// aborted outcome with no records.
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `query` - Occupation and location to search for
/// * `sink` - Receives each new record as it is discovered
pub async fn crawl<S: RecordSink>(config: Config, query: SearchQuery, sink: &mut S) -> CrawlReport {
    match CrawlSession::new(config, query) {
        Ok(session) => session.run(sink).await,
        Err(e) => {
            tracing::error!("Failed to start crawl: {}", e);
            CrawlReport::aborted(e)
        }
    }
}
