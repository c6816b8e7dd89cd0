//! Crawl session - the page loop
//!
//! A session owns everything one crawl needs: the HTTP client, the compiled
//! selectors, and the record accumulator. It walks the results pages one at
//! a time:
//!
//! 1. Fetch the page
//! 2. Stop if the page is an anti-automation challenge
//! 3. Extract listings, clean names, drop duplicates, emit new records
//! 4. Read the page count indicator to find the next page
//! 5. Wait the configured delay, then go back to 1
//!
//! Any fetch, challenge or pagination error ends the crawl. Records emitted
//! before the error stay delivered and are returned with the report.

use crate::config::{validate, Config};
use crate::crawler::captcha::guard_captcha;
use crate::crawler::extractor::{parse_page, ListingExtractor};
use crate::crawler::fetcher::{build_http_client, fetch_page};
use crate::crawler::pagination::resolve_next_page;
use crate::crawler::selectors::Selectors;
use crate::listing::ListingRecord;
use crate::output::{CrawlStats, RecordSink};
use crate::state::{CrawlPhase, RecordSet};
use crate::url::SearchQuery;
use crate::SweepError;
use reqwest::Client;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// How a crawl ended
#[derive(Debug)]
pub enum CrawlOutcome {
    /// Every results page was processed
    Done,

    /// The caller cancelled the crawl
    Cancelled,

    /// An error ended the crawl
    Aborted(SweepError),
}

impl CrawlOutcome {
    /// Returns true if the crawl ran to the last page
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// The error that ended the crawl, if any
    pub fn error(&self) -> Option<&SweepError> {
        match self {
            Self::Aborted(e) => Some(e),
            _ => None,
        }
    }

    /// The terminal phase this outcome corresponds to
    pub fn phase(&self) -> CrawlPhase {
        match self {
            Self::Done => CrawlPhase::Done,
            Self::Cancelled => CrawlPhase::Cancelled,
            Self::Aborted(_) => CrawlPhase::Aborted,
        }
    }
}

/// Everything a finished session hands back
#[derive(Debug)]
pub struct CrawlReport {
    /// How the crawl ended
    pub outcome: CrawlOutcome,

    /// Distinct records in discovery order, including those found before an abort
    pub records: Vec<ListingRecord>,

    /// Counters collected during the crawl
    pub stats: CrawlStats,
}

impl CrawlReport {
    /// Report for a crawl that failed before its first request
    pub fn aborted(error: SweepError) -> Self {
        let mut stats = CrawlStats::new();
        stats.finish();
        Self {
            outcome: CrawlOutcome::Aborted(error),
            records: Vec::new(),
            stats,
        }
    }
}

/// One crawl over the results pages of a single search
pub struct CrawlSession {
    client: Client,
    extractor: ListingExtractor,
    page_delay: Duration,
    search_url: String,
    records: RecordSet,
    phase: CrawlPhase,
    stats: CrawlStats,
    cancel: CancellationToken,
    last_page: Option<u32>,
}

impl CrawlSession {
    /// Creates a new session for a search
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    /// * `query` - Occupation and location to search for
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlSession)` - Session ready to run
    /// * `Err(SweepError)` - Invalid configuration, query, or HTTP client setup
    pub fn new(config: Config, query: SearchQuery) -> Result<Self, SweepError> {
        validate(&config)?;

        let selectors = Selectors::compile(&config.selectors)?;
        let search_url = query.to_url(&config.crawler.base_url)?.to_string();
        let client = build_http_client(&config.crawler, &config.user_agent)?;

        Ok(Self {
            client,
            extractor: ListingExtractor::new(selectors),
            page_delay: Duration::from_millis(config.crawler.page_delay),
            search_url,
            records: RecordSet::new(),
            phase: CrawlPhase::Start,
            stats: CrawlStats::new(),
            cancel: CancellationToken::new(),
            last_page: None,
        })
    }

    /// Replaces the session's cancellation token with one the caller holds
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Records the hash of the configuration file this session was built from
    pub fn with_config_hash(mut self, hash: impl Into<String>) -> Self {
        self.stats.config_hash = Some(hash.into());
        self
    }

    /// A handle that stops this session when cancelled
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// The first results page URL
    pub fn search_url(&self) -> &str {
        &self.search_url
    }

    /// The session's current phase
    pub fn phase(&self) -> CrawlPhase {
        self.phase
    }

    /// Runs the crawl to completion
    ///
    /// Each new record goes to `sink` as soon as it is accepted. The report
    /// carries the outcome and the full accumulated record set.
    pub async fn run<S: RecordSink>(mut self, sink: &mut S) -> CrawlReport {
        tracing::info!("Starting crawl at {}", self.search_url);

        let terminal = match self.crawl_pages(sink).await {
            Ok(phase) => self.transition(phase).map(|_| phase),
            Err(e) => Err(e),
        };

        let outcome = match terminal {
            Ok(CrawlPhase::Cancelled) => CrawlOutcome::Cancelled,
            Ok(_) => CrawlOutcome::Done,
            Err(e) => {
                self.phase = CrawlPhase::Aborted;
                tracing::warn!("Crawl aborted: {}", e);
                CrawlOutcome::Aborted(e)
            }
        };

        self.stats.finish();
        tracing::info!(
            "Crawl {}: {} pages, {} unique records",
            outcome.phase(),
            self.stats.pages_fetched,
            self.records.len()
        );

        CrawlReport {
            outcome,
            records: self.records.into_vec(),
            stats: self.stats,
        }
    }

    /// Walks pages until the last one, returning `Done` or `Cancelled`
    async fn crawl_pages<S: RecordSink>(&mut self, sink: &mut S) -> Result<CrawlPhase, SweepError> {
        let mut url = self.search_url.clone();

        loop {
            self.transition(CrawlPhase::Fetching)?;
            let body = fetch_page(&self.client, &url).await?;
            self.stats.pages_fetched += 1;

            if self.cancel.is_cancelled() {
                tracing::info!("Crawl cancelled after fetching {}", url);
                return Ok(CrawlPhase::Cancelled);
            }

            match self.process_page(&url, &body, sink)? {
                Some(next_url) => {
                    if !self.pause().await {
                        tracing::info!("Crawl cancelled before fetching {}", next_url);
                        return Ok(CrawlPhase::Cancelled);
                    }
                    url = next_url;
                }
                None => return Ok(CrawlPhase::Done),
            }
        }
    }

    /// Guards, extracts and resolves one fetched page
    ///
    /// Returns the next page URL, or `None` on the last page. The parsed
    /// document never outlives this call.
    fn process_page<S: RecordSink>(
        &mut self,
        url: &str,
        body: &[u8],
        sink: &mut S,
    ) -> Result<Option<String>, SweepError> {
        let document = parse_page(body);

        self.transition(CrawlPhase::GuardChecking)?;
        guard_captcha(&document, &self.extractor.selectors().captcha, url)?;

        self.transition(CrawlPhase::Extracting)?;
        let mut emitted = 0u64;
        let mut skipped = 0u64;
        for raw in self.extractor.listings(&document) {
            self.stats.listings_seen += 1;
            let record = raw.normalized();

            if self.records.contains(&record) {
                tracing::debug!("Skipping duplicate listing: {}", record.name);
                skipped += 1;
                continue;
            }

            sink.emit(&record)?;
            tracing::debug!("New listing: {}", record.name);
            self.records.insert(record);
            emitted += 1;
        }
        self.stats.records_emitted += emitted;
        self.stats.duplicates_skipped += skipped;

        tracing::info!(
            "Page {}: {} new records, {} duplicates",
            self.stats.pages_fetched,
            emitted,
            skipped
        );

        self.transition(CrawlPhase::ResolvingNext)?;
        let next = resolve_next_page(
            &document,
            &self.extractor.selectors().page_count,
            &self.search_url,
        )?;

        let Some((count, next_url)) = next else {
            return Ok(None);
        };

        if let Some(previous) = self.last_page {
            if count.current <= previous {
                return Err(SweepError::PaginationStalled {
                    current: count.current,
                    previous,
                });
            }
        }
        self.last_page = Some(count.current);

        tracing::debug!("Page {} of {}, next: {}", count.current, count.total, next_url);
        Ok(Some(next_url))
    }

    /// Waits out the inter-page delay; returns false if cancelled meanwhile
    async fn pause(&self) -> bool {
        if self.page_delay.is_zero() {
            return !self.cancel.is_cancelled();
        }

        tokio::select! {
            _ = self.cancel.cancelled() => false,
            _ = tokio::time::sleep(self.page_delay) => true,
        }
    }

    /// Moves to `next`, rejecting steps the page loop never takes
    fn transition(&mut self, next: CrawlPhase) -> Result<(), SweepError> {
        if !self.phase.can_transition_to(next) {
            return Err(SweepError::InvalidTransition {
                from: self.phase,
                to: next,
            });
        }
        tracing::trace!("Phase {} -> {}", self.phase, next);
        self.phase = next;
        Ok(())
    }
}
