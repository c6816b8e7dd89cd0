//! Crawl statistics
//!
//! Counters collected by a session while it runs, and a plain-text report
//! for the end of a run.

use chrono::{DateTime, Utc};

/// Counters for one crawl session
#[derive(Debug, Clone)]
pub struct CrawlStats {
    /// Results pages fetched successfully
    pub pages_fetched: u32,

    /// Listing blocks read across all pages
    pub listings_seen: u64,

    /// Distinct records handed to the sink
    pub records_emitted: u64,

    /// Listings dropped because an equal record was already emitted
    pub duplicates_skipped: u64,

    /// When the session started
    pub started_at: DateTime<Utc>,

    /// When the session reached a terminal phase
    pub finished_at: Option<DateTime<Utc>>,

    /// Hash of the configuration file the crawl ran with, if one was loaded
    pub config_hash: Option<String>,
}

impl CrawlStats {
    /// Creates zeroed counters starting now
    pub fn new() -> Self {
        Self {
            pages_fetched: 0,
            listings_seen: 0,
            records_emitted: 0,
            duplicates_skipped: 0,
            started_at: Utc::now(),
            finished_at: None,
            config_hash: None,
        }
    }

    /// Marks the session as finished now
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Whole seconds between start and finish, if finished
    pub fn duration_seconds(&self) -> Option<u64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_seconds().max(0) as u64)
    }

    /// Share of listings that were duplicates, as a percentage
    pub fn duplicate_rate(&self) -> f64 {
        if self.listings_seen == 0 {
            return 0.0;
        }
        (self.duplicates_skipped as f64 / self.listings_seen as f64) * 100.0
    }
}

impl Default for CrawlStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CrawlStats) {
    println!("=== Crawl Statistics ===\n");

    println!("  Started: {}", stats.started_at.to_rfc3339());
    if let Some(finished) = stats.finished_at {
        println!("  Finished: {}", finished.to_rfc3339());
    }
    if let Some(duration) = stats.duration_seconds() {
        println!("  Duration: {} seconds", duration);
    }
    match &stats.config_hash {
        Some(hash) => println!("  Config: {}", hash),
        None => println!("  Config: defaults"),
    }
    println!();

    println!("  Pages fetched: {}", stats.pages_fetched);
    println!("  Listings seen: {}", stats.listings_seen);
    println!("  Unique records: {}", stats.records_emitted);
    println!(
        "  Duplicates skipped: {} ({:.1}%)",
        stats.duplicates_skipped,
        stats.duplicate_rate()
    );
}
