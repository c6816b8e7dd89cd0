//! Listing-Sweep: a directory-site scraper
//!
//! This crate searches a business listings site for an occupation in a location,
//! walks every page of results, extracts one record per listing, and keeps the
//! deduplicated set around for export.

pub mod config;
pub mod crawler;
pub mod listing;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Listing-Sweep operations
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Error fetching page {url}: {status} {reason}")]
    Fetch {
        url: String,
        status: u16,
        reason: String,
    },

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("CAPTCHA is present on {url}, please solve it manually")]
    CaptchaDetected { url: String },

    #[error("Malformed page count '{text}': {reason}")]
    PaginationParse { text: String, reason: String },

    #[error("Pagination did not advance: page {current} follows page {previous}")]
    PaginationStalled { current: u32, previous: u32 },

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidTransition {
        from: state::CrawlPhase,
        to: state::CrawlPhase,
    },

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SweepError {
    /// Returns true if the error means the site is challenging us and a human
    /// has to step in before another crawl is attempted
    pub fn needs_intervention(&self) -> bool {
        matches!(self, Self::CaptchaDetected { .. })
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid selector: {0}")]
    InvalidSelector(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("URL cannot carry a path: {0}")]
    CannotBeABase(String),

    #[error("Search term '{0}' is empty")]
    EmptySegment(&'static str),
}

/// Result type alias for Listing-Sweep operations
pub type Result<T> = std::result::Result<T, SweepError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use crate::config::Config;
pub use crate::crawler::{crawl, CrawlOutcome, CrawlReport, CrawlSession};
pub use crate::listing::{ListingRecord, PLACEHOLDER};
pub use crate::state::{CrawlPhase, RecordSet};
pub use crate::url::SearchQuery;
