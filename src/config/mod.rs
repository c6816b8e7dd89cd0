//! Configuration module for Listing-Sweep
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! All sections are optional; missing keys fall back to the defaults for the
//! Yellow Pages Canada search pages.
//!
//! # Example
//!
//! ```no_run
//! use listing_sweep::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("sweep.toml")).unwrap();
//! println!("Waiting {}ms between pages", config.crawler.page_delay);
//! ```

mod parser;
mod types;
pub(crate) mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, OutputConfig, SelectorConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
