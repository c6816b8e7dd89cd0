//! Output module for delivering and exporting crawl results
//!
//! This module handles:
//! - Streaming newly discovered records to a sink
//! - Exporting the final record set as labeled CSV rows
//! - Recording and printing crawl statistics

mod csv_export;
pub mod stats;
mod traits;

pub use csv_export::{export_csv, with_default_extension, write_records};
pub use stats::{print_statistics, CrawlStats};
pub use traits::{OutputError, OutputResult, RecordSink};
