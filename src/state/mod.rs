//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlPhase`: Where a session is in its fetch/guard/extract/resolve loop
//! - `RecordSet`: The session's ordered, deduplicated record accumulator

mod crawl_phase;
mod record_set;

// Re-export main types
pub use crawl_phase::CrawlPhase;
pub use record_set::RecordSet;
