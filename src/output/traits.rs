//! Output sink traits and error types
//!
//! A crawl session hands every newly discovered record to a [`RecordSink`]
//! the moment it is accepted. Sinks decide where records go: a channel to a
//! display task, an in-memory list, or anything else the caller wires up.

use crate::listing::ListingRecord;
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Record receiver has been dropped")]
    ChannelClosed,
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Receives records as the crawl discovers them
///
/// Each record is delivered once, in discovery order, already cleaned and
/// deduplicated. Returning an error aborts the crawl.
pub trait RecordSink {
    /// Accepts one newly discovered record
    fn emit(&mut self, record: &ListingRecord) -> OutputResult<()>;
}

impl RecordSink for Vec<ListingRecord> {
    fn emit(&mut self, record: &ListingRecord) -> OutputResult<()> {
        self.push(record.clone());
        Ok(())
    }
}

impl RecordSink for mpsc::UnboundedSender<ListingRecord> {
    fn emit(&mut self, record: &ListingRecord) -> OutputResult<()> {
        self.send(record.clone())
            .map_err(|_| OutputError::ChannelClosed)
    }
}

impl<S: RecordSink + ?Sized> RecordSink for &mut S {
    fn emit(&mut self, record: &ListingRecord) -> OutputResult<()> {
        (**self).emit(record)
    }
}
