//! Labeled-row CSV export
//!
//! Each record becomes a block of four two-column rows followed by an empty
//! line:
//!
//! ```text
//! "Name","Joe's Diner"
//! "Location","123 Main Street"
//! "Website","https://joes.example"
//! "Phone Number","416-555-0100"
//!
//! ```
//!
//! Every field is quoted and lines end in CRLF.

use crate::listing::ListingRecord;
use crate::output::traits::OutputResult;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Separator written after each record block
const BLOCK_SEPARATOR: &[u8] = b"\r\n";

/// Extension given to export paths that have none
const DEFAULT_EXTENSION: &str = "csv";

/// Writes records as labeled row blocks
///
/// # Arguments
///
/// * `records` - Records in the order they should appear
/// * `writer` - Destination for the CSV text
///
/// # Returns
///
/// * `Ok(())` - All records were written and flushed
/// * `Err(OutputError)` - Writing failed
pub fn write_records<'a, I, W>(records: I, mut writer: W) -> OutputResult<()>
where
    I: IntoIterator<Item = &'a ListingRecord>,
    W: Write,
{
    for record in records {
        write_block(record, &mut writer)?;
        writer.write_all(BLOCK_SEPARATOR)?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes the four labeled rows of one record
///
/// The csv writer is scoped to the block so the blank separator can go
/// straight to the underlying writer after it.
fn write_block<W: Write>(record: &ListingRecord, writer: &mut W) -> OutputResult<()> {
    let mut csv_writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::CRLF)
        .from_writer(writer);

    for (label, value) in record.labeled_fields() {
        csv_writer.write_record([label, value])?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Exports records to a file, replacing it if it exists
///
/// Returns the path actually written, which gains a `.csv` extension if
/// `path` had none.
pub fn export_csv<'a, I>(records: I, path: &Path) -> OutputResult<PathBuf>
where
    I: IntoIterator<Item = &'a ListingRecord>,
{
    let path = with_default_extension(path);
    let file = File::create(&path)?;
    write_records(records, BufWriter::new(file))?;

    tracing::info!("Exported records to {}", path.display());
    Ok(path)
}

/// Appends the default extension to a path that has none
pub fn with_default_extension(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(DEFAULT_EXTENSION)
    }
}
