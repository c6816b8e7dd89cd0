//! Pagination cursor derivation
//!
//! Results pages carry an indicator of the form `"<current> / <total>"`. The
//! indicator alone decides whether another page exists; a page without one
//! is the last page.

use crate::url::next_page_url;
use crate::SweepError;
use scraper::{Html, Selector};
use std::str::FromStr;

/// Position read from a page count indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCount {
    /// Page number of the page being read (1-based)
    pub current: u32,

    /// Total number of results pages
    pub total: u32,
}

impl PageCount {
    /// Returns true if a page follows this one
    pub fn has_next(&self) -> bool {
        self.current < self.total
    }
}

impl FromStr for PageCount {
    type Err = SweepError;

    /// Parses `"2 / 5"`; whitespace around either number is ignored
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let malformed = |reason: String| SweepError::PaginationParse {
            text: text.to_string(),
            reason,
        };

        let mut parts = text.trim().split('/');
        let (Some(current), Some(total), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(malformed("expected '<current> / <total>'".to_string()));
        };

        let current = current
            .trim()
            .parse::<u32>()
            .map_err(|e| malformed(format!("current page: {}", e)))?;
        let total = total
            .trim()
            .parse::<u32>()
            .map_err(|e| malformed(format!("total pages: {}", e)))?;

        Ok(Self { current, total })
    }
}

/// Reads the page count indicator, if the page has one
pub fn read_page_count(document: &Html, selector: &Selector) -> Result<Option<PageCount>, SweepError> {
    document
        .select(selector)
        .next()
        .map(|element| element.text().collect::<String>().parse())
        .transpose()
}

/// Works out the page after the one in `document`
///
/// # Arguments
///
/// * `document` - The parsed current page
/// * `selector` - Selector for the page count indicator
/// * `base` - The first results page URL, which page numbers are appended to
///
/// # Returns
///
/// * `Ok(Some((count, url)))` - The current position and the next page's address
/// * `Ok(None)` - No indicator, or the current page is the last one
/// * `Err(SweepError::PaginationParse)` - The indicator is malformed
pub fn resolve_next_page(
    document: &Html,
    selector: &Selector,
    base: &str,
) -> Result<Option<(PageCount, String)>, SweepError> {
    let Some(count) = read_page_count(document, selector)? else {
        return Ok(None);
    };

    if count.has_next() {
        Ok(Some((count, next_page_url(base, count.current))))
    } else {
        Ok(None)
    }
}
