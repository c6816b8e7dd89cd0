//! Listing extraction from search-results pages
//!
//! Each listing block on a page becomes one [`ListingRecord`]. Records are
//! produced lazily, one block at a time, so the session can clean, dedupe and
//! emit each record before the next block is read.
//!
//! # Field Rules
//!
//! | Field | Source | Cleanup |
//! |-------|--------|---------|
//! | name | name element text | trimmed |
//! | location | address element text | trailing locality/postal tokens dropped |
//! | website | `href` of the anchor in the website element | `redirect` parameter unwrapped |
//! | phone | phone element text | leading label tokens dropped |
//!
//! A missing element yields [`PLACEHOLDER`] for that field.

use crate::crawler::selectors::Selectors;
use crate::listing::{clean_phone, truncate_address, ListingRecord, PLACEHOLDER};
use crate::url::unwrap_redirect;
use scraper::html::Select;
use scraper::{ElementRef, Html, Selector};

/// Parses raw page bytes into a document
///
/// Invalid UTF-8 sequences are replaced rather than rejected; listing pages
/// occasionally carry stray bytes in business names.
pub fn parse_page(body: &[u8]) -> Html {
    Html::parse_document(&String::from_utf8_lossy(body))
}

/// Turns listing blocks into records
#[derive(Debug, Clone)]
pub struct ListingExtractor {
    selectors: Selectors,
}

impl ListingExtractor {
    /// Creates an extractor over compiled selectors
    pub fn new(selectors: Selectors) -> Self {
        Self { selectors }
    }

    /// The selectors this extractor was built with
    pub fn selectors(&self) -> &Selectors {
        &self.selectors
    }

    /// Returns a lazy iterator over the records on a page
    ///
    /// # Example
    ///
    /// ```
    /// use listing_sweep::config::SelectorConfig;
    /// use listing_sweep::crawler::{parse_page, ListingExtractor, Selectors};
    ///
    /// let html = br#"<div class="listing__content">
    ///     <a class="listing__name">Joe's Diner</a>
    /// </div>"#;
    /// let document = parse_page(html);
    /// let extractor = ListingExtractor::new(Selectors::compile(&SelectorConfig::default()).unwrap());
    ///
    /// let names: Vec<_> = extractor.listings(&document).map(|r| r.name).collect();
    /// assert_eq!(names, vec!["Joe's Diner"]);
    /// ```
    pub fn listings<'a>(&'a self, document: &'a Html) -> Listings<'a> {
        Listings {
            blocks: document.select(&self.selectors.listing),
            extractor: self,
        }
    }

    /// Extracts one record from a listing block
    pub fn extract(&self, listing: ElementRef<'_>) -> ListingRecord {
        let name = select_text(listing, &self.selectors.name)
            .unwrap_or_else(|| PLACEHOLDER.to_string());

        let location = select_text(listing, &self.selectors.address)
            .map(|address| truncate_address(&address))
            .unwrap_or_else(|| PLACEHOLDER.to_string());

        let website = self
            .website_href(listing)
            .map(unwrap_redirect)
            .unwrap_or_else(|| PLACEHOLDER.to_string());

        let phone = select_text(listing, &self.selectors.phone)
            .map(|text| clean_phone(&text))
            .unwrap_or_else(|| PLACEHOLDER.to_string());

        ListingRecord {
            name,
            location,
            website,
            phone,
        }
    }

    /// Finds the `href` of the anchor inside the website element
    fn website_href<'a>(&self, listing: ElementRef<'a>) -> Option<&'a str> {
        listing
            .select(&self.selectors.website)
            .next()?
            .select(&self.selectors.website_link)
            .next()?
            .value()
            .attr("href")
    }
}

/// Lazy sequence of records from one page
pub struct Listings<'a> {
    blocks: Select<'a, 'a>,
    extractor: &'a ListingExtractor,
}

impl<'a> Iterator for Listings<'a> {
    type Item = ListingRecord;

    fn next(&mut self) -> Option<Self::Item> {
        self.blocks
            .next()
            .map(|block| self.extractor.extract(block))
    }
}

/// Trimmed text of the first match under `parent`
fn select_text(parent: ElementRef<'_>, selector: &Selector) -> Option<String> {
    parent
        .select(selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
}
