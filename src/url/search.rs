//! Search and pagination URLs
//!
//! The listings site embeds the query in the path rather than the query
//! string: `{base}/search/si/1/{occupation}/{location}`. Later pages live
//! under that address as `page-{n}.html`.

use crate::{UrlError, UrlResult};
use url::Url;

/// Fixed path segments in front of the query terms
const SEARCH_PREFIX: [&str; 3] = ["search", "si", "1"];

/// What to search for and where
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Occupation or business category, e.g. "plumber"
    pub occupation: String,

    /// City or region, e.g. "Toronto ON"
    pub location: String,
}

impl SearchQuery {
    /// Creates a query from the two free-text inputs
    pub fn new(occupation: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            occupation: occupation.into(),
            location: location.into(),
        }
    }

    /// Builds the first results page URL on the given site
    ///
    /// Both terms are trimmed and percent-escaped as path segments, so a
    /// well-formed term such as `plumber` lands in the path verbatim while
    /// `Saint John` becomes `Saint%20John`.
    ///
    /// # Example
    ///
    /// ```
    /// use listing_sweep::url::SearchQuery;
    ///
    /// let query = SearchQuery::new("cook", "toronto");
    /// let url = query.to_url("https://www.yellowpages.ca").unwrap();
    /// assert_eq!(url.as_str(), "https://www.yellowpages.ca/search/si/1/cook/toronto");
    /// ```
    pub fn to_url(&self, base: &str) -> UrlResult<Url> {
        let occupation = self.occupation.trim();
        let location = self.location.trim();

        if occupation.is_empty() {
            return Err(UrlError::EmptySegment("occupation"));
        }
        if location.is_empty() {
            return Err(UrlError::EmptySegment("location"));
        }

        let mut url = Url::parse(base).map_err(|e| UrlError::Parse(e.to_string()))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(UrlError::InvalidScheme(url.scheme().to_string()));
        }

        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| UrlError::CannotBeABase(base.to_string()))?;
            segments
                .pop_if_empty()
                .extend(SEARCH_PREFIX)
                .push(occupation)
                .push(location);
        }

        Ok(url)
    }
}

/// Derives the address of the page after `current`
///
/// `base` is the first results page URL; page numbers are appended to it
/// rather than to the previous page's address.
pub fn next_page_url(base: &str, current: u32) -> String {
    format!("{}/page-{}.html", base.trim_end_matches('/'), current + 1)
}
