//! Business listing records
//!
//! A [`ListingRecord`] is one business entry lifted from a search-results page.
//! The record has no identifier; two records are the same listing exactly when
//! all four fields are equal, which is what deduplication keys on.

mod normalize;

pub use normalize::{clean_phone, strip_rank_prefix, truncate_address};

use std::fmt;

/// Value used for any field that could not be extracted
pub const PLACEHOLDER: &str = "Not provided";

/// A single business entry
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListingRecord {
    /// Display name, never empty
    pub name: String,

    /// Street part of the address
    pub location: String,

    /// External website, unwrapped from the site's redirect link
    pub website: String,

    /// Phone number text
    pub phone: String,
}

impl ListingRecord {
    /// Creates a record from already-cleaned field values
    pub fn new(
        name: impl Into<String>,
        location: impl Into<String>,
        website: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            website: website.into(),
            phone: phone.into(),
        }
    }

    /// Returns the record with a leading listing-rank number removed from its name
    pub fn normalized(mut self) -> Self {
        self.name = strip_rank_prefix(&self.name);
        self
    }

    /// Labeled fields in export order
    pub fn labeled_fields(&self) -> [(&'static str, &str); 4] {
        [
            ("Name", self.name.as_str()),
            ("Location", self.location.as_str()),
            ("Website", self.website.as_str()),
            ("Phone Number", self.phone.as_str()),
        ]
    }
}

impl fmt::Display for ListingRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Location: {}", self.location)?;
        writeln!(f, "Website: {}", self.website)?;
        write!(f, "Phone: {}", self.phone)
    }
}
