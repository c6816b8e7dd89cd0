//! URL handling module for Listing-Sweep
//!
//! This module builds the search URL for a query, derives the address of each
//! following results page, and unwraps the redirect links the listings site
//! puts in front of business websites.

mod redirect;
mod search;

pub use redirect::unwrap_redirect;
pub use search::{next_page_url, SearchQuery};
