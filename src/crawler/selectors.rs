//! Compiled page selectors
//!
//! Selectors are compiled once per session from the `[selectors]` config
//! section and shared by the extractor, the pagination resolver, and the
//! challenge guard.

use crate::config::validation::validate_selector;
use crate::config::SelectorConfig;
use crate::ConfigResult;
use scraper::Selector;

/// All structural queries needed to read a results page
#[derive(Debug, Clone)]
pub struct Selectors {
    pub listing: Selector,
    pub name: Selector,
    pub address: Selector,
    pub website: Selector,
    pub website_link: Selector,
    pub phone: Selector,
    pub page_count: Selector,
    pub captcha: Selector,
}

impl Selectors {
    /// Compiles every selector in the config section
    pub fn compile(config: &SelectorConfig) -> ConfigResult<Self> {
        Ok(Self {
            listing: validate_selector("listing", &config.listing)?,
            name: validate_selector("name", &config.name)?,
            address: validate_selector("address", &config.address)?,
            website: validate_selector("website", &config.website)?,
            website_link: validate_selector("website-link", &config.website_link)?,
            phone: validate_selector("phone", &config.phone)?,
            page_count: validate_selector("page-count", &config.page_count)?,
            captcha: validate_selector("captcha", &config.captcha)?,
        })
    }
}
