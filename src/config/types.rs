use serde::Deserialize;

/// Main configuration structure for Listing-Sweep
///
/// Every section has defaults that target the Yellow Pages Canada search
/// pages, so an empty file (or no file at all) is a usable configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default, rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub selectors: SelectorConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Scheme and host of the listings site; search paths are appended to it
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Fixed delay between consecutive page fetches (milliseconds)
    #[serde(rename = "page-delay")]
    pub page_delay: u64,

    /// Upper bound on a whole request, body included (seconds)
    #[serde(rename = "request-timeout")]
    pub request_timeout: u64,

    /// Upper bound on establishing the connection (seconds)
    #[serde(rename = "connect-timeout")]
    pub connect_timeout: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.yellowpages.ca".to_string(),
            page_delay: 1000,
            request_timeout: 30,
            connect_timeout: 10,
        }
    }
}

/// Client identity sent with every request
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Literal `User-Agent` header value
    pub value: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            value: "Mozilla/5.0".to_string(),
        }
    }
}

/// CSS selectors describing the structure of a search-results page
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// One match per business listing block
    pub listing: String,

    /// Business name, relative to a listing
    pub name: String,

    /// Street address, relative to a listing
    pub address: String,

    /// Container of the website link, relative to a listing
    pub website: String,

    /// The anchor inside the website container
    #[serde(rename = "website-link")]
    pub website_link: String,

    /// Phone number, relative to a listing
    pub phone: String,

    /// The "current / total" page indicator
    #[serde(rename = "page-count")]
    pub page_count: String,

    /// Anti-automation challenge marker
    pub captcha: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            listing: ".listing__content".to_string(),
            name: ".listing__name".to_string(),
            address: ".listing__address".to_string(),
            website: ".mlr__item--website".to_string(),
            website_link: "a".to_string(),
            phone: ".mlr__item--phone".to_string(),
            page_count: "span.pageCount".to_string(),
            captcha: r#"input[name="g-recaptcha-response"]"#.to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Where to write the exported records, if anywhere
    #[serde(default, rename = "export-path")]
    pub export_path: Option<String>,
}
