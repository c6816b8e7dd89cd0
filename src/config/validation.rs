use crate::config::types::{Config, CrawlerConfig, OutputConfig, SelectorConfig, UserAgentConfig};
use crate::ConfigError;
use scraper::Selector;
use url::Url;

/// Longest delay between pages we accept (milliseconds)
const MAX_PAGE_DELAY_MS: u64 = 60_000;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_selectors(&config.selectors)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url: {}", e)))?;

    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url '{}' must use http or https",
            config.base_url
        )));
    }

    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url '{}' cannot carry a search path",
            config.base_url
        )));
    }

    if config.page_delay > MAX_PAGE_DELAY_MS {
        return Err(ConfigError::Validation(format!(
            "page_delay must be <= {}ms, got {}ms",
            MAX_PAGE_DELAY_MS, config.page_delay
        )));
    }

    if config.request_timeout < 1 {
        return Err(ConfigError::Validation(format!(
            "request_timeout must be >= 1s, got {}s",
            config.request_timeout
        )));
    }

    if config.connect_timeout < 1 || config.connect_timeout > config.request_timeout {
        return Err(ConfigError::Validation(format!(
            "connect_timeout must be between 1s and request_timeout ({}s), got {}s",
            config.request_timeout, config.connect_timeout
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.value.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user agent cannot be empty".to_string(),
        ));
    }

    // Header values may not contain line breaks
    if config.value.contains(['\r', '\n']) {
        return Err(ConfigError::Validation(format!(
            "user agent contains a line break: '{}'",
            config.value.escape_debug()
        )));
    }

    Ok(())
}

/// Checks that every configured selector compiles
fn validate_selectors(config: &SelectorConfig) -> Result<(), ConfigError> {
    for (field, selector) in [
        ("listing", &config.listing),
        ("name", &config.name),
        ("address", &config.address),
        ("website", &config.website),
        ("website-link", &config.website_link),
        ("phone", &config.phone),
        ("page-count", &config.page_count),
        ("captcha", &config.captcha),
    ] {
        validate_selector(field, selector)?;
    }
    Ok(())
}

/// Compiles a single selector, naming the offending field on failure
pub(crate) fn validate_selector(field: &str, selector: &str) -> Result<Selector, ConfigError> {
    if selector.trim().is_empty() {
        return Err(ConfigError::InvalidSelector(format!(
            "{} selector cannot be empty",
            field
        )));
    }

    Selector::parse(selector).map_err(|e| {
        ConfigError::InvalidSelector(format!("{} selector '{}': {:?}", field, selector, e))
    })
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if let Some(path) = &config.export_path {
        if path.trim().is_empty() {
            return Err(ConfigError::Validation(
                "export_path cannot be empty".to_string(),
            ));
        }
    }

    Ok(())
}
