//! Anti-automation challenge detection
//!
//! When the listings site suspects automation it serves a reCAPTCHA form
//! instead of results. The crawl stops on the first such page; solving the
//! challenge is left to a human.

use crate::SweepError;
use scraper::{Html, Selector};

/// Returns true if the page carries the challenge marker
pub fn detect_captcha(document: &Html, selector: &Selector) -> bool {
    document.select(selector).next().is_some()
}

/// Fails with `CaptchaDetected` if the page carries the challenge marker
pub fn guard_captcha(document: &Html, selector: &Selector, url: &str) -> Result<(), SweepError> {
    if detect_captcha(document, selector) {
        return Err(SweepError::CaptchaDetected {
            url: url.to_string(),
        });
    }
    Ok(())
}
