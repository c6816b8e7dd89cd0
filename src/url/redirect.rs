use url::form_urlencoded;

/// Query parameter holding the real destination of a wrapped link
const REDIRECT_PARAM: &str = "redirect";

/// Returns the destination of a redirect-wrapper link
///
/// The listings site routes outbound website links through its own tracker,
/// e.g. `/gourl/abc?redirect=https%3A%2F%2Fbiz.example`. The first non-empty
/// `redirect` value is percent-decoded and returned; hrefs without one are
/// returned unchanged. Relative hrefs are handled the same as absolute ones.
pub fn unwrap_redirect(href: &str) -> String {
    let without_fragment = href.split('#').next().unwrap_or(href);

    let Some((_, query)) = without_fragment.split_once('?') else {
        return href.to_string();
    };

    form_urlencoded::parse(query.as_bytes())
        .find(|(key, value)| key == REDIRECT_PARAM && !value.is_empty())
        .map(|(_, value)| value.into_owned())
        .unwrap_or_else(|| href.to_string())
}
