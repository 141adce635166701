//! Location helpers

use regex::Regex;
use std::sync::LazyLock;

/// Leading `scheme:` and/or `//` of a site URL
static SCHEME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\w+:)?//").expect("valid scheme regex"));

/// Value of a query parameter in a URL.
///
/// Matches `[?&]name=value` where the value runs until `&`, `#` or `=`.
/// Returns `None` when the parameter is missing or its value is empty.
pub fn url_param(name: &str, url: &str) -> Option<String> {
    let pattern = format!(r"[?&]{}=([^&#=]*)", regex::escape(name));
    let regex = Regex::new(&pattern).ok()?;
    regex
        .captures(url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .filter(|v| !v.is_empty())
}

/// Strip the scheme and trailing slashes from a site URL.
///
/// `https://example.blogspot.com/` and `//example.blogspot.com` both become
/// `example.blogspot.com`.
pub fn normalize_site_url(site_url: &str) -> String {
    SCHEME_REGEX
        .replace(site_url.trim(), "")
        .trim_end_matches('/')
        .to_string()
}
