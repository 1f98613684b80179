//! Link classification and URL resolution.
//!
//! Decides whether an href stays on the blog's own site and turns relative
//! hrefs into absolute URLs.

use url::Url;

use crate::error::{Error, Result};

/// Check whether `s` is an absolute `http(s)` URL. The scheme is
/// case-insensitive.
#[must_use]
pub fn is_absolute_http(s: &str) -> bool {
    let prefix = s.get(..8).unwrap_or(s).to_ascii_lowercase();
    prefix.starts_with("http://") || prefix.starts_with("https://")
}

/// Check whether `s` is a scheme-relative URL (`//host/path`).
#[inline]
#[must_use]
pub fn is_protocol_relative(s: &str) -> bool {
    s.starts_with("//")
}

/// Parse a base URL, reporting failures as [`Error::InvalidUrl`].
pub fn parse_base(base_url: &str) -> Result<Url> {
    Url::parse(base_url.trim()).map_err(|e| Error::InvalidUrl(format!("{base_url}: {e}")))
}

/// Host plus explicit port, the part compared when classifying links.
fn authority(url: &Url) -> Option<(String, Option<u16>)> {
    url.host_str().map(|h| (h.to_ascii_lowercase(), url.port()))
}

/// Decide whether an href points at the same site as `base_url`.
///
/// Empty hrefs are never internal. Absolute `http(s)` and scheme-relative
/// (`//host`) URLs are internal when host and port match the base; anything
/// else is treated as relative and therefore internal.
///
/// # Examples
///
/// ```
/// use rs_blogwatch::url_utils::is_internal_link;
///
/// assert!(is_internal_link("/2024/hello", "https://example.com"));
/// assert!(is_internal_link("https://example.com/a", "https://example.com/blog/"));
/// assert!(!is_internal_link("https://other.org/a", "https://example.com"));
/// assert!(!is_internal_link("", "https://example.com"));
/// ```
#[must_use]
pub fn is_internal_link(href: &str, base_url: &str) -> bool {
    let href = href.trim();
    if href.is_empty() {
        return false;
    }

    if !is_absolute_http(href) && !is_protocol_relative(href) {
        return true;
    }

    let Ok(base) = Url::parse(base_url.trim()) else {
        return false;
    };
    base.join(href)
        .is_ok_and(|link| authority(&link) == authority(&base))
}

/// Resolve `href` against `base_url`.
///
/// Returns `href` unchanged when the base cannot be parsed or the join fails.
///
/// # Examples
///
/// ```
/// use rs_blogwatch::url_utils::resolve_url;
///
/// assert_eq!(resolve_url("https://example.com", "/post1"), "https://example.com/post1");
/// assert_eq!(resolve_url("https://example.com/blog/", "next"), "https://example.com/blog/next");
/// ```
#[must_use]
pub fn resolve_url(base_url: &str, href: &str) -> String {
    let href = href.trim();
    match Url::parse(base_url.trim()).and_then(|base| base.join(href)) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => href.to_string(),
    }
}

/// Lower-cased host (with explicit port) of a URL, empty when unparseable.
///
/// Used as the second key when looking up manual selectors.
#[must_use]
pub fn domain_of(url_str: &str) -> String {
    let Ok(url) = Url::parse(url_str.trim()) else {
        return String::new();
    };
    match authority(&url) {
        Some((host, Some(port))) => format!("{host}:{port}"),
        Some((host, None)) => host,
        None => String::new(),
    }
}
