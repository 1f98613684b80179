//! Character encoding detection for raw page bytes.
//!
//! Fetchers hand over whatever bytes the server sent. The declared charset
//! is honoured so that titles compare equal across runs regardless of the
//! page's encoding.

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use std::sync::LazyLock;

/// Bytes inspected for a charset declaration.
const SNIFF_LEN: usize = 1024;

/// `<meta charset="...">` or `<meta http-equiv="Content-Type" content="...; charset=...">`.
#[allow(clippy::expect_used)]
static META_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+?charset\s*=\s*["']?([a-z0-9_\-:.]+)"#).expect("valid regex")
});

/// Detect the declared character encoding, defaulting to UTF-8.
#[must_use]
pub fn detect_encoding(html: &[u8]) -> &'static Encoding {
    let head = String::from_utf8_lossy(&html[..html.len().min(SNIFF_LEN)]);

    META_CHARSET_RE
        .captures(&head)
        .and_then(|c| c.get(1))
        .and_then(|m| Encoding::for_label(m.as_str().as_bytes()))
        .unwrap_or(UTF_8)
}

/// Decode page bytes to a UTF-8 string, replacing invalid sequences with �.
///
/// # Examples
///
/// ```
/// use rs_blogwatch::encoding::transcode_to_utf8;
///
/// let html = b"<meta charset=\"ISO-8859-1\"><h2>Caf\xE9 notes</h2>";
/// assert!(transcode_to_utf8(html).contains("Café notes"));
/// ```
#[must_use]
pub fn transcode_to_utf8(html: &[u8]) -> String {
    let encoding = detect_encoding(html);
    if encoding == UTF_8 {
        return String::from_utf8_lossy(html).into_owned();
    }
    let (decoded, _, _) = encoding.decode(html);
    decoded.into_owned()
}
