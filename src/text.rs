//! Text normalization.
//!
//! Every string the detector compares or reports goes through
//! [`clean_text`], so lengths and equality are measured on the same form.

use crate::patterns::WHITESPACE_NORMALIZE;

/// Literal entities that survive parsing when a page double-encodes them.
const RESIDUAL_ENTITIES: [(&str, &str); 6] = [
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&nbsp;", " "),
];

/// Normalize extracted text.
///
/// Collapses every whitespace run to a single space, decodes residual
/// literal entities and trims both ends.
///
/// # Examples
///
/// ```
/// use rs_blogwatch::text::clean_text;
///
/// assert_eq!(clean_text("  Hello\n\t  world  "), "Hello world");
/// assert_eq!(clean_text("Fish &amp;amp; Chips"), "Fish &amp; Chips");
/// assert_eq!(clean_text(""), "");
/// ```
#[must_use]
pub fn clean_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut cleaned = WHITESPACE_NORMALIZE.replace_all(text.trim(), " ").into_owned();

    for (entity, replacement) in RESIDUAL_ENTITIES {
        if cleaned.contains(entity) {
            cleaned = cleaned.replace(entity, replacement);
        }
    }

    cleaned.trim().to_string()
}

/// Length in characters (not bytes).
#[inline]
#[must_use]
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Truncate to at most `max` characters, appending `...` when shortened.
#[must_use]
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}
