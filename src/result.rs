//! Result types for detection output.
//!
//! These are the only values that leave the detector. They own their data
//! and are serializable so storage and notification layers can persist or
//! format them directly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Title prefix marking a page-title fallback record.
pub const FALLBACK_PREFIX: &str = "Fallback - ";

/// Selector provenance of a page-title fallback record.
pub const FALLBACK_SELECTOR: &str = "Fallback: page title";

/// Selector provenance prefix of manual-override records.
pub const MANUAL_SELECTOR_PREFIX: &str = "Manual: ";

/// The latest post found on a page.
///
/// `title` is normalized and longer than the configured minimum; `url` is
/// either a resolved absolute URL or the page's own base URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostRecord {
    /// Post title, normalized.
    pub title: String,

    /// Absolute post URL, or the page URL when no link could be resolved.
    pub url: String,

    /// Where the record came from: `"Manual: <container>"`, an automatic
    /// selector label, or [`FALLBACK_SELECTOR`].
    pub selector: String,

    /// Heuristic confidence in `[0, 1]`; `1.0` for manual overrides.
    pub confidence: f64,

    /// Publication date, when the post element carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<DateTime<Utc>>,
}

impl PostRecord {
    /// Whether this record came from a manual selector configuration.
    #[must_use]
    pub fn is_manual(&self) -> bool {
        self.selector.starts_with(MANUAL_SELECTOR_PREFIX)
    }

    /// Whether this record is a page-title fallback rather than a real post.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.title.starts_with(FALLBACK_PREFIX)
    }
}

/// One post of a listing, as produced by [`crate::extractor::extract_posts`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub title: String,
    pub url: String,
    pub blog_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
}
