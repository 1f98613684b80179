//! # rs-blogwatch
//!
//! Heuristic detection of the latest post on a blog index page.
//!
//! Given the HTML of a blog's front page, the library guesses which elements
//! are post teasers, picks the first one as the newest post and extracts its
//! title and link. Blogs that defeat the heuristics can be pinned to
//! hand-written selectors.
//!
//! ## Quick Start
//!
//! ```rust
//! use rs_blogwatch::get_latest_post;
//!
//! let html = r#"<html><body>
//!   <div class="post"><h2><a href="/newest">The newest post</a></h2><time>2024-02-01</time></div>
//!   <div class="post"><h2><a href="/older">An older post</a></h2><time>2024-01-01</time></div>
//! </body></html>"#;
//!
//! let post = get_latest_post(html, "https://example.com").expect("a post");
//! assert_eq!(post.title, "The newest post");
//! assert_eq!(post.url, "https://example.com/newest");
//! ```
//!
//! ## How it works
//!
//! - **Matchers** ([`matcher`]): naming conventions, repeating class
//!   structures and groups of internally-linked blocks each propose
//!   candidate selectors
//! - **Ranking** ([`candidate`]): candidates are deduplicated and ordered by
//!   confidence
//! - **Extraction** ([`extractor`]): title and link are read from the first
//!   element of the best candidate
//! - **Overrides** ([`manual`]): a manual selector entry for a blog replaces
//!   automatic detection entirely

mod error;
mod options;
mod patterns;
mod result;

/// Read-only DOM access over `dom_query`.
pub mod dom;

/// Character encoding detection and transcoding.
pub mod encoding;

/// Text normalization helpers.
pub mod text;

/// URL classification and resolution.
pub mod url_utils;

/// Post-likelihood scoring of single elements.
pub mod scoring;

/// Selector candidates, selector synthesis and ranking.
pub mod candidate;

/// The three candidate-producing heuristics.
pub mod matcher;

/// Title, link and date extraction.
pub mod extractor;

/// Manual selector overrides.
pub mod manual;

/// The detection orchestrator.
pub mod detector;

/// Diagnostics for manual tuning.
pub mod diagnostic;

// Public API - re-exports
pub use candidate::SelectorCandidate;
pub use detector::SelectorDetector;
pub use diagnostic::{CandidateSummary, DiagnosticReport};
pub use error::{Error, Result};
pub use manual::{ManualSelectorConfig, ManualSelectors, SelectorTarget};
pub use options::Options;
pub use result::{Post, PostRecord, FALLBACK_PREFIX};

/// Detects the latest post of an HTML page with default settings and no
/// manual overrides.
///
/// Returns `None` when nothing on the page looks like a post list.
#[must_use]
pub fn get_latest_post(html: &str, base_url: &str) -> Option<PostRecord> {
    let doc = dom::parse(html);
    SelectorDetector::default().get_latest_post(&doc, base_url, None)
}

/// Like [`get_latest_post`], for raw bytes in a declared charset.
///
/// ```rust
/// use rs_blogwatch::get_latest_post_bytes;
///
/// let html = b"<meta charset=\"windows-1252\">\
///   <article><h2><a href=\"/caf\">Caf\xE9 opening hours</a></h2><time>2024-01-01</time></article>\
///   <article><h2><a href=\"/old\">An older announcement</a></h2><time>2023-01-01</time></article>";
/// let post = get_latest_post_bytes(html, "https://example.com").expect("a post");
/// assert_eq!(post.title, "Café opening hours");
/// ```
#[must_use]
pub fn get_latest_post_bytes(html: &[u8], base_url: &str) -> Option<PostRecord> {
    let doc = dom::parse_bytes(html);
    SelectorDetector::default().get_latest_post(&doc, base_url, None)
}
