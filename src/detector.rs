//! Latest-post detection.
//!
//! [`SelectorDetector`] ties the pieces together: a manual override, when
//! one exists for the page, decides the result on its own. Otherwise the
//! matchers propose candidates, the best-ranked candidate's first element is
//! taken as the newest post, and its title and link are extracted.

use dom_query::Document;

use crate::candidate::{rank, SelectorCandidate};
use crate::diagnostic::DiagnosticReport;
use crate::extractor::{
    extract_published_date, extract_title_with_min, extract_url, extract_with_manual_selectors,
    fallback_post,
};
use crate::manual::{ManualSelectorConfig, ManualSelectors};
use crate::matcher;
use crate::result::PostRecord;
use crate::Options;

/// Detects the latest post of a blog page.
///
/// Holds only read-only configuration, so one detector can serve any number
/// of pages.
///
/// # Example
///
/// ```rust
/// use rs_blogwatch::{dom, SelectorDetector};
///
/// let html = r#"
///   <div class="post"><h2><a href="/hello">Hello, world</a></h2><time>2024-01-01</time></div>
///   <div class="post"><h2><a href="/older">An older post</a></h2><time>2023-12-01</time></div>
/// "#;
/// let doc = dom::parse(html);
/// let detector = SelectorDetector::default();
///
/// let post = detector.get_latest_post(&doc, "https://example.com", None).unwrap();
/// assert_eq!(post.title, "Hello, world");
/// assert_eq!(post.url, "https://example.com/hello");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SelectorDetector {
    manual: ManualSelectors,
    options: Options,
}

impl SelectorDetector {
    /// Create a detector with a manual override table and options.
    #[must_use]
    pub fn new(manual: ManualSelectors, options: Options) -> Self {
        Self { manual, options }
    }

    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    #[must_use]
    pub fn manual_selectors(&self) -> &ManualSelectors {
        &self.manual
    }

    /// The manual override that applies to a page, if any.
    #[must_use]
    pub fn manual_config(&self, base_url: &str, blog_name: Option<&str>) -> Option<&ManualSelectorConfig> {
        self.manual.lookup(base_url, blog_name)
    }

    /// All automatic candidates for a page, best first, deduplicated.
    #[must_use]
    pub fn detect_post_selectors<'a>(&self, doc: &'a Document, base_url: &str) -> Vec<SelectorCandidate<'a>> {
        rank(matcher::detect_all(doc, base_url, &self.options))
    }

    /// Find the latest post on a page.
    ///
    /// Returns `None` when no candidate is found, when the best candidate
    /// has no usable title, or when a manual override exists for the page
    /// and fails. A manual override is never followed by automatic
    /// detection.
    #[must_use]
    pub fn get_latest_post(&self, doc: &Document, base_url: &str, blog_name: Option<&str>) -> Option<PostRecord> {
        if let Some(config) = self.manual_config(base_url, blog_name) {
            tracing::debug!(container = %config.post_container, "using manual selectors");
            return extract_with_manual_selectors(doc, base_url, config, self.options.min_title_chars);
        }

        let candidates = self.detect_post_selectors(doc, base_url);
        let Some(best) = candidates.first() else {
            tracing::debug!(url = base_url, "no post candidates");
            return None;
        };

        let latest = best.latest()?;

        let Some(title) = extract_title_with_min(&latest, self.options.min_title_chars) else {
            tracing::debug!(selector = best.selector(), "best candidate has no usable title");
            return None;
        };
        let url = extract_url(&latest, base_url).unwrap_or_else(|| base_url.to_string());

        Some(PostRecord {
            title,
            url,
            selector: best.selector().to_string(),
            confidence: best.confidence(),
            published: extract_published_date(&latest),
        })
    }

    /// Like [`get_latest_post`](Self::get_latest_post), but falls back to a
    /// page-title record when nothing else is found.
    #[must_use]
    pub fn get_latest_post_or_fallback(
        &self,
        doc: &Document,
        base_url: &str,
        blog_name: Option<&str>,
    ) -> Option<PostRecord> {
        self.get_latest_post(doc, base_url, blog_name).or_else(|| {
            let fallback = fallback_post(doc, base_url);
            if fallback.is_some() {
                tracing::debug!(url = base_url, "falling back to page title");
            }
            fallback
        })
    }

    /// Explain what the detector sees on a page, for manual tuning.
    #[must_use]
    pub fn diagnose(&self, doc: &Document, base_url: &str, blog_name: Option<&str>) -> DiagnosticReport {
        let candidates = self.detect_post_selectors(doc, base_url);
        let latest_post = self.get_latest_post(doc, base_url, blog_name);
        let manual_override = self.manual_config(base_url, blog_name).cloned();
        DiagnosticReport::build(doc, base_url, &candidates, latest_post, manual_override)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom;

    const BASE: &str = "https://example.com";

    fn two_posts() -> String {
        let filler = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. ".repeat(3);
        (1..=2)
            .map(|n| {
                format!(
                    r#"<div class="post"><h2><a href="/post{n}">Title {n}</a></h2><p>{filler}</p><time>2024-01-0{n}</time></div>"#
                )
            })
            .collect()
    }

    #[test]
    fn detects_first_post() {
        let doc = dom::parse(&two_posts());
        let post = SelectorDetector::default().get_latest_post(&doc, BASE, None).unwrap();

        assert_eq!(post.title, "Title 1");
        assert_eq!(post.url, "https://example.com/post1");
        assert_eq!(post.selector, "div.post");
        assert!(post.confidence >= 0.5);
        assert_eq!(post.published.map(|d| d.format("%F").to_string()).as_deref(), Some("2024-01-01"));
    }

    #[test]
    fn candidates_are_ranked_and_unique() {
        let doc = dom::parse(&two_posts());
        let candidates = SelectorDetector::default().detect_post_selectors(&doc, BASE);

        let selectors: Vec<&str> = candidates.iter().map(SelectorCandidate::selector).collect();
        assert_eq!(selectors, vec!["div.post", ".post"]);
        assert!(candidates[0].confidence() >= candidates[1].confidence());
    }

    #[test]
    fn manual_override_wins_even_when_failing() {
        let doc = dom::parse(&two_posts());
        let mut manual = ManualSelectors::new();
        manual.insert("Blog", ManualSelectorConfig::new(".missing", "self", "self"));
        let detector = SelectorDetector::new(manual, Options::default());

        assert!(detector.get_latest_post(&doc, BASE, Some("Blog")).is_none());
        assert!(detector.get_latest_post(&doc, BASE, Some("Other")).is_some());
    }

    #[test]
    fn mismatched_manual_title_selector_skips_automatic_detection() {
        let html = format!(r#"<div class="hero">A long enough hero text</div>{}"#, two_posts());
        let doc = dom::parse(&html);
        let mut manual = ManualSelectors::new();
        manual.insert("Blog", ManualSelectorConfig::new(".hero", "h2.headline", "self"));
        let detector = SelectorDetector::new(manual, Options::default());

        assert!(!detector.detect_post_selectors(&doc, BASE).is_empty());
        assert!(detector.get_latest_post(&doc, BASE, Some("Blog")).is_none());
    }

    #[test]
    fn untitled_best_candidate_yields_none() {
        let body = "x".repeat(120);
        let html = format!(
            r#"<div class="post"><a href="/a">Tiny</a> {body}</div><div class="post"><a href="/b">Tiny</a> {body}</div>"#
        );
        let doc = dom::parse(&html);
        let detector = SelectorDetector::default();
        assert!(!detector.detect_post_selectors(&doc, BASE).is_empty());
        assert!(detector.get_latest_post(&doc, BASE, None).is_none());
    }

    #[test]
    fn fallback_only_when_nothing_found() {
        let doc = dom::parse("<html><head><title>Quiet Blog</title></head><body><nav>Home</nav></body></html>");
        let detector = SelectorDetector::default();
        assert!(detector.get_latest_post(&doc, BASE, None).is_none());

        let post = detector.get_latest_post_or_fallback(&doc, BASE, None).unwrap();
        assert_eq!(post.title, "Fallback - Quiet Blog");
        assert_eq!(post.confidence, 0.0);

        let doc = dom::parse(&two_posts());
        let post = detector.get_latest_post_or_fallback(&doc, BASE, None).unwrap();
        assert!(!post.is_fallback());
    }
}
