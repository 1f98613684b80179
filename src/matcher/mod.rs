//! Candidate Matchers
//!
//! Three independent heuristics that each propose groups of elements as
//! "the post list":
//!
//! - [`pattern`]: elements named like posts (`.post`, `#entry`, `<article>`)
//! - [`structure`]: classes that repeat a plausible number of times
//! - [`links`]: post-like blocks linking back into the same site
//!
//! The matchers share no state. Their outputs are merged and ordered by
//! [`crate::candidate::rank`], so evaluation order only matters for
//! deduplication, where earlier matchers win.

use dom_query::Document;

use crate::candidate::SelectorCandidate;
use crate::Options;

pub mod links;
pub mod pattern;
pub mod structure;

/// One detection heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    /// Class/id/tag naming conventions.
    Pattern,
    /// Repeating class structures.
    Structure,
    /// Groups of post-like blocks with internal links.
    LinkGroup,
}

impl Matcher {
    /// All matchers in evaluation (and dedup priority) order.
    pub const ALL: [Matcher; 3] = [Matcher::Pattern, Matcher::Structure, Matcher::LinkGroup];

    /// Run this matcher over a document.
    #[must_use]
    pub fn detect<'a>(
        self,
        doc: &'a Document,
        base_url: &str,
        options: &Options,
    ) -> Vec<SelectorCandidate<'a>> {
        match self {
            Matcher::Pattern => pattern::detect_by_class_patterns(doc, options),
            Matcher::Structure => structure::detect_by_structure(doc, options),
            Matcher::LinkGroup => links::detect_by_links(doc, base_url, options),
        }
    }

    /// Short name used in logs.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Matcher::Pattern => "pattern",
            Matcher::Structure => "structure",
            Matcher::LinkGroup => "link-group",
        }
    }
}

/// Run every matcher in order and concatenate their candidates.
#[must_use]
pub fn detect_all<'a>(doc: &'a Document, base_url: &str, options: &Options) -> Vec<SelectorCandidate<'a>> {
    Matcher::ALL
        .iter()
        .flat_map(|matcher| {
            let found = matcher.detect(doc, base_url, options);
            tracing::debug!(matcher = matcher.name(), candidates = found.len(), "matcher finished");
            found
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom;

    #[test]
    fn empty_document_yields_nothing() {
        for html in ["", "<html><body></body></html>"] {
            let doc = dom::parse(html);
            for matcher in Matcher::ALL {
                assert!(matcher.detect(&doc, "https://example.com", &Options::default()).is_empty());
            }
        }
    }

    #[test]
    fn detect_all_keeps_matcher_order() {
        let item = r#"<div class="post"><h2><a href="/p">A post title here</a></h2><p>Posted 2024-01-01</p></div>"#;
        let doc = dom::parse(&item.repeat(3));
        let all = detect_all(&doc, "https://example.com", &Options::default());

        let selectors: Vec<&str> = all.iter().map(SelectorCandidate::selector).collect();
        assert_eq!(selectors, vec!["div.post", ".post", "div.post"]);
    }
}
