//! Naming-convention matcher.
//!
//! Walks the fixed [`POST_PATTERNS`] table and proposes every non-empty
//! match set, scored by how post-specific the pattern is, how many elements
//! it matched, and how post-like the first few matches are.

use dom_query::Document;

use crate::candidate::{build_selector, SelectorCandidate};
use crate::dom::{self, Element};
use crate::patterns::{PatternKind, PostPattern, POST_PATTERNS, POST_PATTERN_REGEXES};
use crate::scoring::looks_like_post;
use crate::Options;

/// Matches inspected for the content-quality bonus.
const CONTENT_SAMPLE: usize = 5;

/// Elements matched by one table entry, in document order.
fn find_matches<'a>(doc: &'a Document, pattern: &PostPattern, index: usize) -> Vec<Element<'a>> {
    match (pattern.kind, POST_PATTERN_REGEXES[index].as_ref()) {
        (PatternKind::Class, Some(re)) => dom::find_all_by_class(doc, re),
        (PatternKind::Id, Some(re)) => dom::find_all_by_id(doc, re),
        (PatternKind::Tag, _) => dom::find_all_by_tags(doc, &[pattern.pattern]),
        _ => Vec::new(),
    }
}

/// Confidence of a pattern's match set.
///
/// Base 0.5; +0.3 for post-specific patterns; +0.2 for 2–10 matches, +0.1
/// for exactly one, -0.3 beyond 20; plus up to 0.2 for the share of the
/// first five matches that look like posts. Clamped to `[0, 1]`.
#[must_use]
pub fn pattern_confidence(pattern: &PostPattern, elements: &[Element]) -> f64 {
    if elements.is_empty() {
        return 0.0;
    }

    let mut score = 0.5;

    if pattern.is_post_specific() {
        score += 0.3;
    }

    let count = elements.len();
    if (2..=10).contains(&count) {
        score += 0.2;
    } else if count == 1 {
        score += 0.1;
    }
    if count > 20 {
        score -= 0.3;
    }

    let sample = &elements[..count.min(CONTENT_SAMPLE)];
    let postlike = sample.iter().filter(|el| looks_like_post(el)).count();
    score += (postlike as f64 / sample.len() as f64) * 0.2;

    score.clamp(0.0, 1.0)
}

/// Propose candidates from common post/entry/article naming conventions.
#[must_use]
pub fn detect_by_class_patterns<'a>(doc: &'a Document, options: &Options) -> Vec<SelectorCandidate<'a>> {
    let mut candidates = Vec::new();

    for (index, pattern) in POST_PATTERNS.iter().enumerate() {
        let elements = find_matches(doc, pattern, index);
        let Some(first) = elements.first() else {
            continue;
        };

        let confidence = pattern_confidence(pattern, &elements);
        if confidence <= options.pattern_min_confidence {
            tracing::debug!(pattern = pattern.pattern, confidence, "pattern below confidence floor");
            continue;
        }

        let selector = build_selector(first);
        if let Some(candidate) =
            SelectorCandidate::new(selector, confidence, elements, options.max_sample_titles)
        {
            candidates.push(candidate);
        }
    }

    candidates
}
