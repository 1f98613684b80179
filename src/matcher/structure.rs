//! Repeating-structure matcher.
//!
//! A blog index usually renders each post with the same class. Classes on
//! block elements that recur between 2 and 20 times are checked for
//! post-like members; confidence grows with the repetition count.

use std::collections::HashMap;

use dom_query::Document;

use crate::candidate::SelectorCandidate;
use crate::dom::{self, Element};
use crate::patterns::BLOCK_TAGS;
use crate::scoring::looks_like_post;
use crate::Options;

/// Occurrence range of a class that could be a post list.
const MIN_REPEATS: usize = 2;
const MAX_REPEATS: usize = 20;

/// Groups larger than this are utility classes, not posts.
const MAX_GROUP_SIZE: usize = 50;

/// Members inspected by [`looks_like_posts`].
const SAMPLE_SIZE: usize = 5;

/// Confidence ceiling; repetition alone is weaker evidence than naming.
const MAX_CONFIDENCE: f64 = 0.8;

/// Confidence for a class seen `count` times: `min(0.8, count / 10)`.
#[must_use]
pub fn structure_confidence(count: usize) -> f64 {
    (count as f64 / 10.0).min(MAX_CONFIDENCE)
}

/// Whether a group of same-class elements reads as a list of posts.
///
/// At most 50 members, and at least `min(2, len)` of the first five must
/// look like posts.
#[must_use]
pub fn looks_like_posts(elements: &[Element]) -> bool {
    if elements.is_empty() || elements.len() > MAX_GROUP_SIZE {
        return false;
    }

    let postlike = elements
        .iter()
        .take(SAMPLE_SIZE)
        .filter(|el| looks_like_post(el))
        .count();

    postlike >= MIN_REPEATS.min(elements.len())
}

/// Class tokens of block elements with their counts, in first-seen order.
fn block_class_counts(doc: &Document) -> Vec<(String, usize)> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();

    for element in dom::find_all_by_tags(doc, &BLOCK_TAGS) {
        for class in element.classes() {
            let count = counts.entry(class.clone()).or_insert(0);
            if *count == 0 {
                order.push(class);
            }
            *count += 1;
        }
    }

    order
        .into_iter()
        .map(|class| {
            let count = counts.get(&class).copied().unwrap_or_default();
            (class, count)
        })
        .collect()
}

/// Propose candidates from classes that repeat a plausible number of times.
#[must_use]
pub fn detect_by_structure<'a>(doc: &'a Document, options: &Options) -> Vec<SelectorCandidate<'a>> {
    let mut candidates = Vec::new();

    for (class, count) in block_class_counts(doc) {
        if !(MIN_REPEATS..=MAX_REPEATS).contains(&count) {
            continue;
        }

        let elements = dom::find_all_by_class_name(doc, &class);
        if !looks_like_posts(&elements) {
            continue;
        }

        let confidence = structure_confidence(count);
        tracing::debug!(class = %class, count, confidence, "repeating structure accepted");

        if let Some(candidate) = SelectorCandidate::new(
            format!(".{class}"),
            confidence,
            elements,
            options.max_sample_titles,
        ) {
            candidates.push(candidate);
        }
    }

    candidates
}
