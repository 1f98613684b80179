//! Internal-link matcher.
//!
//! Post teasers link to the post itself, on the same site. Block elements
//! that carry an internal link and look like posts are grouped by their
//! synthesized selector; every group of two or more is a candidate.

use std::collections::HashMap;

use dom_query::Document;

use crate::candidate::{build_selector, SelectorCandidate};
use crate::dom::{self, Element};
use crate::patterns::BLOCK_TAGS;
use crate::scoring::looks_like_post;
use crate::url_utils::is_internal_link;
use crate::Options;

/// Minimum size of a qualifying set and of each group.
const MIN_GROUP: usize = 2;

/// Confidence ceiling for link groups.
const MAX_CONFIDENCE: f64 = 0.9;

/// Confidence for a group of `size` elements: `min(0.9, size / 10)`.
#[must_use]
pub fn link_group_confidence(size: usize) -> f64 {
    (size as f64 / 10.0).min(MAX_CONFIDENCE)
}

/// Whether the element contains at least one link into the same site.
#[must_use]
pub fn has_internal_link(element: &Element, base_url: &str) -> bool {
    element
        .select("a[href]")
        .iter()
        .filter_map(Element::href)
        .any(|href| is_internal_link(&href, base_url))
}

/// Group elements by synthesized selector, keeping first-seen group order.
fn group_by_selector<'a>(elements: Vec<Element<'a>>) -> Vec<(String, Vec<Element<'a>>)> {
    let mut groups: Vec<(String, Vec<Element<'a>>)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for element in elements {
        let selector = build_selector(&element);
        match index.get(&selector) {
            Some(&i) => groups[i].1.push(element),
            None => {
                index.insert(selector.clone(), groups.len());
                groups.push((selector, vec![element]));
            }
        }
    }

    groups
}

/// Propose candidates from groups of post-like blocks with internal links.
#[must_use]
pub fn detect_by_links<'a>(
    doc: &'a Document,
    base_url: &str,
    options: &Options,
) -> Vec<SelectorCandidate<'a>> {
    let qualifying: Vec<Element<'a>> = dom::find_all_by_tags(doc, &BLOCK_TAGS)
        .into_iter()
        .filter(|el| has_internal_link(el, base_url) && looks_like_post(el))
        .collect();

    if qualifying.len() < MIN_GROUP {
        return Vec::new();
    }

    group_by_selector(qualifying)
        .into_iter()
        .filter(|(_, group)| group.len() >= MIN_GROUP)
        .filter_map(|(selector, group)| {
            let confidence = link_group_confidence(group.len());
            tracing::debug!(selector = %selector, size = group.len(), confidence, "link group accepted");
            SelectorCandidate::new(selector, confidence, group, options.max_sample_titles)
        })
        .collect()
}
