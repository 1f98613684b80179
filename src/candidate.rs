//! Selector candidates and their ranking.
//!
//! A candidate is one matcher's guess at "the list of posts": a readable
//! selector label, a confidence and the matched elements in document order.
//! `elements[0]` is taken as the newest post, since blogs list newest first.

use std::collections::HashSet;

use crate::dom::Element;
use crate::patterns::{POST_KEYWORDS, PREVIEW_SELECTORS, SELECTOR_CLASS_KEYWORDS};
use crate::text::{char_len, clean_text, truncate_chars};

/// Preview titles must be longer than this.
const MIN_PREVIEW_CHARS: usize = 10;

/// Element-text previews are cut to this many characters.
const PREVIEW_TRUNCATE_CHARS: usize = 100;

/// A potential post selector found by one of the matchers.
#[derive(Debug, Clone)]
pub struct SelectorCandidate<'a> {
    selector: String,
    confidence: f64,
    elements: Vec<Element<'a>>,
    sample_titles: Vec<String>,
}

impl<'a> SelectorCandidate<'a> {
    /// Build a candidate, eagerly extracting up to `max_samples` preview titles.
    ///
    /// Confidence is clamped to `[0, 1]`. Returns `None` for an empty element
    /// list: a candidate always has a first element.
    #[must_use]
    pub fn new(
        selector: impl Into<String>,
        confidence: f64,
        elements: Vec<Element<'a>>,
        max_samples: usize,
    ) -> Option<Self> {
        if elements.is_empty() {
            return None;
        }

        let sample_titles = elements.iter().take(max_samples).map(preview_title).collect();

        Some(Self {
            selector: selector.into(),
            confidence: confidence.clamp(0.0, 1.0),
            elements,
            sample_titles,
        })
    }

    /// Human-readable selector label. Also the deduplication key.
    #[must_use]
    pub fn selector(&self) -> &str {
        &self.selector
    }

    #[must_use]
    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    /// Matched elements in document order; never empty.
    #[must_use]
    pub fn elements(&self) -> &[Element<'a>] {
        &self.elements
    }

    /// The element assumed to be the most recent post.
    #[must_use]
    pub fn latest(&self) -> Option<Element<'a>> {
        self.elements.first().copied()
    }

    #[must_use]
    pub fn sample_titles(&self) -> &[String] {
        &self.sample_titles
    }
}

/// Preview string for one element: a heading-ish child, else the element text.
fn preview_title(element: &Element) -> String {
    for css in PREVIEW_SELECTORS {
        if let Some(found) = element.select_one(css) {
            let title = clean_text(&found.text());
            if char_len(&title) > MIN_PREVIEW_CHARS {
                return title;
            }
        }
    }

    truncate_chars(&clean_text(&element.text()), PREVIEW_TRUNCATE_CHARS)
}

/// Synthesize a readable selector for a representative element.
///
/// Tag name, then a class (preferring one mentioning post/entry/article/item,
/// else the first), then the id when it mentions post/entry/article.
/// Not guaranteed to be unique in the document.
///
/// # Examples
///
/// ```
/// use rs_blogwatch::{candidate::build_selector, dom};
///
/// let doc = dom::parse(r#"<li class="card post-item" id="post-12">x</li>"#);
/// let li = dom::find_all_by_tags(&doc, &["li"])[0];
/// assert_eq!(build_selector(&li), "li.post-item#post-12");
/// ```
#[must_use]
pub fn build_selector(element: &Element) -> String {
    let mut selector = element.tag();

    let classes = element.classes();
    let preferred = classes
        .iter()
        .find(|c| contains_keyword(c, &SELECTOR_CLASS_KEYWORDS))
        .or_else(|| classes.first());
    if let Some(class) = preferred {
        selector.push('.');
        selector.push_str(class);
    }

    if let Some(id) = element.id().filter(|id| contains_keyword(id, &POST_KEYWORDS)) {
        selector.push('#');
        selector.push_str(&id);
    }

    selector
}

fn contains_keyword(value: &str, keywords: &[&str]) -> bool {
    let lower = value.to_lowercase();
    keywords.iter().any(|kw| lower.contains(kw))
}

/// Deduplicate by selector string and sort by confidence, highest first.
///
/// The first candidate seen for a selector wins, so matcher order decides
/// ties between matchers. Equal confidences keep their input order.
#[must_use]
pub fn rank<'a>(candidates: Vec<SelectorCandidate<'a>>) -> Vec<SelectorCandidate<'a>> {
    let mut seen = HashSet::new();
    let mut unique: Vec<SelectorCandidate<'a>> = candidates
        .into_iter()
        .filter(|c| seen.insert(c.selector.clone()))
        .collect();

    unique.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom;

    fn candidate<'a>(selector: &str, confidence: f64, el: Element<'a>) -> SelectorCandidate<'a> {
        SelectorCandidate::new(selector, confidence, vec![el], 3).unwrap()
    }

    #[test]
    fn empty_element_list_is_rejected() {
        assert!(SelectorCandidate::new("div", 0.5, Vec::new(), 3).is_none());
    }

    #[test]
    fn confidence_is_clamped() {
        let doc = dom::parse("<div>x</div>");
        let div = dom::find_all_by_tags(&doc, &["div"])[0];
        assert_eq!(candidate("a", 1.4, div).confidence(), 1.0);
        assert_eq!(candidate("b", -0.2, div).confidence(), 0.0);
    }

    #[test]
    fn sample_titles_prefer_headings_then_text() {
        let doc = dom::parse(
            r#"<div class="p"><h2>A heading long enough</h2>body</div>
               <div class="p"><h2>Short</h2><a href="/x">A link text long enough</a></div>
               <div class="p">tiny</div>
               <div class="p">never sampled</div>"#,
        );
        let els = dom::find_all_by_class_name(&doc, "p");
        let c = SelectorCandidate::new(".p", 0.4, els, 3).unwrap();

        assert_eq!(c.elements().len(), 4);
        assert_eq!(
            c.sample_titles(),
            &["A heading long enough", "A link text long enough", "tiny"]
        );
    }

    #[test]
    fn long_text_previews_are_truncated() {
        let body = "x".repeat(150);
        let doc = dom::parse(&format!("<div>{body}</div>"));
        let div = dom::find_all_by_tags(&doc, &["div"])[0];
        let c = candidate("div", 0.5, div);
        let preview = &c.sample_titles()[0];
        assert_eq!(preview.len(), 103);
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn selector_prefers_post_like_class() {
        let doc = dom::parse(
            r#"<div class="card wide">a</div><article class="grid Entry-card">b</article><section>c</section><div id="sidebar" class="x">d</div>"#,
        );
        let els = dom::find_all_by_tags(&doc, &["div", "article", "section"]);
        let selectors: Vec<String> = els.iter().map(build_selector).collect();
        assert_eq!(selectors, vec!["div.card", "article.Entry-card", "section", "div.x"]);
    }

    #[test]
    fn rank_dedups_first_and_sorts_stably() {
        let doc = dom::parse("<p>1</p><p>2</p><p>3</p><p>4</p>");
        let ps = dom::find_all_by_tags(&doc, &["p"]);

        let ranked = rank(vec![
            candidate("div.post", 0.5, ps[0]),
            candidate(".post", 0.8, ps[1]),
            candidate("div.post", 0.9, ps[2]),
            candidate("li.item", 0.5, ps[3]),
        ]);

        let labels: Vec<(&str, f64)> = ranked.iter().map(|c| (c.selector(), c.confidence())).collect();
        assert_eq!(labels, vec![(".post", 0.8), ("div.post", 0.5), ("li.item", 0.5)]);
        assert_eq!(ranked[1].latest(), Some(ps[0]));
    }
}
