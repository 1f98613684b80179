//! Detection diagnostics.
//!
//! When a blog keeps falling back to its page title, an operator needs to
//! see what the detector saw: the ranked candidates, what the best one
//! produced, and where a manual selector might start. [`DiagnosticReport`]
//! gathers that into a serializable value.

use dom_query::Document;
use serde::Serialize;

use crate::candidate::SelectorCandidate;
use crate::dom::{self, Element};
use crate::manual::ManualSelectorConfig;
use crate::patterns::{DIAGNOSTIC_CLASS_FRAGMENTS, SUGGESTION_SELECTORS};
use crate::result::PostRecord;
use crate::text::{char_len, clean_text, truncate_chars};

/// Maximum number of selector suggestions.
const MAX_SUGGESTIONS: usize = 5;

/// Match-count range for a common selector to be worth suggesting.
const SUGGESTION_RANGE: std::ops::RangeInclusive<usize> = 1..=10;

/// Text samples are cut to this many characters.
const SAMPLE_CHARS: usize = 60;

/// Owned summary of one candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateSummary {
    pub selector: String,
    pub confidence: f64,
    pub element_count: usize,
    pub sample_titles: Vec<String>,
}

impl From<&SelectorCandidate<'_>> for CandidateSummary {
    fn from(candidate: &SelectorCandidate<'_>) -> Self {
        Self {
            selector: candidate.selector().to_string(),
            confidence: candidate.confidence(),
            element_count: candidate.elements().len(),
            sample_titles: candidate.sample_titles().to_vec(),
        }
    }
}

/// What the detector sees on one page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosticReport {
    pub url: String,
    /// Ranked automatic candidates.
    pub candidates: Vec<CandidateSummary>,
    /// Result of `get_latest_post` for the same page.
    pub latest_post: Option<PostRecord>,
    /// The manual override in effect, if any.
    pub manual_override: Option<ManualSelectorConfig>,
    /// Observations about post-like markup, filled when no candidate exists.
    pub hints: Vec<String>,
    /// Selectors worth trying in a manual override, filled when detection
    /// produced no post.
    pub suggested_selectors: Vec<String>,
}

impl DiagnosticReport {
    pub(crate) fn build(
        doc: &Document,
        url: &str,
        candidates: &[SelectorCandidate<'_>],
        latest_post: Option<PostRecord>,
        manual_override: Option<ManualSelectorConfig>,
    ) -> Self {
        let hints = if candidates.is_empty() { inspect_markup(doc) } else { Vec::new() };
        let suggested_selectors = if latest_post.is_none() { suggest_selectors(doc) } else { Vec::new() };

        Self {
            url: url.to_string(),
            candidates: candidates.iter().map(CandidateSummary::from).collect(),
            latest_post,
            manual_override,
            hints,
            suggested_selectors,
        }
    }

    /// Whether automatic detection found nothing at all.
    #[must_use]
    pub fn needs_manual_tuning(&self) -> bool {
        self.latest_post.is_none()
    }
}

/// Readable text sample: own text if substantial, else a heading or link.
fn text_sample(element: &Element) -> String {
    let text = clean_text(&element.text());
    if char_len(&text) > 20 {
        return truncate_chars(&text, SAMPLE_CHARS);
    }

    element
        .select("h1, h2, h3, h4, a")
        .iter()
        .map(|child| clean_text(&child.text()))
        .find(|t| char_len(t) > 10)
        .map_or(text, |t| truncate_chars(&t, SAMPLE_CHARS))
}

/// Headings (h1–h4) that contain a link.
fn linked_headings<'a>(doc: &'a Document) -> Vec<Element<'a>> {
    dom::find_all_by_tags(doc, &["h1", "h2", "h3", "h4"])
        .into_iter()
        .filter(|h| h.select_one("a").is_some())
        .collect()
}

/// Describe post-like markup the matchers did not pick up.
fn inspect_markup(doc: &Document) -> Vec<String> {
    let mut hints = Vec::new();

    let articles = dom::find_all_by_tags(doc, &["article"]);
    if !articles.is_empty() {
        hints.push(format!("{} <article> elements", articles.len()));
        hints.extend(articles.iter().take(3).map(|a| format!("  article: {}", text_sample(a))));
    }

    let all = dom::all_elements(doc);
    for fragment in DIAGNOSTIC_CLASS_FRAGMENTS {
        let matching: Vec<&Element> = all
            .iter()
            .filter(|el| el.classes().join(" ").to_lowercase().contains(fragment))
            .collect();
        if !matching.is_empty() {
            hints.push(format!("{} elements with '{fragment}' in class", matching.len()));
            hints.extend(matching.iter().take(2).map(|el| format!("  {fragment}: {}", text_sample(el))));
        }
    }

    let headings = linked_headings(doc);
    if !headings.is_empty() {
        hints.push(format!("{} headings with links", headings.len()));
        hints.extend(
            headings
                .iter()
                .take(3)
                .map(|h| format!("  <{}> {}", h.tag(), text_sample(h))),
        );
    }

    hints
}

/// Selectors worth trying in a manual override.
fn suggest_selectors(doc: &Document) -> Vec<String> {
    let mut suggestions: Vec<String> = linked_headings(doc)
        .iter()
        .map(|h| match h.classes().first() {
            Some(class) => format!("{} .{class}", h.tag()),
            None => format!("{} a", h.tag()),
        })
        .collect();

    suggestions.extend(
        SUGGESTION_SELECTORS
            .iter()
            .filter(|css| SUGGESTION_RANGE.contains(&dom::select_all(doc, css).len()))
            .map(|css| (*css).to_string()),
    );

    let mut unique = Vec::new();
    for suggestion in suggestions {
        if !unique.contains(&suggestion) {
            unique.push(suggestion);
        }
    }
    unique.truncate(MAX_SUGGESTIONS);
    unique
}
