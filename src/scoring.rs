//! Post-likelihood scoring for single elements.
//!
//! An element "looks like a post" when it carries enough text and at least
//! two of four cheap signals: a link, a heading, a date, a long body. The
//! threshold favours recall; long non-post blocks such as navigation blurbs
//! will occasionally pass.

use crate::dom::Element;
use crate::patterns::{DATE_TEXT, HEADING_TAGS};
use crate::text::{char_len, clean_text};

/// Elements with less normalized text than this are never posts.
pub const MIN_POST_TEXT_CHARS: usize = 20;

/// Text longer than this counts as a "substantial body" signal.
pub const LONG_TEXT_CHARS: usize = 100;

/// Signals needed to accept an element.
pub const POST_SCORE_THRESHOLD: u8 = 2;

/// Individual post signals of one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PostSignals {
    /// Normalized text length in characters.
    pub text_chars: usize,
    pub has_link: bool,
    pub has_heading: bool,
    pub has_date: bool,
    pub has_long_text: bool,
}

impl PostSignals {
    /// Number of signals present (0..=4).
    #[must_use]
    pub fn score(&self) -> u8 {
        [self.has_link, self.has_heading, self.has_date, self.has_long_text]
            .into_iter()
            .map(u8::from)
            .sum()
    }

    /// Whether these signals describe a post.
    #[must_use]
    pub fn is_post(&self) -> bool {
        self.text_chars >= MIN_POST_TEXT_CHARS && self.score() >= POST_SCORE_THRESHOLD
    }
}

/// Compute the post signals of an element.
///
/// Short elements return early with only `text_chars` filled in.
#[must_use]
pub fn post_signals(element: &Element) -> PostSignals {
    let text = clean_text(&element.text());
    let text_chars = char_len(&text);

    if text_chars < MIN_POST_TEXT_CHARS {
        return PostSignals { text_chars, ..PostSignals::default() };
    }

    let descendants: Vec<Element> = element.descendants().collect();
    let has_tag = |tags: &[&str]| descendants.iter().any(|d| tags.contains(&d.tag().as_str()));

    PostSignals {
        text_chars,
        has_link: descendants.iter().any(|d| d.tag() == "a" && d.href().is_some()),
        has_heading: has_tag(&HEADING_TAGS),
        has_date: has_tag(&["time"]) || DATE_TEXT.is_match(&text),
        has_long_text: text_chars > LONG_TEXT_CHARS,
    }
}

/// Decide whether an element looks like a blog post.
///
/// # Examples
///
/// ```
/// use rs_blogwatch::{dom, scoring};
///
/// let doc = dom::parse(r#"<div><h2><a href="/p">A reasonably long title</a></h2></div>"#);
/// let div = dom::find_all_by_tags(&doc, &["div"])[0];
/// assert!(scoring::looks_like_post(&div));
/// ```
#[must_use]
pub fn looks_like_post(element: &Element) -> bool {
    post_signals(element).is_post()
}
