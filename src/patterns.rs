//! Compiled regex patterns and fixed selector tables for post detection.
//!
//! All patterns are compiled once at first use using `LazyLock`.
//! Tables are plain static data; nothing here is mutated after startup.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Text Patterns
// =============================================================================

/// Date-like text: ISO `2024-01-31` or slash form `1/31/2024`.
pub static DATE_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d{4}-\d{2}-\d{2}|\d{1,2}/\d{1,2}/\d{4}").expect("DATE_TEXT regex")
});

/// ISO calendar date with capture groups, used to read publication dates.
pub static ISO_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{4})-(\d{2})-(\d{2})").expect("ISO_DATE regex")
});

/// Matches whitespace runs for normalization.
pub static WHITESPACE_NORMALIZE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+").expect("WHITESPACE_NORMALIZE regex")
});

// =============================================================================
// Post Naming Conventions
// =============================================================================

/// What part of an element a [`PostPattern`] is tested against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    /// Case-insensitive regex search against each class token.
    Class,
    /// Case-insensitive regex search against the id attribute.
    Id,
    /// Exact tag name.
    Tag,
}

/// One entry of the post naming-convention table.
#[derive(Debug, Clone, Copy)]
pub struct PostPattern {
    pub kind: PatternKind,
    /// Regex source for `Class`/`Id`, tag name for `Tag`.
    pub pattern: &'static str,
}

impl PostPattern {
    const fn class(pattern: &'static str) -> Self {
        Self { kind: PatternKind::Class, pattern }
    }

    const fn id(pattern: &'static str) -> Self {
        Self { kind: PatternKind::Id, pattern }
    }

    const fn tag(pattern: &'static str) -> Self {
        Self { kind: PatternKind::Tag, pattern }
    }

    /// Whether the pattern names a post explicitly (post, entry, article).
    #[must_use]
    pub fn is_post_specific(&self) -> bool {
        let lower = self.pattern.to_ascii_lowercase();
        POST_KEYWORDS.iter().any(|kw| lower.contains(kw))
    }
}

/// Post naming conventions, in evaluation order.
pub static POST_PATTERNS: [PostPattern; 13] = [
    PostPattern::class(r"post\b"),
    PostPattern::class(r"entry\b"),
    PostPattern::class(r"article\b"),
    PostPattern::class(r"blog-post\b"),
    PostPattern::class(r"content\b"),
    PostPattern::class(r"item\b"),
    PostPattern::class(r"story\b"),
    PostPattern::class(r"news\b"),
    PostPattern::id(r"post\b"),
    PostPattern::id(r"entry\b"),
    PostPattern::id(r"article\b"),
    PostPattern::tag("article"),
    PostPattern::tag("section"),
];

/// Case-insensitive compiled forms of the `Class`/`Id` entries of
/// [`POST_PATTERNS`], index-aligned. `Tag` entries hold `None`.
pub static POST_PATTERN_REGEXES: LazyLock<Vec<Option<Regex>>> = LazyLock::new(|| {
    POST_PATTERNS
        .iter()
        .map(|p| match p.kind {
            PatternKind::Tag => None,
            PatternKind::Class | PatternKind::Id => {
                Some(Regex::new(&format!("(?i){}", p.pattern)).expect("POST_PATTERNS regex"))
            }
        })
        .collect()
});

/// Keywords that make a pattern, class or id read as "a post".
pub const POST_KEYWORDS: [&str; 3] = ["post", "entry", "article"];

/// Keywords preferred when picking a class for a synthesized selector.
pub const SELECTOR_CLASS_KEYWORDS: [&str; 4] = ["post", "entry", "article", "item"];

/// Block-like tags scanned by the structural and link-group matchers.
pub const BLOCK_TAGS: [&str; 4] = ["div", "article", "section", "li"];

/// Heading tags.
pub const HEADING_TAGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

// =============================================================================
// Field Extraction Selectors (priority order)
// =============================================================================

/// Sub-selectors tried, in order, when extracting a post title.
pub const TITLE_SELECTORS: [&str; 10] = [
    "h1",
    "h2",
    "h3",
    "h4",
    ".post-title",
    ".entry-title",
    ".title",
    "a[href]",
    ".headline",
    ".header",
];

/// Sub-selectors tried, in order, when extracting a post link.
pub const LINK_SELECTORS: [&str; 6] = [
    "h1 a[href]",
    "h2 a[href]",
    "h3 a[href]",
    ".post-title a[href]",
    ".entry-title a[href]",
    "a[href]",
];

/// Sub-selectors tried for candidate preview titles.
pub const PREVIEW_SELECTORS: [&str; 9] = [
    "h1",
    "h2",
    "h3",
    "h4",
    ".title",
    ".post-title",
    ".entry-title",
    "a",
    ".link",
];

/// Selectors whose match counts are reported as manual-tuning suggestions.
pub const SUGGESTION_SELECTORS: [&str; 5] = ["article", "section", ".post", ".entry", ".blog-post"];

/// Class fragments reported by diagnostics when no candidate is found.
pub const DIAGNOSTIC_CLASS_FRAGMENTS: [&str; 5] =
    ["post", "entry", "blog-post", "article", "content-item"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_text_matches_iso_and_slash_forms() {
        assert!(DATE_TEXT.is_match("Posted 2024-01-01 by admin"));
        assert!(DATE_TEXT.is_match("on 3/14/2023"));
        assert!(!DATE_TEXT.is_match("March 14th"));
    }

    #[test]
    fn class_patterns_respect_word_boundary() {
        let post = POST_PATTERN_REGEXES[0].as_ref().expect("class pattern");
        assert!(post.is_match("post"));
        assert!(post.is_match("Blog-POST"));
        assert!(post.is_match("post-title"));
        assert!(!post.is_match("posts"));
        assert!(!post.is_match("postcard"));
    }

    #[test]
    fn tag_patterns_have_no_regex() {
        for (pattern, regex) in POST_PATTERNS.iter().zip(POST_PATTERN_REGEXES.iter()) {
            assert_eq!(pattern.kind == PatternKind::Tag, regex.is_none());
        }
    }

    #[test]
    fn post_specific_patterns() {
        let specific: Vec<&str> = POST_PATTERNS
            .iter()
            .filter(|p| p.is_post_specific())
            .map(|p| p.pattern)
            .collect();
        assert_eq!(specific.len(), 8);
        assert!(specific.contains(&"article"));
        assert!(!specific.contains(&r"content\b"));
    }
}
