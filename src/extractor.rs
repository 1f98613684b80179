//! Post field extraction.
//!
//! Given the element chosen as the latest post, read a title and a link
//! from it by trying sub-selectors in a fixed order of preference. The
//! manual path does the same from operator-supplied selectors.
//!
//! Every function here returns `None` when it cannot find what it needs;
//! that is the expected outcome on unfamiliar markup, not an error.

use chrono::{DateTime, NaiveDate, Utc};
use dom_query::Document;

use crate::dom::{self, Element};
use crate::manual::{ManualSelectorConfig, SelectorTarget};
use crate::patterns::{ISO_DATE, LINK_SELECTORS, TITLE_SELECTORS};
use crate::result::{Post, PostRecord, FALLBACK_PREFIX, FALLBACK_SELECTOR, MANUAL_SELECTOR_PREFIX};
use crate::text::{char_len, clean_text};
use crate::url_utils::{is_internal_link, resolve_url};

/// Default minimum title length (exclusive) when no `Options` are at hand.
pub const MIN_TITLE_CHARS: usize = 5;

/// Normalized text of `element` if longer than `min_chars` characters.
fn title_text(element: &Element, min_chars: usize) -> Option<String> {
    let title = clean_text(&element.text());
    (char_len(&title) > min_chars).then_some(title)
}

/// Extract a post title using the default minimum length.
///
/// # Examples
///
/// ```
/// use rs_blogwatch::{dom, extractor};
///
/// let doc = dom::parse(r#"<div><h2>  Hello   world  </h2><p>body</p></div>"#);
/// let div = dom::find_all_by_tags(&doc, &["div"])[0];
/// assert_eq!(extractor::extract_title(&div).as_deref(), Some("Hello world"));
/// ```
#[must_use]
pub fn extract_title(element: &Element) -> Option<String> {
    extract_title_with_min(element, MIN_TITLE_CHARS)
}

/// Extract a post title: the first preferred sub-element whose normalized
/// text is longer than `min_chars`.
#[must_use]
pub fn extract_title_with_min(element: &Element, min_chars: usize) -> Option<String> {
    TITLE_SELECTORS.iter().find_map(|css| {
        element
            .select_one(css)
            .and_then(|found| title_text(&found, min_chars))
    })
}

/// Extract the post link, resolved against `base_url`.
///
/// Only internal links are accepted; the first preferred selector whose
/// first match is internal wins.
#[must_use]
pub fn extract_url(element: &Element, base_url: &str) -> Option<String> {
    LINK_SELECTORS.iter().find_map(|css| {
        element
            .select_one(css)
            .and_then(|link| link.href())
            .filter(|href| is_internal_link(href, base_url))
            .map(|href| resolve_url(base_url, &href))
    })
}

/// Parse a date from a `datetime` attribute or date text.
fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    let caps = ISO_DATE.captures(value)?;
    let date = NaiveDate::from_ymd_opt(
        caps[1].parse().ok()?,
        caps[2].parse().ok()?,
        caps[3].parse().ok()?,
    )?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc())
}

/// Publication date of a post element, if it shows one.
///
/// Tries the first `<time>`'s `datetime` attribute, then its text, then an
/// ISO date anywhere in the element text.
#[must_use]
pub fn extract_published_date(element: &Element) -> Option<DateTime<Utc>> {
    let time = element.select_one("time");

    time.and_then(|t| t.attr("datetime"))
        .and_then(|v| parse_date(&v))
        .or_else(|| time.and_then(|t| parse_date(&t.text())))
        .or_else(|| parse_date(&element.text()))
}

/// Resolve a manual field target inside `container`.
///
/// `"self"` is the container. A CSS selector that matches nothing falls back
/// to the container when the selector names the container's tag or one of
/// its classes, which tolerates configs written against the container.
fn resolve_target<'a>(container: &Element<'a>, target: &SelectorTarget) -> Option<Element<'a>> {
    match target {
        SelectorTarget::Container => Some(*container),
        SelectorTarget::Css(css) => container
            .try_select_one(css)
            .or_else(|| names_container(css, container).then_some(*container)),
    }
}

/// Whether `css` is the container's tag, or has a `.class` token equal to
/// one of the container's classes.
fn names_container(css: &str, container: &Element) -> bool {
    let css = css.trim();
    if container.tag() == css {
        return true;
    }

    let classes = container.classes();
    css.split(|c: char| c.is_whitespace() || matches!(c, '>' | '+' | '~' | ','))
        .flat_map(|compound| compound.split('.').skip(1))
        .map(|token| token.split(['#', '[', ':']).next().unwrap_or_default())
        .any(|token| classes.iter().any(|class| class == token))
}

/// Extract the latest post with a manual selector configuration.
///
/// The first container matching `post_container` is the latest post. The
/// title comes from `title_selector`; the URL from `link_selector`'s `href`,
/// or `base_url` when there is none. Confidence is always `1.0`.
#[must_use]
pub fn extract_with_manual_selectors(
    doc: &Document,
    base_url: &str,
    config: &ManualSelectorConfig,
    min_title_chars: usize,
) -> Option<PostRecord> {
    let containers = dom::select_all(doc, &config.post_container);
    let Some(container) = containers.first() else {
        tracing::warn!(selector = %config.post_container, "manual selector found no containers");
        return None;
    };

    let title = config
        .title_selector
        .as_ref()
        .and_then(|target| resolve_target(container, target))
        .map(|el| clean_text(&el.text()))
        .filter(|title| char_len(title) > min_title_chars);

    let Some(title) = title else {
        tracing::warn!(selector = %config.post_container, "manual selector found no usable title");
        return None;
    };

    let url = config
        .link_selector
        .as_ref()
        .and_then(|target| resolve_target(container, target))
        .and_then(|el| el.href())
        .map_or_else(|| base_url.to_string(), |href| resolve_url(base_url, &href));

    Some(PostRecord {
        title,
        url,
        selector: format!("{MANUAL_SELECTOR_PREFIX}{}", config.post_container),
        confidence: 1.0,
        published: extract_published_date(container),
    })
}

/// List every post matched by `selector`.
///
/// Elements without a usable title are skipped; a missing link falls back
/// to `base_url`. Invalid selectors match nothing.
#[must_use]
pub fn extract_posts(doc: &Document, selector: &str, base_url: &str, blog_name: &str) -> Vec<Post> {
    dom::select_all(doc, selector)
        .iter()
        .filter_map(|element| {
            let title = extract_title(element)?;
            let url = extract_url(element, base_url).unwrap_or_else(|| base_url.to_string());
            Some(Post {
                title,
                url,
                blog_name: blog_name.to_string(),
                date: extract_published_date(element),
            })
        })
        .collect()
}

/// A placeholder record built from the page `<title>`.
///
/// Used when nothing better is available; downstream consumers recognise the
/// [`FALLBACK_PREFIX`] and flag the blog for manual tuning.
#[must_use]
pub fn fallback_post(doc: &Document, base_url: &str) -> Option<PostRecord> {
    let title = dom::page_title(doc)?;
    Some(PostRecord {
        title: format!("{FALLBACK_PREFIX}{}", clean_text(&title)),
        url: base_url.to_string(),
        selector: FALLBACK_SELECTOR.to_string(),
        confidence: 0.0,
        published: None,
    })
}
