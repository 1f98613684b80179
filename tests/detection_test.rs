use rs_blogwatch::matcher::{links, structure, Matcher};
use rs_blogwatch::{dom, get_latest_post, scoring, Options, SelectorCandidate, SelectorDetector};

const BASE: &str = "https://example.com";

fn post_block(slug: &str, title: &str) -> String {
    let filler = "x".repeat(150);
    format!(
        r#"<div class="post"><h2><a href="/{slug}">{title}</a></h2><p>{filler}</p><time>2024-01-01</time></div>"#
    )
}

fn two_posts() -> String {
    format!(
        "<html><body>{}{}</body></html>",
        post_block("post1", "Title 1"),
        post_block("post2", "Title 2")
    )
}

#[test]
fn two_div_posts_yield_the_first() {
    let post = get_latest_post(&two_posts(), BASE).expect("post detected");

    assert_eq!(post.title, "Title 1");
    assert_eq!(post.url, "https://example.com/post1");
    assert!(post.confidence >= 0.5);
    assert!(!post.is_manual());
    assert!(!post.is_fallback());
}

#[test]
fn chrome_only_page_yields_nothing() {
    let html = r#"<html><body>
        <nav><a href="/">Home</a> <a href="/about">About</a></nav>
        <header><h1>My Blog</h1></header>
        <div class="sidebar"><h3>Links</h3><ul><li><a href="/x">X</a></li></ul></div>
        <footer>Copyright 2024</footer>
    </body></html>"#;

    assert!(get_latest_post(html, BASE).is_none());
}

#[test]
fn empty_documents_yield_nothing() {
    for html in ["", "   ", "<html></html>", "<html><head></head><body></body></html>"] {
        let doc = dom::parse(html);
        for matcher in Matcher::ALL {
            assert!(
                matcher.detect(&doc, BASE, &Options::default()).is_empty(),
                "{} matched on {html:?}",
                matcher.name()
            );
        }
        assert!(SelectorDetector::default().get_latest_post(&doc, BASE, None).is_none());
    }
}

#[test]
fn short_blocks_never_form_groups() {
    let items: String = (0..6)
        .map(|n| format!(r#"<div class="item"><a href="/p{n}">Post {n}</a></div><li class="row">2024-01-0{n}</li>"#))
        .collect();
    let doc = dom::parse(&format!("<html><body>{items}</body></html>"));

    for element in dom::all_elements(&doc) {
        let tag = element.tag();
        if ["div", "li", "section", "article"].contains(&tag.as_str()) {
            assert!(!scoring::looks_like_post(&element));
        }
    }
    assert!(structure::detect_by_structure(&doc, &Options::default()).is_empty());
    assert!(links::detect_by_links(&doc, BASE, &Options::default()).is_empty());
}

#[test]
fn detection_is_idempotent() {
    let doc = dom::parse(&two_posts());
    let detector = SelectorDetector::default();

    let first = detector.get_latest_post(&doc, BASE, None);
    let second = detector.get_latest_post(&doc, BASE, None);
    assert!(first.is_some());
    assert_eq!(first, second);
}

#[test]
fn structural_confidence_follows_repetition() {
    let cards = |count: usize| -> String {
        (0..count)
            .map(|n| format!(r#"<div class="card"><h3><a href="/p{n}">A card title number {n}</a></h3></div>"#))
            .collect()
    };

    let doc = dom::parse(&cards(4));
    let found = structure::detect_by_structure(&doc, &Options::default());
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].selector(), ".card");
    assert!((found[0].confidence() - 0.4).abs() < 1e-9);

    let doc = dom::parse(&cards(10));
    let found = structure::detect_by_structure(&doc, &Options::default());
    assert!((found[0].confidence() - 0.8).abs() < 1e-9);

    let mut last = 0.0;
    for count in 2..=8 {
        let c = structure::structure_confidence(count);
        assert!(c >= last, "confidence dropped at {count}");
        last = c;
    }
}

#[test]
fn ranked_candidates_are_unique_and_pattern_wins_ties() {
    let doc = dom::parse(&two_posts());
    let detector = SelectorDetector::default();
    let ranked = detector.detect_post_selectors(&doc, BASE);

    let mut selectors: Vec<&str> = ranked.iter().map(SelectorCandidate::selector).collect();
    let total = selectors.len();
    selectors.sort_unstable();
    selectors.dedup();
    assert_eq!(selectors.len(), total);

    // Both the pattern and the link-group matcher propose "div.post".
    let raw = rs_blogwatch::matcher::detect_all(&doc, BASE, &Options::default());
    assert_eq!(raw.iter().filter(|c| c.selector() == "div.post").count(), 2);

    let kept = ranked.iter().find(|c| c.selector() == "div.post").expect("div.post kept");
    assert_eq!(kept.confidence(), raw[0].confidence());
    assert_eq!(kept.confidence(), 1.0);
}

#[test]
fn confidences_are_ordered_and_bounded() {
    let html = format!(
        "{}{}{}",
        two_posts(),
        r#"<section class="news"><h3><a href="/n">A news headline here</a></h3></section>"#,
        r#"<div class="story">tiny</div>"#
    );
    let doc = dom::parse(&html);
    let ranked = SelectorDetector::default().detect_post_selectors(&doc, BASE);

    assert!(ranked.len() > 2);
    for pair in ranked.windows(2) {
        assert!(pair[0].confidence() >= pair[1].confidence());
    }
    for candidate in &ranked {
        assert!((0.0..=1.0).contains(&candidate.confidence()));
        assert!(!candidate.elements().is_empty());
        assert!(candidate.sample_titles().len() <= 3);
    }
}

#[test]
fn relative_link_resolves_against_base_path() {
    let html = r#"
        <article><h2><a href="second-post">A second post title</a></h2><time>2024-03-01</time></article>
        <article><h2><a href="first-post">A first post title</a></h2><time>2024-02-01</time></article>"#;
    let post = get_latest_post(html, "https://example.com/blog/").expect("post detected");
    assert_eq!(post.url, "https://example.com/blog/second-post");
    assert_eq!(post.published.map(|d| d.format("%F").to_string()).as_deref(), Some("2024-03-01"));
}

#[test]
fn scheme_relative_offsite_links_are_not_post_urls() {
    let html = r#"
        <div class="post"><h2><a href="//evil.org/x">Teaser pointing off-site</a></h2><p>Posted 2024-01-02</p></div>
        <div class="post"><h2><a href="//evil.org/y">Another off-site teaser</a></h2><p>Posted 2024-01-01</p></div>"#;
    let post = get_latest_post(html, BASE).expect("post detected");
    assert_eq!(post.title, "Teaser pointing off-site");
    assert_eq!(post.url, BASE);

    let html = html.replace("//evil.org", "//example.com");
    let post = get_latest_post(&html, BASE).expect("post detected");
    assert_eq!(post.url, "https://example.com/x");
}

#[test]
fn external_only_links_fall_back_to_base_url() {
    let html = r#"
        <div class="entry"><h2>Linkless entry one</h2><p>Posted 2024-01-02</p></div>
        <div class="entry"><h2>Linkless entry two</h2><p>Posted 2024-01-01</p></div>
        <div class="entry"><a href="https://elsewhere.org/x">Elsewhere</a></div>"#;
    let post = get_latest_post(html, BASE).expect("post detected");
    assert_eq!(post.title, "Linkless entry one");
    assert_eq!(post.url, BASE);
}

#[test]
fn fallback_marks_pages_needing_tuning() {
    let html = "<html><head><title>A Quiet Blog</title></head><body><p>Nothing here.</p></body></html>";
    let doc = dom::parse(html);
    let detector = SelectorDetector::default();

    let post = detector.get_latest_post_or_fallback(&doc, BASE, None).expect("fallback");
    assert!(post.title.starts_with(rs_blogwatch::FALLBACK_PREFIX));
    assert!(post.is_fallback());
    assert_eq!(post.url, BASE);
    assert_eq!(post.confidence, 0.0);
}

#[test]
fn diagnose_reports_candidates_and_suggestions() {
    let detector = SelectorDetector::default();

    let doc = dom::parse(&two_posts());
    let report = detector.diagnose(&doc, BASE, None);
    assert_eq!(report.candidates[0].selector, "div.post");
    assert_eq!(report.latest_post.as_ref().map(|p| p.title.as_str()), Some("Title 1"));

    let doc = dom::parse(r#"<article><h2><a href="/x">Hi</a></h2></article>"#);
    let report = detector.diagnose(&doc, BASE, None);
    assert!(report.needs_manual_tuning());
    assert!(report.suggested_selectors.contains(&"article".to_string()));

    let json = serde_json::to_value(&report).expect("serializable");
    assert_eq!(json["url"], BASE);
}
