//! Simple CLI that reads HTML from stdin and prints detection results as JSON.
//!
//! Usage: `detect_stdin <base-url> [blog-name] [--post-only]`
//!
//! Manual selectors are read from the file named by
//! `BLOGWATCH_MANUAL_SELECTORS`, if set. Log verbosity follows `RUST_LOG`.

use std::io::{self, Read};

use rs_blogwatch::{dom, url_utils, ManualSelectors, Options, SelectorDetector};
use tracing_subscriber::EnvFilter;

const MANUAL_SELECTORS_ENV: &str = "BLOGWATCH_MANUAL_SELECTORS";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let post_only = args.iter().any(|a| a == "--post-only");
    args.retain(|a| a != "--post-only");

    let Some(base_url) = args.first().cloned() else {
        eprintln!("usage: detect_stdin <base-url> [blog-name] [--post-only]");
        std::process::exit(2);
    };
    if let Err(err) = url_utils::parse_base(&base_url) {
        eprintln!("{err}");
        std::process::exit(2);
    }
    let blog_name = args.get(1).map(String::as_str);

    // Read raw bytes so a declared charset can be honoured
    let mut html = Vec::new();
    if io::stdin().read_to_end(&mut html).is_err() {
        eprintln!("Failed to read from stdin");
        std::process::exit(1);
    }

    let manual = std::env::var_os(MANUAL_SELECTORS_ENV)
        .map(ManualSelectors::load_or_default)
        .unwrap_or_default();
    tracing::debug!(entries = manual.len(), "manual selectors ready");

    let detector = SelectorDetector::new(manual, Options::default());
    let doc = dom::parse_bytes(&html);

    let json = if post_only {
        let post = detector.get_latest_post_or_fallback(&doc, &base_url, blog_name);
        serde_json::to_string_pretty(&post)
    } else {
        serde_json::to_string_pretty(&detector.diagnose(&doc, &base_url, blog_name))
    };

    match json {
        Ok(json) => println!("{json}"),
        Err(err) => {
            eprintln!("Failed to serialize output: {err}");
            std::process::exit(1);
        }
    }
}
