//! Manual selector overrides.
//!
//! Some blogs defeat every heuristic. Operators can pin such a blog to a
//! container/title/link selector triple, keyed by blog name, domain or exact
//! URL. The table is a JSON object loaded once and shared read-only:
//!
//! ```json
//! {
//!   "Gwern.net Newsletter": {
//!     "post_container": ".index-list li",
//!     "title_selector": "a",
//!     "link_selector": "a"
//!   },
//!   "example.com": { "post_container": ".hero", "title_selector": "self", "link_selector": "self" }
//! }
//! ```

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::url_utils::domain_of;

/// Sentinel selector meaning "the container itself".
pub const SELF_SELECTOR: &str = "self";

/// Where inside a post container a field is read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SelectorTarget {
    /// The container element itself (`"self"`).
    Container,
    /// A CSS selector evaluated inside the container.
    Css(String),
}

impl From<String> for SelectorTarget {
    fn from(value: String) -> Self {
        if value.trim() == SELF_SELECTOR {
            SelectorTarget::Container
        } else {
            SelectorTarget::Css(value)
        }
    }
}

impl From<&str> for SelectorTarget {
    fn from(value: &str) -> Self {
        SelectorTarget::from(value.to_string())
    }
}

impl From<SelectorTarget> for String {
    fn from(target: SelectorTarget) -> Self {
        match target {
            SelectorTarget::Container => SELF_SELECTOR.to_string(),
            SelectorTarget::Css(css) => css,
        }
    }
}

impl fmt::Display for SelectorTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectorTarget::Container => f.write_str(SELF_SELECTOR),
            SelectorTarget::Css(css) => f.write_str(css),
        }
    }
}

/// Operator-supplied selectors for one blog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualSelectorConfig {
    /// Selector for post containers; the first match is the latest post.
    pub post_container: String,

    /// Where the title is read from. Missing means no title can be found.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_selector: Option<SelectorTarget>,

    /// Where the link is read from. Missing means the page URL is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_selector: Option<SelectorTarget>,
}

impl ManualSelectorConfig {
    /// Convenience constructor.
    #[must_use]
    pub fn new(
        post_container: impl Into<String>,
        title_selector: impl Into<SelectorTarget>,
        link_selector: impl Into<SelectorTarget>,
    ) -> Self {
        Self {
            post_container: post_container.into(),
            title_selector: Some(title_selector.into()),
            link_selector: Some(link_selector.into()),
        }
    }
}

/// Read-only table of manual overrides keyed by blog name, domain or URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ManualSelectors {
    entries: HashMap<String, ManualSelectorConfig>,
}

impl ManualSelectors {
    /// An empty table: every lookup misses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON key → config object.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a table from disk. A missing file is an empty table.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no manual selector file");
            return Ok(Self::new());
        }

        let json = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_json_str(&json)?;
        tracing::debug!(path = %path.display(), entries = table.len(), "loaded manual selectors");
        Ok(table)
    }

    /// Load a table, logging and falling back to an empty one on error.
    #[must_use]
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        Self::from_path(path).unwrap_or_else(|err| {
            tracing::warn!(path = %path.display(), error = %err, "could not load manual selectors");
            Self::new()
        })
    }

    /// Add or replace an entry.
    pub fn insert(&mut self, key: impl Into<String>, config: ManualSelectorConfig) {
        self.entries.insert(key.into(), config);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the override for a page.
    ///
    /// Precedence: blog name, then the URL's domain, then the exact URL.
    /// The first hit wins; entries are never merged.
    #[must_use]
    pub fn lookup(&self, url: &str, blog_name: Option<&str>) -> Option<&ManualSelectorConfig> {
        blog_name
            .and_then(|name| self.entries.get(name))
            .or_else(|| {
                let domain = domain_of(url);
                (!domain.is_empty()).then(|| self.entries.get(&domain)).flatten()
            })
            .or_else(|| self.entries.get(url))
    }
}

impl FromIterator<(String, ManualSelectorConfig)> for ManualSelectors {
    fn from_iter<I: IntoIterator<Item = (String, ManualSelectorConfig)>>(iter: I) -> Self {
        Self { entries: iter.into_iter().collect() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TABLE: &str = r#"{
        "My Blog": { "post_container": ".by-name", "title_selector": "self", "link_selector": "a" },
        "example.com": { "post_container": ".by-domain", "title_selector": "h2" },
        "https://other.org/blog": { "post_container": ".by-url" }
    }"#;

    #[test]
    fn parses_self_sentinel() {
        let table = ManualSelectors::from_json_str(TABLE).unwrap();
        let config = table.lookup("https://nowhere.net", Some("My Blog")).unwrap();

        assert_eq!(config.title_selector, Some(SelectorTarget::Container));
        assert_eq!(config.link_selector, Some(SelectorTarget::Css("a".into())));
    }

    #[test]
    fn lookup_precedence() {
        let table = ManualSelectors::from_json_str(TABLE).unwrap();

        let by_name = table.lookup("https://example.com/", Some("My Blog")).unwrap();
        assert_eq!(by_name.post_container, ".by-name");

        let by_domain = table.lookup("https://Example.com/posts", Some("Unknown")).unwrap();
        assert_eq!(by_domain.post_container, ".by-domain");
        assert_eq!(by_domain.link_selector, None);

        let by_url = table.lookup("https://other.org/blog", None).unwrap();
        assert_eq!(by_url.post_container, ".by-url");
        assert_eq!(by_url.title_selector, None);

        assert!(table.lookup("https://other.org/else", None).is_none());
    }

    #[test]
    fn serializes_sentinel_back() {
        let config = ManualSelectorConfig::new(".hero", "self", "a.more");
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["title_selector"], "self");
        assert_eq!(json["link_selector"], "a.more");
    }

    #[test]
    fn missing_file_is_empty_table() {
        let table = ManualSelectors::from_path("/definitely/not/here.json").unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn malformed_file_is_an_error_but_load_or_default_recovers() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();

        assert!(matches!(ManualSelectors::from_path(file.path()), Err(Error::Json(_))));
        assert!(ManualSelectors::load_or_default(file.path()).is_empty());
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TABLE.as_bytes()).unwrap();

        let table = ManualSelectors::from_path(file.path()).unwrap();
        assert_eq!(table.len(), 3);
    }
}
