//! Configuration options for post detection.
//!
//! The `Options` struct holds the few tunable thresholds of the detector.
//! Defaults reproduce the stock heuristics; changing them trades precision
//! for recall.

/// Configuration options for latest-post detection.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use rs_blogwatch::Options;
///
/// let options = Options {
///     min_title_chars: 8,
///     ..Options::default()
/// };
/// assert_eq!(options.pattern_min_confidence, 0.3);
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// A title must be strictly longer than this many characters
    /// (after normalization) to be reported.
    ///
    /// Default: `5`
    pub min_title_chars: usize,

    /// Pattern-matcher candidates at or below this confidence are dropped.
    ///
    /// Default: `0.3`
    pub pattern_min_confidence: f64,

    /// Number of preview titles computed per candidate.
    ///
    /// Default: `3`
    pub max_sample_titles: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            min_title_chars: 5,
            pattern_min_confidence: 0.3,
            max_sample_titles: 3,
        }
    }
}
