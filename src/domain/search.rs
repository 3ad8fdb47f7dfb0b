//! Search results and case-insensitive literal matching

use regex::{Regex, RegexBuilder};

/// A single search result: the matching day's date and a contextual
/// snippet of its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    /// The day's date formatted as `YYYY-MM-DD`.
    pub date: String,

    /// Word-aligned excerpt, with matches wrapped in bold sentinels when
    /// the hit came from the day's text.
    pub snippet: String,
}

impl SearchHit {
    pub fn new(date: String, snippet: String) -> Self {
        Self { date, snippet }
    }
}

/// Compile a search query into a case-insensitive literal matcher.
///
/// The query is escaped, so it always matches verbatim rather than as a
/// pattern. Match offsets refer to the original haystack, which keeps
/// snippet extraction exact regardless of how case folding changes
/// string lengths.
pub(crate) fn literal_matcher(query: &str) -> Regex {
    RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
        .unwrap()
}
