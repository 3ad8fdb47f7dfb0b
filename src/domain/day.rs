//! Day entity - one calendar date's text and annotations

use crate::domain::search::{literal_matcher, SearchHit};
use crate::domain::snippet::{text_with_dots, TEXT_RESULT_LENGTH};
use crate::error::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Characters stripped from both ends of a token when listing words
/// without special characters.
const WORD_TRIM_CHARS: &[char] = &[
    '.', '|', '-', '!', '"', '/', '(', ')', '=', '?', '*', '+', '~', '#', '_', ':', ';', ',', '<',
    '>', '^', '°', '´', '`', '{', '}', '[', ']', '\\',
];

/// Persisted content of a single day, as the storage layer sees it.
///
/// Serializes as one mapping with an optional `"text"` key (raw UTF-8
/// bytes) next to the category keys, mirroring the on-disk shape. This
/// crate never reads or writes storage itself; the type exists so the
/// persistence layer and [`Day`] agree on the boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayContent {
    /// Raw encoded day text. Decoding happens in [`Day::from_content`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<Vec<u8>>,

    /// Category name -> entries, e.g. `"Tags" -> {"work", "urgent"}`.
    #[serde(flatten)]
    pub categories: BTreeMap<String, BTreeSet<String>>,
}

/// One calendar date's journal content: free text plus categorized
/// annotations.
///
/// Categories and their entries are kept in `BTreeMap`/`BTreeSet`, so all
/// iteration over them is deterministic and lexicographically sorted.
/// Ordering and equality between days consider only the date, which makes
/// days sortable chronologically regardless of content.
#[derive(Debug, Clone)]
pub struct Day {
    date: NaiveDate,
    text: String,
    categories: BTreeMap<String, BTreeSet<String>>,
}

impl Day {
    /// Create an empty day for the given date.
    pub fn new(date: NaiveDate) -> Self {
        Day {
            date,
            text: String::new(),
            categories: BTreeMap::new(),
        }
    }

    /// Build a day from persisted content.
    ///
    /// Fails with [`crate::DaybookError::TextDecode`] when the stored
    /// text is not valid UTF-8.
    pub fn from_content(date: NaiveDate, content: DayContent) -> Result<Self> {
        let text = match content.text {
            Some(bytes) => String::from_utf8(bytes)?,
            None => String::new(),
        };
        Ok(Day {
            date,
            text,
            categories: content.categories,
        })
    }

    /// Boundary view for the persistence layer. The `text` key is omitted
    /// when the day has no text at all.
    pub fn to_content(&self) -> DayContent {
        DayContent {
            text: if self.text.is_empty() {
                None
            } else {
                Some(self.text.clone().into_bytes())
            },
            categories: self.categories.clone(),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// True when the trimmed text is non-empty.
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }

    /// True when the day carries no annotations and no text beyond
    /// whitespace.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && !self.has_text()
    }

    /// The category-only view: category name -> set of entries, sorted.
    ///
    /// The day's text lives in a separate field, so it can never be
    /// mistaken for a category here.
    pub fn category_entries(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.categories
    }

    /// Insert `entry` into `category`, creating the category if absent.
    /// Adding the same entry twice is a no-op.
    pub fn add_category_entry(&mut self, category: &str, entry: &str) {
        self.categories
            .entry(category.to_string())
            .or_default()
            .insert(entry.to_string());
    }

    /// Merge another day for the same date into this one.
    ///
    /// If either trimmed text contains the other, the superstring is
    /// kept (preferring this day's text on a tie). Otherwise the texts
    /// are concatenated with a blank line between them. Categories are
    /// unioned entry by entry.
    ///
    /// # Panics
    ///
    /// Panics when the two days have different dates; merging across
    /// dates is a programmer error.
    pub fn merge(&mut self, same_day: &Day) {
        assert_eq!(
            self.date, same_day.date,
            "merge requires both days to share the same date"
        );

        let own = self.text.trim();
        let other = same_day.text.trim();
        if own.contains(other) {
            // this day's text already covers the other
        } else if other.contains(own) {
            self.text = same_day.text.clone();
        } else {
            self.text.push_str("\n\n");
            self.text.push_str(&same_day.text);
        }

        for (category, entries) in &same_day.categories {
            for entry in entries {
                self.add_category_entry(category, entry);
            }
        }
    }

    /// All category names, sorted ascending.
    pub fn categories(&self) -> Vec<&str> {
        self.categories.keys().map(String::as_str).collect()
    }

    /// Entries of the `"Tags"` category, sorted ascending.
    pub fn tags(&self) -> Vec<&str> {
        self.entries("Tags")
    }

    /// Sorted entries of `category`, or an empty list when the category
    /// does not exist.
    pub fn entries(&self, category: &str) -> Vec<&str> {
        self.categories
            .get(category)
            .map(|entries| entries.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Whitespace-split tokens of the text. Without special characters,
    /// punctuation is trimmed from both token ends and tokens that become
    /// empty are dropped.
    pub fn words(&self, with_special_chars: bool) -> Vec<&str> {
        let words = self.text.split_whitespace();
        if with_special_chars {
            return words.collect();
        }
        words
            .map(|word| word.trim_matches(WORD_TRIM_CHARS))
            .filter(|word| !word.is_empty())
            .collect()
    }

    /// Raw word count: whitespace-split tokens, punctuation included.
    pub fn word_count(&self) -> usize {
        self.words(true).len()
    }

    /// The date string together with a snippet of the start of the text.
    pub fn date_and_start_of_text(&self) -> SearchHit {
        SearchHit::new(
            self.to_string(),
            text_with_dots(&self.text, 0, TEXT_RESULT_LENGTH, None),
        )
    }

    /// Search the day for `query`, case-insensitively.
    ///
    /// The date string is tried first (literal substring), then the text,
    /// then category names and entries; the first rule that matches wins.
    /// A text match highlights the matched source characters in the
    /// snippet.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use daybook::domain::Day;
    ///
    /// let mut day = Day::new(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
    /// day.set_text("Hello world. Testing search.");
    ///
    /// let hit = day.search_text("testing").unwrap();
    /// assert_eq!(hit.date, "2024-03-15");
    /// assert!(hit.snippet.contains("STARTBOLDTestingENDBOLD"));
    /// ```
    pub fn search_text(&self, query: &str) -> Option<SearchHit> {
        let date = self.to_string();
        if date.contains(query) {
            return Some(self.date_and_start_of_text());
        }

        let matcher = literal_matcher(query);

        if let Some(found) = matcher.find(&self.text) {
            let start = self.text[..found.start()].chars().count();
            let end = start + found.as_str().chars().count();
            let snippet = text_with_dots(&self.text, start, end, Some(found.as_str()));
            return Some(SearchHit::new(date, snippet));
        }

        for (category, entries) in &self.categories {
            if matcher.is_match(category) {
                return Some(self.date_and_start_of_text());
            }
            for entry in entries {
                if matcher.is_match(entry) {
                    return Some(self.date_and_start_of_text());
                }
            }
        }

        None
    }

    /// Case-insensitive substring search over category names.
    ///
    /// Returns one `(date-string, entry)` pair per entry of every
    /// matching category, in sorted category/entry order. Categories
    /// without entries never match.
    pub fn search_category(&self, query: &str) -> Vec<(String, String)> {
        let matcher = literal_matcher(query);
        let mut results = Vec::new();
        for (category, entries) in &self.categories {
            if entries.is_empty() || !matcher.is_match(category) {
                continue;
            }
            for entry in entries {
                results.push((self.to_string(), entry.clone()));
            }
        }
        results
    }

    /// Case-insensitive exact match of `query` against the entries of the
    /// tags category (any category named `"Tags"` in any casing).
    pub fn search_tag(&self, query: &str) -> Option<SearchHit> {
        for (category, entries) in &self.categories {
            if !category.eq_ignore_ascii_case("tags") || entries.is_empty() {
                continue;
            }
            if entries.iter().any(|tag| tag.eq_ignore_ascii_case(query)) {
                return Some(self.date_and_start_of_text());
            }
        }
        None
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.date.format("%Y-%m-%d"))
    }
}

impl PartialEq for Day {
    fn eq(&self, other: &Self) -> bool {
        self.date == other.date
    }
}

impl Eq for Day {}

impl PartialOrd for Day {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Day {
    fn cmp(&self, other: &Self) -> Ordering {
        self.date.cmp(&other.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(text: &str) -> Day {
        let mut day = Day::new(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        day.set_text(text);
        day
    }

    #[test]
    fn test_new_day_is_empty() {
        let day = Day::new(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        assert!(day.is_empty());
        assert!(!day.has_text());
        assert_eq!(day.text(), "");
    }

    #[test]
    fn test_blank_text_keeps_day_empty() {
        let day = day("   \n\t ");
        assert!(!day.has_text());
        assert!(day.is_empty());
    }

    #[test]
    fn test_annotations_make_day_non_empty() {
        let mut day = day("");
        day.add_category_entry("Tags", "work");
        assert!(!day.is_empty());
    }

    #[test]
    fn test_display_formats_date() {
        assert_eq!(day("").to_string(), "2024-03-15");
    }

    #[test]
    fn test_add_category_entry_is_idempotent() {
        let mut day = day("");
        day.add_category_entry("Tags", "work");
        day.add_category_entry("Tags", "work");
        assert_eq!(day.tags(), vec!["work"]);
    }

    #[test]
    fn test_entries_are_sorted() {
        let mut day = day("");
        day.add_category_entry("People", "zoe");
        day.add_category_entry("People", "anna");
        assert_eq!(day.entries("People"), vec!["anna", "zoe"]);
    }

    #[test]
    fn test_entries_of_missing_category_are_empty() {
        assert!(day("").entries("People").is_empty());
    }

    #[test]
    fn test_categories_exclude_nothing_and_sort() {
        let mut day = day("some text");
        day.add_category_entry("Tags", "work");
        day.add_category_entry("Books", "Dune");
        assert_eq!(day.categories(), vec!["Books", "Tags"]);
    }

    #[test]
    fn test_words_with_special_chars() {
        let day = day("Hello ... world !!!");
        assert_eq!(day.words(true), vec!["Hello", "...", "world", "!!!"]);
        assert_eq!(day.word_count(), 4);
    }

    #[test]
    fn test_words_without_special_chars_drops_empty_tokens() {
        let day = day("Hello ... world !!!");
        assert_eq!(day.words(false), vec!["Hello", "world"]);
    }

    #[test]
    fn test_words_trims_punctuation_from_both_ends() {
        let day = day("(parens) #tag -dashed- half-open");
        assert_eq!(day.words(false), vec!["parens", "tag", "dashed", "half-open"]);
    }

    #[test]
    fn test_merge_superstring_is_adopted() {
        let mut a = day("Going to the park");
        let b = day("Going to the park today");
        a.merge(&b);
        assert_eq!(a.text(), "Going to the park today");
    }

    #[test]
    fn test_merge_substring_keeps_own_text() {
        let mut a = day("Going to the park today");
        let b = day("Going to the park");
        a.merge(&b);
        assert_eq!(a.text(), "Going to the park today");
    }

    #[test]
    fn test_merge_unrelated_texts_concatenate() {
        let mut a = day("Morning run");
        let b = day("Evening walk");
        a.merge(&b);
        assert_eq!(a.text(), "Morning run\n\nEvening walk");
    }

    #[test]
    fn test_merge_unions_categories() {
        let mut a = day("");
        a.add_category_entry("Tags", "work");
        let mut b = day("");
        b.add_category_entry("Tags", "urgent");
        b.add_category_entry("People", "anna");

        a.merge(&b);
        assert_eq!(a.tags(), vec!["urgent", "work"]);
        assert_eq!(a.entries("People"), vec!["anna"]);
    }

    #[test]
    #[should_panic(expected = "same date")]
    fn test_merge_different_dates_panics() {
        let mut a = Day::new(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        let b = Day::new(NaiveDate::from_ymd_opt(2024, 3, 16).unwrap());
        a.merge(&b);
    }

    #[test]
    fn test_search_text_highlights_match() {
        let day = day("Hello world. Testing search.");
        let hit = day.search_text("testing").unwrap();
        assert_eq!(hit.date, "2024-03-15");
        assert_eq!(hit.snippet, "Hello world. STARTBOLDTestingENDBOLD search.");
    }

    #[test]
    fn test_search_text_date_match_takes_priority() {
        let day = day("meeting on 2024-03 planning");
        let hit = day.search_text("2024-03").unwrap();
        // matched the date itself, so the snippet is the start of the
        // text without highlighting
        assert_eq!(hit.snippet, "meeting on 2024-03 planning");
        assert!(!hit.snippet.contains("STARTBOLD"));
    }

    #[test]
    fn test_search_text_falls_back_to_annotations() {
        let mut day = day("unrelated text");
        day.add_category_entry("Books", "Dune");
        let hit = day.search_text("dune").unwrap();
        assert_eq!(hit.snippet, "unrelated text");

        let hit = day.search_text("boo").unwrap();
        assert_eq!(hit.date, "2024-03-15");
    }

    #[test]
    fn test_search_text_no_match() {
        assert!(day("nothing here").search_text("absent").is_none());
    }

    #[test]
    fn test_search_category_lists_all_entries() {
        let mut day = day("");
        day.add_category_entry("Books", "Dune");
        day.add_category_entry("Books", "Anathem");
        day.add_category_entry("Tags", "work");

        let results = day.search_category("boo");
        assert_eq!(
            results,
            vec![
                ("2024-03-15".to_string(), "Anathem".to_string()),
                ("2024-03-15".to_string(), "Dune".to_string()),
            ]
        );
    }

    #[test]
    fn test_search_category_ignores_empty_categories() {
        let mut day = day("");
        day.categories.insert("Books".to_string(), BTreeSet::new());
        assert!(day.search_category("books").is_empty());
    }

    #[test]
    fn test_search_tag_exact_case_insensitive() {
        let mut day = day("tagged day");
        day.add_category_entry("Tags", "work");
        day.add_category_entry("Tags", "urgent");

        assert!(day.search_tag("URGENT").is_some());
        assert!(day.search_tag("vacation").is_none());
        // substring of a tag is not an exact match
        assert!(day.search_tag("urge").is_none());
    }

    #[test]
    fn test_search_tag_matches_tags_category_in_any_casing() {
        let mut day = day("");
        day.add_category_entry("TAGS", "work");
        assert!(day.search_tag("work").is_some());
    }

    #[test]
    fn test_ordering_by_date_only() {
        let earlier = Day::new(NaiveDate::from_ymd_opt(2024, 3, 14).unwrap());
        let mut later = Day::new(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        later.set_text("content is ignored for ordering");
        assert!(earlier < later);
        assert_eq!(later, day("different content, same date"));
    }

    #[test]
    fn test_from_content_decodes_utf8() {
        let content = DayContent {
            text: Some("Grüße".as_bytes().to_vec()),
            categories: BTreeMap::new(),
        };
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let day = Day::from_content(date, content).unwrap();
        assert_eq!(day.text(), "Grüße");
    }

    #[test]
    fn test_from_content_rejects_invalid_utf8() {
        let content = DayContent {
            text: Some(vec![0xff, 0xfe]),
            categories: BTreeMap::new(),
        };
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert!(Day::from_content(date, content).is_err());
    }

    #[test]
    fn test_to_content_roundtrip() {
        let mut day = day("Hello");
        day.add_category_entry("Tags", "work");

        let content = day.to_content();
        let restored = Day::from_content(day.date(), content).unwrap();
        assert_eq!(restored.text(), "Hello");
        assert_eq!(restored.tags(), vec!["work"]);
    }

    #[test]
    fn test_to_content_omits_empty_text() {
        let day = day("");
        assert_eq!(day.to_content().text, None);
    }
}
