//! Full-text verse search over a collected verse file.
//!
//! Multi-word queries go through a word index and return verses containing
//! every word. Queries of two characters or less fall back to a linear
//! case-insensitive substring scan.

use std::collections::HashMap;
use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::books::{book_position, canonical_name, testament_of, Testament};
use crate::config::{MAX_CHAPTERS, MAX_SEARCH_RESULTS, MIN_INDEXED_WORD_LEN};
use crate::types::VerseRecord;

/// Word tokenizer shared by indexing and query parsing.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static WORD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w+\b").expect("valid regex"));

fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    WORD_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
}

/// Restricts which verses a search may return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilter {
    pub book: Option<String>,
    pub testament: Option<Testament>,
    pub min_chapter: u32,
    pub max_chapter: u32,
    pub limit: usize,
}

impl Default for SearchFilter {
    fn default() -> Self {
        Self {
            book: None,
            testament: None,
            min_chapter: 1,
            max_chapter: MAX_CHAPTERS,
            limit: MAX_SEARCH_RESULTS,
        }
    }
}

impl SearchFilter {
    fn accepts(&self, record: &VerseRecord) -> bool {
        if let Some(book) = &self.book {
            let wanted = canonical_name(book).unwrap_or(book.as_str());
            if !record.book.eq_ignore_ascii_case(wanted) {
                return false;
            }
        }
        if let Some(testament) = self.testament {
            if testament_of(&record.book) != Some(testament) {
                return false;
            }
        }
        (self.min_chapter..=self.max_chapter).contains(&record.chapter)
    }
}

/// Matches for one query, canonically ordered and truncated to the limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResults<'a> {
    /// Number of matching verses before truncation.
    pub total: usize,
    pub verses: Vec<&'a VerseRecord>,
}

impl SearchResults<'_> {
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.total > self.verses.len()
    }
}

/// Word index over a verse list.
#[derive(Debug)]
pub struct SearchIndex<'a> {
    records: &'a [VerseRecord],
    postings: HashMap<String, Vec<usize>>,
}

impl<'a> SearchIndex<'a> {
    /// Index every word of at least `MIN_INDEXED_WORD_LEN` characters.
    pub fn build(records: &'a [VerseRecord]) -> Self {
        let mut postings: HashMap<String, Vec<usize>> = HashMap::new();

        for (idx, record) in records.iter().enumerate() {
            for word in words(&record.text) {
                if word.chars().count() < MIN_INDEXED_WORD_LEN {
                    continue;
                }
                let list = postings.entry(word).or_default();
                if list.last() != Some(&idx) {
                    list.push(idx);
                }
            }
        }

        tracing::debug!(words = postings.len(), verses = records.len(), "Built search index");
        Self { records, postings }
    }

    /// Number of distinct indexed words.
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.postings.len()
    }

    /// Run a query.
    pub fn search(&self, query: &str, filter: &SearchFilter) -> SearchResults<'a> {
        let term = query.trim().to_lowercase();
        if term.is_empty() {
            return SearchResults {
                total: 0,
                verses: Vec::new(),
            };
        }

        let mut matches: Vec<&'a VerseRecord> = match self.indexed_candidates(&term) {
            Some(indices) => indices.into_iter().map(|i| &self.records[i]).collect(),
            None => self
                .records
                .iter()
                .filter(|r| r.text.to_lowercase().contains(&term))
                .collect(),
        };
        matches.retain(|r| filter.accepts(r));

        matches.sort_by_key(|r| {
            (
                book_position(&r.book).unwrap_or(usize::MAX),
                r.chapter,
                r.verse,
            )
        });

        let total = matches.len();
        matches.truncate(filter.limit);
        SearchResults {
            total,
            verses: matches,
        }
    }

    /// Verse indices containing every indexable query word, or `None` when
    /// the query should be answered by a linear scan.
    fn indexed_candidates(&self, term: &str) -> Option<Vec<usize>> {
        if term.chars().count() < MIN_INDEXED_WORD_LEN {
            return None;
        }

        let mut query_words: Vec<String> = words(term)
            .filter(|w| w.chars().count() >= MIN_INDEXED_WORD_LEN)
            .collect();
        query_words.sort();
        query_words.dedup();
        if query_words.is_empty() {
            return None;
        }

        let mut counts: HashMap<usize, usize> = HashMap::new();
        for word in &query_words {
            if let Some(list) = self.postings.get(word) {
                for &idx in list {
                    *counts.entry(idx).or_default() += 1;
                }
            }
        }

        let mut indices: Vec<usize> = counts
            .into_iter()
            .filter(|(_, n)| *n == query_words.len())
            .map(|(idx, _)| idx)
            .collect();
        indices.sort_unstable();
        Some(indices)
    }
}

/// Byte ranges in `text` matching any query word, case-insensitively.
///
/// Used to highlight results. Ranges are in ascending order and never
/// overlap.
pub fn match_ranges(text: &str, query: &str) -> Vec<Range<usize>> {
    let mut terms: Vec<String> = query
        .split_whitespace()
        .map(regex::escape)
        .collect();
    if terms.is_empty() {
        return Vec::new();
    }
    // Longest first so alternation prefers the widest match
    terms.sort_by_key(|t| std::cmp::Reverse(t.len()));

    match Regex::new(&format!("(?i){}", terms.join("|"))) {
        Ok(re) => re.find_iter(text).map(|m| m.range()).collect(),
        Err(e) => {
            tracing::debug!(error = %e, "Could not build highlight pattern");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(book: &str, chapter: u32, verse: u32, text: &str) -> VerseRecord {
        VerseRecord {
            book: book.to_string(),
            chapter,
            verse,
            text: text.to_string(),
        }
    }

    fn sample() -> Vec<VerseRecord> {
        vec![
            record("John", 1, 1, "In the beginning was the Word, and the Word was with God."),
            record("Genesis", 1, 1, "In the beginning God created the heaven and the earth."),
            record("Genesis", 1, 3, "And God said, Let there be light: and there was light."),
            record("John", 11, 35, "Jesus wept."),
            record("Psalms", 23, 1, "The LORD is my shepherd; I shall not want."),
        ]
    }

    fn refs(results: &SearchResults<'_>) -> Vec<String> {
        results.verses.iter().map(|r| r.reference()).collect()
    }

    #[test]
    fn test_all_words_required() {
        let records = sample();
        let index = SearchIndex::build(&records);

        let results = index.search("beginning God", &SearchFilter::default());
        assert_eq!(refs(&results), vec!["Genesis 1:1", "John 1:1"]);

        let results = index.search("beginning light", &SearchFilter::default());
        assert!(results.verses.is_empty());
    }

    #[test]
    fn test_results_in_canonical_order() {
        let records = sample();
        let index = SearchIndex::build(&records);

        let results = index.search("the", &SearchFilter::default());
        assert_eq!(
            refs(&results),
            vec!["Genesis 1:1", "Psalms 23:1", "John 1:1"]
        );
    }

    #[test]
    fn test_short_query_uses_substring_scan() {
        let records = sample();
        let index = SearchIndex::build(&records);

        // "ep" is not a word, only a substring of "wept" and "shepherd"
        let results = index.search("EP", &SearchFilter::default());
        assert_eq!(refs(&results), vec!["Psalms 23:1", "John 11:35"]);
    }

    #[test]
    fn test_short_words_ignored_in_indexed_query() {
        let records = sample();
        let index = SearchIndex::build(&records);

        let results = index.search("in the beginning", &SearchFilter::default());
        assert_eq!(results.total, 2);
    }

    #[test]
    fn test_empty_query() {
        let records = sample();
        let index = SearchIndex::build(&records);
        assert_eq!(index.search("   ", &SearchFilter::default()).total, 0);
    }

    #[test]
    fn test_filters() {
        let records = sample();
        let index = SearchIndex::build(&records);

        let by_book = SearchFilter {
            book: Some("genesis".to_string()),
            ..SearchFilter::default()
        };
        assert_eq!(index.search("beginning", &by_book).total, 1);

        let new_testament = SearchFilter {
            testament: Some(Testament::New),
            ..SearchFilter::default()
        };
        assert_eq!(refs(&index.search("the", &new_testament)), vec!["John 1:1"]);

        let chapters = SearchFilter {
            min_chapter: 10,
            max_chapter: 30,
            ..SearchFilter::default()
        };
        assert_eq!(
            refs(&index.search("e", &chapters)),
            vec!["Psalms 23:1", "John 11:35"]
        );
    }

    #[test]
    fn test_limit_keeps_total() {
        let records = sample();
        let index = SearchIndex::build(&records);
        let filter = SearchFilter {
            limit: 1,
            ..SearchFilter::default()
        };

        let results = index.search("the", &filter);
        assert_eq!(results.total, 3);
        assert_eq!(results.verses.len(), 1);
        assert!(results.is_truncated());
    }

    #[test]
    fn test_repeated_word_indexed_once_per_verse() {
        let records = vec![record("Ruth", 1, 16, "whither thou goest, I will go; thou lodgest")];
        let index = SearchIndex::build(&records);
        assert_eq!(index.search("thou thou", &SearchFilter::default()).total, 1);
        assert!(index.word_count() >= 4);
    }

    #[test]
    fn test_match_ranges() {
        let text = "And God said, Let there be light: and there was light.";
        let ranges = match_ranges(text, "LIGHT god");
        let matched: Vec<&str> = ranges.iter().map(|r| &text[r.clone()]).collect();
        assert_eq!(matched, vec!["God", "light", "light"]);
        assert!(match_ranges(text, "").is_empty());
    }
}
