//! Configuration constants and validation functions for the collector.

use std::path::PathBuf;
use std::time::Duration;

use crate::books::{canonical_name, BOOKS};
use crate::error::{CollectorError, Result};

/// Base URL of the Bible API.
pub const API_BASE_URL: &str = "https://bible-api.com";

/// Translation code sent with every request.
pub const TRANSLATION: &str = "kjv";

/// Highest chapter number tried for any book.
///
/// Psalms is the longest book with 150 chapters; every other book ends on a
/// non-200 response well before this bound.
pub const MAX_CHAPTERS: u32 = 150;

/// HTTP timeout in seconds.
pub const HTTP_TIMEOUT_SECS: u64 = 10;

/// File the collected verses are written to.
pub const DEFAULT_OUTPUT_FILE: &str = "bible-kjv.json";

/// Maximum number of verses shown for one search.
pub const MAX_SEARCH_RESULTS: usize = 500;

/// Search history file, kept next to the verse file.
pub const HISTORY_FILE: &str = "search-history.json";

/// Number of searches kept in the history, newest first.
pub const MAX_HISTORY_ENTRIES: usize = 50;

/// Words shorter than this are not indexed.
pub const MIN_INDEXED_WORD_LEN: usize = 3;

/// Text wrap width for the chapter reader.
pub const TEXT_WRAP_WIDTH: usize = 100;

/// Build the request URL for one chapter.
///
/// The book name is substituted with its literal spaces; the HTTP client
/// percent-encodes them when the request is sent.
///
/// # Examples
/// ```
/// use kjv_collector::config::chapter_url;
///
/// assert_eq!(
///     chapter_url("https://bible-api.com", "1 John", 3, "kjv"),
///     "https://bible-api.com/1 John 3?translation=kjv"
/// );
/// ```
pub fn chapter_url(base_url: &str, book: &str, chapter: u32, translation: &str) -> String {
    let base = base_url.trim_end_matches('/');
    format!("{base}/{book} {chapter}?translation={translation}")
}

/// Validate a chapter number against `1..=MAX_CHAPTERS`.
///
/// # Examples
/// ```
/// use kjv_collector::config::validate_chapter;
///
/// assert!(validate_chapter(1).is_ok());
/// assert!(validate_chapter(150).is_ok());
/// assert!(validate_chapter(0).is_err());
/// ```
pub fn validate_chapter(chapter: u32) -> Result<()> {
    if (1..=MAX_CHAPTERS).contains(&chapter) {
        Ok(())
    } else {
        Err(CollectorError::InvalidChapter(chapter))
    }
}

/// Validate a book name and return its canonical spelling.
pub fn validate_book(book: &str) -> Result<&'static str> {
    canonical_name(book).ok_or_else(|| CollectorError::UnknownBook(book.to_string()))
}

/// Runtime settings for a collection run.
///
/// `Default` reproduces the fixed constants above. The builders exist for
/// the CLI overrides and for pointing tests at a local server.
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    pub base_url: String,
    pub translation: String,
    pub books: Vec<&'static str>,
    pub max_chapters: u32,
    pub timeout: Duration,
    pub output: PathBuf,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            base_url: API_BASE_URL.to_string(),
            translation: TRANSLATION.to_string(),
            books: BOOKS.to_vec(),
            max_chapters: MAX_CHAPTERS,
            timeout: Duration::from_secs(HTTP_TIMEOUT_SECS),
            output: PathBuf::from(DEFAULT_OUTPUT_FILE),
        }
    }
}

impl CollectorConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Lower the chapter bound. Values are clamped to `1..=MAX_CHAPTERS`.
    pub fn with_max_chapters(mut self, max_chapters: u32) -> Self {
        self.max_chapters = max_chapters.clamp(1, MAX_CHAPTERS);
        self
    }

    /// Restrict the run to the given books, kept in canonical order.
    pub fn with_books<I, S>(mut self, books: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut selected = books
            .into_iter()
            .map(|b| validate_book(b.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        selected.sort_by_key(|b| BOOKS.iter().position(|c| c == b));
        selected.dedup();
        self.books = selected;
        Ok(self)
    }

    /// Request URL for one chapter under this configuration.
    #[must_use]
    pub fn chapter_url(&self, book: &str, chapter: u32) -> String {
        chapter_url(&self.base_url, book, chapter, &self.translation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chapter_url() {
        assert_eq!(
            chapter_url(API_BASE_URL, "Genesis", 1, TRANSLATION),
            "https://bible-api.com/Genesis 1?translation=kjv"
        );
        assert_eq!(
            chapter_url("http://127.0.0.1:8080/", "Song of Solomon", 8, "kjv"),
            "http://127.0.0.1:8080/Song of Solomon 8?translation=kjv"
        );
    }

    #[test]
    fn test_validate_chapter() {
        assert!(validate_chapter(1).is_ok());
        assert!(validate_chapter(MAX_CHAPTERS).is_ok());
        assert!(validate_chapter(0).is_err());
        assert!(validate_chapter(MAX_CHAPTERS + 1).is_err());
    }

    #[test]
    fn test_validate_book() {
        assert_eq!(validate_book("genesis").ok(), Some("Genesis"));
        assert!(validate_book("Maccabees").is_err());
    }

    #[test]
    fn test_default_config_matches_constants() {
        let config = CollectorConfig::default();
        assert_eq!(config.books.len(), 66);
        assert_eq!(config.max_chapters, 150);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.output, PathBuf::from("bible-kjv.json"));
        assert_eq!(
            config.chapter_url("Psalms", 150),
            "https://bible-api.com/Psalms 150?translation=kjv"
        );
    }

    #[test]
    fn test_with_books_keeps_canonical_order() {
        let config = CollectorConfig::default()
            .with_books(["revelation", "Genesis", "Ruth", "genesis"])
            .unwrap();
        assert_eq!(config.books, vec!["Genesis", "Ruth", "Revelation"]);
    }

    #[test]
    fn test_with_books_rejects_unknown() {
        assert!(CollectorConfig::default().with_books(["Enoch"]).is_err());
    }

    #[test]
    fn test_with_max_chapters_clamps() {
        assert_eq!(CollectorConfig::default().with_max_chapters(0).max_chapters, 1);
        assert_eq!(CollectorConfig::default().with_max_chapters(500).max_chapters, 150);
    }
}
