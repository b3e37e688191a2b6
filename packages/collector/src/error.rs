//! Error types for the collector.
//!
//! Chapter-fetch failures are caught inside the collector loop and turned
//! into a stop decision, so most variants only reach callers through the
//! reader, the search command or the final file write.

use thiserror::Error;

/// Main error type for the collector library.
#[derive(Debug, Error)]
pub enum CollectorError {
    /// HTTP request failed (connection, timeout, body read).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A 200 response whose body is not the expected chapter JSON.
    #[error("Malformed response from {url}: {source}")]
    MalformedResponse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// JSON (de)serialization of the verse file failed.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Book name not in the canonical table.
    #[error("Unknown book: '{0}'. Expected a canonical name (e.g., Genesis, 1 Samuel, Song of Solomon)")]
    UnknownBook(String),

    /// Chapter number outside 1..=150.
    #[error("Invalid chapter number: {0}. Expected a value between 1 and 150")]
    InvalidChapter(u32),

    /// Testament filter not recognized.
    #[error("Invalid testament: '{0}'. Expected 'old' or 'new'")]
    InvalidTestament(String),

    /// Requested chapter is missing from the loaded verse file.
    #[error("{book} {chapter} is not in the verse file")]
    ChapterNotFound { book: String, chapter: u32 },
}

/// Result type alias for collector operations.
pub type Result<T> = std::result::Result<T, CollectorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CollectorError::UnknownBook("Hezekiah".to_string());
        assert!(err.to_string().contains("Hezekiah"));
        assert!(err.to_string().contains("Song of Solomon"));
    }

    #[test]
    fn test_chapter_not_found_display() {
        let err = CollectorError::ChapterNotFound {
            book: "Jude".to_string(),
            chapter: 2,
        };
        assert_eq!(err.to_string(), "Jude 2 is not in the verse file");
    }

    #[test]
    fn test_malformed_response_keeps_url() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = CollectorError::MalformedResponse {
            url: "https://bible-api.com/Ruth 1?translation=kjv".to_string(),
            source,
        };
        assert!(err.to_string().starts_with("Malformed response from https://bible-api.com/Ruth 1"));
    }
}
