//! Core data types for the collector.
//!
//! [`VerseRecord`] is the unit written to the output file. [`ChapterResponse`]
//! and [`ApiVerse`] mirror the part of the bible-api.com response we read.

use serde::{Deserialize, Serialize};

/// One verse as stored in the output file.
///
/// Field order is the serialization order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VerseRecord {
    /// Book name as returned by the API.
    pub book: String,
    pub chapter: u32,
    pub verse: u32,
    /// Verse text, stored verbatim.
    pub text: String,
}

impl VerseRecord {
    /// Human-readable reference, e.g. `John 3:16`.
    #[must_use]
    pub fn reference(&self) -> String {
        format!("{} {}:{}", self.book, self.chapter, self.verse)
    }
}

/// One verse entry of a chapter response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiVerse {
    pub book_name: String,
    pub chapter: u32,
    pub verse: u32,
    pub text: String,
}

impl From<ApiVerse> for VerseRecord {
    fn from(v: ApiVerse) -> Self {
        Self {
            book: v.book_name,
            chapter: v.chapter,
            verse: v.verse,
            text: v.text,
        }
    }
}

/// Body of a successful chapter request.
///
/// Other fields of the response (reference, translation info, joined text)
/// are ignored. A body without `verses` yields an empty chapter. Entries stay
/// raw until [`ChapterResponse::into_records`] so one bad entry does not hide
/// the verses before it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChapterResponse {
    #[serde(default)]
    pub verses: Vec<serde_json::Value>,
}

impl ChapterResponse {
    /// Convert the verse entries in response order.
    ///
    /// Stops at the first entry that is not an [`ApiVerse`] and returns the
    /// records converted before it together with the error.
    pub fn into_records(self) -> (Vec<VerseRecord>, Option<serde_json::Error>) {
        let mut records = Vec::with_capacity(self.verses.len());
        for entry in self.verses {
            match serde_json::from_value::<ApiVerse>(entry) {
                Ok(verse) => records.push(verse.into()),
                Err(e) => return (records, Some(e)),
            }
        }
        (records, None)
    }
}

/// Why the chapter loop for a book stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookOutcome {
    /// Every chapter up to the configured bound returned 200.
    Exhausted { chapters: u32 },
    /// A non-200 status was taken as the end of the book.
    EndOfBook { chapter: u32, status: u16 },
    /// A request or parse error ended the book.
    Failed { chapter: u32 },
}

impl BookOutcome {
    /// Number of chapters fetched successfully before stopping.
    #[must_use]
    pub fn chapters_fetched(&self) -> u32 {
        match *self {
            Self::Exhausted { chapters } => chapters,
            Self::EndOfBook { chapter, .. } | Self::Failed { chapter } => chapter.saturating_sub(1),
        }
    }
}

/// Result of a full run, reported after the file is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionSummary {
    pub total_verses: usize,
    pub books_failed: Vec<String>,
    pub output: std::path::PathBuf,
}
