//! The collection loop: every book, chapter by chapter, until the API
//! stops answering with 200.

use std::path::Path;

use reqwest::blocking::Client;

use crate::config::CollectorConfig;
use crate::error::{CollectorError, Result};
use crate::http::{create_client, fetch_chapter, ChapterFetch};
use crate::output::save_json;
use crate::types::{BookOutcome, CollectionSummary, VerseRecord};

/// Receives progress events from a [`Collector`].
pub trait CollectObserver {
    /// A chapter returned 200 and its verses were appended.
    fn chapter_downloaded(&mut self, book: &str, chapter: u32, verses: usize);

    /// A chapter request or parse failed. The book's loop stops after this.
    fn chapter_failed(&mut self, book: &str, chapter: u32, error: &CollectorError);

    /// The chapter loop for a book ended.
    fn book_finished(&mut self, _book: &str, _outcome: BookOutcome) {}

    /// The verse file was written.
    fn collection_written(&mut self, path: &Path, total: usize);
}

/// Prints the plain progress lines to stdout.
#[derive(Debug, Default)]
pub struct ConsoleObserver;

impl CollectObserver for ConsoleObserver {
    fn chapter_downloaded(&mut self, book: &str, chapter: u32, _verses: usize) {
        println!("Downloaded {book} {chapter}");
    }

    fn chapter_failed(&mut self, book: &str, chapter: u32, error: &CollectorError) {
        println!("Error {book} {chapter}: {error}");
    }

    fn collection_written(&mut self, _path: &Path, total: usize) {
        println!("Downloaded {total} verses!");
    }
}

/// Reports progress as `tracing` events only.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl CollectObserver for TracingObserver {
    fn chapter_downloaded(&mut self, book: &str, chapter: u32, verses: usize) {
        tracing::info!(book, chapter, verses, "Downloaded chapter");
    }

    fn chapter_failed(&mut self, book: &str, chapter: u32, error: &CollectorError) {
        tracing::warn!(book, chapter, error = %error, "Chapter request failed");
    }

    fn collection_written(&mut self, path: &Path, total: usize) {
        tracing::info!(path = %path.display(), total, "Collection written");
    }
}

/// Sequential chapter collector.
#[derive(Debug)]
pub struct Collector {
    config: CollectorConfig,
    client: Client,
}

impl Collector {
    /// Create a collector and its HTTP client.
    pub fn new(config: CollectorConfig) -> Result<Self> {
        let client = create_client(config.timeout)?;
        Ok(Self { config, client })
    }

    #[must_use]
    pub fn config(&self) -> &CollectorConfig {
        &self.config
    }

    /// Fetch every configured book and return the verses in fetch order.
    ///
    /// Never fails: a chapter error ends that book and the next book starts.
    pub fn collect(&self, observer: &mut dyn CollectObserver) -> Vec<VerseRecord> {
        let mut records = Vec::new();
        self.collect_into(observer, &mut records);
        records
    }

    /// Run every configured book, appending to `records`.
    ///
    /// Returns the books whose loop ended on an error.
    fn collect_into(
        &self,
        observer: &mut dyn CollectObserver,
        records: &mut Vec<VerseRecord>,
    ) -> Vec<String> {
        let mut books_failed = Vec::new();
        for book in &self.config.books {
            if let BookOutcome::Failed { .. } = self.collect_book(book, observer, records) {
                books_failed.push((*book).to_string());
            }
        }
        books_failed
    }

    /// Fetch chapters `1..=max_chapters` of one book, appending to `records`.
    ///
    /// The loop stops at the first non-200 status or error. Both are
    /// treated as the end of the book; there is no retry.
    pub fn collect_book(
        &self,
        book: &str,
        observer: &mut dyn CollectObserver,
        records: &mut Vec<VerseRecord>,
    ) -> BookOutcome {
        let mut outcome = BookOutcome::Exhausted {
            chapters: self.config.max_chapters,
        };

        for chapter in 1..=self.config.max_chapters {
            let url = self.config.chapter_url(book, chapter);
            let error = match fetch_chapter(&self.client, &url) {
                Ok(ChapterFetch::Verses(verses)) => {
                    let count = verses.len();
                    records.extend(verses);
                    observer.chapter_downloaded(book, chapter, count);
                    continue;
                }
                Ok(ChapterFetch::NotFound(status)) => {
                    tracing::debug!(book, chapter, status = %status, "No more chapters");
                    outcome = BookOutcome::EndOfBook {
                        chapter,
                        status: status.as_u16(),
                    };
                    break;
                }
                // Verses before the bad entry are kept
                Ok(ChapterFetch::Partial { verses, error }) => {
                    records.extend(verses);
                    error
                }
                Err(e) => e,
            };

            tracing::debug!(book, chapter, error = %error, "Stopping book after failed chapter");
            observer.chapter_failed(book, chapter, &error);
            outcome = BookOutcome::Failed { chapter };
            break;
        }

        tracing::info!(
            book,
            chapters = outcome.chapters_fetched(),
            "Finished book"
        );
        observer.book_finished(book, outcome);
        outcome
    }

    /// Collect everything, write the verse file, and report the total.
    ///
    /// Only the final write can fail; the file is written even when no
    /// chapter succeeded.
    pub fn run(&self, observer: &mut dyn CollectObserver) -> Result<CollectionSummary> {
        let mut records = Vec::new();
        let books_failed = self.collect_into(observer, &mut records);

        let output = save_json(&self.config.output, &records)?;
        observer.collection_written(&output, records.len());

        Ok(CollectionSummary {
            total_verses: records.len(),
            books_failed,
            output,
        })
    }
}
