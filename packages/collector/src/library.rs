//! Book and chapter view over a flat verse list, used by the `read` command.

use std::collections::BTreeMap;

use crate::types::VerseRecord;

/// A single verse inside a [`Chapter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verse {
    pub number: u32,
    pub text: String,
}

/// Verses of one chapter in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chapter {
    pub number: u32,
    pub verses: Vec<Verse>,
}

impl Chapter {
    #[must_use]
    pub fn verse_count(&self) -> usize {
        self.verses.len()
    }
}

/// A book with its chapters keyed by chapter number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Book {
    pub name: String,
    chapters: BTreeMap<u32, Chapter>,
}

impl Book {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            chapters: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn chapter(&self, number: u32) -> Option<&Chapter> {
        self.chapters.get(&number)
    }

    #[must_use]
    pub fn chapter_count(&self) -> usize {
        self.chapters.len()
    }

    /// Chapters in ascending order.
    pub fn chapters(&self) -> impl Iterator<Item = &Chapter> {
        self.chapters.values()
    }
}

/// All books found in a verse file, in order of first appearance.
#[derive(Debug, Clone, Default)]
pub struct Library {
    books: Vec<Book>,
}

impl Library {
    /// Group records by book and chapter.
    pub fn from_records(records: &[VerseRecord]) -> Self {
        let mut books: Vec<Book> = Vec::new();

        for record in records {
            let idx = match books.iter().position(|b| b.name == record.book) {
                Some(idx) => idx,
                None => {
                    books.push(Book::new(&record.book));
                    books.len() - 1
                }
            };

            books[idx]
                .chapters
                .entry(record.chapter)
                .or_insert_with(|| Chapter {
                    number: record.chapter,
                    verses: Vec::new(),
                })
                .verses
                .push(Verse {
                    number: record.verse,
                    text: record.text.clone(),
                });
        }

        Self { books }
    }

    #[must_use]
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// Case-insensitive book lookup.
    #[must_use]
    pub fn book(&self, name: &str) -> Option<&Book> {
        let name = name.trim();
        self.books.iter().find(|b| b.name.eq_ignore_ascii_case(name))
    }

    /// The chapter after `chapter` in the same book, if any.
    #[must_use]
    pub fn next_chapter(&self, book: &str, chapter: u32) -> Option<(&str, u32)> {
        let book = self.book(book)?;
        book.chapters
            .range(chapter.saturating_add(1)..)
            .next()
            .map(|(n, _)| (book.name.as_str(), *n))
    }

    /// The chapter before `chapter` in the same book, if any.
    #[must_use]
    pub fn prev_chapter(&self, book: &str, chapter: u32) -> Option<(&str, u32)> {
        let book = self.book(book)?;
        book.chapters
            .range(..chapter)
            .next_back()
            .map(|(n, _)| (book.name.as_str(), *n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(book: &str, chapter: u32, verse: u32) -> VerseRecord {
        VerseRecord {
            book: book.to_string(),
            chapter,
            verse,
            text: format!("{book} {chapter}:{verse}"),
        }
    }

    fn sample() -> Library {
        Library::from_records(&[
            record("Ruth", 1, 1),
            record("Ruth", 1, 2),
            record("Ruth", 2, 1),
            record("Ruth", 4, 1),
            record("Jude", 1, 1),
        ])
    }

    #[test]
    fn test_grouping() {
        let library = sample();
        let names: Vec<&str> = library.books().iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Ruth", "Jude"]);

        let ruth = library.book("ruth").unwrap();
        assert_eq!(ruth.chapter_count(), 3);
        assert_eq!(ruth.chapter(1).unwrap().verse_count(), 2);
        assert!(ruth.chapter(3).is_none());
    }

    #[test]
    fn test_navigation() {
        let library = sample();
        assert_eq!(library.next_chapter("Ruth", 1), Some(("Ruth", 2)));
        assert_eq!(library.next_chapter("Ruth", 2), Some(("Ruth", 4)));
        assert_eq!(library.next_chapter("Ruth", 4), None);
        assert_eq!(library.prev_chapter("Ruth", 4), Some(("Ruth", 2)));
        assert_eq!(library.prev_chapter("Ruth", 1), None);
        assert_eq!(library.next_chapter("Jude", 1), None);
        assert_eq!(library.next_chapter("Tobit", 1), None);
    }

    #[test]
    fn test_chapters_in_order() {
        let library = Library::from_records(&[record("Job", 2, 1), record("Job", 1, 1)]);
        let numbers: Vec<u32> = library.books()[0].chapters().map(|c| c.number).collect();
        assert_eq!(numbers, vec![1, 2]);
    }
}
