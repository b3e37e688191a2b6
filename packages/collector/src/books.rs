//! Canonical book table.
//!
//! The 66 books of the Protestant canon in order, spelled the way
//! bible-api.com accepts them in a request path.

use std::fmt;
use std::str::FromStr;

use crate::error::{CollectorError, Result};

/// Number of books in the Old Testament (Genesis..=Malachi).
pub const OLD_TESTAMENT_BOOKS: usize = 39;

/// All books in canonical order.
pub const BOOKS: [&str; 66] = [
    "Genesis",
    "Exodus",
    "Leviticus",
    "Numbers",
    "Deuteronomy",
    "Joshua",
    "Judges",
    "Ruth",
    "1 Samuel",
    "2 Samuel",
    "1 Kings",
    "2 Kings",
    "1 Chronicles",
    "2 Chronicles",
    "Ezra",
    "Nehemiah",
    "Esther",
    "Job",
    "Psalms",
    "Proverbs",
    "Ecclesiastes",
    "Song of Solomon",
    "Isaiah",
    "Jeremiah",
    "Lamentations",
    "Ezekiel",
    "Daniel",
    "Hosea",
    "Joel",
    "Amos",
    "Obadiah",
    "Jonah",
    "Micah",
    "Nahum",
    "Habakkuk",
    "Zephaniah",
    "Haggai",
    "Zechariah",
    "Malachi",
    "Matthew",
    "Mark",
    "Luke",
    "John",
    "Acts",
    "Romans",
    "1 Corinthians",
    "2 Corinthians",
    "Galatians",
    "Ephesians",
    "Philippians",
    "Colossians",
    "1 Thessalonians",
    "2 Thessalonians",
    "1 Timothy",
    "2 Timothy",
    "Titus",
    "Philemon",
    "Hebrews",
    "James",
    "1 Peter",
    "2 Peter",
    "1 John",
    "2 John",
    "3 John",
    "Jude",
    "Revelation",
];

/// Old or New Testament.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Testament {
    Old,
    New,
}

impl Testament {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Old => "old",
            Self::New => "new",
        }
    }
}

impl fmt::Display for Testament {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Testament {
    type Err = CollectorError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "old" | "ot" => Ok(Self::Old),
            "new" | "nt" => Ok(Self::New),
            _ => Err(CollectorError::InvalidTestament(s.to_string())),
        }
    }
}

/// 1-based canonical position of a book, matched case-insensitively.
///
/// # Examples
/// ```
/// use kjv_collector::books::book_position;
///
/// assert_eq!(book_position("Genesis"), Some(1));
/// assert_eq!(book_position("song of solomon"), Some(22));
/// assert_eq!(book_position("Revelation"), Some(66));
/// assert_eq!(book_position("Tobit"), None);
/// ```
#[must_use]
pub fn book_position(name: &str) -> Option<usize> {
    let name = name.trim();
    BOOKS
        .iter()
        .position(|b| b.eq_ignore_ascii_case(name))
        .map(|i| i + 1)
}

/// Canonical spelling of a book name, if known.
#[must_use]
pub fn canonical_name(name: &str) -> Option<&'static str> {
    book_position(name).map(|pos| BOOKS[pos - 1])
}

/// Testament a book belongs to.
#[must_use]
pub fn testament_of(name: &str) -> Option<Testament> {
    book_position(name).map(|pos| {
        if pos <= OLD_TESTAMENT_BOOKS {
            Testament::Old
        } else {
            Testament::New
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_bounds() {
        assert_eq!(BOOKS.len(), 66);
        assert_eq!(BOOKS[0], "Genesis");
        assert_eq!(BOOKS[OLD_TESTAMENT_BOOKS - 1], "Malachi");
        assert_eq!(BOOKS[OLD_TESTAMENT_BOOKS], "Matthew");
        assert_eq!(BOOKS[65], "Revelation");
    }

    #[test]
    fn test_book_names_unique() {
        for (i, book) in BOOKS.iter().enumerate() {
            assert_eq!(book_position(book), Some(i + 1), "duplicate {book}");
        }
    }

    #[test]
    fn test_testament_of() {
        assert_eq!(testament_of("Malachi"), Some(Testament::Old));
        assert_eq!(testament_of("Matthew"), Some(Testament::New));
        assert_eq!(testament_of("3 john"), Some(Testament::New));
        assert_eq!(testament_of("Baruch"), None);
    }

    #[test]
    fn test_canonical_name() {
        assert_eq!(canonical_name("1 SAMUEL"), Some("1 Samuel"));
        assert_eq!(canonical_name(" psalms "), Some("Psalms"));
        assert_eq!(canonical_name("Psalm"), None);
    }

    #[test]
    fn test_testament_from_str() {
        assert_eq!("old".parse::<Testament>().ok(), Some(Testament::Old));
        assert_eq!("NT".parse::<Testament>().ok(), Some(Testament::New));
        assert!("apocrypha".parse::<Testament>().is_err());
    }
}
