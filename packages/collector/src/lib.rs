//! KJV Collector - Download the King James Bible from bible-api.com.
//!
//! This crate walks all 66 books chapter by chapter, collects every verse
//! into memory and writes them once as a JSON array. The same file can then
//! be searched or read chapter by chapter.
//!
//! # Example
//!
//! ```
//! use kjv_collector::config::{chapter_url, validate_chapter};
//!
//! assert_eq!(
//!     chapter_url("https://bible-api.com", "Genesis", 1, "kjv"),
//!     "https://bible-api.com/Genesis 1?translation=kjv"
//! );
//! assert!(validate_chapter(151).is_err());
//! ```
//!
//! # Architecture
//!
//! - [`books`]: Canonical book table and testament lookup
//! - [`config`]: Configuration constants, URL building and run settings
//! - [`types`]: Verse records and API response types
//! - [`error`]: Error types and Result alias
//! - [`http`]: HTTP client and single-chapter fetch
//! - [`collector`]: The book/chapter collection loop
//! - [`output`]: Verse file writing and loading
//! - [`library`]: Book and chapter grouping for reading
//! - [`search`]: Word index and verse search
//! - [`history`]: Recent search history
//! - [`cli`]: Command-line interface

pub mod books;
pub mod cli;
pub mod collector;
pub mod config;
pub mod error;
pub mod history;
pub mod http;
pub mod library;
pub mod output;
pub mod search;
pub mod types;

// Re-export main functions
pub use collector::{CollectObserver, Collector, ConsoleObserver, TracingObserver};

// Re-export commonly used items
pub use books::{Testament, BOOKS};
pub use config::CollectorConfig;
pub use error::{CollectorError, Result};
pub use types::{BookOutcome, CollectionSummary, VerseRecord};
