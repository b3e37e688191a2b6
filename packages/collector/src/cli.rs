//! Command-line interface for the collector.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::books::Testament;
use crate::collector::{CollectObserver, Collector, ConsoleObserver, TracingObserver};
use crate::config::{
    validate_chapter, CollectorConfig, API_BASE_URL, DEFAULT_OUTPUT_FILE, MAX_CHAPTERS,
    MAX_SEARCH_RESULTS, TEXT_WRAP_WIDTH,
};
use crate::error::{CollectorError, Result};
use crate::history::{history_path, load_history, record_search};
use crate::library::Library;
use crate::output::load_json;
use crate::search::{match_ranges, SearchFilter, SearchIndex};
use crate::types::BookOutcome;

/// KJV Collector - Download the King James Bible into a single JSON file.
#[derive(Parser)]
#[command(name = "kjv-collector")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Defaults to `download` when omitted.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download every chapter of every book and write the verse file.
    Download {
        /// Output file (default: bible-kjv.json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// API base URL (default: https://bible-api.com)
        #[arg(long)]
        base_url: Option<String>,

        /// Only download these books (repeatable)
        #[arg(short, long = "book")]
        books: Vec<String>,

        /// Log progress through RUST_LOG instead of printing it
        #[arg(short, long)]
        quiet: bool,
    },

    /// Search a downloaded verse file.
    Search {
        /// Words to search for; verses must contain all of them
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Verse file to search (default: bible-kjv.json)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Restrict to one book
        #[arg(short, long)]
        book: Option<String>,

        /// Restrict to the old or new testament
        #[arg(short, long)]
        testament: Option<Testament>,

        /// Lowest chapter to include
        #[arg(long, default_value_t = 1)]
        min_chapter: u32,

        /// Highest chapter to include
        #[arg(long, default_value_t = MAX_CHAPTERS)]
        max_chapter: u32,

        /// Maximum number of verses to print
        #[arg(short, long, default_value_t = MAX_SEARCH_RESULTS)]
        limit: usize,

        /// Don't add this search to the search history
        #[arg(long)]
        no_history: bool,
    },

    /// List recent searches, newest first.
    History {
        /// Verse file whose history to show (default: bible-kjv.json)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Print one chapter of a downloaded verse file.
    Read {
        /// Book name (e.g., "Song of Solomon")
        book: String,

        /// Chapter number (default: 1)
        chapter: Option<u32>,

        /// Verse file to read (default: bible-kjv.json)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Download {
        output: None,
        base_url: None,
        books: Vec::new(),
        quiet: false,
    }) {
        Commands::Download {
            output,
            base_url,
            books,
            quiet,
        } => download_command(output, base_url, &books, quiet),
        Commands::Search {
            query,
            input,
            book,
            testament,
            min_chapter,
            max_chapter,
            limit,
            no_history,
        } => {
            let filter = SearchFilter {
                book,
                testament,
                min_chapter,
                max_chapter,
                limit,
            };
            search_command(
                &query.join(" "),
                &input_path(input.as_deref()),
                &filter,
                !no_history,
            )
        }
        Commands::History { input } => history_command(&input_path(input.as_deref())),
        Commands::Read {
            book,
            chapter,
            input,
        } => read_command(&book, chapter.unwrap_or(1), &input_path(input.as_deref())),
    }
}

fn input_path(input: Option<&Path>) -> PathBuf {
    input
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILE))
}

/// Prints the console lines above a per-book progress bar.
struct ProgressObserver {
    pb: ProgressBar,
    console: ConsoleObserver,
}

impl CollectObserver for ProgressObserver {
    fn chapter_downloaded(&mut self, book: &str, chapter: u32, verses: usize) {
        self.pb.set_message(format!("{book} {chapter}"));
        let console = &mut self.console;
        self.pb
            .suspend(|| console.chapter_downloaded(book, chapter, verses));
    }

    fn chapter_failed(&mut self, book: &str, chapter: u32, error: &CollectorError) {
        let console = &mut self.console;
        self.pb.suspend(|| console.chapter_failed(book, chapter, error));
    }

    fn book_finished(&mut self, _book: &str, _outcome: BookOutcome) {
        self.pb.inc(1);
    }

    fn collection_written(&mut self, path: &Path, total: usize) {
        self.pb.finish_and_clear();
        self.console.collection_written(path, total);
    }
}

/// Execute the download command.
fn download_command(
    output: Option<PathBuf>,
    base_url: Option<String>,
    books: &[String],
    quiet: bool,
) -> Result<()> {
    let mut config = CollectorConfig::default()
        .with_base_url(base_url.unwrap_or_else(|| API_BASE_URL.to_string()))
        .with_output(output.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILE)));
    if !books.is_empty() {
        config = config.with_books(books)?;
    }

    let collector = Collector::new(config)?;

    if quiet {
        collector.run(&mut TracingObserver)?;
        return Ok(());
    }

    let pb = ProgressBar::new(collector.config().books.len() as u64);
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} books {msg}")
            .expect("valid template"),
    );
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let mut observer = ProgressObserver {
        pb,
        console: ConsoleObserver,
    };

    let summary = match collector.run(&mut observer) {
        Ok(summary) => summary,
        Err(e) => {
            observer.pb.finish_and_clear();
            return Err(e);
        }
    };

    if !summary.books_failed.is_empty() {
        println!(
            "  {} {}",
            style("Stopped early after an error:").yellow().bold(),
            summary.books_failed.join(", ")
        );
    }
    println!(
        "{} {}",
        style("Saved to:").green().bold(),
        summary.output.display()
    );

    Ok(())
}

/// Execute the search command.
fn search_command(query: &str, input: &Path, filter: &SearchFilter, save: bool) -> Result<()> {
    let records = load_json(input)?;
    let index = SearchIndex::build(&records);
    let results = index.search(query, filter);

    for verse in &results.verses {
        println!("{}", style(verse.reference()).cyan().bold());
        println!("  {}", highlight(&verse.text, query));
    }

    if !results.verses.is_empty() {
        println!();
    }
    println!(
        "Found {} results for \"{}\"",
        style(results.total).bold(),
        query
    );
    if results.is_truncated() {
        println!(
            "{}",
            style(format!(
                "Showing {} of {} results. Try a more specific search.",
                results.verses.len(),
                results.total
            ))
            .yellow()
        );
    }

    if save && !query.trim().is_empty() {
        let path = history_path(input);
        if let Err(e) = record_search(&path, query.trim(), results.total) {
            tracing::warn!(path = %path.display(), error = %e, "Could not save search history");
        }
    }

    Ok(())
}

/// Execute the history command.
fn history_command(input: &Path) -> Result<()> {
    let history = load_history(&history_path(input))?;
    if history.is_empty() {
        println!("No searches yet.");
        return Ok(());
    }

    for entry in &history {
        println!(
            "{}  {} ({} results)",
            style(entry.timestamp.format("%Y-%m-%d %H:%M")).dim(),
            entry.query,
            entry.count
        );
    }

    Ok(())
}

fn highlight(text: &str, query: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for range in match_ranges(text, query) {
        out.push_str(&text[last..range.start]);
        out.push_str(&style(&text[range.clone()]).yellow().bold().to_string());
        last = range.end;
    }
    out.push_str(&text[last..]);
    out
}

/// Execute the read command.
fn read_command(book: &str, chapter: u32, input: &Path) -> Result<()> {
    validate_chapter(chapter)?;

    let records = load_json(input)?;
    let library = Library::from_records(&records);

    let not_found = || CollectorError::ChapterNotFound {
        book: book.to_string(),
        chapter,
    };
    let found = library.book(book).ok_or_else(not_found)?;
    let content = found.chapter(chapter).ok_or_else(not_found)?;

    println!("{}", style(format!("{} {}", found.name, chapter)).green().bold());
    println!();

    for verse in &content.verses {
        let number = verse.number.to_string();
        let indent = " ".repeat(number.len() + 1);
        let options = textwrap::Options::new(TEXT_WRAP_WIDTH)
            .initial_indent("")
            .subsequent_indent(&indent);
        let wrapped = textwrap::fill(&format!("{number} {}", verse.text.trim()), options);
        println!("{wrapped}");
    }

    println!();
    println!("{} verses", content.verse_count());

    let prev = library.prev_chapter(&found.name, chapter);
    let next = library.next_chapter(&found.name, chapter);
    if prev.is_some() || next.is_some() {
        let fmt = |r: Option<(&str, u32)>| {
            r.map(|(b, c)| format!("{b} {c}"))
                .unwrap_or_else(|| "-".to_string())
        };
        println!(
            "{} {}  {} {}",
            style("Previous:").dim(),
            fmt(prev),
            style("Next:").dim(),
            fmt(next)
        );
    }

    Ok(())
}
