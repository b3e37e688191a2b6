//! HTTP client wrapper for fetching chapters from the Bible API.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;

use crate::error::{CollectorError, Result};
use crate::types::{ChapterResponse, VerseRecord};

/// User agent string identifying this collector.
const USER_AGENT: &str = concat!("kjv-collector/", env!("CARGO_PKG_VERSION"));

/// Outcome of a chapter request that did not raise an error.
#[derive(Debug)]
pub enum ChapterFetch {
    /// Status 200 with the chapter's verses in response order.
    Verses(Vec<VerseRecord>),
    /// Status 200, but a verse entry could not be read. `verses` holds the
    /// entries before it.
    Partial {
        verses: Vec<VerseRecord>,
        error: CollectorError,
    },
    /// Any other status. The caller treats it as the end of the book.
    NotFound(StatusCode),
}

/// Create a configured HTTP client.
///
/// # Arguments
/// * `timeout` - Total time allowed for one request, body included
///
/// # Returns
/// A `reqwest::blocking::Client` configured with the timeout and user agent.
pub fn create_client(timeout: Duration) -> Result<Client> {
    let client = Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// Fetch one chapter.
///
/// Single attempt, no retry. Only status 200 is parsed; everything else is
/// returned as [`ChapterFetch::NotFound`]. Transport failures, timeouts and
/// bodies that don't match [`ChapterResponse`] are errors. A bad verse entry
/// inside a valid body gives [`ChapterFetch::Partial`].
///
/// # Arguments
/// * `client` - HTTP client to use
/// * `url` - Chapter URL, see [`crate::config::chapter_url`]
pub fn fetch_chapter(client: &Client, url: &str) -> Result<ChapterFetch> {
    tracing::debug!(url, "Requesting chapter");

    let response = client.get(url).send()?;
    let status = response.status();
    if status != StatusCode::OK {
        return Ok(ChapterFetch::NotFound(status));
    }

    let body = response.text()?;
    let malformed = |source| CollectorError::MalformedResponse {
        url: url.to_string(),
        source,
    };
    let parsed: ChapterResponse = serde_json::from_str(&body).map_err(malformed)?;

    match parsed.into_records() {
        (verses, None) => Ok(ChapterFetch::Verses(verses)),
        (verses, Some(source)) => Ok(ChapterFetch::Partial {
            verses,
            error: malformed(source),
        }),
    }
}
