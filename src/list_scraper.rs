//! The paginated scrape loop.
//!
//! One browser session per request walks the user's completed list at
//! offsets 0, 300, 600, ... until a page either never renders the list
//! table (bounded 5 s wait) or renders it empty. Both mean end-of-list;
//! anything else that goes wrong aborts the whole request with no
//! partial result.

use crate::browser::{BrowserClient, BrowserError, Page};
use crate::config::BrowserSettings;
use crate::extract::parse_list_page;
use crate::models::{AnimeRecord, ListStatus};
use std::time::Duration;

const BASE_URL: &str = "https://myanimelist.net";

/// Entries per list page; the offset advances by this much per iteration.
pub const PAGE_SIZE: u32 = 300;

/// Element whose presence means the list table has rendered.
const LIST_MARKER: &str = ".list-table";

/// How long to wait for the marker before concluding end-of-list.
const MARKER_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("browser error: {0}")]
    Browser(#[from] BrowserError),
}

/// Outcome of loading one list page.
///
/// End-of-list is a normal outcome, not an error; only transport-level
/// failures travel the `Err` channel.
#[derive(Debug)]
pub enum PageOutcome {
    Records(Vec<AnimeRecord>),
    EndOfList,
}

/// One page-load step of the scrape loop.
///
/// Implemented by the browser-backed session; tests drive the loop with
/// a scripted fake.
pub trait ListPageSource {
    fn load_page(&mut self, username: &str, offset: u32) -> Result<PageOutcome, ScrapeError>;
}

fn list_url(username: &str, offset: u32) -> String {
    format!(
        "{}/animelist/{}?status={}&offset={}",
        BASE_URL,
        username,
        ListStatus::Completed.as_query_value(),
        offset
    )
}

/// Browser-backed page source: one Chrome session, one tab reused
/// across all iterations.
struct BrowserListSource {
    page: Page,
    // Session owner; dropping it closes Chrome.
    _client: BrowserClient,
}

impl BrowserListSource {
    fn new(settings: &BrowserSettings) -> Result<Self, ScrapeError> {
        let client = BrowserClient::with_config(settings.to_browser_config())?;
        let page = client.new_page()?;
        Ok(Self {
            page,
            _client: client,
        })
    }
}

impl ListPageSource for BrowserListSource {
    fn load_page(&mut self, username: &str, offset: u32) -> Result<PageOutcome, ScrapeError> {
        let url = list_url(username, offset);
        self.page.navigate(&url)?;

        match self.page.wait_for_selector(LIST_MARKER, MARKER_TIMEOUT) {
            Ok(()) => {}
            Err(e) if e.is_timeout() => {
                log::info!("List table never rendered at offset {}, treating as end of list", offset);
                return Ok(PageOutcome::EndOfList);
            }
            Err(e) => return Err(e.into()),
        }

        let html = self.page.content()?;
        let records = parse_list_page(&html);
        log::debug!("Extracted {} records at offset {}", records.len(), offset);

        if records.is_empty() {
            Ok(PageOutcome::EndOfList)
        } else {
            Ok(PageOutcome::Records(records))
        }
    }
}

/// Drive the pagination loop over a page source.
///
/// Appends each page's records in order and stops on end-of-list. A
/// fatal error from any page aborts with no partial result.
pub fn collect_all_pages<S: ListPageSource>(
    source: &mut S,
    username: &str,
) -> Result<Vec<AnimeRecord>, ScrapeError> {
    let mut accumulated = Vec::new();
    let mut offset = 0;

    loop {
        match source.load_page(username, offset)? {
            PageOutcome::Records(records) => {
                accumulated.extend(records);
                offset += PAGE_SIZE;
            }
            PageOutcome::EndOfList => break,
        }
    }

    log::info!(
        "Collected {} completed entries for {}",
        accumulated.len(),
        username
    );
    Ok(accumulated)
}

/// Scrape a user's full completed list.
///
/// The username is used verbatim; a non-existent or private profile is
/// indistinguishable from an empty list here. The browser session is
/// owned by this call and released on every exit path.
pub fn fetch_completed_list(
    username: &str,
    settings: &BrowserSettings,
) -> Result<Vec<AnimeRecord>, ScrapeError> {
    let mut source = BrowserListSource::new(settings)?;
    collect_all_pages(&mut source, username)
}
