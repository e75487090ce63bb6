use chrono::{Duration, Utc};
use crossbeam_channel::Sender;
use reqwest::blocking::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::error;

const SEARCH_URL: &str = "https://api.github.com/search/repositories";
const USER_AGENT: &str = "starfeed/0.1";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RepoOwner {
    pub login: String,
    pub avatar_url: String,
}

/// One repository as returned by the search endpoint. Immutable once
/// appended to the feed; never deduplicated across pages.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RepoSummary {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub stargazers_count: u64,
    pub owner: RepoOwner,
}

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub items: Vec<RepoSummary>,
}

#[derive(Debug)]
pub enum FetchEvent {
    PageLoaded { page: u32, repos: Vec<RepoSummary> },
    FetchFailed { page: u32, error: String },
}

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("GitHub API error: HTTP {0}")]
    Api(reqwest::StatusCode),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Date of (today - `days`) as YYYY-MM-DD, recomputed on every call so a
/// long-running session keeps querying a fresh window.
pub fn created_since(days: u32) -> String {
    let date = Utc::now().date_naive() - Duration::days(days as i64);
    date.format("%Y-%m-%d").to_string()
}

/// Search URL for one page of repositories created in the last `days` days,
/// sorted by stars descending. No per_page parameter, the endpoint default
/// applies.
pub fn search_url(page: u32, days: u32) -> String {
    let query = format!("created:>{}", created_since(days));
    format!(
        "{}?q={}&sort=stars&order=desc&page={}",
        SEARCH_URL,
        urlencoding::encode(&query),
        page
    )
}

pub fn build_client() -> Result<Client, FeedError> {
    let client = Client::builder().user_agent(USER_AGENT).build()?;
    Ok(client)
}

/// Fetch a single page of search results. One request, no retry.
pub fn fetch_page(client: &Client, page: u32, days: u32) -> Result<Vec<RepoSummary>, FeedError> {
    let url = search_url(page, days);
    let response = client
        .get(&url)
        .header("Accept", "application/vnd.github.v3+json")
        .send()?;

    if !response.status().is_success() {
        return Err(FeedError::Api(response.status()));
    }

    let body: SearchResponse = response.json()?;
    Ok(body.items)
}

/// Fetch a page on a background thread and report the outcome over the
/// channel. Failures are logged and delivered as `FetchFailed` so the UI can
/// clear its loading state; they are never surfaced to the viewer.
pub fn fetch_page_background(page: u32, days: u32, sender: Sender<FetchEvent>) {
    std::thread::spawn(move || {
        let result = build_client().and_then(|client| fetch_page(&client, page, days));

        let event = match result {
            Ok(repos) => FetchEvent::PageLoaded { page, repos },
            Err(e) => {
                error!("Failed to fetch page {}: {}", page, e);
                FetchEvent::FetchFailed {
                    page,
                    error: e.to_string(),
                }
            }
        };

        // Receiver dropped means the app is shutting down
        let _ = sender.send(event);
    });
}
