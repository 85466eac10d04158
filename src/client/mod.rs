use reqwest::StatusCode;
use scraper::Html;
use tracing::debug;

use crate::config::Config;
use crate::error::Result;

pub mod extract;
mod models;

pub use models::{DEFAULT_FILTERS, Filter, SearchResult};

/// HTTP session against one Anitaku host.
///
/// The connection pool lives exactly as long as this value: it is released when
/// the client is dropped or handed to [`AnitakuClient::close`], so every exit
/// path (including `?` returns) cleans up. All queries take `&self` and may be
/// issued concurrently; they share the pool.
pub struct AnitakuClient {
    client: reqwest::Client,
    base_url: String,
}

impl AnitakuClient {
    /// Open a session against the default host.
    pub fn new() -> Result<Self> {
        Self::with_config(&Config::default())
    }

    pub fn with_config(config: &Config) -> Result<Self> {
        let base_url = config.base_url()?;

        let mut builder = reqwest::Client::builder().user_agent(config.http.user_agent.as_str());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        debug!(base_url = %base_url, "Opened session");
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Release the session. Equivalent to dropping, but explicit at call sites.
    pub fn close(self) {
        debug!(base_url = %self.base_url, "Closing session");
    }

    /// Search URL for `query`, with one status fragment per filter in the given order.
    pub fn search_url(&self, query: &str, filters: &[Filter]) -> String {
        let mut url = format!(
            "{}/filter.html?keyword={}",
            self.base_url,
            urlencoding::encode(query)
        );
        for filter in filters {
            url.push_str(filter.as_query_fragment());
        }
        url
    }

    /// Search the site listing. `None` filters means ongoing and upcoming titles.
    ///
    /// A page without a results listing is an empty result, but one malformed
    /// entry inside the listing fails the whole search.
    pub async fn search(&self, query: &str, filters: Option<&[Filter]>) -> Result<Vec<SearchResult>> {
        let filters = filters.unwrap_or(&DEFAULT_FILTERS);
        let url = self.search_url(query, filters);

        debug!(query = %query, filters = filters.len(), "Searching anitaku");
        let html = self.fetch(&url, None).await?;

        extract::search_results(&Html::parse_document(&html), &self.base_url)
    }

    /// Airing status text from the detail page, or `None` when the page has no info block.
    pub async fn get_status(&self, anime: &str) -> Result<Option<String>> {
        let url = extract::join_url(&self.base_url, &extract::category_path(anime));
        let html = self.fetch(&url, None).await?;

        extract::status(&Html::parse_document(&html))
    }

    /// Whether `path` renders a real page rather than the site's "404 Not Found" panel.
    ///
    /// `path` is requested as given, without the `/category/` prefix the other
    /// lookups add, and a page lacking the title heading is an error rather than
    /// an empty result. The site may serve its missing-page panel as a 404, so
    /// that status is read like a success; any other error status fails.
    pub async fn has_episode_zero(&self, path: &str) -> Result<bool> {
        let url = extract::join_url(&self.base_url, path);
        let html = self.fetch(&url, Some(StatusCode::NOT_FOUND)).await?;

        extract::has_episode_zero(&Html::parse_document(&html))
    }

    /// Highest episode number listed on the detail page, or `None` without pagination.
    pub async fn get_new_episode(&self, anime: &str) -> Result<Option<u32>> {
        let url = extract::join_url(&self.base_url, &extract::category_path(anime));
        let html = self.fetch(&url, None).await?;

        extract::latest_episode(&Html::parse_document(&html))
    }

    /// GET `url` and return its body. Error statuses fail unless equal to `tolerated`.
    async fn fetch(&self, url: &str, tolerated: Option<StatusCode>) -> Result<String> {
        debug!(url = %url, "Fetching page");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let response = if tolerated == Some(status) {
            response
        } else {
            response.error_for_status()?
        };
        let html = response.text().await?;

        debug!(url = %url, status = %status, bytes = html.len(), "Fetched page");
        Ok(html)
    }
}
