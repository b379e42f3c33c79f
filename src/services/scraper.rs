//! Listings scraper - fetches a genre search page and pulls movie titles out of it
//!
//! Titles are the visible text of anchors pointing at a title detail page
//! (`/title/tt<digits>/`). Document order is preserved and nothing is deduplicated.
//!
//! Limitations:
//! - No JavaScript rendering (titles must be present in the served HTML)
//! - A markup change at the target site degrades to an empty list, not an error

use regex::Regex;
use scraper::{Html, Selector};
use std::time::Duration;

use crate::{
    error::{AppError, AppResult},
    models::MovieTitle,
};

/// Browser-like User-Agent sent with every listings request
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Link target of a title detail page
const TITLE_LINK_PATTERN: &str = r"/title/tt\d+/";

/// Source of candidate movie titles for a listings URL
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait TitleSource: Send + Sync {
    /// Fetch every title listed at `url`, in page order
    async fn fetch_titles(&self, url: &str) -> AppResult<Vec<MovieTitle>>;
}

/// Pulls title text out of listings HTML
#[derive(Debug, Clone)]
pub struct TitleExtractor {
    anchors: Selector,
    title_link: Regex,
}

impl TitleExtractor {
    pub fn new() -> AppResult<Self> {
        let anchors = Selector::parse("a[href]")
            .map_err(|e| AppError::Internal(format!("Invalid anchor selector: {}", e)))?;
        let title_link = Regex::new(TITLE_LINK_PATTERN)
            .map_err(|e| AppError::Internal(format!("Invalid title link pattern: {}", e)))?;

        Ok(Self {
            anchors,
            title_link,
        })
    }

    /// Text of every title-detail anchor, in document order.
    ///
    /// Anchors without visible text (poster links) are skipped.
    pub fn extract(&self, html: &str) -> Vec<MovieTitle> {
        let document = Html::parse_document(html);

        document
            .select(&self.anchors)
            .filter(|anchor| {
                anchor
                    .value()
                    .attr("href")
                    .is_some_and(|href| self.title_link.is_match(href))
            })
            .map(|anchor| anchor.text().collect::<String>().trim().to_string())
            .filter(|title| !title.is_empty())
            .collect()
    }
}

/// HTTP listings scraper using reqwest + scraper
pub struct ListingScraper {
    client: reqwest::Client,
    extractor: TitleExtractor,
}

impl ListingScraper {
    pub fn new(timeout: Duration) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            extractor: TitleExtractor::new()?,
        })
    }

    /// Fetch raw HTML from a URL
    async fn fetch_html(&self, url: &str) -> AppResult<String> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::ExternalApi(format!(
                "Listings returned status {} for {}",
                status, url
            )));
        }

        Ok(response.text().await?)
    }
}

#[async_trait::async_trait]
impl TitleSource for ListingScraper {
    async fn fetch_titles(&self, url: &str) -> AppResult<Vec<MovieTitle>> {
        tracing::debug!(url = %url, "Fetching listings page");

        let html = self.fetch_html(url).await?;
        let titles = self.extractor.extract(&html);

        if titles.is_empty() {
            tracing::debug!(
                url = %url,
                body_bytes = html.len(),
                "No title links found on listings page"
            );
        } else {
            tracing::info!(url = %url, count = titles.len(), "Scraped listings");
        }

        Ok(titles)
    }
}
