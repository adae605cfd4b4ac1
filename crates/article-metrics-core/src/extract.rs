//! Article fetching and HTML text extraction.
//!
//! One blocking GET per URL, no retries. The body is taken from the first
//! container that exists, in this order:
//!
//! 1. `<article>`
//! 2. `div.td-post-content`
//! 3. `div.entry-content`
//!
//! and is made of the container's `p`, `h2` and `h3` elements. With none of
//! them present every `p` on the page is used.

use std::sync::LazyLock;
use std::time::Duration;

use reqwest::blocking::Client;
use scraper::{ElementRef, Html, Selector};
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::error::{ExtractError, ExtractResult};

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default `User-Agent` header.
pub const DEFAULT_USER_AGENT: &str = concat!(
    "Mozilla/5.0 (compatible; article-metrics/",
    env!("CARGO_PKG_VERSION"),
    ")"
);

static TITLE: LazyLock<Selector> = LazyLock::new(|| selector("h1"));
static CONTAINERS: LazyLock<[Selector; 3]> = LazyLock::new(|| {
    [
        selector("article"),
        selector("div.td-post-content"),
        selector("div.entry-content"),
    ]
});
static BLOCKS: LazyLock<Selector> = LazyLock::new(|| selector("p, h2, h3"));
static PARAGRAPHS: LazyLock<Selector> = LazyLock::new(|| selector("p"));

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("valid selector")
}

/// HTTP settings for article fetching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// `User-Agent` header value.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Title and body text pulled out of a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedArticle {
    /// Text of the first `h1`; empty when there is none.
    pub title: String,
    /// Block texts joined with `\n`.
    pub body: String,
}

/// Reusable blocking HTTP client for a batch of fetches.
#[derive(Debug, Clone)]
pub struct ArticleFetcher {
    client: Client,
    timeout: u64,
}

impl ArticleFetcher {
    /// Build a client from `config`.
    pub fn new(config: &FetchConfig) -> ExtractResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self {
            client,
            timeout: config.timeout,
        })
    }

    /// Download `url` and return the response body.
    #[tracing::instrument(skip(self))]
    pub fn fetch_html(&self, url: &str) -> ExtractResult<String> {
        let url = parse_url(url)?;
        let response = self
            .client
            .get(url)
            .header(
                "Accept",
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .send()
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExtractError::Status {
                status: status.as_u16(),
            });
        }
        let html = response.text().map_err(|e| self.classify(e))?;
        debug!(bytes = html.len(), "page downloaded");
        Ok(html)
    }

    /// Download `url` and extract its article.
    pub fn fetch_article(&self, url: &str) -> ExtractResult<ExtractedArticle> {
        let html = self.fetch_html(url)?;
        extract_article(&html)
    }

    fn classify(&self, e: reqwest::Error) -> ExtractError {
        if e.is_timeout() {
            ExtractError::Timeout {
                timeout: self.timeout,
            }
        } else {
            ExtractError::Http(e)
        }
    }
}

/// Fetch and extract a single article with a one-off client.
pub fn fetch_article(url: &str, config: &FetchConfig) -> ExtractResult<ExtractedArticle> {
    ArticleFetcher::new(config)?.fetch_article(url)
}

fn parse_url(url: &str) -> ExtractResult<Url> {
    let parsed = Url::parse(url.trim()).map_err(|e| ExtractError::InvalidUrl(format!("{url}: {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(ExtractError::InvalidUrl(format!(
            "{url}: unsupported scheme {other:?}"
        ))),
    }
}

/// Extract the title and body text from an HTML document.
///
/// Fails with [`ExtractError::NoContent`] when the body comes out empty.
pub fn extract_article(html: &str) -> ExtractResult<ExtractedArticle> {
    let document = Html::parse_document(html);

    let title = document
        .select(&TITLE)
        .next()
        .map(title_text)
        .unwrap_or_default();

    let container = CONTAINERS
        .iter()
        .find_map(|sel| document.select(sel).next());
    let blocks: Vec<String> = match container {
        Some(container) => container.select(&BLOCKS).map(block_text).collect(),
        None => document.select(&PARAGRAPHS).map(block_text).collect(),
    };

    let body = blocks
        .into_iter()
        .filter(|b| !b.is_empty())
        .collect::<Vec<_>>()
        .join("\n");
    if body.is_empty() {
        return Err(ExtractError::NoContent);
    }
    Ok(ExtractedArticle { title, body })
}

/// Text nodes trimmed individually and concatenated, kept on one line.
fn title_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .collect::<String>()
        .replace(['\r', '\n'], " ")
}

fn block_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
