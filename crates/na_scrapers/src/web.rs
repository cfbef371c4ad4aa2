use std::time::Duration;

use async_trait::async_trait;
use na_core::{Error, Result, Scraper};
use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

/// Paragraph selectors in order of preference.
const PARAGRAPH_SELECTORS: [&str; 2] = ["article p", "p"];

/// Fetches news pages over HTTP and pulls their paragraph text.
#[derive(Debug, Clone)]
pub struct WebScraper {
    client: reqwest::Client,
}

impl WebScraper {
    pub const TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Self::TIMEOUT)
            .user_agent(concat!("na/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    async fn fetch_html(&self, url: &str) -> Result<String> {
        let url = parse_url(url)?;
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| Error::Scraping(format!("Failed to fetch {}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Scraping(format!("HTTP {} for {}", status, url)));
        }

        response
            .text()
            .await
            .map_err(|e| Error::Scraping(format!("Failed to read body of {}: {}", url, e)))
    }
}

#[async_trait]
impl Scraper for WebScraper {
    async fn scrape_text(&self, url: &str) -> Result<String> {
        let html = self.fetch_html(url).await?;
        debug!("Fetched {} bytes from {}", html.len(), url);
        extract_paragraphs(&html)
    }
}

pub fn parse_url(url: &str) -> Result<Url> {
    Url::parse(url).map_err(|e| Error::Scraping(format!("Failed to parse URL '{}': {}", url, e)))
}

/// Joins the non-empty paragraphs of a page, preferring those inside an
/// `<article>` element and falling back to every paragraph on the page.
pub fn extract_paragraphs(html: &str) -> Result<String> {
    let document = Html::parse_document(html);

    for selector in PARAGRAPH_SELECTORS {
        let paragraphs = extract_texts(&document, selector)?;
        if !paragraphs.is_empty() {
            return Ok(paragraphs.join("\n"));
        }
    }

    Err(Error::EmptyContent("page has no paragraph text".to_string()))
}

fn extract_texts(document: &Html, selector: &str) -> Result<Vec<String>> {
    let selector = Selector::parse(selector)
        .map_err(|e| Error::Scraping(format!("Invalid selector: {}", e)))?;

    Ok(document
        .select(&selector)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
        .collect())
}
