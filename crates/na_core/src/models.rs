use async_trait::async_trait;
use crate::Result;

#[async_trait]
pub trait CompletionModel: Send + Sync {
    /// Provider name used in logs
    fn name(&self) -> &str;

    /// Send a single user prompt and return the first choice, trimmed
    async fn complete(&self, prompt: &str) -> Result<String>;
}

#[async_trait]
pub trait Scraper: Send + Sync {
    /// Fetch the page at `url` and return its article text
    async fn scrape_text(&self, url: &str) -> Result<String>;
}
