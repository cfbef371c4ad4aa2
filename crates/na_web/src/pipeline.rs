//! The request pipelines behind each endpoint.
//!
//! Every stage runs after the previous one finished and the first failure
//! ends the pipeline. Nothing is rolled back: the stages before the final
//! write have no side effects.

use chrono::NaiveDate;
use na_core::{AnalysisResult, ArticleDocument, ArticleId, Error, Result};
use na_inference::KeywordStyle;
use na_scrapers::text_from_blocks;
use tracing::{debug, info};

use crate::state::{ArticleState, PageState, DAILY_BATCH_SIZE};

impl ArticleState {
    /// Validate the id, load the article, analyze it and save the result.
    pub async fn process_article(&self, raw_id: &str) -> Result<AnalysisResult> {
        let id = ArticleId::parse(raw_id)?;
        let article = self
            .store
            .find_by_id(&id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("no article with id {}", id)))?;

        self.analyze_and_save(&article).await
    }

    /// Run the article pipeline over today's articles, one after another.
    /// Any failure aborts the remaining articles.
    pub async fn process_daily(&self, date: NaiveDate) -> Result<Vec<ArticleId>> {
        let articles = self.store.find_by_serving_date(date, DAILY_BATCH_SIZE).await?;
        info!("🗞️ {} article(s) served on {}", articles.len(), date);

        let mut processed = Vec::with_capacity(articles.len());
        for (i, article) in articles.iter().enumerate() {
            info!("📰 [{}/{}] Analyzing article {}", i + 1, articles.len(), article.id);
            // The batch itself found the article, so a missing record here is a server fault
            self.analyze_and_save(article).await.map_err(|e| match e {
                Error::NotFound(what) => Error::Storage(format!("{} vanished during the batch", what)),
                other => other,
            })?;
            processed.push(article.id.clone());
        }
        Ok(processed)
    }

    async fn analyze_and_save(&self, article: &ArticleDocument) -> Result<AnalysisResult> {
        let text = text_from_blocks(&article.content_col)?;
        debug!("Article {} has {} chars of text", article.id, text.chars().count());

        let result = self.analyzer.analyze(&text, KeywordStyle::Described).await?;
        self.store.save_analysis(&article.id, &result).await?;
        info!("💾 Saved analysis for article {}", article.id);
        Ok(result)
    }
}

impl PageState {
    /// Structured analysis of the page at `url`.
    pub async fn analyze_page(&self, url: &str) -> Result<AnalysisResult> {
        let text = self.scraper.scrape_text(url).await?;
        debug!("Scraped {} chars from {}", text.chars().count(), url);
        self.analyzer.analyze(&text, KeywordStyle::Plain).await
    }

    /// Free-text study material for the page at `url`.
    pub async fn generate_content(&self, url: &str) -> Result<String> {
        let text = self.scraper.scrape_text(url).await?;
        debug!("Scraped {} chars from {}", text.chars().count(), url);
        self.analyzer.generate_content(&text).await
    }
}
