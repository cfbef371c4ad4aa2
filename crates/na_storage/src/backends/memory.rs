use async_trait::async_trait;
use chrono::NaiveDate;
use na_core::{AnalysisResult, ArticleDocument, ArticleId, ArticleStore, Error, Result};
use tokio::sync::RwLock;

use crate::{StorageBackend, StoreConfig};

/// Process-local store keeping articles in insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    articles: RwLock<Vec<ArticleDocument>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_articles(articles: Vec<ArticleDocument>) -> Self {
        Self {
            articles: RwLock::new(articles),
        }
    }

    /// Insert an article, replacing any record with the same id in place.
    pub async fn insert(&self, article: ArticleDocument) {
        let mut articles = self.articles.write().await;
        if let Some(existing) = articles.iter_mut().find(|a| a.id == article.id) {
            *existing = article;
        } else {
            articles.push(article);
        }
    }

    pub async fn len(&self) -> usize {
        self.articles.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.articles.read().await.is_empty()
    }
}

#[async_trait]
impl StorageBackend for MemoryStore {
    const SCHEMES: &'static [&'static str] = &["memory"];

    async fn connect(_config: &StoreConfig) -> Result<Self> {
        Ok(Self::new())
    }
}

#[async_trait]
impl ArticleStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn find_by_id(&self, id: &ArticleId) -> Result<Option<ArticleDocument>> {
        let articles = self.articles.read().await;
        Ok(articles.iter().find(|a| &a.id == id).cloned())
    }

    async fn find_by_serving_date(&self, date: NaiveDate, limit: usize) -> Result<Vec<ArticleDocument>> {
        let articles = self.articles.read().await;
        Ok(articles
            .iter()
            .filter(|a| a.serving_date == Some(date))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn save_analysis(&self, id: &ArticleId, result: &AnalysisResult) -> Result<()> {
        let mut articles = self.articles.write().await;
        let article = articles
            .iter_mut()
            .find(|a| &a.id == id)
            .ok_or_else(|| Error::NotFound(format!("article {}", id)))?;
        article.gpt_result = Some(result.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use na_core::ContentElement;
    use serde_json::json;

    fn article(id: &str, date: Option<NaiveDate>) -> ArticleDocument {
        ArticleDocument {
            id: ArticleId::parse(id).unwrap(),
            content_col: vec![vec![ContentElement::from("line")]],
            serving_date: date,
            gpt_result: None,
        }
    }

    #[tokio::test]
    async fn test_memory_store() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let yesterday = today.pred_opt().unwrap();
        let store = MemoryStore::new();
        for (i, date) in [today, yesterday, today, today].into_iter().enumerate() {
            store.insert(article(&format!("{:024x}", i + 1), Some(date))).await;
        }
        assert_eq!(store.len().await, 4);

        let found = store.find_by_serving_date(today, 2).await.unwrap();
        let ids: Vec<_> = found.iter().map(|a| a.id.to_string()).collect();
        assert_eq!(ids, vec![format!("{:024x}", 1), format!("{:024x}", 3)]);

        let id = ArticleId::parse(&format!("{:024x}", 2)).unwrap();
        let result = AnalysisResult::from_object(json!({"summary": "s"}).as_object().unwrap().clone());
        store.save_analysis(&id, &result).await.unwrap();
        let saved = store.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(saved.gpt_result, Some(result));
    }

    #[tokio::test]
    async fn test_save_overwrites_previous_result() {
        let id = ArticleId::parse("aaaaaaaaaaaaaaaaaaaaaaaa").unwrap();
        let store = MemoryStore::with_articles(vec![article(id.as_str(), None)]);
        let first = AnalysisResult::from_object(json!({"summary": "one"}).as_object().unwrap().clone());
        let second = AnalysisResult::from_object(json!({"summary": "two"}).as_object().unwrap().clone());

        store.save_analysis(&id, &first).await.unwrap();
        store.save_analysis(&id, &second).await.unwrap();
        assert_eq!(store.find_by_id(&id).await.unwrap().unwrap().gpt_result, Some(second));
    }

    #[tokio::test]
    async fn test_missing_article() {
        let store = MemoryStore::new();
        let id = ArticleId::parse("bbbbbbbbbbbbbbbbbbbbbbbb").unwrap();
        assert!(store.find_by_id(&id).await.unwrap().is_none());
        let result = store.save_analysis(&id, &AnalysisResult::default()).await;
        assert!(matches!(result, Err(Error::NotFound(_))));
    }
}
