use async_trait::async_trait;
use chrono::NaiveDate;

use crate::types::{AnalysisResult, ArticleDocument, ArticleId};
use crate::Result;

#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// Short backend name for logs
    fn name(&self) -> &str;

    /// Get one article by id, `None` if no record matches
    async fn find_by_id(&self, id: &ArticleId) -> Result<Option<ArticleDocument>>;

    /// Get up to `limit` articles served on `date`, in store order
    async fn find_by_serving_date(&self, date: NaiveDate, limit: usize) -> Result<Vec<ArticleDocument>>;

    /// Overwrite the analysis result of an article
    async fn save_analysis(&self, id: &ArticleId, result: &AnalysisResult) -> Result<()>;
}
