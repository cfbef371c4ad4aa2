use std::sync::Arc;

use na_core::{ArticleStore, Scraper};
use na_inference::Analyzer;

/// Maximum number of articles handled by one daily batch.
pub const DAILY_BATCH_SIZE: usize = 5;

/// Shared by every request of the article service.
pub struct ArticleState {
    pub store: Arc<dyn ArticleStore>,
    pub analyzer: Analyzer,
}

/// Shared by every request of the page (by-URL) service.
pub struct PageState {
    pub scraper: Arc<dyn Scraper>,
    pub analyzer: Analyzer,
}
