pub mod error;
pub mod models;
pub mod storage;
pub mod types;

pub use error::{Error, Result};
pub use models::{CompletionModel, Scraper};
pub use storage::ArticleStore;
pub use types::{format_serving_date, AnalysisResult, ArticleDocument, ArticleId, ContentElement};
