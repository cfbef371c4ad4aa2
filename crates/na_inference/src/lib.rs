use std::fmt;

pub mod analysis;
pub mod models;
pub mod prompts;
pub mod response;

pub use analysis::Analyzer;
pub use models::create_model;
pub use prompts::{KeywordStyle, PromptBuilder, Template, ARTICLE_MAX_CHARS, PAGE_MAX_CHARS};
pub use response::parse_json_object;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub model_name: String,
    pub base_url: String,
}

impl Config {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model_name: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("model_name", &self.model_name)
            .field("base_url", &self.base_url)
            .finish()
    }
}

pub mod prelude {
    pub use super::Config;
    pub use super::analysis::Analyzer;
    pub use super::models::create_model;
    pub use na_core::{AnalysisResult, CompletionModel, Error, Result};
}
