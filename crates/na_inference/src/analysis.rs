use std::fmt;
use std::sync::Arc;

use na_core::{AnalysisResult, CompletionModel, Result};
use tracing::debug;

use crate::prompts::{KeywordStyle, PromptBuilder, Template};
use crate::response::parse_json_object;

/// Prompt, complete and (for the JSON templates) decode, in that order.
#[derive(Clone)]
pub struct Analyzer {
    model: Arc<dyn CompletionModel>,
    prompts: PromptBuilder,
}

impl fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Analyzer")
            .field("model", &self.model.name())
            .field("max_chars", &self.prompts.max_chars())
            .finish()
    }
}

impl Analyzer {
    pub fn new(model: Arc<dyn CompletionModel>, max_chars: usize) -> Self {
        Self {
            model,
            prompts: PromptBuilder::new(max_chars),
        }
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Summary, keywords and quizzes as a decoded object.
    pub async fn analyze(&self, article_text: &str, keywords: KeywordStyle) -> Result<AnalysisResult> {
        let prompt = self.prompts.build(Template::Json(keywords), article_text);
        let raw = self.model.complete(&prompt).await?;
        debug!("Model {} replied with {} chars", self.model.name(), raw.len());
        let object = parse_json_object(&raw)?;
        Ok(AnalysisResult::from_object(object))
    }

    /// Free-text study material, returned as the model wrote it.
    pub async fn generate_content(&self, article_text: &str) -> Result<String> {
        let prompt = self.prompts.build(Template::Narrative, article_text);
        self.model.complete(&prompt).await
    }
}
