use std::fmt;

use na_core::{CompletionModel, Result};
use serde_json::json;

/// Offline model that answers every prompt with the same JSON skeleton.
pub struct DummyModel;

impl fmt::Debug for DummyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyModel").finish()
    }
}

#[async_trait::async_trait]
impl CompletionModel for DummyModel {
    fn name(&self) -> &str {
        "dummy"
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        // First 20 words of the article body, which follows the opening quotes
        let body = prompt.rsplit("\"\"\"").nth(1).unwrap_or(prompt);
        let words: Vec<&str> = body.split_whitespace().take(20).collect();

        Ok(json!({
            "summary": words.join(" "),
            "keywords": [],
            "quizzes": [],
        })
        .to_string())
    }
}
