use std::sync::Arc;

use na_core::{CompletionModel, Error, Result};

use crate::Config;

pub mod dummy;
pub mod openai;

pub use dummy::DummyModel;
pub use openai::OpenAiModel;

/// Providers accepted by [`create_model`].
pub const PROVIDERS: [&str; 2] = ["openai", "dummy"];

pub fn create_model(provider: &str, config: Config) -> Result<Arc<dyn CompletionModel>> {
    match provider {
        "openai" => Ok(Arc::new(OpenAiModel::new(config)?)),
        "dummy" => Ok(Arc::new(DummyModel)),
        other => Err(Error::Config(format!(
            "Unknown model provider '{}', expected one of: {}",
            other,
            PROVIDERS.join(", ")
        ))),
    }
}
