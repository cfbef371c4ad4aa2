use std::sync::Arc;

use async_trait::async_trait;
use na_core::{ArticleStore, Error, Result};
use tracing::info;

pub mod backends;

pub use backends::*;

pub const DEFAULT_DATABASE: &str = "OneBitArticle";
pub const DEFAULT_COLLECTION: &str = "Selected_Articles";

/// Where and how to reach the document store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub uri: String,
    pub database: String,
    pub collection: String,
}

impl StoreConfig {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            database: DEFAULT_DATABASE.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
        }
    }

    pub fn scheme(&self) -> &str {
        self.uri.split_once(':').map_or("", |(scheme, _)| scheme)
    }
}

#[async_trait]
pub trait StorageBackend: ArticleStore + Sized {
    /// URI schemes this backend is selected for
    const SCHEMES: &'static [&'static str];

    async fn connect(config: &StoreConfig) -> Result<Self>;
}

async fn connect<T: StorageBackend + 'static>(config: &StoreConfig) -> Result<Arc<dyn ArticleStore>> {
    let store = T::connect(config).await?;
    info!("🏦 Document store ready (using {})", store.name());
    Ok(Arc::new(store))
}

/// Picks the backend from the connection string scheme.
pub async fn create_store(config: &StoreConfig) -> Result<Arc<dyn ArticleStore>> {
    let scheme = config.scheme();

    if MemoryStore::SCHEMES.contains(&scheme) {
        return connect::<MemoryStore>(config).await;
    }

    #[cfg(feature = "sqlite")]
    if SqliteStore::SCHEMES.contains(&scheme) {
        return connect::<SqliteStore>(config).await;
    }

    #[cfg(feature = "mongodb")]
    if MongoStore::SCHEMES.contains(&scheme) {
        return connect::<MongoStore>(config).await;
    }

    Err(Error::Config(format!(
        "Unsupported document store URI scheme '{}' (is the backend feature enabled?)",
        scheme
    )))
}

pub mod prelude {
    pub use super::backends::*;
    pub use super::{create_store, StoreConfig};
}
