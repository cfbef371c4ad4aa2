use async_trait::async_trait;
use chrono::NaiveDate;
use futures::TryStreamExt;
use mongodb::bson::{self, doc, oid::ObjectId, Bson, Document};
use mongodb::options::FindOptions;
use mongodb::{Client, Collection};
use na_core::{
    format_serving_date, AnalysisResult, ArticleDocument, ArticleId, ArticleStore, ContentElement,
    Error, Result,
};
use tracing::debug;

use crate::{StorageBackend, StoreConfig};

fn storage_err(context: &'static str) -> impl Fn(mongodb::error::Error) -> Error {
    move |e| Error::Storage(format!("{}: {}", context, e))
}

/// Articles in a MongoDB collection, addressed by `_id` object ids.
pub struct MongoStore {
    collection: Collection<Document>,
}

impl MongoStore {
    pub async fn open(config: &StoreConfig) -> Result<Self> {
        let client = Client::with_uri_str(&config.uri)
            .await
            .map_err(storage_err("Invalid MongoDB URI"))?;
        let database = client.database(&config.database);

        // The driver connects lazily, ping so a bad URI fails at startup
        database
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(storage_err("Failed to reach MongoDB"))?;

        debug!("Using collection {}.{}", config.database, config.collection);
        Ok(Self {
            collection: database.collection(&config.collection),
        })
    }
}

fn object_id(id: &ArticleId) -> Result<ObjectId> {
    ObjectId::parse_str(id.key()).map_err(|e| Error::InvalidId(e.to_string()))
}

fn id_filter(id: &ArticleId) -> Result<Document> {
    Ok(doc! { "_id": object_id(id)? })
}

fn serving_date_filter(date: NaiveDate) -> Document {
    doc! { "serving_date": format_serving_date(date) }
}

fn batch_options(limit: usize) -> FindOptions {
    FindOptions::builder().limit(limit as i64).build()
}

/// `$set` of the whole result, unknown keys included, over any previous one.
fn analysis_update(result: &AnalysisResult) -> Result<Document> {
    let value = bson::to_bson(result)
        .map_err(|e| Error::Storage(format!("Failed to encode analysis: {}", e)))?;
    Ok(doc! { "$set": { "gpt_result": value } })
}

fn ensure_matched(matched_count: u64, id: &ArticleId) -> Result<()> {
    if matched_count == 0 {
        return Err(Error::NotFound(format!("article {}", id)));
    }
    Ok(())
}

fn element_from_bson(value: &Bson) -> ContentElement {
    match value {
        Bson::String(text) => ContentElement::Text(text.clone()),
        other => ContentElement::Other(other.clone().into_relaxed_extjson()),
    }
}

fn article_from_document(document: Document) -> Result<ArticleDocument> {
    let oid = document
        .get_object_id("_id")
        .map_err(|e| Error::Storage(format!("Article without object id: {}", e)))?;

    let content_col = match document.get("content_col") {
        Some(Bson::Array(groups)) => groups
            .iter()
            .map(|group| match group {
                Bson::Array(lines) => lines.iter().map(element_from_bson).collect(),
                other => vec![element_from_bson(other)],
            })
            .collect(),
        _ => Vec::new(),
    };

    let serving_date = document
        .get_str("serving_date")
        .ok()
        .and_then(|date| NaiveDate::parse_from_str(date, "%Y-%m-%d").ok());

    let gpt_result = match document.get("gpt_result") {
        Some(Bson::Document(result)) => Some(serde_json::from_value::<AnalysisResult>(
            Bson::Document(result.clone()).into_relaxed_extjson(),
        )?),
        _ => None,
    };

    Ok(ArticleDocument {
        id: ArticleId::parse(&oid.to_hex())?,
        content_col,
        serving_date,
        gpt_result,
    })
}

#[async_trait]
impl StorageBackend for MongoStore {
    const SCHEMES: &'static [&'static str] = &["mongodb", "mongodb+srv"];

    async fn connect(config: &StoreConfig) -> Result<Self> {
        Self::open(config).await
    }
}

#[async_trait]
impl ArticleStore for MongoStore {
    fn name(&self) -> &str {
        "mongodb"
    }

    async fn find_by_id(&self, id: &ArticleId) -> Result<Option<ArticleDocument>> {
        let document = self
            .collection
            .find_one(id_filter(id)?, None)
            .await
            .map_err(storage_err("Failed to get article"))?;

        document.map(article_from_document).transpose()
    }

    async fn find_by_serving_date(&self, date: NaiveDate, limit: usize) -> Result<Vec<ArticleDocument>> {
        let cursor = self
            .collection
            .find(serving_date_filter(date), batch_options(limit))
            .await
            .map_err(storage_err("Failed to query articles by serving date"))?;

        let documents: Vec<Document> = cursor
            .try_collect()
            .await
            .map_err(storage_err("Failed to read articles by serving date"))?;

        documents.into_iter().map(article_from_document).collect()
    }

    async fn save_analysis(&self, id: &ArticleId, result: &AnalysisResult) -> Result<()> {
        let outcome = self
            .collection
            .update_one(id_filter(id)?, analysis_update(result)?, None)
            .await
            .map_err(storage_err("Failed to save analysis"))?;

        ensure_matched(outcome.matched_count, id)
    }
}
