#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use na_core::{
    AnalysisResult, ArticleDocument, ArticleId, ArticleStore, CompletionModel, ContentElement,
    Error, Result,
};
use na_storage::MemoryStore;
use serde_json::Value;
use tower::ServiceExt;

/// Completion model answering with numbered JSON replies, failing on request.
#[derive(Default)]
pub struct ScriptedModel {
    calls: AtomicUsize,
    fail_on_call: Option<usize>,
    reply: Option<String>,
}

impl ScriptedModel {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing_on(call: usize) -> Arc<Self> {
        Arc::new(Self {
            fail_on_call: Some(call),
            ..Self::default()
        })
    }

    pub fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(reply.to_string()),
            ..Self::default()
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionModel for ScriptedModel {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, _prompt: &str) -> Result<String> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_on_call == Some(call) {
            return Err(Error::Inference(format!("scripted failure on call {}", call)));
        }
        Ok(self.reply.clone().unwrap_or_else(|| {
            format!(
                "{{\"summary\": \"summary {}\", \"keywords\": [{{\"keyword\": \"k\", \"description\": \"d\"}}], \"quizzes\": []}}",
                call
            )
        }))
    }
}

/// Memory store that counts lookups.
#[derive(Default)]
pub struct CountingStore {
    pub inner: MemoryStore,
    lookups: AtomicUsize,
}

impl CountingStore {
    pub async fn with_articles(articles: Vec<ArticleDocument>) -> Arc<Self> {
        let store = Self::default();
        for article in articles {
            store.inner.insert(article).await;
        }
        Arc::new(store)
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub async fn saved(&self, id: &str) -> Option<AnalysisResult> {
        let id = ArticleId::parse(id).unwrap();
        self.inner.find_by_id(&id).await.unwrap().and_then(|a| a.gpt_result)
    }
}

#[async_trait]
impl ArticleStore for CountingStore {
    fn name(&self) -> &str {
        "counting"
    }

    async fn find_by_id(&self, id: &ArticleId) -> Result<Option<ArticleDocument>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_id(id).await
    }

    async fn find_by_serving_date(&self, date: NaiveDate, limit: usize) -> Result<Vec<ArticleDocument>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_serving_date(date, limit).await
    }

    async fn save_analysis(&self, id: &ArticleId, result: &AnalysisResult) -> Result<()> {
        self.inner.save_analysis(id, result).await
    }
}

pub fn article_id(n: usize) -> String {
    format!("{:024x}", n)
}

pub fn article(n: usize, lines: &[&str]) -> ArticleDocument {
    ArticleDocument::new(
        ArticleId::parse(&article_id(n)).unwrap(),
        vec![lines.iter().map(|line| ContentElement::from(*line)).collect()],
    )
}

pub async fn post(app: &Router, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let body = match body {
        Some(value) => Body::from(value.to_string()),
        None => Body::empty(),
    };
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body)
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}
