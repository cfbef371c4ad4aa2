mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::{http::StatusCode, Router};
use common::{post, ScriptedModel};
use na_core::{Error, Result, Scraper};
use na_inference::{Analyzer, PAGE_MAX_CHARS};
use na_web::{create_page_app, PageState};
use serde_json::{json, Value};

/// Serves one canned page text, or fails like an unreachable host.
struct CannedScraper {
    text: Option<String>,
    requests: AtomicUsize,
}

impl CannedScraper {
    fn with_text(text: &str) -> Arc<Self> {
        Arc::new(Self {
            text: Some(text.to_string()),
            requests: AtomicUsize::new(0),
        })
    }

    fn unreachable() -> Arc<Self> {
        Arc::new(Self {
            text: None,
            requests: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl Scraper for CannedScraper {
    async fn scrape_text(&self, url: &str) -> Result<String> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        self.text
            .clone()
            .ok_or_else(|| Error::Scraping(format!("Failed to fetch {}: connection refused", url)))
    }
}

fn app(scraper: Arc<CannedScraper>, model: Arc<ScriptedModel>) -> Router {
    create_page_app(PageState {
        scraper,
        analyzer: Analyzer::new(model, PAGE_MAX_CHARS),
    })
}

#[tokio::test]
async fn test_analyze_returns_sections() {
    let model = ScriptedModel::replying(
        "```json\n{\"summary\": \"s\", \"keywords\": [\"AI\", \"GPU\"], \"quizzes\": [{\"question\": \"q\"}]}\n```",
    );
    let app = app(CannedScraper::with_text("Paragraph one.\nParagraph two."), model.clone());

    let (status, body) = post(&app, "/analyze", Some(json!({"url": "https://news.example/a"}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "summary": "s",
            "keywords": ["AI", "GPU"],
            "quizzes": [{"question": "q"}],
            "result": null
        })
    );
    assert_eq!(model.calls(), 1);
}

#[tokio::test]
async fn test_analyze_tolerates_missing_sections() {
    let model = ScriptedModel::replying("{\"summary\": \"only a summary\"}");
    let app = app(CannedScraper::with_text("text"), model);

    let (status, body) = post(&app, "/analyze", Some(json!({"url": "https://news.example/a"}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["keywords"], Value::Null);
    assert_eq!(body["quizzes"], Value::Null);
}

#[tokio::test]
async fn test_analyze_fetch_failure() {
    let model = ScriptedModel::new();
    let app = app(CannedScraper::unreachable(), model.clone());

    let (status, body) = post(&app, "/analyze", Some(json!({"url": "https://down.example"}))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["detail"].as_str().unwrap().contains("connection refused"));
    assert_eq!(model.calls(), 0);
}

#[tokio::test]
async fn test_analyze_malformed_reply() {
    let model = ScriptedModel::replying("{not valid json}");
    let app = app(CannedScraper::with_text("text"), model);

    let (status, body) = post(&app, "/analyze", Some(json!({"url": "https://news.example/a"}))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["detail"].as_str().unwrap().contains("Malformed JSON"));
}

#[tokio::test]
async fn test_generate_news_content_returns_text_as_is() {
    let reply = "1. Summary\n...\nInterview point: mention {latency}";
    let scraper = CannedScraper::with_text("Paragraph.");
    let app = app(scraper.clone(), ScriptedModel::replying(reply));

    let (status, body) =
        post(&app, "/generate_news_content", Some(json!({"url": "https://news.example/b"}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"url": "https://news.example/b", "content": reply, "result": "OK"})
    );
    assert_eq!(scraper.requests.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_generate_news_content_model_failure() {
    let app = app(CannedScraper::with_text("Paragraph."), ScriptedModel::failing_on(1));

    let (status, body) =
        post(&app, "/generate_news_content", Some(json!({"url": "https://news.example/b"}))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["detail"].as_str().unwrap().contains("Inference error"));
}
