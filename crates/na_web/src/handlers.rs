use std::sync::Arc;

use axum::{extract::State, Json};
use chrono::Local;
use na_core::{format_serving_date, AnalysisResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiResult;
use crate::state::{ArticleState, PageState};

#[derive(Debug, Deserialize)]
pub struct ArticleRequest {
    pub article_id: String,
}

#[derive(Debug, Deserialize)]
pub struct UrlRequest {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct ArticleResponse {
    pub status: &'static str,
    pub message: String,
    pub article_id: String,
    pub gpt_result: AnalysisResult,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum DailyResponse {
    Empty {
        message: String,
    },
    Processed {
        status: &'static str,
        message: String,
        processed_article_ids: Vec<String>,
    },
}

#[derive(Debug, Serialize)]
pub struct PageAnalysisResponse {
    pub summary: Value,
    pub keywords: Value,
    pub quizzes: Value,
    pub result: Value,
}

#[derive(Debug, Serialize)]
pub struct NewsContentResponse {
    pub url: String,
    pub content: String,
    pub result: &'static str,
}

pub async fn generate_gpt_result(
    State(state): State<Arc<ArticleState>>,
    Json(request): Json<ArticleRequest>,
) -> ApiResult<Json<ArticleResponse>> {
    let gpt_result = state.process_article(&request.article_id).await?;
    Ok(Json(ArticleResponse {
        status: "OK",
        message: "GPT result saved".to_string(),
        article_id: request.article_id,
        gpt_result,
    }))
}

pub async fn generate_daily_gpt_results(
    State(state): State<Arc<ArticleState>>,
) -> ApiResult<Json<DailyResponse>> {
    let today = Local::now().date_naive();
    let processed = state.process_daily(today).await?;

    if processed.is_empty() {
        return Ok(Json(DailyResponse::Empty {
            message: format!("No articles for today ({})", format_serving_date(today)),
        }));
    }

    Ok(Json(DailyResponse::Processed {
        status: "OK",
        message: format!("{} articles processed", processed.len()),
        processed_article_ids: processed.iter().map(ToString::to_string).collect(),
    }))
}

pub async fn analyze(
    State(state): State<Arc<PageState>>,
    Json(request): Json<UrlRequest>,
) -> ApiResult<Json<PageAnalysisResponse>> {
    let analysis = state.analyze_page(&request.url).await?;
    Ok(Json(PageAnalysisResponse {
        summary: analysis.summary,
        keywords: analysis.keywords,
        quizzes: analysis.quizzes,
        result: Value::Null,
    }))
}

pub async fn generate_news_content(
    State(state): State<Arc<PageState>>,
    Json(request): Json<UrlRequest>,
) -> ApiResult<Json<NewsContentResponse>> {
    let content = state.generate_content(&request.url).await?;
    Ok(Json(NewsContentResponse {
        url: request.url,
        content,
        result: "OK",
    }))
}
