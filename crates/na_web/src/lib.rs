use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::post, Router};
use tower_http::cors::CorsLayer;
use tracing::info;

pub mod error;
pub mod handlers;
pub mod pipeline;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{ArticleState, PageState, DAILY_BATCH_SIZE};

/// Routes of the store-backed article service.
pub fn create_article_app(state: ArticleState) -> Router {
    Router::new()
        .route("/generate_gpt_result", post(handlers::generate_gpt_result))
        .route("/generate_daily_gpt_results", post(handlers::generate_daily_gpt_results))
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

/// Routes of the URL-backed page service.
pub fn create_page_app(state: PageState) -> Router {
    Router::new()
        .route("/analyze", post(handlers::analyze))
        .route("/generate_news_content", post(handlers::generate_news_content))
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

pub async fn serve(app: Router, addr: SocketAddr) -> na_core::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("🌐 Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

pub mod prelude {
    pub use na_core::{Error, Result};
    pub use crate::{ArticleState, PageState};
}
