use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use na_core::Error;
use serde_json::json;
use tracing::warn;

/// Error returned by the handlers, rendered as `{"detail": "..."}`.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            Error::InvalidId(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        warn!("⚠️ {} {}", status.as_u16(), self.0);
        (status, Json(json!({ "detail": self.0.to_string() }))).into_response()
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
