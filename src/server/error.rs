use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pagination::PageError;
use crate::telemetry::API_ERRORS;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing resource or empty result set
    #[error("{0}")]
    NotFound(String),

    /// Required field present but empty
    #[error("{0}")]
    Unprocessable(String),

    /// Body, path or query string could not be parsed
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Internal(String),

    #[error("Internal server error")]
    Database(#[from] sqlx::Error),
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) | ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Body of every failed request.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    pub success: bool,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            ApiError::Database(error) => tracing::error!("Database failure: {error:#?}"),
            ApiError::Internal(message) => tracing::error!("{message}"),
            other => tracing::debug!(status = status.as_u16(), "{other}"),
        }
        API_ERRORS.with_label_values(&[status.as_str()]).inc();

        let body = ErrorBody {
            message: self.to_string(),
            success: false,
        };
        (status, Json(body)).into_response()
    }
}

impl From<PageError> for ApiError {
    fn from(error: PageError) -> Self {
        ApiError::NotFound(error.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
