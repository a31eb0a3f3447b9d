use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::warn;

use crate::asr::RecognitionError;
use crate::extract::ExtractionError;
use crate::translate::TranslationError;
use crate::upload::StorageError;

/// Errors surfaced by the HTTP handlers, rendered as `{"error": message}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{}", .0.body_text())]
    Multipart(#[from] MultipartError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Translation(#[from] TranslationError),

    #[error(transparent)]
    Recognition(#[from] RecognitionError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Extraction(ExtractionError::TaskFailed(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation(_) | Self::Extraction(_) => StatusCode::BAD_REQUEST,
            Self::Multipart(e) => e.status(),
            Self::Translation(TranslationError::EmptyText) => StatusCode::BAD_REQUEST,
            Self::Translation(TranslationError::Downstream(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Recognition(RecognitionError::Downstream(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Recognition(_) => StatusCode::BAD_REQUEST,
            Self::Storage(StorageError::InvalidName(_)) => StatusCode::BAD_REQUEST,
            Self::Storage(StorageError::Io(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        warn!("Request failed with {}: {}", status, message);
        (status, Json(json!({ "error": message }))).into_response()
    }
}
