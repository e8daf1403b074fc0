//! Mapping from core errors to JSON HTTP responses.
//!
//! Every error body has the shape `{"error": "<message>"}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use insights_core::{LoadError, QueryError, StoreError};
use serde::Serialize;

/// Message returned when the dataset file is not valid UTF-8.
pub const DECODE_ERROR_MESSAGE: &str =
    "Unable to decode the JSON file. Please ensure it's saved with UTF-8 encoding.";

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Message returned when the dataset file is missing, unreadable or not a
/// JSON array of objects. The full error, including the path, is only logged.
pub const LOAD_ERROR_MESSAGE: &str = "Unable to load the dataset";

/// Error returned by a handler.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Query(#[from] QueryError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Query(_) => StatusCode::BAD_REQUEST,
            ApiError::Load(_) | ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn client_message(&self) -> String {
        match self {
            ApiError::Load(LoadError::Decode { .. }) => DECODE_ERROR_MESSAGE.to_string(),
            ApiError::Load(LoadError::Read { .. } | LoadError::Parse { .. }) => {
                LOAD_ERROR_MESSAGE.to_string()
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "rejected request");
        }
        let body = ErrorBody {
            error: self.client_message(),
        };
        (status, Json(body)).into_response()
    }
}
