//! Error types for the dashboard API server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use uuid::Uuid;

use crate::aggregate::UnknownView;
use crate::ingest::PipelineError;
use crate::schema::SchemaError;

/// API error types
#[derive(Debug)]
pub enum ApiError {
    /// Session not found in the store
    SessionNotFound(Uuid),
    /// Upload rejected because required columns are missing
    SchemaRejected(SchemaError),
    /// Upload could not be parsed as CSV
    UploadRejected(String),
    /// Invalid parameter in request
    InvalidParameter(String),
    /// View name matches none of the five views
    UnknownView(String),
    /// Too many concurrent sessions
    SessionLimitReached,
    /// Internal server error
    InternalError(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::SessionNotFound(id) => write!(f, "Session not found: {}", id),
            ApiError::SchemaRejected(err) => write!(f, "Upload rejected: {}", err),
            ApiError::UploadRejected(msg) => write!(f, "Upload rejected: {}", msg),
            ApiError::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            ApiError::UnknownView(name) => write!(f, "Unknown view: {}", name),
            ApiError::SessionLimitReached => write!(f, "Session limit reached"),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            ApiError::SessionNotFound(id) => (
                StatusCode::NOT_FOUND,
                "SessionNotFound",
                format!("Session '{}' not found", id),
            ),
            ApiError::SchemaRejected(err) => {
                // Name exactly the missing fields so the caller can fix the
                // file; no session is created and no partial data survives.
                let SchemaError::MissingColumns(fields) = err;
                let missing: Vec<String> = fields.iter().map(|f| f.to_string()).collect();
                let body = Json(json!({
                    "error": "SchemaRejected",
                    "message": err.to_string(),
                    "missing_fields": missing,
                }));
                return (StatusCode::UNPROCESSABLE_ENTITY, body).into_response();
            }
            ApiError::UploadRejected(msg) => {
                (StatusCode::BAD_REQUEST, "UploadRejected", msg.clone())
            }
            ApiError::InvalidParameter(msg) => {
                (StatusCode::BAD_REQUEST, "InvalidParameter", msg.clone())
            }
            ApiError::UnknownView(name) => (
                StatusCode::BAD_REQUEST,
                "UnknownView",
                format!("'{}' is not a dashboard view", name),
            ),
            ApiError::SessionLimitReached => (
                StatusCode::SERVICE_UNAVAILABLE,
                "SessionLimitReached",
                "Maximum number of concurrent sessions reached".to_string(),
            ),
            ApiError::InternalError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "InternalError",
                msg.clone(),
            ),
        };

        let body = Json(json!({
            "error": error_type,
            "message": message,
        }));

        (status, body).into_response()
    }
}

// Conversions from pipeline error types

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::Schema(schema) => ApiError::SchemaRejected(schema),
            PipelineError::Csv(msg) => ApiError::UploadRejected(msg),
            PipelineError::EmptyInput => {
                ApiError::UploadRejected("uploaded file contains no data".to_string())
            }
        }
    }
}

impl From<UnknownView> for ApiError {
    fn from(err: UnknownView) -> Self {
        ApiError::UnknownView(err.0)
    }
}
