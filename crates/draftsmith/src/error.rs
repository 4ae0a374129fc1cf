//! Error types for the content-operations system

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type alias for content-ops operations
pub type Result<T> = std::result::Result<T, Error>;

/// Content-operations errors
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Required external-service credential is absent
    #[error("Missing credential: {0}")]
    MissingCredential(String),

    /// Uploaded file had no parseable rows
    #[error("No parseable rows in '{0}'")]
    EmptyInput(String),

    /// Uploaded file was neither valid JSON nor usable CSV
    #[error("Malformed file '{filename}': {message}")]
    MalformedFile { filename: String, message: String },

    /// Unsupported upload file type
    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    /// Enrichment (categorize/summarize) call failed
    #[error("Enrichment failed: {0}")]
    Enrichment(String),

    /// LLM generation error
    #[error("LLM error: {0}")]
    Llm(String),

    /// Web search augmentation error
    #[error("Web search error: {0}")]
    Search(String),

    /// Image generation error
    #[error("Image generation error: {0}")]
    Image(String),

    /// Persistence store error
    #[error("Store error: {0}")]
    Store(String),

    /// Record not found
    #[error("Record not found: {0}")]
    NotFound(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a malformed-file error
    pub fn malformed_file(filename: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedFile {
            filename: filename.into(),
            message: message.into(),
        }
    }

    /// Create an enrichment error
    pub fn enrichment(message: impl Into<String>) -> Self {
        Self::Enrichment(message.into())
    }

    /// Create an LLM error
    pub fn llm(message: impl Into<String>) -> Self {
        Self::Llm(message.into())
    }

    /// Create a store error
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store(message.into())
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            Error::Config(msg) => (StatusCode::BAD_REQUEST, "config_error", msg.clone()),
            Error::MissingCredential(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "missing_credential",
                format!("Missing credential: {}", msg),
            ),
            Error::EmptyInput(filename) => (
                StatusCode::BAD_REQUEST,
                "empty_input",
                format!("No parseable rows in '{}'", filename),
            ),
            Error::MalformedFile { filename, message } => (
                StatusCode::BAD_REQUEST,
                "malformed_file",
                format!("Malformed file '{}': {}", filename, message),
            ),
            Error::UnsupportedFileType(ext) => (
                StatusCode::BAD_REQUEST,
                "unsupported_type",
                format!("Unsupported file type: {}", ext),
            ),
            Error::Enrichment(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, "enrichment_error", msg.clone())
            }
            Error::Llm(msg) => (StatusCode::SERVICE_UNAVAILABLE, "llm_error", msg.clone()),
            Error::Search(msg) => (StatusCode::SERVICE_UNAVAILABLE, "search_error", msg.clone()),
            Error::Image(msg) => (StatusCode::SERVICE_UNAVAILABLE, "image_error", msg.clone()),
            Error::Store(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "store_error", msg.clone()),
            Error::NotFound(id) => (
                StatusCode::NOT_FOUND,
                "not_found",
                format!("Record not found: {}", id),
            ),
            Error::Io(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "io_error",
                err.to_string(),
            ),
            Error::Json(err) => (StatusCode::BAD_REQUEST, "json_error", err.to_string()),
            Error::Http(err) => (StatusCode::BAD_GATEWAY, "http_error", err.to_string()),
            Error::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg.clone())
            }
        };

        let body = Json(json!({
            "error": {
                "type": error_type,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}
