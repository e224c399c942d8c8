//! Ingest errors and their HTTP mapping
//!
//! Every failure while handling a log entry becomes a bare 500. The
//! reason goes to the process's own log, never to the caller.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use logsink_core::EntryError;
use thiserror::Error;
use tracing::error;

/// Failure while ingesting a single log entry
#[derive(Debug, Error)]
pub enum IngestError {
    /// The request carried no Content-Length header.
    #[error("missing Content-Length header")]
    MissingContentLength,

    /// The Content-Length header is not a byte count.
    #[error("invalid Content-Length header: {0}")]
    InvalidContentLength(String),

    /// The body could not be read in full.
    #[error("failed to read request body: {0}")]
    Body(String),

    #[error("request body is not UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    #[error("request body is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error(transparent)]
    Entry(#[from] EntryError),

    /// Opening or writing the log file failed.
    #[error("failed to append to log file: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for IngestError {
    fn into_response(self) -> Response {
        error!("Error handling log: {}", self);
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
}
