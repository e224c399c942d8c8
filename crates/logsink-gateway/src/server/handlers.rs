//! HTTP handlers for the log sink

use axum::{
    body::Body,
    extract::State,
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_LENGTH,
        },
        HeaderMap, StatusCode,
    },
    response::{IntoResponse, Response},
};
use logsink_core::{LogEntry, LogFile};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use super::error::IngestError;
use super::logging_middleware::format_body;

const ALLOWED_ORIGIN: &str = "*";
const ALLOWED_METHODS: &str = "POST, OPTIONS";
const ALLOWED_HEADERS: &str = "Content-Type";

/// State shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub log_file: Arc<LogFile>,
    pub max_body_bytes: usize,
}

/// Ingest one log entry (POST on any path)
///
/// Reads exactly Content-Length bytes, decodes them as a JSON object,
/// and appends the rendered line to the log file before answering.
pub async fn ingest(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Body,
) -> Result<Response, IngestError> {
    let declared = content_length(&headers)?;

    let bytes = axum::body::to_bytes(body, state.max_body_bytes)
        .await
        .map_err(|e| IngestError::Body(e.to_string()))?;
    if bytes.len() as u64 != declared {
        return Err(IngestError::Body(format!(
            "expected {} bytes, read {}",
            declared,
            bytes.len()
        )));
    }
    debug!(body = %format_body(&bytes), "Log entry body");

    let text = std::str::from_utf8(&bytes)?;
    let value: Value = serde_json::from_str(text)?;
    let entry = LogEntry::from_json(&value)?;

    let line = entry.render_now();
    state.log_file.append(&line).await?;
    debug!(level = %entry.level, "Appended {} bytes", line.len());

    Ok((
        StatusCode::OK,
        [
            (ACCESS_CONTROL_ALLOW_ORIGIN, ALLOWED_ORIGIN),
            (ACCESS_CONTROL_ALLOW_HEADERS, ALLOWED_HEADERS),
        ],
    )
        .into_response())
}

/// Answer a CORS preflight (OPTIONS on any path)
///
/// The request body, if any, is never read.
pub async fn preflight() -> Response {
    (
        StatusCode::OK,
        [
            (ACCESS_CONTROL_ALLOW_ORIGIN, ALLOWED_ORIGIN),
            (ACCESS_CONTROL_ALLOW_METHODS, ALLOWED_METHODS),
            (ACCESS_CONTROL_ALLOW_HEADERS, ALLOWED_HEADERS),
        ],
    )
        .into_response()
}

fn content_length(headers: &HeaderMap) -> Result<u64, IngestError> {
    let value = headers
        .get(CONTENT_LENGTH)
        .ok_or(IngestError::MissingContentLength)?;
    let text = value
        .to_str()
        .map_err(|_| IngestError::InvalidContentLength(format!("{:?}", value)))?;
    text.trim()
        .parse()
        .map_err(|_| IngestError::InvalidContentLength(text.to_string()))
}
