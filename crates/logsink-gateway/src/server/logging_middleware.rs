//! HTTP Request/Response Logging Middleware
//!
//! Wraps every request in a span carrying its trace id and logs a single
//! entry/exit line per request.

use axum::{extract::Request, http::header::ORIGIN, middleware::Next, response::Response};
use tracing::Instrument;

use crate::logging::{RequestSpan, TraceContext};

/// Longest body text echoed to debug output (in chars)
const MAX_BODY_LOG_CHARS: usize = 200;

/// Format a request body for debug output - compact version
pub fn format_body(bytes: &[u8]) -> String {
    if bytes.is_empty() {
        return "[empty]".to_string();
    }

    match std::str::from_utf8(bytes) {
        Ok(text) => {
            let mut chars = text.chars();
            let head: String = chars.by_ref().take(MAX_BODY_LOG_CHARS).collect();
            if chars.next().is_some() {
                format!("{}...", head)
            } else {
                head
            }
        }
        Err(_) => format!("[binary: {} bytes]", bytes.len()),
    }
}

/// Logging middleware for requests and responses
///
/// Generates a trace_id and logs a single entry/exit line per request.
pub async fn http_logging_middleware(request: Request, next: Next) -> Response {
    let origin = request
        .headers()
        .get(ORIGIN)
        .and_then(|value| value.to_str().ok())
        .map(String::from);
    let ctx = TraceContext::new(request.method().as_str(), request.uri().path()).with_origin(origin);
    let span = RequestSpan::enter(&ctx);

    async move {
        RequestSpan::log_entry(&ctx);

        let response = next.run(request).await;

        RequestSpan::log_exit(&ctx, response.status().as_u16());
        response
    }
    .instrument(span)
    .await
}
