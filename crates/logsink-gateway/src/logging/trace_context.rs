//! Trace Context - request correlation for the sink's own diagnostics
//!
//! Generates short trace IDs and the span every request runs in.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use tracing::{info, info_span, Span};

/// Global request counter for trace ID generation
static REQUEST_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generate a short trace ID for a request
/// Format: 6 hex characters (e.g., "a1b2c3")
pub fn generate_trace_id() -> String {
    let counter = REQUEST_COUNTER.fetch_add(1, Ordering::Relaxed);
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_micros() as u64)
        .unwrap_or(0);

    let mixed = counter.wrapping_add(timestamp);
    format!("{:06x}", mixed & 0xFFFFFF)
}

/// Trace context for a single request
#[derive(Debug, Clone)]
pub struct TraceContext {
    /// Short trace ID (6 hex chars)
    pub trace_id: String,
    /// HTTP method (POST, OPTIONS, ...)
    pub method: String,
    /// Request path
    pub path: String,
    /// Origin of the page that sent the request, if the browser set one
    pub origin: Option<String>,
    /// Request start time
    pub started_at: Instant,
}

impl TraceContext {
    /// Create a new trace context for an incoming request
    pub fn new(method: &str, path: &str) -> Self {
        Self {
            trace_id: generate_trace_id(),
            method: method.to_string(),
            path: path.to_string(),
            origin: None,
            started_at: Instant::now(),
        }
    }

    /// Record the Origin header
    pub fn with_origin(mut self, origin: Option<String>) -> Self {
        self.origin = origin;
        self
    }

    /// Get elapsed time since request started
    pub fn elapsed_ms(&self) -> u64 {
        self.started_at.elapsed().as_millis() as u64
    }

    /// Origin for logging ("-" when absent)
    pub fn origin_or_dash(&self) -> &str {
        self.origin.as_deref().unwrap_or("-")
    }
}

/// Request span builder for structured logging
pub struct RequestSpan;

impl RequestSpan {
    /// Create a tracing span for an incoming request
    pub fn enter(ctx: &TraceContext) -> Span {
        info_span!(
            "request",
            trace_id = %ctx.trace_id,
            method = %ctx.method,
            path = %ctx.path,
        )
    }

    /// Log request entry (single consolidated line)
    pub fn log_entry(ctx: &TraceContext) {
        info!(
            trace_id = %ctx.trace_id,
            "→ {} {} origin={}",
            ctx.method,
            ctx.path,
            ctx.origin_or_dash()
        );
    }

    /// Log request completion (single consolidated line)
    pub fn log_exit(ctx: &TraceContext, status: u16) {
        info!(
            trace_id = %ctx.trace_id,
            "← {} ({}ms)",
            status,
            ctx.elapsed_ms()
        );
    }
}
