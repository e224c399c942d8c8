//! LogSink Gateway
//!
//! HTTP server that accepts client log entries and appends them to the
//! sink's log file:
//! - POST on any path ingests one `{message, level}` entry
//! - OPTIONS on any path answers the CORS preflight
//! - Per-request trace ids in the process's own diagnostics

pub mod logging;
pub mod server;

pub use server::{build_router, AppState, BoundSink, IngestError, SinkServer};
