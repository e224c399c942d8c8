//! Centralized branding constants
//!
//! All product naming and well-known defaults come from this module.

/// User-facing display name
pub const DISPLAY_NAME: &str = "LogSink";

/// Port the sink listens on
pub const DEFAULT_PORT: u16 = 3002;

/// Log file written by the sink, relative to the working directory
pub const LOG_FILE_NAME: &str = "client_debug.log";

/// Level used when an entry does not carry one
pub const DEFAULT_LEVEL: &str = "INFO";

/// Base URL clients use to reach a locally running sink
///
/// # Example
/// ```ignore
/// let url = branding::local_url(3002);
/// // Returns: "http://localhost:3002"
/// ```
pub fn local_url(port: u16) -> String {
    format!("http://localhost:{}", port)
}

/// Startup banner printed before the sink starts serving
pub fn startup_banner(port: u16) -> String {
    format!("Starting log server on port {}...", port)
}
