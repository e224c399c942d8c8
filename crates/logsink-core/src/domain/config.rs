//! Sink configuration

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::branding;

/// Default cap on a single request body (2 MiB)
pub const DEFAULT_MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Log sink configuration
#[derive(Debug, Clone)]
pub struct SinkConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on (0 lets the OS pick one)
    pub port: u16,
    /// Append-only log file the entries go to
    pub log_path: PathBuf,
    /// Enable CORS for browser access
    pub enable_cors: bool,
    /// Largest request body accepted before the read fails
    pub max_body_bytes: usize,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: branding::DEFAULT_PORT,
            log_path: PathBuf::from(branding::LOG_FILE_NAME),
            enable_cors: true,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl SinkConfig {
    /// Get the socket address
    pub fn addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid listen address {}:{}", self.host, self.port))
    }

    /// Get the base URL for this sink
    /// Uses localhost for consistency with browser clients
    pub fn base_url(&self) -> String {
        branding::local_url(self.port)
    }
}
