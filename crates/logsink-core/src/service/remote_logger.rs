//! Remote logger - ships messages to a running log sink
//!
//! Every message is mirrored to the local `tracing` output first, then
//! POSTed to the sink in a background task. Delivery is best effort: a
//! sink that is down, rejects the entry or stalls never blocks or fails
//! the caller.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::branding;
use crate::domain::LogEntry;

/// Upper bound on a single delivery attempt
pub const DEFAULT_DELIVERY_TIMEOUT: Duration = Duration::from_secs(5);

/// HTTP client for a log sink
#[derive(Debug, Clone)]
pub struct RemoteLogger {
    client: Client,
    base_url: String,
}

impl Default for RemoteLogger {
    fn default() -> Self {
        Self::new(branding::local_url(branding::DEFAULT_PORT))
    }
}

impl RemoteLogger {
    /// Create a logger targeting the sink at `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, DEFAULT_DELIVERY_TIMEOUT)
    }

    /// Create a logger whose deliveries give up after `timeout`
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!("Failed to build log sink client, using defaults: {}", e);
                Client::new()
            });

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Sink URL entries are posted to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn info(&self, message: impl Into<String>) -> JoinHandle<()> {
        self.send(message, "INFO")
    }

    pub fn warn(&self, message: impl Into<String>) -> JoinHandle<()> {
        self.send(message, "WARN")
    }

    pub fn error(&self, message: impl Into<String>) -> JoinHandle<()> {
        self.send(message, "ERROR")
    }

    /// Mirror the message locally and post it in the background
    ///
    /// Returns as soon as the delivery task is spawned. Awaiting the handle
    /// waits for delivery to finish or fail; dropping it detaches the task.
    /// Must be called from within a Tokio runtime.
    pub fn send(&self, message: impl Into<String>, level: impl Into<String>) -> JoinHandle<()> {
        let entry = LogEntry::new(message, level);

        if entry.level == "ERROR" {
            error!("[{}] {}", entry.level, entry.message);
        } else {
            info!("[{}] {}", entry.level, entry.message);
        }

        let logger = self.clone();
        tokio::spawn(async move {
            match logger.post(&entry).await {
                Ok(status) if status.is_success() => {}
                Ok(status) => debug!("Log sink rejected entry: {}", status),
                Err(e) => debug!("Log sink unreachable: {:#}", e),
            }
        })
    }

    /// Post an entry and wait for the sink's status
    pub async fn try_send(
        &self,
        message: impl Into<String>,
        level: impl Into<String>,
    ) -> Result<StatusCode> {
        self.post(&LogEntry::new(message, level)).await
    }

    async fn post(&self, entry: &LogEntry) -> Result<StatusCode> {
        let response = self
            .client
            .post(&self.base_url)
            .json(entry)
            .send()
            .await
            .with_context(|| format!("Failed to reach log sink at {}", self.base_url))?;
        Ok(response.status())
    }
}
