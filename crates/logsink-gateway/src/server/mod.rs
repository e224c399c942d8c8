//! Log Sink Server
//!
//! HTTP server exposing the ingest endpoint. Startup removes the previous
//! run's log file, then binds and serves until the process is killed.

mod error;
mod handlers;
pub mod logging_middleware;

pub use error::IngestError;
pub use handlers::AppState;

use anyhow::{Context, Result};
use axum::{middleware, routing::post, Router};
use logsink_core::{branding, LogFile, SinkConfig};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Build the Axum router
///
/// POST on any path ingests an entry. With CORS enabled, OPTIONS on any
/// path is answered as a preflight; otherwise it gets 405.
pub fn build_router(state: AppState, enable_cors: bool) -> Router {
    let methods = if enable_cors {
        post(handlers::ingest).options(handlers::preflight)
    } else {
        post(handlers::ingest)
    };

    Router::new()
        .route("/", methods.clone())
        .route("/{*path}", methods)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // Trace id span plus one entry/exit line per request
        .layer(middleware::from_fn(
            logging_middleware::http_logging_middleware,
        ))
}

/// Log sink server
///
/// Owns the shared log file; the router hands it to every request.
pub struct SinkServer {
    config: SinkConfig,
    log_file: Arc<LogFile>,
}

impl SinkServer {
    pub fn new(config: SinkConfig) -> Self {
        let log_file = Arc::new(LogFile::new(config.log_path.clone()));
        Self { config, log_file }
    }

    /// Get the shared log file
    pub fn log_file(&self) -> Arc<LogFile> {
        self.log_file.clone()
    }

    /// Get the server configuration
    pub fn config(&self) -> &SinkConfig {
        &self.config
    }

    fn router(&self) -> Router {
        let state = AppState {
            log_file: self.log_file.clone(),
            max_body_bytes: self.config.max_body_bytes,
        };
        build_router(state, self.config.enable_cors)
    }

    /// Prepare the sink and bind its listener
    ///
    /// Removes the previous log file before the socket is bound, so no
    /// request can observe the old content. Both steps are fatal on error.
    pub async fn bind(self) -> Result<BoundSink> {
        let addr = self.config.addr()?;

        info!("{}", branding::startup_banner(self.config.port));

        self.log_file
            .reset()
            .await
            .with_context(|| format!("Failed to remove old log file {:?}", self.log_file.path()))?;

        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        let local_addr = listener
            .local_addr()
            .context("Failed to read bound address")?;

        info!("[Sink] Listening on {}", local_addr);
        info!("[Sink] Writing entries to {:?}", self.log_file.path());
        info!(
            "[Sink] CORS: {}",
            if self.config.enable_cors {
                "enabled"
            } else {
                "disabled"
            }
        );

        Ok(BoundSink {
            router: self.router(),
            listener,
            local_addr,
        })
    }

    /// Run the sink server
    ///
    /// This is the main entry point; it only returns on a startup or
    /// accept-loop failure.
    pub async fn run(self) -> Result<()> {
        self.bind().await?.serve().await
    }
}

/// A sink whose log file is reset and whose socket is bound
pub struct BoundSink {
    router: Router,
    listener: TcpListener,
    local_addr: SocketAddr,
}

impl BoundSink {
    /// Address actually bound (resolves port 0)
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Serve requests until the process is terminated
    pub async fn serve(self) -> Result<()> {
        axum::serve(self.listener, self.router)
            .await
            .context("Log sink server error")
    }
}
