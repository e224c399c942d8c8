//! LogSink server
//!
//! Accepts log entries from browser clients on port 3002 and appends
//! them to `client_debug.log` in the working directory.

use logsink_core::{branding, SinkConfig};
use logsink_gateway::SinkServer;
use tracing::info;

/// Initialize tracing for the server's own diagnostics
///
/// Console only: colored, compact, written to stderr through a
/// non-blocking writer so slow terminals never stall request handling.
fn init_tracing() -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let (non_blocking_stderr, guard) = tracing_appender::non_blocking(std::io::stderr());

    // RUST_LOG takes precedence, with sensible defaults for our crates
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("info,logsink_core=debug,logsink_gateway=debug,tower_http=info")
    });

    let console_layer = fmt::layer()
        .with_writer(non_blocking_stderr)
        .with_ansi(true)
        .compact()
        .with_thread_names(false)
        .with_line_number(false)
        .with_file(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .init();

    // Return guard - must be kept alive for the duration of the program
    guard
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _guard = init_tracing();

    info!("{} v{}", branding::DISPLAY_NAME, env!("CARGO_PKG_VERSION"));

    SinkServer::new(SinkConfig::default()).run().await
}
