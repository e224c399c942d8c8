//! Shared test utilities for LogSink integration tests.

/// Running sink fixtures
pub mod sink {
    use logsink_core::SinkConfig;
    use logsink_gateway::SinkServer;
    use std::net::SocketAddr;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    /// Log file name inside the harness's scratch directory
    const LOG_FILE: &str = "client_debug.log";

    /// A sink bound to a random localhost port, serving in the background
    ///
    /// The server task lives on the test's runtime and stops with it.
    pub struct SinkHarness {
        pub addr: SocketAddr,
        pub base_url: String,
        log_path: PathBuf,
        _dir: TempDir,
    }

    impl SinkHarness {
        /// Start a sink with no previous log file
        pub async fn start() -> Self {
            Self::start_with_previous(None).await
        }

        /// Start a sink over a log file left behind by an earlier run
        pub async fn start_with_previous(previous: Option<&str>) -> Self {
            crate::init_test_tracing();

            let dir = tempfile::tempdir().expect("create temp dir");
            let log_path = dir.path().join(LOG_FILE);
            if let Some(content) = previous {
                std::fs::write(&log_path, content).expect("write previous log");
            }

            let config = SinkConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                log_path: log_path.clone(),
                ..SinkConfig::default()
            };
            let bound = SinkServer::new(config)
                .bind()
                .await
                .expect("bind log sink");
            let addr = bound.local_addr();

            tokio::spawn(async move {
                if let Err(e) = bound.serve().await {
                    tracing::error!("test sink stopped: {:#}", e);
                }
            });

            Self {
                addr,
                base_url: format!("http://{}", addr),
                log_path,
                _dir: dir,
            }
        }

        /// Path of the sink's log file
        pub fn log_path(&self) -> &Path {
            &self.log_path
        }

        /// URL for a path on this sink
        pub fn url(&self, path: &str) -> String {
            format!("{}{}", self.base_url, path)
        }

        /// Current log file content ("" when the file does not exist)
        pub async fn read_log(&self) -> String {
            tokio::fs::read_to_string(&self.log_path)
                .await
                .unwrap_or_default()
        }

        /// POST a JSON value to `/` and return the status
        pub async fn post_json(&self, body: &serde_json::Value) -> reqwest::StatusCode {
            reqwest::Client::new()
                .post(&self.base_url)
                .json(body)
                .send()
                .await
                .expect("send log entry")
                .status()
        }
    }
}

/// Raw HTTP helpers for requests reqwest will not produce
pub mod raw {
    use std::net::SocketAddr;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    /// Send raw request bytes and return the status code of the response
    pub async fn send(addr: SocketAddr, request: &[u8]) -> u16 {
        let mut stream = TcpStream::connect(addr).await.expect("connect to sink");
        stream.write_all(request).await.expect("write request");

        let mut head = Vec::new();
        let mut buf = [0u8; 1024];
        let read = async {
            loop {
                let n = stream.read(&mut buf).await.expect("read response");
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..n]);
                if head.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
        };
        tokio::time::timeout(Duration::from_secs(5), read)
            .await
            .expect("response within timeout");

        let head = String::from_utf8_lossy(&head);
        head.split_whitespace()
            .nth(1)
            .and_then(|code| code.parse().ok())
            .expect("status line")
    }
}

/// Line shape checks
pub mod lines {
    use regex::Regex;

    /// Regex for one rendered line with the given level and message
    pub fn line_regex(level: &str, message: &str) -> Regex {
        Regex::new(&format!(
            r"^\[\d{{4}}-\d{{2}}-\d{{2}} \d{{2}}:\d{{2}}:\d{{2}}\.\d{{3}}\] \[{}\] {}$",
            regex::escape(level),
            regex::escape(message)
        ))
        .expect("valid line regex")
    }

    /// Regex for any well-formed line, capturing level and message
    pub fn any_line_regex() -> Regex {
        Regex::new(r"^\[\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}\.\d{3}\] \[([^\]]*)\] (.*)$")
            .expect("valid line regex")
    }
}

/// Route sink diagnostics to the test output (RUST_LOG controls verbosity)
pub fn init_test_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}
