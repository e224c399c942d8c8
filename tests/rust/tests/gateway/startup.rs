//! Startup behavior tests

use logsink_core::SinkConfig;
use logsink_gateway::SinkServer;
use serde_json::json;
use tests::sink::SinkHarness;

#[tokio::test]
async fn test_previous_log_is_removed_before_serving() {
    let sink = SinkHarness::start_with_previous(Some(
        "[2024-12-24 18:00:00.000] [INFO] from the last run\n",
    ))
    .await;

    assert!(!sink.log_path().exists());
}

#[tokio::test]
async fn test_first_entry_starts_a_fresh_file() {
    let sink = SinkHarness::start_with_previous(Some("stale\nstale\n")).await;

    sink.post_json(&json!({"message": "fresh"})).await;

    let content = sink.read_log().await;
    assert_eq!(content.lines().count(), 1);
    assert!(!content.contains("stale"));
    assert!(content.ends_with("] [INFO] fresh\n"));
}

#[tokio::test]
async fn test_port_in_use_is_fatal() {
    let sink = SinkHarness::start().await;
    let dir = tempfile::tempdir().unwrap();

    let config = SinkConfig {
        host: "127.0.0.1".to_string(),
        port: sink.addr.port(),
        log_path: dir.path().join("client_debug.log"),
        ..SinkConfig::default()
    };

    let err = SinkServer::new(config).bind().await.err().expect("bind must fail");
    assert!(format!("{:#}", err).contains("Failed to bind"));
}
