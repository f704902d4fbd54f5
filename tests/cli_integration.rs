//! Integration tests driving the command-line entry point with a test host.

use fitbit_sync::Host;
use serde_json::json;
use std::fs;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Test host that captures output to in-memory buffers.
#[derive(Default)]
struct TestHost {
    output_buf: Vec<u8>,
    error_buf: Vec<u8>,
    exit_code: Option<i32>,
}

impl TestHost {
    fn output_str(&self) -> String {
        String::from_utf8_lossy(&self.output_buf).into_owned()
    }

    fn error_str(&self) -> String {
        String::from_utf8_lossy(&self.error_buf).into_owned()
    }
}

impl Host for TestHost {
    fn output(&mut self) -> impl std::io::Write {
        &mut self.output_buf
    }

    fn error(&mut self) -> impl std::io::Write {
        &mut self.error_buf
    }

    fn exit(&mut self, code: i32) {
        self.exit_code = Some(code);
    }
}

/// Write a config file pointing at the mock server, plus a seeded credential store
fn workspace(server: &MockServer) -> (TempDir, String, String, String) {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("fitbit-sync.toml");
    fs::write(
        &config,
        format!(
            "api_base_url = \"{uri}\"\ntoken_url = \"{uri}/oauth2/token\"\nrequest_timeout = \"5s\"\n",
            uri = server.uri()
        ),
    )
    .unwrap();

    let credentials = dir.path().join("credentials.json");
    let _ = fs::copy("tests/fixtures/credentials.json", &credentials).unwrap();
    let table = dir.path().join("table.json");

    let as_string = |p: std::path::PathBuf| p.to_string_lossy().into_owned();
    (dir, as_string(config), as_string(credentials), as_string(table))
}

#[tokio::test]
async fn test_verify_match() {
    let mut host = TestHost::default();
    fitbit_sync::run(&mut host, ["fitbit-sync", "verify", "--code", "c0ffee", "--verification-code", "c0ffee"])
        .await
        .unwrap();

    assert_eq!(host.output_str().trim(), "204 No Content");
    assert_eq!(host.exit_code, None);
}

#[tokio::test]
async fn test_verify_mismatch() {
    let mut host = TestHost::default();
    fitbit_sync::run(&mut host, ["fitbit-sync", "verify", "--code", "tea", "--verification-code", "c0ffee"])
        .await
        .unwrap();

    assert_eq!(host.output_str().trim(), "404 Not Found");
    assert_eq!(host.exit_code, Some(1));
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri does not support network operations")]
async fn test_collect_prints_summary() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "new-access",
            "refresh_token": "new-refresh"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/1/user/-/temp/core/date/2024-03-09.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"tempCore": [{"value": 37.456}]})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let (_dir, config, credentials, table) = workspace(&server);
    let mut host = TestHost::default();
    fitbit_sync::run(
        &mut host,
        [
            "fitbit-sync",
            "collect",
            "--config",
            config.as_str(),
            "--credentials",
            credentials.as_str(),
            "--table",
            table.as_str(),
            "--date",
            "2024-03-09",
            "--log-level",
            "none",
        ],
    )
    .await
    .unwrap();

    let output = host.output_str();
    assert!(output.contains("Date:           2024-03-09"), "got: {output}");
    assert!(output.contains("Persisted:      1"), "got: {output}");
    assert_eq!(host.exit_code, None);

    let stored = fs::read_to_string(&table).unwrap();
    assert!(stored.contains("coreTemp#2024-03-09"));
    assert!(stored.contains("37.46"));
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri does not support network operations")]
async fn test_collect_fails_on_rejected_refresh() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "errors": [{"errorType": "invalid_grant", "message": "Refresh token invalid"}],
            "success": false
        })))
        .mount(&server)
        .await;

    let (_dir, config, credentials, table) = workspace(&server);
    let mut host = TestHost::default();
    let result = fitbit_sync::run(
        &mut host,
        [
            "fitbit-sync",
            "collect",
            "--config",
            config.as_str(),
            "--credentials",
            credentials.as_str(),
            "--table",
            table.as_str(),
            "--log-level",
            "none",
        ],
    )
    .await;

    assert!(result.is_err());
    assert_eq!(host.exit_code, Some(1));
    assert!(host.error_str().contains("Collection failed"));
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri does not support network operations")]
async fn test_subscribe_conflict_exits_nonzero() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "new-access",
            "refresh_token": "new-refresh"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/1/user/-/apiSubscriptions/sub-1.json"))
        .respond_with(ResponseTemplate::new(409))
        .expect(1)
        .mount(&server)
        .await;

    let (_dir, config, credentials, _table) = workspace(&server);
    let mut host = TestHost::default();
    fitbit_sync::run(
        &mut host,
        [
            "fitbit-sync",
            "subscribe",
            "--config",
            config.as_str(),
            "--credentials",
            credentials.as_str(),
            "--subscription-id",
            "sub-1",
            "--log-level",
            "none",
        ],
    )
    .await
    .unwrap();

    assert_eq!(host.exit_code, Some(1));
    assert!(host.error_str().contains("already used by another subscriber"));
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri does not support network operations")]
async fn test_subscribe_existing_subscription_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "new-access",
            "refresh_token": "new-refresh"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/1/user/-/apiSubscriptions/sub-1.json"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let (_dir, config, credentials, _table) = workspace(&server);
    let mut host = TestHost::default();
    fitbit_sync::run(
        &mut host,
        [
            "fitbit-sync",
            "subscribe",
            "--config",
            config.as_str(),
            "--credentials",
            credentials.as_str(),
            "--subscription-id",
            "sub-1",
            "--log-level",
            "none",
        ],
    )
    .await
    .unwrap();

    assert_eq!(host.exit_code, None);
    assert!(host.output_str().contains("Subscription 'sub-1' already exists"));
    assert!(host.error_str().is_empty());
}
