//! End-to-end tests for the mwapi binary against a mock API.

mod common;

use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_string, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{run_cli_with_env, run_cli_with_env_success};

const OFFLINE_API: &str = "https://test.wikipedia.org/w/api.php";

fn api_url(server: &MockServer) -> String {
    format!("http://127.0.0.1:{}/w/api.php", server.address().port())
}

#[test]
fn page_without_check_needs_no_network() {
    let home = TempDir::new().unwrap();
    let stdout = run_cli_with_env_success(
        &["page", "Sandbox test", "--ns", "2"],
        home.path(),
        OFFLINE_API,
    );

    assert!(stdout.contains("User:Sandbox test"));
    assert!(stdout.contains("https://test.wikipedia.org/wiki/User:Sandbox_test"));
    assert!(!stdout.contains("Exists"));
}

#[test]
fn missing_credentials_are_reported() {
    let home = TempDir::new().unwrap();
    let mut cmd = std::process::Command::new(env!("CARGO_BIN_EXE_mwapi"));
    for (key, _) in std::env::vars() {
        if key.starts_with("MWAPI_") {
            cmd.env_remove(key);
        }
    }
    let output = cmd
        .args(["--api-url", OFFLINE_API, "page", "Sandbox"])
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join("config"))
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("MWAPI_CLIENT_KEY"));
}

#[test]
fn config_init_then_path() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("mwapi.json");
    let config_arg = config.to_str().unwrap();

    run_cli_with_env_success(&["--config", config_arg, "config", "init"], home.path(), OFFLINE_API);
    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&config).unwrap()).unwrap();
    assert_eq!(written["api_url"], OFFLINE_API);
    assert_eq!(written["client_key"], "client-key");

    let stdout =
        run_cli_with_env_success(&["--config", config_arg, "config", "show"], home.path(), OFFLINE_API);
    assert!(stdout.contains("[REDACTED]"));
    assert!(!stdout.contains("client-secret"));
}

#[test]
fn config_init_rewrites_malformed_file() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("mwapi.json");
    std::fs::write(&config, "{ not json").unwrap();

    run_cli_with_env_success(
        &["--config", config.to_str().unwrap(), "config", "init"],
        home.path(),
        OFFLINE_API,
    );

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&config).unwrap()).unwrap();
    assert_eq!(written["api_url"], OFFLINE_API);
}

#[tokio::test(flavor = "multi_thread")]
async fn token_command_prints_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("meta", "tokens"))
        .and(query_param("type", "patrol"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "batchcomplete": "",
            "query": {"tokens": {"patroltoken": "patrol-token+\\"}}
        })))
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    let stdout =
        run_cli_with_env_success(&["token", "--type", "patrol"], home.path(), &api_url(&server));

    assert_eq!(stdout.trim(), "patrol-token+\\");
}

#[tokio::test(flavor = "multi_thread")]
async fn post_command_sends_token_and_prints_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("meta", "tokens"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "query": {"tokens": {"csrftoken": "csrf-token"}}
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/w/api.php"))
        .and(query_param("action", "purge"))
        .and(query_param("titles", "Sandbox"))
        .and(body_string("token=csrf-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "batchcomplete": "",
            "purge": [{"ns": 0, "title": "Sandbox", "purged": ""}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    let stdout = run_cli_with_env_success(
        &["post", "action=purge", "titles=Sandbox"],
        home.path(),
        &api_url(&server),
    );

    let printed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(printed["purge"][0]["title"], "Sandbox");
}

#[tokio::test(flavor = "multi_thread")]
async fn api_error_fails_and_writes_diagnostics() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": {"code": "unknown_action", "info": "Unrecognized value for parameter \"action\": nope."}
        })))
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    let output = run_cli_with_env(&["get", "action=nope"], home.path(), &api_url(&server));

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown_action"));

    let recorded = std::fs::read_to_string(home.path().join("logs").join("APIError.json")).unwrap();
    assert!(recorded.contains("unknown_action"));
}

#[test]
fn local_log_appends_line() {
    let home = TempDir::new().unwrap();
    run_cli_with_env_success(
        &["log-local", "Sandbox", "reviewed.txt"],
        home.path(),
        OFFLINE_API,
    );

    let written = std::fs::read_to_string(home.path().join("logs").join("reviewed.txt")).unwrap();
    assert_eq!(written, "Sandbox <https://test.wikipedia.org/wiki/Sandbox>\n");
}
