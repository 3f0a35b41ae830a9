//! End-to-end CLI tests against a mocked results server.

use assert_cmd::Command;
use chrono::{Duration, SecondsFormat, Utc};
use predicates::prelude::*;
use serde_json::Value;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SCENARIO_LISTING: &str = concat!(
    r#"{"name":"T1","clients":["geth"],"start":"2024-01-01","passes":10,"fails":0,"fileName":"1-t1.json"}"#,
    "\n",
    r#"{"name":"T1","clients":["geth"],"start":"2024-01-02","passes":8,"fails":2,"fileName":"2-t1.json"}"#,
    "\n",
);

fn hiveview() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("hiveview").unwrap();
    cmd.env_remove("HIVEVIEW_URL").env("RUST_LOG", "warn");
    cmd
}

/// Run the binary off the async runtime so the mock server keeps serving.
async fn run_cli(args: Vec<String>) -> assert_cmd::assert::Assert {
    tokio::task::spawn_blocking(move || hiveview().args(&args).assert())
        .await
        .expect("cli task panicked")
}

fn args(server: &MockServer, rest: &[&str]) -> Vec<String> {
    let mut v = vec![
        "--url".to_string(),
        server.uri(),
        "--color".to_string(),
        "never".to_string(),
    ];
    v.extend(rest.iter().map(|s| s.to_string()));
    v
}

async fn mount_discovery(server: &MockServer, names: &[&str]) {
    let entries: Vec<Value> = names
        .iter()
        .map(|n| serde_json::json!({ "name": n, "address": format!("{}/{}", server.uri(), n) }))
        .collect();
    Mock::given(method("GET"))
        .and(path("/discovery.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(entries))
        .mount(server)
        .await;
}

async fn mount_listing(server: &MockServer, name: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/{}/listing.jsonl", name)))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

#[test]
fn test_version() {
    hiveview()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_matrix_shows_latest_run_per_cell() {
    let server = MockServer::start().await;
    mount_discovery(&server, &["smoke"]).await;
    mount_listing(&server, "smoke", SCENARIO_LISTING).await;

    run_cli(args(&server, &["matrix", "smoke"]))
        .await
        .success()
        .stdout(predicate::str::contains("T1"))
        .stdout(predicate::str::contains("geth"))
        .stdout(predicate::str::contains("partial"))
        .stdout(predicate::str::contains("8/10 (80%)"))
        .stdout(predicate::str::contains("↓"))
        .stdout(predicate::str::contains("10/10").not());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_matrix_json_with_details() {
    let server = MockServer::start().await;
    mount_discovery(&server, &["smoke"]).await;
    mount_listing(&server, "smoke", SCENARIO_LISTING).await;

    let assert = run_cli(args(
        &server,
        &["--format", "json", "matrix", "smoke", "--details", "0"],
    ))
    .await
    .success();

    let out: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    let card = &out["groups"][0]["cards"][0];
    assert_eq!(out["groups"][0]["key"], "T1");
    assert_eq!(card["label"], "geth");
    assert_eq!(card["tier"], "partial_fail");
    assert_eq!(card["trend"], "down");
    assert_eq!(card["run"]["fileName"], "2-t1.json");
    assert_eq!(card["history"].as_array().unwrap().len(), 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_matrix_unknown_directory_is_not_found() {
    let server = MockServer::start().await;
    mount_discovery(&server, &["smoke"]).await;

    run_cli(args(&server, &["matrix", "nope"]))
        .await
        .code(1);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_matrix_empty_listing_is_friendly() {
    let server = MockServer::start().await;
    mount_discovery(&server, &["smoke"]).await;
    mount_listing(&server, "smoke", "\n").await;

    run_cli(args(&server, &["matrix", "smoke"]))
        .await
        .code(1)
        .stdout(predicate::str::contains("no runs found in smoke"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_directories_active_first_and_failures_excluded() {
    let server = MockServer::start().await;
    mount_discovery(&server, &["stale", "broken", "fresh"]).await;

    let now = Utc::now();
    let fresh = format!(
        r#"{{"name":"T1","clients":["geth"],"start":"{}","passes":1,"fails":0}}"#,
        (now - Duration::days(1)).to_rfc3339_opts(SecondsFormat::Secs, true)
    );
    mount_listing(&server, "fresh", &fresh).await;
    mount_listing(&server, "stale", SCENARIO_LISTING).await;
    Mock::given(method("GET"))
        .and(path("/broken/listing.jsonl"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let assert = run_cli(args(&server, &["--format", "json", "directories"]))
        .await
        .success();

    let out: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    let names: Vec<&str> = out
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["fresh", "stale"]);
    assert_eq!(out[0]["inactive"], false);
    assert_eq!(out[1]["inactive"], true);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_log_range_excerpt() {
    let server = MockServer::start().await;
    mount_discovery(&server, &["smoke"]).await;
    Mock::given(method("GET"))
        .and(path("/smoke/results/geth.log"))
        .and(header("range", "bytes=10-14"))
        .respond_with(
            ResponseTemplate::new(206)
                .set_body_string("BLOCK")
                .insert_header("content-range", "bytes 10-14/100"),
        )
        .mount(&server)
        .await;

    run_cli(args(
        &server,
        &["log", "smoke", "geth.log", "--begin", "10", "--end", "15"],
    ))
    .await
    .success()
    .stdout(predicate::str::contains("BLOCK"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_log_inverted_range_is_config_error() {
    let server = MockServer::start().await;
    mount_discovery(&server, &["smoke"]).await;

    run_cli(args(
        &server,
        &["log", "smoke", "geth.log", "--begin", "15", "--end", "10"],
    ))
    .await
    .code(2);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_history_trend_rows() {
    let server = MockServer::start().await;
    mount_discovery(&server, &["smoke"]).await;
    mount_listing(&server, "smoke", SCENARIO_LISTING).await;

    let assert = run_cli(args(
        &server,
        &["--format", "json", "history", "smoke", "T1", "geth"],
    ))
    .await
    .success();

    let rows: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(rows[0]["trend"], "down");
    assert_eq!(rows[1]["trend"], "flat");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_matrix_group_selection() {
    let server = MockServer::start().await;
    mount_discovery(&server, &["smoke"]).await;
    mount_listing(&server, "smoke", SCENARIO_LISTING).await;

    run_cli(args(
        &server,
        &["matrix", "smoke", "--group-by", "client", "--group", "geth"],
    ))
    .await
    .success()
    .stdout(predicate::str::contains("T1"));

    run_cli(args(&server, &["matrix", "smoke", "--group", "T9"]))
        .await
        .code(1)
        .stdout(predicate::str::contains("group not found: T9"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_matrix_not_found_is_json_under_json_format() {
    let server = MockServer::start().await;
    mount_discovery(&server, &["smoke", "empty"]).await;
    mount_listing(&server, "smoke", SCENARIO_LISTING).await;
    mount_listing(&server, "empty", "").await;

    let cases: [(&[&str], &str); 3] = [
        (&["matrix", "empty"], "no runs found in empty"),
        (&["matrix", "smoke", "--group", "T9"], "group not found: T9"),
        (&["matrix", "smoke", "--details", "7"], "card 7 not found"),
    ];
    for (rest, expected) in cases {
        let mut argv = vec!["--format", "json"];
        argv.extend_from_slice(rest);
        let assert = run_cli(args(&server, &argv)).await.code(1);

        let out: Value = serde_json::from_slice(&assert.get_output().stdout)
            .unwrap_or_else(|e| panic!("{rest:?} did not print JSON: {e}"));
        assert_eq!(out["error"], "not_found");
        assert!(
            out["message"].as_str().unwrap().contains(expected),
            "{rest:?}: {out}"
        );
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_overflowing_listing_counts_are_a_data_error() {
    let server = MockServer::start().await;
    mount_discovery(&server, &["smoke"]).await;
    mount_listing(
        &server,
        "smoke",
        r#"{"name":"t","clients":["geth"],"start":"2024-01-01","passes":18446744073709551615,"fails":1}"#,
    )
    .await;

    run_cli(args(&server, &["matrix", "smoke"]))
        .await
        .code(3)
        .stderr(predicate::str::contains("overflows"));
}
