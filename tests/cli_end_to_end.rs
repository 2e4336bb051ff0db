use assert_cmd::Command;
use httpmock::MockServer;
use predicates::prelude::*;
use predicates::str::contains;
use serde_json::json;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".yaml")
        .tempfile()
        .expect("tmp config");
    file.write_all(contents.as_bytes()).expect("write config");
    file
}

fn ucli() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("ucli"));
    cmd.env_remove("UCLI_CONFIG").env_remove("RUST_LOG");
    cmd
}

#[test]
fn get_prints_the_body_verbatim() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("GET")
            .path("/users/42")
            .query_param("fields", "name")
            .query_param("limit", "10");
        then.status(200).body(r#"{"id":42,"name":"John"}"#);
    });

    let config = config_file(&format!("url: {}\n", server.base_url()));
    ucli()
        .arg("get")
        .arg("users")
        .arg("42")
        .arg("--fields=name")
        .arg("--limit")
        .arg("10")
        .arg("--config")
        .arg(config.path())
        .assert()
        .success()
        .stdout(r#"{"id":42,"name":"John"}"#.to_string() + "\n");

    mock.assert();
}

#[test]
fn create_sends_flags_as_json() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("POST")
            .path("/users")
            .header("content-type", "application/json")
            .header("x-client", "ucli-tests")
            .json_body(json!({"name": "John", "age": 30, "active": false}));
        then.status(201);
    });

    let config = config_file(&format!(
        "url: {}\nheaders:\n  X-Client: ucli-tests\n",
        server.base_url()
    ));
    ucli()
        .arg(format!("--config={}", config.path().display()))
        .args(["create", "users", "--name=John", "--age", "30", "--active", "false"])
        .assert()
        .success()
        .stdout("[201] Resource created successfully.\n");

    mock.assert();
}

#[test]
fn delete_with_basic_auth_reports_no_content() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("DELETE")
            .path("/users/7")
            .header("authorization", "Basic YWxpY2U6c2VjcmV0");
        then.status(204);
    });

    let config = config_file(&format!(
        "url: {}\nusername: alice\npassword: secret\n",
        server.base_url()
    ));
    ucli()
        .args(["drop", "users", "7", "--force", "true", "--config"])
        .arg(config.path())
        .assert()
        .success()
        .stdout(contains("[204] Operation completed successfully, no content to display."));

    mock.assert();
}

#[test]
fn reads_default_configuration_from_working_directory() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("PUT").path("/settings/theme");
        then.status(200).body("ok");
    });

    let dir = TempDir::new().expect("tmp dir");
    std::fs::write(
        dir.path().join("configuration.yaml"),
        format!("url: {}\n", server.base_url()),
    )
    .expect("write config");

    ucli()
        .current_dir(dir.path())
        .args(["set", "settings", "theme", "--value", "dark"])
        .assert()
        .success()
        .stdout("ok\n");

    mock.assert();
}

#[test]
fn unknown_operation_sends_nothing() {
    // nothing listens on the discard port, so any request would fail the run
    let config = config_file("url: http://127.0.0.1:9\n");
    ucli()
        .args(["frobnicate", "users", "--config"])
        .arg(config.path())
        .assert()
        .success()
        .stdout(contains("Unknown operation: frobnicate"));
}

#[test]
fn missing_operation_exits_with_one() {
    let config = config_file("url: http://127.0.0.1:9\n");
    ucli()
        .arg("--config")
        .arg(config.path())
        .assert()
        .code(1)
        .stdout(contains("You need to provide an operation"));
}

#[test]
fn config_flag_without_value_exits_with_one() {
    ucli()
        .args(["get", "users", "--config"])
        .assert()
        .code(1)
        .stdout(contains("Missing value for --config"));
}

#[test]
fn missing_configuration_is_fatal() {
    let dir = TempDir::new().expect("tmp dir");
    ucli()
        .current_dir(dir.path())
        .args(["get", "users"])
        .assert()
        .failure()
        .stderr(contains("Error loading configuration"));
}

#[test]
fn unreadable_token_file_is_fatal() {
    let config = config_file("url: http://127.0.0.1:9\ntoken: /nonexistent/ucli/token\n");
    ucli()
        .args(["get", "users", "--config"])
        .arg(config.path())
        .assert()
        .failure()
        .stderr(contains("Error reading token file"));
}

#[test]
fn connection_failure_is_fatal() {
    let config = config_file("url: http://127.0.0.1:9\n");
    ucli()
        .args(["list", "users", "--config"])
        .arg(config.path())
        .assert()
        .code(1)
        .stderr(contains("Request failed"));
}

#[test]
fn debug_output_goes_to_stderr() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET").path("/ping");
        then.status(200).body("pong");
    });

    let config = config_file(&format!("url: {}\n", server.base_url()));
    ucli()
        .args(["get", "ping", "--ucli-debug", "--config"])
        .arg(config.path())
        .assert()
        .success()
        .stdout("pong\n")
        .stderr(contains("Endpoint: /ping").and(contains("Response Status: 200")));
}

#[test]
fn last_config_flag_wins() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("GET").path("/ping");
        then.status(200).body("pong");
    });

    let config = config_file(&format!("url: {}\n", server.base_url()));
    ucli()
        .args(["--config", "/nonexistent/ucli/first.yaml", "get", "ping", "--config"])
        .arg(config.path())
        .assert()
        .success()
        .stdout("pong\n");

    mock.assert();
}

#[test]
fn last_debug_flag_wins() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("GET").path("/ping");
        then.status(200).body("pong");
    });

    let config = config_file(&format!("url: {}\n", server.base_url()));
    ucli()
        .args(["--ucli-debug", "get", "ping", "--ucli-debug=false", "--config"])
        .arg(config.path())
        .assert()
        .success()
        .stdout("pong\n")
        .stderr(contains("Endpoint:").not());

    mock.assert();
}

#[test]
fn binary_body_is_written_untouched() {
    let raw = vec![0x68, 0xff, 0xfe, 0x69];
    let server = MockServer::start();
    let served = raw.clone();
    let mock = server.mock(move |when, then| {
        when.method("GET").path("/blob");
        then.status(200)
            .header("content-type", "application/octet-stream")
            .body(served);
    });

    let mut expected = raw;
    expected.push(b'\n');

    let config = config_file(&format!("url: {}\n", server.base_url()));
    ucli()
        .args(["get", "blob", "--config"])
        .arg(config.path())
        .assert()
        .success()
        .stdout(expected);

    mock.assert();
}
