#![allow(clippy::unwrap_used)]
//! CLI smoke tests to verify basic command functionality.
//!
//! Every test points `XDG_CONFIG_HOME` at a fresh temp directory so the
//! user's real configuration is never read.

mod common;

use assert_cmd::Command;
use common::openai_sse;
use mockito::{Matcher, Server};
use predicates::prelude::*;
use serde_json::json;
use std::fs;
use tempfile::TempDir;

#[allow(deprecated)]
fn lu(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("lu").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env_remove("LU_LOG")
        .env("NO_COLOR", "1");
    cmd
}

fn write_config(config_home: &TempDir, contents: &str) {
    let dir = config_home.path().join("lu");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.toml"), contents).unwrap();
}

#[test]
fn test_help_displays_usage() {
    let home = TempDir::new().unwrap();
    lu(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("translation assistant"))
        .stdout(predicate::str::contains("--target"))
        .stdout(predicate::str::contains("--support"))
        .stdout(predicate::str::contains("--provider"));
}

#[test]
fn test_version_displays_version() {
    let home = TempDir::new().unwrap();
    lu(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_support_lists_languages() {
    let home = TempDir::new().unwrap();
    lu(&home)
        .arg("--support")
        .assert()
        .success()
        .stdout(predicate::str::contains("zh-cn"))
        .stdout(predicate::str::contains("日本語"))
        .stdout(predicate::str::contains("ar"));
}

#[test]
fn test_support_uses_configured_primary_language() {
    let home = TempDir::new().unwrap();
    write_config(&home, "[lu]\nprimary_language = \"en\"\n");

    lu(&home)
        .arg("-s")
        .assert()
        .success()
        .stdout(predicate::str::contains("Supported languages"));
}

#[test]
fn test_invalid_target_language() {
    let home = TempDir::new().unwrap();
    lu(&home)
        .args(["-t", "invalid_lang_xyz", "hello"])
        .assert()
        .code(exitcode::USAGE)
        .stderr(predicate::str::contains("Unsupported language"));
}

#[test]
fn test_trans_help() {
    let home = TempDir::new().unwrap();
    lu(&home)
        .args(["trans", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--target"));
}

#[test]
fn test_translate_without_config_points_to_init() {
    let home = TempDir::new().unwrap();
    lu(&home)
        .arg("hello")
        .assert()
        .code(exitcode::CONFIG)
        .stderr(predicate::str::contains("lu init"));
}

#[test]
fn test_config_without_file_points_to_init() {
    let home = TempDir::new().unwrap();
    lu(&home)
        .arg("config")
        .assert()
        .code(exitcode::CONFIG)
        .stderr(predicate::str::contains("lu init"));
}

#[test]
fn test_config_never_prints_api_key() {
    let home = TempDir::new().unwrap();
    write_config(
        &home,
        r#"
[lu]
provider = "dashscope"
primary_language = "en"

[models.dashscope]
model = "qwen-plus"
api_key = "sk-super-secret"
"#,
    );

    lu(&home)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("dashscope"))
        .stdout(predicate::str::contains("qwen-plus"))
        .stdout(predicate::str::contains("API key: configured"))
        .stdout(predicate::str::contains("sk-super-secret").not());
}

#[test]
fn test_missing_api_key_is_a_config_error() {
    let home = TempDir::new().unwrap();
    write_config(&home, "[lu]\nprovider = \"openai\"\nprimary_language = \"en\"\n");

    lu(&home)
        .arg("hello")
        .assert()
        .code(exitcode::CONFIG)
        .stderr(predicate::str::contains("API key not configured"));
}

#[test]
fn test_unknown_provider_override_is_rejected() {
    let home = TempDir::new().unwrap();
    write_config(
        &home,
        "[lu]\nprovider = \"openai\"\n\n[models.openai]\napi_key = \"sk-test\"\n",
    );

    lu(&home)
        .args(["--provider", "mystery", "hello"])
        .assert()
        .code(exitcode::CONFIG)
        .stderr(predicate::str::contains("Unknown provider 'mystery'"));
}

#[test]
fn test_translation_streams_to_stdout() {
    let home = TempDir::new().unwrap();
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer sk-local")
        .match_body(Matcher::AllOf(vec![
            Matcher::PartialJson(json!({ "model": "local-model", "stream": true })),
            Matcher::Regex("Hello world".to_string()),
            Matcher::Regex("Japanese".to_string()),
        ]))
        .with_status(200)
        .with_header("content-type", "text/event-stream")
        .with_body(openai_sse(&["こんにちは", "、", "世界"]))
        .create();
    write_config(
        &home,
        &format!(
            "[lu]\nprovider = \"custom\"\nprimary_language = \"en\"\n\n\
             [models.custom]\nmodel = \"local-model\"\napi_key = \"sk-local\"\nbase_url = \"{}\"\n",
            server.url()
        ),
    );

    lu(&home)
        .args(["-q", "-t", "ja", "Hello", "world"])
        .assert()
        .success()
        .stdout("こんにちは、世界\n");

    mock.assert();
}

#[test]
fn test_translation_reads_piped_stdin() {
    let home = TempDir::new().unwrap();
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::Regex("hello".to_string()))
        .with_status(200)
        .with_header("content-type", "text/event-stream")
        .with_body(openai_sse(&["你好"]))
        .create();
    write_config(
        &home,
        &format!(
            "[lu]\nprovider = \"custom\"\nprimary_language = \"zh-cn\"\n\n\
             [models.custom]\napi_key = \"sk-local\"\nbase_url = \"{}\"\n",
            server.url()
        ),
    );

    lu(&home)
        .args(["-q", "trans", "-t", "zh-cn"])
        .write_stdin("hello\n")
        .assert()
        .success()
        .stdout("你好\n");

    mock.assert();
}

#[test]
fn test_provider_failure_exits_unavailable() {
    let home = TempDir::new().unwrap();
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/chat/completions")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error":{"message":"bad key"}}"#)
        .create();
    write_config(
        &home,
        &format!(
            "[lu]\nprovider = \"custom\"\nprimary_language = \"en\"\n\n\
             [models.custom]\napi_key = \"sk-wrong\"\nbase_url = \"{}\"\n",
            server.url()
        ),
    );

    lu(&home)
        .args(["-t", "ja", "hello"])
        .assert()
        .code(exitcode::UNAVAILABLE)
        .stderr(predicate::str::contains("❌ Error:"))
        .stderr(predicate::str::contains("401"));

    mock.assert();
}
