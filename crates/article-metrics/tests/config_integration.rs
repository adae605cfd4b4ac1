//! Configuration integration tests.
//!
//! These tests verify config discovery, format parsing, and precedence
//! from an end-to-end perspective using the compiled binary. Tests use
//! `info --json` to assert actual config values, not just process success.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Returns a Command configured to run our binary.
#[allow(deprecated)]
fn cmd() -> Command {
    Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap()
}

fn info_output(mut cmd: Command, dir: &Path) -> Value {
    let output = cmd
        .args(["-C", dir.to_str().unwrap(), "info", "--json"])
        .output()
        .expect("failed to run command");
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("invalid JSON output")
}

/// Run `info --json` from a directory and parse the JSON output.
fn info_json(dir: &Path) -> Value {
    info_output(cmd(), dir)
}

// =============================================================================
// Defaults
// =============================================================================

#[test]
fn runs_without_config_file() {
    let tmp = TempDir::new().unwrap();
    let json = info_json(tmp.path());

    let config = &json["config"];
    assert_eq!(config["log_level"], "info", "should use default log level");
    assert!(
        config["config_file"].is_null(),
        "no config file should be reported"
    );
    assert_eq!(config["positive_words"], "MasterDictionary/positive-words.txt");
    assert_eq!(config["negative_words"], "MasterDictionary/negative-words.txt");
    assert_eq!(config["stopwords_dir"], "StopWords");
    assert_eq!(config["articles_dir"], "articles");
    assert_eq!(config["id_column"], "URL_ID");
    assert_eq!(config["url_column"], "URL");
    assert_eq!(config["max_input_bytes"], 5 * 1024 * 1024);
}

// =============================================================================
// Config File Discovery
// =============================================================================

#[test]
fn discovers_dotfile_config_in_current_dir() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".article-metrics.toml"),
        "articles_dir = \"corpus\"\n",
    )
    .unwrap();

    let json = info_json(tmp.path());

    assert_eq!(json["config"]["articles_dir"], "corpus");
    let reported = json["config"]["config_file"].as_str().unwrap();
    assert!(
        reported.ends_with(".article-metrics.toml"),
        "should report dotfile: {reported}"
    );
}

#[test]
fn discovers_regular_config_in_current_dir() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("article-metrics.toml"),
        "id_column = \"ID\"\nurl_column = \"LINK\"\n",
    )
    .unwrap();

    let json = info_json(tmp.path());

    assert_eq!(json["config"]["id_column"], "ID");
    assert_eq!(json["config"]["url_column"], "LINK");
    let reported = json["config"]["config_file"].as_str().unwrap();
    assert!(
        reported.ends_with("article-metrics.toml"),
        "should report regular config: {reported}"
    );
}

#[test]
fn discovers_config_in_parent_directory() {
    let tmp = TempDir::new().unwrap();
    let sub_dir = tmp.path().join("batches").join("2024");
    fs::create_dir_all(&sub_dir).unwrap();
    fs::write(
        tmp.path().join(".article-metrics.toml"),
        "stopwords_dir = \"lists/stop\"\n",
    )
    .unwrap();

    let json = info_json(&sub_dir);

    assert_eq!(json["config"]["stopwords_dir"], "lists/stop");
}

#[test]
fn regular_name_overrides_dotfile() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".article-metrics.toml"),
        "articles_dir = \"hidden\"\n",
    )
    .unwrap();
    fs::write(
        tmp.path().join("article-metrics.toml"),
        "articles_dir = \"visible\"\n",
    )
    .unwrap();

    let json = info_json(tmp.path());

    assert_eq!(json["config"]["articles_dir"], "visible");
}

#[test]
fn closer_config_takes_precedence() {
    let tmp = TempDir::new().unwrap();
    let sub_dir = tmp.path().join("project");
    fs::create_dir_all(&sub_dir).unwrap();
    fs::write(tmp.path().join(".article-metrics.toml"), r#"log_level = "error""#).unwrap();
    fs::write(sub_dir.join(".article-metrics.toml"), r#"log_level = "debug""#).unwrap();

    let json = info_json(&sub_dir);

    assert_eq!(
        json["config"]["log_level"], "debug",
        "closer config should win"
    );
}

// =============================================================================
// Formats
// =============================================================================

#[test]
fn parses_yaml_config() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".article-metrics.yaml"),
        "fetch_timeout_secs: 30\n",
    )
    .unwrap();

    let json = info_json(tmp.path());
    assert_eq!(json["config"]["fetch_timeout_secs"], 30);
}

#[test]
fn parses_yml_config() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".article-metrics.yml"),
        "sentiment_lexicon: extra.tsv\n",
    )
    .unwrap();

    let json = info_json(tmp.path());
    assert_eq!(json["config"]["sentiment_lexicon"], "extra.tsv");
}

#[test]
fn parses_json_config() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".article-metrics.json"),
        r#"{"positive_words": "pos.txt", "negative_words": "neg.txt"}"#,
    )
    .unwrap();

    let json = info_json(tmp.path());
    assert_eq!(json["config"]["positive_words"], "pos.txt");
    assert_eq!(json["config"]["negative_words"], "neg.txt");
}

#[test]
fn disabling_input_limit_is_reported() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".article-metrics.toml"),
        "disable_input_limit = true\n",
    )
    .unwrap();

    let json = info_json(tmp.path());
    assert!(json["config"]["max_input_bytes"].is_null());
}

// =============================================================================
// Explicit Config & Environment
// =============================================================================

#[test]
fn explicit_config_overrides_discovered() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".article-metrics.toml"),
        "articles_dir = \"discovered\"\n",
    )
    .unwrap();
    let explicit = tmp.path().join("override.toml");
    fs::write(&explicit, "articles_dir = \"explicit\"\n").unwrap();

    let mut command = cmd();
    command.args(["--config", explicit.to_str().unwrap()]);
    let json = info_output(command, tmp.path());

    assert_eq!(json["config"]["articles_dir"], "explicit");
    let reported = json["config"]["config_file"].as_str().unwrap();
    assert!(
        reported.ends_with("override.toml"),
        "--config path should be reported: {reported}"
    );
}

#[test]
fn env_var_overrides_config_file() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".article-metrics.toml"),
        "articles_dir = \"from-file\"\n",
    )
    .unwrap();

    let mut command = cmd();
    command.env("ARTICLE_METRICS_ARTICLES_DIR", "from-env");
    let json = info_output(command, tmp.path());

    assert_eq!(json["config"]["articles_dir"], "from-env");
}

// =============================================================================
// Error Cases
// =============================================================================

#[test]
fn invalid_toml_config_shows_error() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".article-metrics.toml"),
        "this is not valid toml [[[",
    )
    .unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "info"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration"));
}

#[test]
fn invalid_json_config_shows_error() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".article-metrics.json"), "{not valid json}").unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "info"])
        .assert()
        .failure();
}

#[test]
fn unknown_config_field_is_ignored() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".article-metrics.toml"),
        "id_column = \"ID\"\nworkbook_sheet = \"Sheet1\"\n",
    )
    .unwrap();

    let json = info_json(tmp.path());
    assert_eq!(json["config"]["id_column"], "ID");
}

// =============================================================================
// Boundary Marker Tests
// =============================================================================

#[test]
fn git_boundary_stops_config_search() {
    let tmp = TempDir::new().unwrap();
    let parent = tmp.path().join("parent");
    let repo = parent.join("repo");
    let src = repo.join("data");
    fs::create_dir_all(&src).unwrap();
    fs::write(parent.join(".article-metrics.toml"), r#"log_level = "error""#).unwrap();
    fs::create_dir(repo.join(".git")).unwrap();

    let json = info_json(&src);

    assert_eq!(json["config"]["log_level"], "info");
    assert!(json["config"]["config_file"].is_null());
}

#[test]
fn config_in_same_dir_as_git_is_found() {
    let tmp = TempDir::new().unwrap();
    let repo = tmp.path().join("repo");
    let src = repo.join("data");
    fs::create_dir_all(&src).unwrap();
    fs::create_dir(repo.join(".git")).unwrap();
    fs::write(repo.join(".article-metrics.toml"), r#"log_level = "debug""#).unwrap();

    let json = info_json(&src);

    assert_eq!(json["config"]["log_level"], "debug");
    assert!(json["config"]["config_file"].as_str().is_some());
}
