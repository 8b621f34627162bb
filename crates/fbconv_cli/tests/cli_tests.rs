//! Integration tests for the fbconv binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn fbconv() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_fbconv"));
    cmd.env_remove("FBCONV_CONFIG").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_dump_config_reads_json_from_stdin() {
    let config = r##"{"document": {"title_format": "#title [#lang]"}}"##;

    fbconv()
        .args(["--config", "-", "dump-config"])
        .write_stdin(config)
        .assert()
        .success()
        .stdout(predicate::str::contains(r##""title_format": "#title [#lang]""##));
}

#[test]
fn test_malformed_stdin_config_is_a_config_error() {
    fbconv()
        .args(["--config", "-", "dump-config"])
        .write_stdin("title_format: yaml is not accepted on stdin")
        .assert()
        .code(3);
}

#[test]
fn test_dump_config_writes_destination_file() {
    let dir = tempdir().unwrap();
    let dest = dir.path().join("effective.json");
    let config = r#"{"overwrites": [
        {"name": "a/b.fb2", "meta": {"title": "first"}},
        {"name": "a\\b.fb2", "meta": {"title": "second"}}
    ]}"#;

    fbconv()
        .args(["--config", "-", "dump-config"])
        .arg(&dest)
        .write_stdin(config)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written = fs::read_to_string(&dest).unwrap();
    assert!(written.contains("first"));
    assert!(!written.contains("second"));
}

#[test]
fn test_oversized_padding_is_rejected() {
    fbconv()
        .args(["--config", "-", "dump-config"])
        .write_stdin(r#"{"document": {"series_number_positions": 70000}}"#)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("series_number_positions"));
}
