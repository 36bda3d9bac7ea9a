//! Integration tests for init and config commands

#![allow(deprecated)]

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

mod common;
use common::notepin_cmd;

#[test]
fn test_init_creates_config() {
    let temp = TempDir::new().unwrap();

    notepin_cmd()
        .arg("init")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized notepin workspace"));

    assert!(temp.path().join(".notepin").is_dir());
    assert!(temp.path().join(".notepin/state").is_dir());

    let content = fs::read_to_string(temp.path().join(".notepin/config.toml")).unwrap();
    assert!(content.contains("server_url = \"http://127.0.0.1:5000\""));
    assert!(content.contains("debounce_ms = 600"));
}

#[test]
fn test_init_with_server_and_token() {
    let temp = TempDir::new().unwrap();

    notepin_cmd()
        .arg("init")
        .arg(temp.path())
        .arg("--server")
        .arg("https://notes.example.com/")
        .arg("--csrf-token")
        .arg("abc123")
        .assert()
        .success()
        .stdout(predicate::str::contains("Server: https://notes.example.com"));

    let content = fs::read_to_string(temp.path().join(".notepin/config.toml")).unwrap();
    assert!(content.contains("server_url = \"https://notes.example.com\""));
    assert!(content.contains("csrf_token = \"abc123\""));
}

#[test]
fn test_init_already_initialized_fails() {
    let temp = TempDir::new().unwrap();

    notepin_cmd().arg("init").arg(temp.path()).assert().success();
    notepin_cmd().arg("init").arg(temp.path()).assert().failure();
}

#[test]
fn test_config_get_and_set() {
    let temp = TempDir::new().unwrap();
    notepin_cmd().arg("init").arg(temp.path()).assert().success();

    notepin_cmd()
        .current_dir(temp.path())
        .args(["config", "debounce_ms", "250"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set debounce_ms = 250"));

    notepin_cmd()
        .current_dir(temp.path())
        .args(["config", "debounce_ms"])
        .assert()
        .success()
        .stdout(predicate::str::diff("250\n"));
}

#[test]
fn test_config_rejects_bad_server_url() {
    let temp = TempDir::new().unwrap();
    notepin_cmd().arg("init").arg(temp.path()).assert().success();

    notepin_cmd()
        .current_dir(temp.path())
        .args(["config", "server_url", "notes.local"])
        .assert()
        .failure();
}

#[test]
fn test_config_list_hides_secrets() {
    let temp = TempDir::new().unwrap();
    notepin_cmd()
        .arg("init")
        .arg(temp.path())
        .arg("--csrf-token")
        .arg("secret-token")
        .assert()
        .success();

    notepin_cmd()
        .current_dir(temp.path())
        .args(["config", "--list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("csrf_token = (set)"))
        .stdout(predicate::str::contains("secret-token").not());
}

#[test]
fn test_outside_workspace_fails() {
    let temp = TempDir::new().unwrap();

    notepin_cmd()
        .current_dir(temp.path())
        .arg("list")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("notepin init"));
}

#[test]
fn test_root_env_var_selects_workspace() {
    let workspace = TempDir::new().unwrap();
    let elsewhere = TempDir::new().unwrap();
    notepin_cmd().arg("init").arg(workspace.path()).assert().success();

    notepin_cmd()
        .current_dir(elsewhere.path())
        .env("NOTEPIN_ROOT", workspace.path())
        .arg("theme")
        .assert()
        .success()
        .stdout(predicate::str::diff("dark\n"));
}

#[test]
fn test_no_command_prints_hint() {
    notepin_cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("--help"));
}
