//! Integration tests for the note list: filters, pins and manual order

#![allow(deprecated)]

use mockito::Matcher;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

mod common;
use common::{init_workspace, notepin_cmd, NOTES};

fn notes_server() -> mockito::ServerGuard {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/api/notes")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(NOTES)
        .create();
    server
}

#[test]
fn test_list_shows_notes_in_server_order() {
    let server = notes_server();
    let temp = TempDir::new().unwrap();
    init_workspace(temp.path(), &server.url());

    let output = notepin_cmd()
        .current_dir(temp.path())
        .arg("list")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();

    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("Groceries"));
    assert!(lines[1].contains("Standup"));
    assert!(lines[2].contains("Weekend plans"));
}

#[test]
fn test_list_empty() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/api/notes")
        .with_status(200)
        .with_body("[]")
        .create();
    let temp = TempDir::new().unwrap();
    init_workspace(temp.path(), &server.url());

    notepin_cmd()
        .current_dir(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::diff("No notes found\n"));
}

#[test]
fn test_list_tag_filter_modes() {
    let server = notes_server();
    let temp = TempDir::new().unwrap();
    init_workspace(temp.path(), &server.url());

    notepin_cmd()
        .current_dir(temp.path())
        .args(["list", "--tags", "work, fun"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Standup"))
        .stdout(predicate::str::contains("Weekend plans"))
        .stdout(predicate::str::contains("Groceries").not());

    notepin_cmd()
        .current_dir(temp.path())
        .args(["list", "--tags", "home,fun", "--mode", "and"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Weekend plans"))
        .stdout(predicate::str::contains("Groceries").not());
}

#[test]
fn test_list_forwards_search_to_server() {
    let mut server = mockito::Server::new();
    let search = server
        .mock("GET", "/api/notes")
        .match_query(Matcher::UrlEncoded("q".into(), "plans".into()))
        .with_status(200)
        .with_body(r#"[{"id": 3, "title": "Weekend plans", "tags": []}]"#)
        .create();
    let temp = TempDir::new().unwrap();
    init_workspace(temp.path(), &server.url());

    notepin_cmd()
        .current_dir(temp.path())
        .args(["list", "--search", "plans"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Weekend plans"));

    search.assert();
}

#[test]
fn test_pin_moves_note_first() {
    let server = notes_server();
    let temp = TempDir::new().unwrap();
    init_workspace(temp.path(), &server.url());

    notepin_cmd()
        .current_dir(temp.path())
        .args(["pin", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pinned note 3"));

    let pinned = fs::read_to_string(temp.path().join(".notepin/state/pinnedNotes.json")).unwrap();
    assert_eq!(pinned, "[3]");

    notepin_cmd()
        .current_dir(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("*     3  Weekend plans"));

    notepin_cmd()
        .current_dir(temp.path())
        .args(["pin", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unpinned note 3"));
}

#[test]
fn test_move_persists_order() {
    let server = notes_server();
    let temp = TempDir::new().unwrap();
    init_workspace(temp.path(), &server.url());

    notepin_cmd()
        .current_dir(temp.path())
        .args(["move", "3", "1"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("      3  Weekend plans"));

    let order = fs::read_to_string(temp.path().join(".notepin/state/noteOrder.json")).unwrap();
    assert_eq!(order, "[3,1,2]");

    let stdout = notepin_cmd()
        .current_dir(temp.path())
        .arg("list")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert!(lines[0].contains("Weekend plans"));
    assert!(lines[1].contains("Groceries"));
    assert!(lines[2].contains("Standup"));
}

#[test]
fn test_move_onto_itself_is_noop() {
    let server = notes_server();
    let temp = TempDir::new().unwrap();
    init_workspace(temp.path(), &server.url());

    notepin_cmd()
        .current_dir(temp.path())
        .args(["move", "2", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to move"));

    assert!(!temp.path().join(".notepin/state/noteOrder.json").exists());
}

#[test]
fn test_corrupted_order_file_is_ignored() {
    let server = notes_server();
    let temp = TempDir::new().unwrap();
    init_workspace(temp.path(), &server.url());
    fs::write(temp.path().join(".notepin/state/noteOrder.json"), "not json").unwrap();

    notepin_cmd()
        .current_dir(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("      1  Groceries"));
}

#[test]
fn test_server_error_exits_with_api_code() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/api/notes")
        .with_status(500)
        .with_body("database is locked")
        .create();
    let temp = TempDir::new().unwrap();
    init_workspace(temp.path(), &server.url());

    notepin_cmd()
        .current_dir(temp.path())
        .arg("list")
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("500"));
}

#[test]
fn test_server_env_var_overrides_config() {
    let server = notes_server();
    let temp = TempDir::new().unwrap();
    init_workspace(temp.path(), "http://127.0.0.1:9");

    notepin_cmd()
        .current_dir(temp.path())
        .env("NOTEPIN_SERVER", server.url())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Groceries"));
}

#[test]
fn test_bad_date_rejected() {
    let server = notes_server();
    let temp = TempDir::new().unwrap();
    init_workspace(temp.path(), &server.url());

    notepin_cmd()
        .current_dir(temp.path())
        .args(["list", "--date", "yesterday"])
        .assert()
        .failure()
        .code(5);
}
