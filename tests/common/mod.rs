#![allow(dead_code)]

use assert_cmd::Command;
use std::path::Path;

pub fn notepin_cmd() -> Command {
    let mut cmd = Command::cargo_bin("notepin").unwrap();
    cmd.env_remove("NOTEPIN_ROOT");
    cmd.env_remove("NOTEPIN_SERVER");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Initialize a workspace at `dir` pointing at `server_url`
pub fn init_workspace(dir: &Path, server_url: &str) {
    notepin_cmd()
        .arg("init")
        .arg(dir)
        .arg("--server")
        .arg(server_url)
        .assert()
        .success();
}

pub const NOTES: &str = r#"[
    {"id": 1, "title": "Groceries", "tags": ["home"]},
    {"id": 2, "title": "Standup", "tags": ["work"]},
    {"id": 3, "title": "Weekend plans", "tags": ["home", "fun"]}
]"#;
