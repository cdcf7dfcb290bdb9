//! Integration tests for init and config commands

#![allow(deprecated)]

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

mod common;
use common::{blocknotes_cmd, notebook};

#[test]
fn test_init_creates_config_and_database() {
    let temp = TempDir::new().unwrap();

    blocknotes_cmd()
        .arg("init")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized blocknotes notebook"));

    assert!(temp.path().join(".blocknotes").is_dir());
    assert!(temp.path().join(".blocknotes/notes.db").exists());

    let content = fs::read_to_string(temp.path().join(".blocknotes/config.toml")).unwrap();
    assert!(content.contains("database = \"notes.db\""));
    assert!(content.contains("media_dir = \"media\""));
}

#[test]
fn test_init_already_initialized_fails() {
    let temp = notebook();

    blocknotes_cmd().arg("init").arg(temp.path()).assert().failure();
}

#[test]
fn test_command_outside_notebook_exits_with_2() {
    let temp = TempDir::new().unwrap();

    blocknotes_cmd()
        .current_dir(temp.path())
        .arg("list")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("blocknotes init"));
}

#[test]
fn test_root_env_var_selects_notebook() {
    let temp = notebook();
    let elsewhere = TempDir::new().unwrap();

    blocknotes_cmd()
        .current_dir(elsewhere.path())
        .env("BLOCKNOTES_ROOT", temp.path())
        .arg("count")
        .assert()
        .success()
        .stdout("0\n");
}

#[test]
fn test_discovers_notebook_from_subdirectory() {
    let temp = notebook();
    let nested = temp.path().join("a/b");
    fs::create_dir_all(&nested).unwrap();

    blocknotes_cmd()
        .current_dir(&nested)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No notes found"));
}

#[test]
fn test_config_set_and_get_player() {
    let temp = notebook();

    blocknotes_cmd()
        .current_dir(temp.path())
        .args(["config", "player", "vlc"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set player = vlc"));

    blocknotes_cmd()
        .current_dir(temp.path())
        .args(["config", "player"])
        .assert()
        .success()
        .stdout("vlc\n");
}

#[test]
fn test_config_list() {
    let temp = notebook();

    blocknotes_cmd()
        .current_dir(temp.path())
        .args(["config", "--list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("database = notes.db"))
        .stdout(predicate::str::contains("media_dir = media"))
        .stdout(predicate::str::contains("created = "));
}

#[test]
fn test_config_rejects_unknown_key_and_created() {
    let temp = notebook();

    blocknotes_cmd()
        .current_dir(temp.path())
        .args(["config", "color"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key"));

    blocknotes_cmd()
        .current_dir(temp.path())
        .args(["config", "created", "2020-01-01T00:00:00Z"])
        .assert()
        .failure();
}
