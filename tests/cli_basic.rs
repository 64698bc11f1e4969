//! Integration tests for basic CLI behavior.
//!
//! Covers flags, subcommand help, and the subcommands that never touch the
//! network (`new`, `plan`, `url`, `run` without a run marker).

#![allow(deprecated)] // cargo_bin deprecation — replacement not yet stable

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

/// Helper: get a Command for the `luapad` binary.
fn luapad() -> Command {
    Command::cargo_bin("luapad").expect("binary 'luapad' should be built")
}

// ─── Top-level flags ─────────────────────────────────────────────────────────

#[test]
fn help_flag_shows_usage() {
    luapad()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: luapad"))
        .stdout(predicate::str::contains("new"))
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("plan"))
        .stdout(predicate::str::contains("watch"))
        .stdout(predicate::str::contains("url"));
}

#[test]
fn version_flag_shows_semver() {
    luapad()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^luapad \d+\.\d+\.\d+\n$").unwrap());
}

#[test]
fn no_args_shows_error_and_usage() {
    luapad()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage: luapad"));
}

#[test]
fn invalid_subcommand_fails() {
    luapad()
        .arg("this-is-not-a-real-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

// ─── Subcommand help ─────────────────────────────────────────────────────────

#[test]
fn run_help() {
    luapad()
        .args(["run", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Run a script once"))
        .stdout(predicate::str::contains("<FILE>"))
        .stdout(predicate::str::contains("--write"));
}

#[test]
fn watch_help() {
    luapad()
        .args(["watch", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Watch a script file"))
        .stdout(predicate::str::contains("<FILE>"));
}

// ─── new ─────────────────────────────────────────────────────────────────────

#[test]
fn new_writes_starter_template() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("hello.lua");

    luapad()
        .args(["--no-store", "new"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"));

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("--: http://localhost\n--: global\n"));
    assert!(text.contains("respond(main());"));
}

#[test]
fn new_refuses_to_overwrite_without_force() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("hello.lua");
    fs::write(&path, "keep me").unwrap();

    luapad()
        .args(["--no-store", "new"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
    assert_eq!(fs::read_to_string(&path).unwrap(), "keep me");

    luapad()
        .args(["--no-store", "new", "--force"])
        .arg(&path)
        .assert()
        .success();
    assert!(fs::read_to_string(&path).unwrap().contains("Welcome to luapad"));
}

#[test]
fn new_uses_stored_default_url() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("storage.json");
    fs::write(&store, r#"{"defaultURL":"http://stored.test"}"#).unwrap();
    let config = dir.path().join("config.toml");
    fs::write(&config, format!("store_path = {:?}\n", store.display().to_string())).unwrap();
    let path = dir.path().join("hello.lua");

    luapad()
        .arg("--config")
        .arg(&config)
        .arg("new")
        .arg(&path)
        .assert()
        .success();

    assert!(fs::read_to_string(&path)
        .unwrap()
        .contains("--: http://stored.test\n--: global\n"));
}

// ─── plan ────────────────────────────────────────────────────────────────────

#[test]
fn plan_shows_resolved_request() {
    luapad()
        .args(["--no-store", "plan", "-"])
        .write_stdin("--!\n--: http://x\n--: ns\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("URL: http://x\n"))
        .stdout(predicate::str::contains("Namespace: ns\n"))
        .stdout(predicate::str::contains(
            r#"Body: {"script":"--!\n--: http://x\n--: ns\n","namespace":"ns"}"#,
        ));
}

#[test]
fn plan_uses_fallbacks_when_config_is_short() {
    luapad()
        .args(["--no-store", "plan", "-"])
        .write_stdin("--!\n--: http://only-one\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("URL: http://luapi.example.org\n"))
        .stdout(predicate::str::contains("Namespace: global\n"));
}

#[test]
fn plan_without_marker() {
    luapad()
        .args(["--no-store", "plan", "-"])
        .write_stdin("respond('hi')\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("No run marker"));
}

// ─── run / url ───────────────────────────────────────────────────────────────

#[test]
fn run_without_marker_passes_text_through() {
    let input = "--: http://x\n--: ns\nrespond('hi')\n";
    luapad()
        .args(["--no-store", "run", "-"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout(input);
}

#[test]
fn run_write_rejects_stdin() {
    luapad()
        .args(["--no-store", "run", "--write", "-"])
        .write_stdin("--!\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--write needs a file"));
}

#[test]
fn run_missing_file_fails() {
    luapad()
        .args(["--no-store", "run", "/definitely/not/here.lua"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn url_without_stored_value() {
    luapad()
        .args(["--no-store", "url"])
        .assert()
        .success()
        .stderr(predicate::str::contains("No defaultURL stored yet"));
}

#[test]
fn explicit_missing_config_fails() {
    luapad()
        .args(["--config", "/definitely/not/here.toml", "url"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}
