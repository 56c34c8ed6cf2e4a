//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_top_level_help() {
    let mut cmd = Command::cargo_bin("schooldir").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("init-db"));
}

#[test]
fn test_serve_help() {
    let mut cmd = Command::cargo_bin("schooldir").unwrap();
    cmd.arg("serve").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--read-only"))
        .stdout(predicate::str::contains("--upload-dir"))
        .stdout(predicate::str::contains("--in-memory"));
}

#[test]
fn test_init_db_help() {
    let mut cmd = Command::cargo_bin("schooldir").unwrap();
    cmd.arg("init-db").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--db-host"));
}

#[test]
fn test_serve_rejects_bad_bind_address() {
    let mut cmd = Command::cargo_bin("schooldir").unwrap();
    cmd.env_remove("BIND_ADDR")
        .arg("serve")
        .arg("--bind")
        .arg("not-an-address");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("--bind"));
}

#[test]
fn test_version() {
    let mut cmd = Command::cargo_bin("schooldir").unwrap();
    cmd.arg("--version");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("schooldir"));
}
