//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_top_level_help() {
    let mut cmd = Command::cargo_bin("menuctl").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("migrate"));
}

#[test]
fn test_serve_help() {
    let mut cmd = Command::cargo_bin("menuctl").unwrap();
    cmd.arg("serve").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--in-memory"))
        .stdout(predicate::str::contains("--database-url"))
        .stdout(predicate::str::contains("Per-request timeout"));
}

#[test]
fn test_migrate_help() {
    let mut cmd = Command::cargo_bin("menuctl").unwrap();
    cmd.arg("migrate").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--seed"));
}

#[test]
fn test_version() {
    let mut cmd = Command::cargo_bin("menuctl").unwrap();
    cmd.arg("--version");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_unknown_subcommand_fails() {
    let mut cmd = Command::cargo_bin("menuctl").unwrap();
    cmd.arg("bake");

    cmd.assert().failure();
}

#[test]
fn test_invalid_bind_address_fails() {
    let mut cmd = Command::cargo_bin("menuctl").unwrap();
    cmd.args(["serve", "--in-memory", "--bind", "not-an-address"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("--bind"));
}
