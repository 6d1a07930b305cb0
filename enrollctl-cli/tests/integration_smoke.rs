//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_top_level_help_lists_commands() {
    let mut cmd = Command::cargo_bin("enrollctl").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("ping"));
}

#[test]
fn test_serve_help() {
    let mut cmd = Command::cargo_bin("enrollctl").unwrap();
    cmd.arg("serve").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--init-schema"))
        .stdout(predicate::str::contains("--db-retry-duration"));
}

#[test]
fn test_ping_zero_retry_duration_fails_fast() {
    let mut cmd = Command::cargo_bin("enrollctl").unwrap();
    cmd.env_remove("DATABASE_URL")
        .args(["ping", "--db-retry-duration", "0"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid retry duration"));
}

#[test]
fn test_ping_unreachable_database_fails() {
    let mut cmd = Command::cargo_bin("enrollctl").unwrap();
    cmd.env_remove("DATABASE_URL")
        .args(["ping", "--db-host", "127.0.0.1", "--db-port", "1", "--db-retry-duration", "1"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unreachable"));
}

#[test]
fn test_unknown_command_fails() {
    let mut cmd = Command::cargo_bin("enrollctl").unwrap();
    cmd.arg("migrate");

    cmd.assert().failure();
}
