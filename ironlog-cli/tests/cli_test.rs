use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_help_command() {
    let mut cmd = Command::cargo_bin("ironlog").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Strength-training log"))
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("workout"))
        .stdout(predicate::str::contains("train"));
}

#[test]
fn test_version_command() {
    let mut cmd = Command::cargo_bin("ironlog").unwrap();
    cmd.arg("--version");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("0.1.0"));
}

#[test]
fn test_completions_command() {
    let mut cmd = Command::cargo_bin("ironlog").unwrap();
    cmd.arg("completions").arg("bash");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("_ironlog"));
}

#[test]
fn test_config_path_honors_override() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("custom.toml");

    let mut cmd = Command::cargo_bin("ironlog").unwrap();
    cmd.arg("config").arg("path").arg("--config").arg(&config);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("custom.toml"));
}

#[test]
fn test_whoami_without_login() {
    let dir = tempdir().unwrap();

    let mut cmd = Command::cargo_bin("ironlog").unwrap();
    cmd.arg("whoami")
        .env("IRONLOG_STORE_PATH", dir.path().join("store"))
        .env("IRONLOG_CONFIG", dir.path().join("config.toml"));

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("You are not logged in."));
}

#[test]
fn test_log_set_rejects_invalid_reps_before_network() {
    let dir = tempdir().unwrap();

    let mut cmd = Command::cargo_bin("ironlog").unwrap();
    cmd.args(["workout", "log-set", "1", "1", "--weight", "100", "--reps", "0"])
        .env("IRONLOG_STORE_PATH", dir.path().join("store"))
        .env("IRONLOG_CONFIG", dir.path().join("config.toml"));

    cmd.assert().failure();
}

#[test]
fn test_train_help_mentions_store_lock() {
    let mut cmd = Command::cargo_bin("ironlog").unwrap();
    cmd.arg("train").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("token store stays locked"));
}

#[test]
fn test_measurement_chart_requires_pro() {
    let dir = tempdir().unwrap();

    let mut cmd = Command::cargo_bin("ironlog").unwrap();
    cmd.args(["measurement", "chart", "body_weight"])
        .env("IRONLOG_STORE_PATH", dir.path().join("store"))
        .env("IRONLOG_CONFIG", dir.path().join("config.toml"));

    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("PRO options"));
}
