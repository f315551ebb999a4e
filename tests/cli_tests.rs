//! Integration tests for the otpauth binary
//!
//! Runs the built binary and checks stdout and exit codes.

use std::fs;
use std::process::{Command, Output};

const OTPAUTH_BINARY: &str = env!("CARGO_BIN_EXE_otpauth");

// RFC 6238 SHA1 test secret ("12345678901234567890")
const RFC_SECRET: &str = "GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ";

fn run(args: &[&str]) -> Output {
    let config_dir = tempfile::tempdir().expect("Failed to create temp dir");
    Command::new(OTPAUTH_BINARY)
        .args(args)
        .env("OTPAUTH_CONFIG_DIR", config_dir.path())
        .env_remove("JOURNAL_STREAM")
        .output()
        .expect("Failed to run otpauth")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

#[test]
fn test_help_lists_commands() {
    let output = run(&["--help"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("create-secret"));
    assert!(text.contains("code"));
    assert!(text.contains("validate"));
}

#[test]
fn test_create_secret_output() {
    let output = run(&["create-secret"]);
    assert!(output.status.success());

    let secret = stdout(&output);
    assert_eq!(secret.len(), 32);
    assert!(secret
        .chars()
        .all(|c| c.is_ascii_uppercase() || ('2'..='7').contains(&c)));
}

#[test]
fn test_code_at_fixed_timestamp() {
    let output = run(&["code", "--secret", RFC_SECRET, "--timestamp", "1234567890000"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "005924");
}

#[test]
fn test_code_with_invalid_secret() {
    let output = run(&["code", "--secret", "NOT-BASE32!", "--timestamp", "0"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_validate_success() {
    let output = run(&[
        "validate",
        "--secret",
        RFC_SECRET,
        "--code",
        "287 082",
        "--timestamp",
        "59000",
    ]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "success");
}

#[test]
fn test_validate_wrong_code() {
    let output = run(&[
        "validate",
        "--secret",
        RFC_SECRET,
        "--code",
        "123456",
        "--timestamp",
        "59000",
    ]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "failed");
}

#[test]
fn test_validate_non_numeric_code() {
    let output = run(&["validate", "--secret", RFC_SECRET, "--code", "abc"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_validate_with_invalid_config() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, "time_step_ms = 0\n").expect("Failed to write config file");

    let output = run(&[
        "validate",
        "--config",
        path.to_str().unwrap(),
        "--secret",
        RFC_SECRET,
        "--code",
        "287082",
        "--timestamp",
        "59000",
    ]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_created_secret_round_trips() {
    let secret = stdout(&run(&["create-secret"]));

    let code = stdout(&run(&[
        "code",
        "--secret",
        &secret,
        "--timestamp",
        "1700000000000",
    ]));
    assert_eq!(code.len(), 6);

    let output = run(&[
        "validate",
        "--secret",
        &secret,
        "--code",
        &code,
        "--timestamp",
        "1700000000000",
    ]);
    // 000000 is never accepted; every other code must validate
    if code == "000000" {
        assert_eq!(output.status.code(), Some(1));
    } else {
        assert_eq!(stdout(&output), "success");
    }
}

#[test]
fn test_validate_negative_code_fails() {
    let output = run(&[
        "validate",
        "--secret",
        RFC_SECRET,
        "--code=-287082",
        "--timestamp",
        "59000",
    ]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "failed");
}

#[test]
fn test_validate_oversized_code_fails() {
    let output = run(&[
        "validate",
        "--secret",
        RFC_SECRET,
        "--code",
        "99999999999999999999",
        "--timestamp",
        "59000",
    ]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "failed");
}
