//! Contract tests for the airplane-emit binary.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::uninlined_format_args
)]

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;

fn emit() -> Command {
    let mut cmd = Command::cargo_bin("airplane-emit").unwrap();
    cmd.env_remove("AIRPLANE_CHUNK_SIZE")
        .env_remove("AIRPLANE_FLUSH_ON_EMIT")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn set_without_path() {
    emit()
        .args(["set", "--value", r#"{"a": 1}"#])
        .assert()
        .success()
        .stdout(r#"airplane_output_set {"a":1}"#.to_string() + "\n");
}

#[test]
fn set_with_mixed_path() {
    emit()
        .args([
            "set",
            "-p",
            "a",
            "-p",
            r#""hello world""#,
            "-p",
            "10",
            "-p",
            "foo",
            "--value",
            "true",
        ])
        .assert()
        .success()
        .stdout("airplane_output_set:a[\"hello world\"][10].foo true\n");
}

#[test]
fn append_reads_value_from_stdin() {
    emit()
        .args(["append", "-p", "rows"])
        .write_stdin(r#"{"url": "https://airplane.dev?a=b&c=d"}"#)
        .assert()
        .success()
        .stdout("airplane_output_append:rows {\"url\":\"https://airplane.dev?a=b&c=d\"}\n");
}

#[test]
fn index_beyond_u64_is_kept_exact() {
    emit()
        .args(["set", "-p", "rows", "-p", "18446744073709551616", "--value", "1"])
        .assert()
        .success()
        .stdout("airplane_output_set:rows[18446744073709551616] 1\n");
}

#[test]
fn named_output_quotes_name() {
    emit()
        .args(["named", "--name", "my_output", "--value", "1"])
        .assert()
        .success()
        .stdout("airplane_output:\"my_output\" 1\n");
}

#[test]
fn named_output_rejects_bad_name() {
    emit()
        .args(["named", "--name", "my-output", "--value", "1"])
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("invalid output name (my-output)"));
}

#[test]
fn non_scalar_path_segment_is_rejected() {
    emit()
        .args(["set", "-p", "true", "--value", "1"])
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("invalid path segment"));
}

#[test]
fn invalid_json_value_fails() {
    emit()
        .args(["set", "--value", "{not json"])
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("Value is not valid JSON"));
}

#[test]
fn chunk_size_from_environment() {
    let output = emit()
        .env("AIRPLANE_CHUNK_SIZE", "10")
        .args(["set", "--value", r#""abcdefghij""#])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    // `airplane_output_set "abcdefghij"` is 32 bytes: 4 frames + end marker
    assert_eq!(lines.len(), 5);

    let key = lines[4].strip_prefix("airplane_chunk_end:").unwrap();
    let prefix = format!("airplane_chunk:{key} ");
    let body: String = lines[..4]
        .iter()
        .map(|l| l.strip_prefix(&prefix).unwrap())
        .collect();
    assert_eq!(body, r#"airplane_output_set "abcdefghij""#);
}

#[test]
fn chunk_size_from_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "chunk_size = 16").unwrap();

    let output = emit()
        .args(["--config", file.path().to_str().unwrap()])
        .args(["append", "--value", "[1,2,3]"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("airplane_chunk:"));
    assert!(stdout.lines().last().unwrap().starts_with("airplane_chunk_end:"));
}

#[test]
fn zero_chunk_size_config_is_rejected() {
    emit()
        .env("AIRPLANE_CHUNK_SIZE", "0")
        .args(["set", "--value", "1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("chunk_size must be greater than zero"));
}

#[test]
fn global_log_level_from_rust_log_is_honored() {
    emit()
        .env("RUST_LOG", "debug")
        .env("AIRPLANE_CHUNK_SIZE", "10")
        .args(["set", "--value", r#""abcdefghij""#])
        .assert()
        .success()
        .stderr(predicate::str::contains("splitting output line into chunks"));
}

#[test]
fn logs_default_to_warn() {
    emit()
        .env("AIRPLANE_CHUNK_SIZE", "10")
        .args(["set", "--value", r#""abcdefghij""#])
        .assert()
        .success()
        .stderr(predicate::str::contains("splitting output line into chunks").not());
}
