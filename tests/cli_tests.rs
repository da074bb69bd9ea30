//! CLI integration tests.
//!
//! Tests the trustkey CLI commands by invoking the binary as a subprocess.

use std::io::Write;
use std::process::{Command, Stdio};

fn run_command(args: &[&str], input: &str) -> (i32, String, String) {
    let bin = env!("CARGO_BIN_EXE_trustkey");
    let mut child = Command::new(bin)
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap_or_else(|e| panic!("Failed to spawn trustkey at {:?}: {}", bin, e));

    {
        let stdin = child.stdin.as_mut().unwrap();
        stdin.write_all(input.as_bytes()).unwrap();
    }

    let output = child.wait_with_output().unwrap();
    let code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (code, stdout, stderr)
}

fn run_derive(input: &str) -> (i32, String, String) {
    run_command(&["derive"], input)
}

fn run_check(input: &str) -> (i32, String, String) {
    run_command(&["check"], input)
}

// ============================================================================
// Derive Command Tests
// ============================================================================

#[test]
fn cli_derive_sorts_keys() {
    let (code, stdout, _stderr) = run_derive(r#"{ "b": 2, "a": 1 }"#);
    assert_eq!(code, 0, "Expected success exit code");
    assert_eq!(stdout.trim(), r#"{"a":1,"b":2}"#);
}

#[test]
fn cli_derive_nested_arguments() {
    let input = r#"{
        "target": "npub1target",
        "source": "npub1source",
        "opts": { "maxHops": 3, "decay": 0.5, "filters": ["follows", "mutes"] }
    }"#;
    let (code, stdout, _stderr) = run_derive(input);
    assert_eq!(code, 0);
    assert_eq!(
        stdout.trim(),
        r#"{"opts":{"decay":0.5,"filters":["follows","mutes"],"maxHops":3},"source":"npub1source","target":"npub1target"}"#
    );
}

#[test]
fn cli_derive_normalises_numbers() {
    let (code, stdout, _stderr) = run_derive("[1.0, -0.0, 1E21, 0.0000001, 2.50]");
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "[1,0,1e+21,1e-7,2.5]");
}

#[test]
fn cli_derive_empty_array() {
    let (code, stdout, _stderr) = run_derive("[]");
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "[]");
}

#[test]
fn cli_derive_null_is_a_key() {
    let (code, stdout, _stderr) = run_derive("null");
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "null");
}

#[test]
fn cli_derive_with_scope() {
    let (code, stdout, _stderr) = run_command(&["derive", "--scope", "trust.score"], r#"{"y":2}"#);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), r#"["trust.score",{"y":2}]"#);
}

#[test]
fn cli_derive_with_digest() {
    let (code, stdout, _stderr) = run_command(&["derive", "--digest"], "[]");
    assert_eq!(code, 0);
    assert_eq!(
        stdout.trim(),
        "4f53cda18c2baa0c0354bb5f9a3ecbe5ed12ab4d8e11ba873c2f11161202b945"
    );
}

#[test]
fn cli_derive_digest_ignores_key_order() {
    let (_, a, _) = run_command(&["derive", "--digest"], r#"{"a":1,"b":[true,null]}"#);
    let (_, b, _) = run_command(&["derive", "--digest"], r#"{"b":[true,null],"a":1}"#);
    assert_eq!(a, b);
    assert_eq!(a.trim().len(), 64);
}

#[test]
fn cli_derive_too_deep_is_not_cacheable() {
    let (code, stdout, stderr) = run_command(&["derive", "--max-depth", "2"], "[[[1]]]");
    assert_eq!(code, 2, "Expected not-cacheable exit code");
    assert!(stdout.is_empty());
    assert!(stderr.contains("not cacheable"), "stderr: {}", stderr);
}

#[test]
fn cli_derive_node_limit() {
    let (code, _stdout, _stderr) = run_command(&["derive", "--max-nodes", "3"], "[1,2,3]");
    assert_eq!(code, 2);

    let (code, stdout, _stderr) = run_command(&["derive", "--max-nodes", "4"], "[1,2,3]");
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "[1,2,3]");
}

#[test]
fn cli_derive_input_beyond_reader_depth_is_input_error() {
    let input = format!("{}{}", "[".repeat(200), "]".repeat(200));
    let (code, _stdout, _stderr) = run_command(&["derive", "--max-depth", "500"], &input);
    assert_eq!(code, 1);

    let (code, stdout, _stderr) = run_command(&["derive", "--help"], "");
    assert_eq!(code, 0);
    assert!(stdout.contains("128"), "help: {}", stdout);
}

#[test]
fn cli_derive_invalid_json() {
    let (code, stdout, stderr) = run_derive("{not json");
    assert_eq!(code, 1, "Expected input error exit code");
    assert!(stdout.is_empty());
    assert!(stderr.contains("parse request arguments"), "stderr: {}", stderr);
}

#[test]
fn cli_derive_empty_input() {
    let (code, _stdout, _stderr) = run_derive("");
    assert_eq!(code, 1);
}

// ============================================================================
// Check Command Tests
// ============================================================================

#[test]
fn cli_check_cacheable() {
    let (code, stdout, _stderr) = run_check(r#"{"a":[1,2,3]}"#);
    assert_eq!(code, 0);
    let result: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(result, serde_json::json!({ "ok": true }));
}

#[test]
fn cli_check_reports_limit_rejection() {
    let (code, stdout, _stderr) = run_command(&["check", "--max-depth", "1"], r#"{"a":{"b":1}}"#);
    assert_eq!(code, 2);
    let result: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(result["err"]["code"], 110);
    assert_eq!(result["err"]["name"], "E110_NestingTooDeep");
    assert_eq!(result["err"]["detail"], "E110_NestingTooDeep(2, 1)");
}

#[test]
fn cli_check_invalid_json() {
    let (code, _stdout, _stderr) = run_check("[1,");
    assert_eq!(code, 1);
}

// ============================================================================
// Version Command Tests
// ============================================================================

#[test]
fn cli_version() {
    let (code, stdout, _stderr) = run_command(&["version"], "");
    assert_eq!(code, 0);
    assert!(stdout.starts_with("trustkey v"), "stdout: {}", stdout);
}

#[test]
fn cli_no_command_prints_banner() {
    let (code, stdout, _stderr) = run_command(&[], "");
    assert_eq!(code, 0);
    assert!(stdout.contains("--help"));
}
