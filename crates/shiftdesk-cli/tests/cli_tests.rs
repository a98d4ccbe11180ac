use assert_cmd::Command;
use regex::Regex;
use std::fs;
use tempfile::TempDir;

struct TestContext {
    dir: TempDir,
}

impl TestContext {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    /// The binary pointed at an unroutable API and a throwaway session file.
    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("shiftdesk").unwrap();
        cmd.env_remove("SHIFTDESK_API_BASE_URL")
            .arg("--api-base-url")
            .arg("http://127.0.0.1:9")
            .arg("--session-file")
            .arg(self.dir.path().join("session.json"));
        cmd
    }
}

fn stdout_of(cmd: &mut Command) -> String {
    String::from_utf8(cmd.output().unwrap().stdout).unwrap()
}

#[test]
fn test_password_strength_report() {
    let ctx = TestContext::new();
    let out = stdout_of(ctx.cmd().args(["password", "abcdefgh"]));
    assert!(Regex::new(r"25%\s*\|\s*Weak").unwrap().is_match(&out), "{}", out);

    ctx.cmd()
        .args(["password", "Secret#123", "--confirm", "Secret#123"])
        .assert()
        .success();
}

#[test]
fn test_reset_with_mismatch_fails() {
    let ctx = TestContext::new();
    ctx.cmd()
        .args(["password", "Secret#123", "--confirm", "Secret#124"])
        .assert()
        .failure()
        .code(1);
}

#[test]
fn test_matches_without_session_makes_no_request() {
    let ctx = TestContext::new();
    let output = ctx.cmd().args(["staff", "matches"]).output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Please login as staff first to load recommendations."));
    // A request would have surfaced a network error.
    assert!(!stderr.contains("Network error"));
}

#[test]
fn test_hospital_shifts_without_session() {
    let ctx = TestContext::new();
    let output = ctx.cmd().args(["hospital", "shifts"]).output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Please login as hospital first."));
}

#[test]
fn test_session_show_reads_the_file() {
    let ctx = TestContext::new();
    fs::write(
        ctx.dir.path().join("session.json"),
        r#"{"hospital_id": "12", "hospital_profile": "{\"fullName\":\"City General\",\"profession\":\"Hospital Admin\"}"}"#,
    )
    .unwrap();

    let out = stdout_of(ctx.cmd().args(["session", "show"]));
    assert!(out.contains("City General"), "{}", out);
    assert!(Regex::new(r"hospital\s*\|\s*12").unwrap().is_match(&out), "{}", out);
}

#[test]
fn test_logout_clears_the_file() {
    let ctx = TestContext::new();
    let path = ctx.dir.path().join("session.json");
    fs::write(&path, r#"{"staff_id": "7", "staff_access_token": "t"}"#).unwrap();

    ctx.cmd().args(["staff", "logout"]).assert().success();
    let raw = fs::read_to_string(&path).unwrap();
    assert!(!raw.contains("staff_id"));
    assert!(!raw.contains("staff_access_token"));
}

#[test]
fn test_missing_config_file_is_fatal() {
    let ctx = TestContext::new();
    ctx.cmd()
        .args(["--config", "does/not/exist.json", "password", "x"])
        .assert()
        .failure()
        .code(1);
}

#[test]
fn test_config_file_values_are_used() {
    let ctx = TestContext::new();
    let config = ctx.dir.path().join("client.json");
    fs::write(&config, r#"{"recommendation_limit": 3, "search_debounce_ms": 0}"#).unwrap();

    ctx.cmd()
        .arg("--config")
        .arg(&config)
        .args(["password", "Secret#123"])
        .assert()
        .success();
}
