//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn line_rules() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("line-rules").unwrap()
}

fn sample_dir() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("sample.txt"), "hello.\n\nzzzzz and a a a a a.\n").unwrap();
    temp_dir
}

#[test]
fn annotate_sample_file() {
    let dir = sample_dir();

    line_rules()
        .current_dir(dir.path())
        .args(["annotate", "sample.txt"])
        .assert()
        .success()
        .stdout("1: FP001 FP002\n2: FN202\n3: FP001 FP002 FP003 FN201\n");
}

#[test]
fn filter_sample_file() {
    let dir = sample_dir();

    line_rules()
        .current_dir(dir.path())
        .args(["filter", "sample.txt", "--no-parallel"])
        .assert()
        .success()
        .stdout("1:hello.\n3:zzzzz and a a a a a.\n");
}

#[test]
fn invalid_mode_fails_before_reading_files() {
    let dir = sample_dir();
    // An unreadable config and a missing input would both fail if they were opened
    fs::write(dir.path().join("line_rules.yaml"), "rules: [broken").unwrap();

    line_rules()
        .current_dir(dir.path())
        .args(["delete", "does-not-exist.txt"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Invalid argument"))
        .stderr(predicate::str::contains("delete"));
}

#[test]
fn missing_file_fails_without_partial_output() {
    let dir = TempDir::new().unwrap();

    line_rules()
        .current_dir(dir.path())
        .args(["annotate", "missing.txt"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn missing_arguments_are_rejected() {
    line_rules().arg("annotate").assert().failure();
}

#[test]
fn json_output() {
    let dir = sample_dir();

    let output = line_rules()
        .current_dir(dir.path())
        .args(["annotate", "sample.txt", "--format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["mode"], "annotate");
    assert_eq!(json["summary"]["total_lines"], 3);
    assert_eq!(json["lines"][2]["codes"].as_array().unwrap().len(), 4);
}

#[test]
fn config_file_disables_rules() {
    let dir = sample_dir();
    fs::write(dir.path().join("custom.yaml"), "rules:\n  disabled: [FP002, FP003]\n").unwrap();

    line_rules()
        .current_dir(dir.path())
        .args(["annotate", "sample.txt", "--config", "custom.yaml"])
        .assert()
        .success()
        .stdout("1: FP001\n2: FN202\n3: FP001 FN201\n");
}

#[test]
fn default_config_is_discovered() {
    let dir = sample_dir();
    fs::write(dir.path().join("line_rules.yaml"), "rules:\n  disabled: [FN202]\n").unwrap();

    line_rules()
        .current_dir(dir.path())
        .args(["annotate", "sample.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2: \n"));
}

#[test]
fn list_rules() {
    let dir = TempDir::new().unwrap();

    line_rules()
        .current_dir(dir.path())
        .arg("--list-rules")
        .assert()
        .success()
        .stdout(predicate::str::contains("FP001 [positive]"))
        .stdout(predicate::str::contains("FN203 [negative]"));
}
