#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn extract_cmd(cwd: &Path) -> Command {
    let mut cmd = Command::cargo_bin("extract").unwrap();
    cmd.current_dir(cwd);
    cmd
}

#[test]
fn help_exits_zero_without_extracting() {
    let temp_dir = TempDir::new().unwrap();

    extract_cmd(temp_dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));

    assert!(!temp_dir.path().join("extracted-project").exists());
}

#[test]
fn short_version_flag_prints_version() {
    let temp_dir = TempDir::new().unwrap();

    extract_cmd(temp_dir.path())
        .arg("-v")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn missing_manifest_argument_fails() {
    let temp_dir = TempDir::new().unwrap();

    extract_cmd(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("MANIFEST"));
}

#[test]
fn defaults_to_extracted_project_directory() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("files.yaml"), "a.txt: hello\n").unwrap();

    extract_cmd(temp_dir.path())
        .args(["files.yaml", "--output-format", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("OK: a.txt"))
        .stdout(predicate::str::contains("Succeeded: 1"));

    let written = temp_dir.path().join("extracted-project").join("a.txt");
    assert_eq!(fs::read_to_string(written).unwrap(), "hello");
}

#[test]
fn nonexistent_manifest_is_fatal() {
    let temp_dir = TempDir::new().unwrap();

    extract_cmd(temp_dir.path())
        .args(["missing.yaml", "out"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("missing.yaml"));

    assert!(!temp_dir.path().join("out").exists());
}

#[test]
fn unparseable_manifest_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("files.yaml"), "- just\n- a list\n").unwrap();

    extract_cmd(temp_dir.path())
        .args(["files.yaml", "out"])
        .assert()
        .code(4);
}

#[test]
fn uncreatable_output_root_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("files.yaml"), "a.txt: hello\n").unwrap();
    fs::write(temp_dir.path().join("blocked"), "regular file").unwrap();

    extract_cmd(temp_dir.path())
        .args(["files.yaml", "blocked/out"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("blocked"));
}

#[test]
fn partial_failure_exits_zero_by_default() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("files.yaml"), "a.txt: a\n../b.txt: b\n").unwrap();

    extract_cmd(temp_dir.path())
        .args(["files.yaml", "out", "--output-format", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("OK: a.txt"))
        .stderr(predicate::str::contains("FAILED: ../b.txt"));
}

#[test]
fn strict_mode_fails_on_partial_failure() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("files.yaml"), "a.txt: a\n../b.txt: b\n").unwrap();

    extract_cmd(temp_dir.path())
        .args(["files.yaml", "out", "--strict", "--quiet"])
        .assert()
        .code(6);

    assert!(temp_dir.path().join("out").join("a.txt").exists());
}

#[test]
fn quiet_suppresses_report_in_every_format() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("files.yaml"), "a.txt: hello\n").unwrap();

    for format in ["human", "plain", "json"] {
        extract_cmd(temp_dir.path())
            .args(["files.yaml", "out", "--quiet", "--output-format", format])
            .assert()
            .success()
            .stdout(predicate::str::is_empty());
    }

    assert!(temp_dir.path().join("out").join("a.txt").exists());
}

#[test]
fn quiet_dry_run_prints_nothing() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("files.yaml"), "a.txt: hello\n").unwrap();

    extract_cmd(temp_dir.path())
        .args(["files.yaml", "out", "--dry-run", "--quiet", "--output-format", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn quiet_keeps_entry_failures_on_stderr() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("files.yaml"), "a.txt: a\n../b.txt: b\n").unwrap();

    extract_cmd(temp_dir.path())
        .args(["files.yaml", "out", "--quiet", "--output-format", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("FAILED: ../b.txt"));
}

#[test]
fn strict_mode_from_config_file() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("files.yaml"), "../b.txt: b\n").unwrap();
    fs::write(temp_dir.path().join("extract.toml"), "[run]\nstrict = true\n").unwrap();

    extract_cmd(temp_dir.path())
        .args(["files.yaml", "out", "--quiet"])
        .assert()
        .code(6);
}

#[test]
fn missing_expected_files_are_reported_but_not_fatal() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("files.yaml"), "src/main.rs: fn main() {}\n").unwrap();

    extract_cmd(temp_dir.path())
        .args(["files.yaml", "out", "--output-format", "plain", "--expect", "Cargo.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("missing expected file: Cargo.toml"));
}

#[test]
fn tree_flag_renders_written_paths() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("files.yaml"),
        "a.txt: a\ndir/b.txt: b\n",
    )
    .unwrap();

    extract_cmd(temp_dir.path())
        .args(["files.yaml", "out", "--output-format", "plain", "--tree", "--no-validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("└── dir/"))
        .stdout(predicate::str::contains("    └── b.txt"));
}

#[test]
fn dry_run_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("files.yaml"), "a.txt: a\n../bad.txt: b\n").unwrap();

    extract_cmd(temp_dir.path())
        .args(["files.yaml", "out", "--dry-run", "--output-format", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("a.txt"))
        .stdout(predicate::str::contains("No files were written"));

    assert!(!temp_dir.path().join("out").exists());
}

#[test]
fn json_output_contains_report() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("files.json"), r#"{"a.txt": "hello"}"#).unwrap();

    extract_cmd(temp_dir.path())
        .args(["files.json", "out", "--output-format", "json", "--no-validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\":\"written\""))
        .stdout(predicate::str::contains("\"succeeded\": ["));
}

#[test]
fn generate_config_writes_sample() {
    let temp_dir = TempDir::new().unwrap();

    extract_cmd(temp_dir.path())
        .args(["--generate-config", "--config", "custom.toml"])
        .assert()
        .success();

    let content = fs::read_to_string(temp_dir.path().join("custom.toml")).unwrap();
    assert!(content.contains("default_directory"));
}
