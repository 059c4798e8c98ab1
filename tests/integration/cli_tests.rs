//! CLI integration tests
//!
//! These tests verify that the CLI works correctly with various options.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn searchunused() -> Command {
    let mut cmd = Command::cargo_bin("searchunused").expect("binary should be built");
    cmd.env("NO_COLOR", "1");
    cmd
}

/// A small project with one unused asset and one unused type
fn sample_project() -> TempDir {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "Assets.xcassets/unused.imageset/unused.png", "");
    write(temp.path(), "Assets.xcassets/used.imageset/used.png", "");
    write(
        temp.path(),
        "App/Home.swift",
        "final class HomeViewController {}\nlet icon = UIImage(named: \"used\")",
    );
    write(temp.path(), "App/Orphan.swift", "struct OrphanModel {}");
    write(
        temp.path(),
        "App/Main.storyboard",
        "<viewController customClass=\"HomeViewController\"/>",
    );
    temp
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_cli_help() {
    searchunused()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("searchunused"))
        .stdout(predicate::str::contains("--detect"))
        .stdout(predicate::str::contains("--deletion-list"));
}

#[test]
fn test_cli_version() {
    searchunused()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("searchunused"));
}

#[test]
fn test_cli_missing_root_exits_with_one() {
    searchunused()
        .arg("/definitely/not/a/project")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("does not exist"));
}

// ============================================================================
// Report Tests
// ============================================================================

#[test]
fn test_cli_terminal_report() {
    let project = sample_project();

    searchunused()
        .arg(project.path())
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::contains("- unused"))
        .stdout(predicate::str::contains("(path: Assets.xcassets/unused.imageset)"))
        .stdout(predicate::str::contains("- OrphanModel (declared in: App/Orphan.swift)"))
        .stdout(predicate::str::contains("- used\n").not())
        .stdout(predicate::str::contains("HomeViewController (declared").not());
}

#[test]
fn test_cli_json_report() {
    let project = sample_project();

    let output = searchunused()
        .arg(project.path())
        .args(["--quiet", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["unreferenced_assets"].as_array().unwrap().len(), 1);
    assert_eq!(value["unreferenced_assets"][0]["name"], "unused");
    assert_eq!(value["unreferenced_symbols"][0]["name"], "OrphanModel");
}

#[test]
fn test_cli_ndjson_to_file() {
    let project = sample_project();
    let out = project.path().join("report.ndjson");

    searchunused()
        .arg(project.path())
        .args(["--quiet", "--format", "ndjson", "--output"])
        .arg(&out)
        .assert()
        .success();

    let contents = fs::read_to_string(&out).unwrap();
    let kinds: Vec<String> = contents
        .lines()
        .map(|l| serde_json::from_str::<serde_json::Value>(l).unwrap()["kind"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(kinds, vec!["asset", "symbol"]);
}

#[test]
fn test_cli_detect_assets_only() {
    let project = sample_project();

    searchunused()
        .arg(project.path())
        .args(["--quiet", "--detect", "assets"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unreferenced images"))
        .stdout(predicate::str::contains("OrphanModel").not());
}

#[test]
fn test_cli_exclude_and_retain() {
    let project = sample_project();

    searchunused()
        .arg(project.path())
        .args(["--quiet", "--exclude", "orphan", "--retain", "unused"])
        .assert()
        .success()
        .stdout(predicate::str::contains("OrphanModel").not())
        .stdout(predicate::str::contains("No obviously unreferenced images found."));
}

#[test]
fn test_cli_terminal_report_to_file() {
    let project = sample_project();
    let out = project.path().join("report.txt");

    searchunused()
        .arg(project.path())
        .args(["--quiet", "--format", "terminal", "--output"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let text = fs::read_to_string(&out).unwrap();
    assert!(text.contains("## 1. Unreferenced images"));
    assert!(text.contains("OrphanModel"));
    assert!(!text.contains("\x1b["));
}

#[test]
fn test_cli_deletion_list() {
    let project = sample_project();
    write(project.path(), "App/Stale.swift", "enum StaleRoute {}");
    let list = project.path().join("deletions.txt");

    searchunused()
        .arg(project.path())
        .arg("--quiet")
        .arg("--deletion-list")
        .arg(&list)
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&list).unwrap(), "OrphanModel\nStaleRoute\n");
}

#[test]
fn test_cli_config_file_in_root() {
    let project = sample_project();
    write(
        project.path(),
        ".searchunused.yml",
        "symbols:\n  framework_prefixes: [\"Orphan\"]\nreport:\n  format: json\n",
    );

    let output = searchunused().arg(project.path()).arg("--quiet").output().unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(value["unreferenced_symbols"].as_array().unwrap().is_empty());
}
