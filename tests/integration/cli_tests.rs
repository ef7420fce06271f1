//! CLI integration tests
//!
//! These tests run the `assetaudit` binary against throwaway projects.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn assetaudit() -> Command {
    Command::cargo_bin("assetaudit").expect("binary should be built")
}

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn sample_project() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(root, "src/App.tsx", r#"export const App = () => <img src="/images/used.png" />;"#);
    write(root, "public/images/used.png", "used");
    write(root, "public/images/stale.png", "stale");
    temp_dir
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_cli_help() {
    assetaudit()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("audit"))
        .stdout(predicate::str::contains("unused"))
        .stdout(predicate::str::contains("clean"));
}

#[test]
fn test_cli_version() {
    assetaudit()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("assetaudit"));
}

#[test]
fn test_conflicting_modes_rejected() {
    let project = sample_project();
    assetaudit()
        .args(["clean", "--auto", "--interactive"])
        .arg(project.path())
        .assert()
        .failure();
}

#[test]
fn test_conflicting_scopes_rejected() {
    let project = sample_project();
    assetaudit()
        .args(["clean", "--unused-only", "--duplicates-only"])
        .arg(project.path())
        .assert()
        .failure();
}

// ============================================================================
// Pipeline
// ============================================================================

#[test]
fn test_audit_writes_artifact() {
    let project = sample_project();

    assetaudit()
        .args(["--quiet", "audit"])
        .arg(project.path())
        .assert()
        .success();

    let artifact = project.path().join("reports/asset-audit-report.json");
    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(artifact).unwrap()).unwrap();
    assert_eq!(json["summary"]["unusedImages"], 1);
    assert_eq!(json["summary"]["severity"], "low");
    assert_eq!(
        json["details"]["unusedAssets"]["unusedImages"][0]["path"],
        "public/images/stale.png"
    );
    assert!(project.path().join("reports/unused-assets-report.json").exists());
}

#[test]
fn test_unused_images_only() {
    let project = sample_project();
    write(project.path(), "src/components/Lonely.tsx", "export default 1;");

    assetaudit()
        .args(["--quiet", "unused", "--images-only"])
        .arg(project.path())
        .assert()
        .success();

    let report = project.path().join("reports/unused-assets-report.json");
    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(report).unwrap()).unwrap();
    assert_eq!(json["summary"]["unusedImages"], 1);
    assert_eq!(json["summary"]["unusedComponents"], 0);
}

#[test]
fn test_clean_without_audit_fails() {
    let project = sample_project();

    assetaudit()
        .arg("clean")
        .arg(project.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("assetaudit audit"));
}

#[test]
fn test_clean_defaults_to_dry_run() {
    let project = sample_project();

    assetaudit()
        .args(["--quiet", "audit"])
        .arg(project.path())
        .assert()
        .success();

    assetaudit()
        .arg("clean")
        .arg(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("DRY-RUN"));

    assert!(project.path().join("public/images/stale.png").exists());
    let logs = fs::read_dir(project.path().join("reports"))
        .unwrap()
        .filter_map(Result::ok)
        .filter(|e| e.file_name().to_string_lossy().starts_with("cleanup-log-"))
        .count();
    assert_eq!(logs, 1);
}
