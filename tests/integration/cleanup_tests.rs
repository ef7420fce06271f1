//! Cleanup integration tests
//!
//! Findings are written as a real audit artifact, then loaded and executed the
//! same way `assetaudit clean` does, with scripted prompt answers.

use assetaudit::analysis::{DetectorReport, UnusedAssetsReport};
use assetaudit::audit::{AuditArtifact, AuditDetails, DuplicatesReport, FileEntry};
use assetaudit::audit::external::ContentDuplicateGroup;
use assetaudit::refactor::{
    load_findings, CleanupError, CleanupLog, CleanupPlan, CleanupRun, CleanupScope, ExecutionMode,
    SafeCleanup, ScriptedPrompter,
};
use assetaudit::{AssetCategory, AssetRecord, Config};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn file(path: &str) -> FileEntry {
    FileEntry {
        path: path.to_string(),
        size: 4,
    }
}

/// Project with an audit artifact listing `unused_images` and one duplicate pair
fn audited_project(unused_images: &[&str]) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().to_path_buf();

    write(&root, "public/images/a.png", "orig");
    write(&root, "public/images/copy/a.png", "orig");
    for path in unused_images {
        write(&root, path, path);
    }

    let mut duplicates = DuplicatesReport::default();
    duplicates.summary.content_duplicates = 1;
    duplicates.content_duplicates.push(ContentDuplicateGroup {
        hash: "h".to_string(),
        original: file("public/images/a.png"),
        duplicates: vec![file("public/images/copy/a.png")],
        wasted_space: 4,
    });

    let images = unused_images
        .iter()
        .map(|p| AssetRecord::new(*p, 4, AssetCategory::Image))
        .collect();
    let unused = UnusedAssetsReport::from_reports(&[
        DetectorReport::new(AssetCategory::Image, images),
        DetectorReport::new(
            AssetCategory::Animation,
            vec![AssetRecord::new("src/components/animations/Fade.tsx", 9, AssetCategory::Animation)],
        ),
    ]);

    let details = AuditDetails {
        duplicates: Some(duplicates),
        unused_assets: Some(unused),
        ..Default::default()
    };
    AuditArtifact::from_details(details, 0)
        .write(&root.join("reports"))
        .unwrap();

    (temp_dir, root)
}

fn run(root: &Path, mode: ExecutionMode, answers: &[bool]) -> (CleanupRun, ScriptedPrompter) {
    let config = Config::default();
    let findings = load_findings(&config, root).unwrap();
    let plan = CleanupPlan::from_details(&findings, CleanupScope::default());
    let mut prompter = ScriptedPrompter::new(answers.iter().copied());
    let result = SafeCleanup::new(&config, root, mode, &mut prompter)
        .run(&plan)
        .unwrap();
    (result, prompter)
}

fn completed(run: CleanupRun) -> (CleanupLog, PathBuf) {
    match run {
        CleanupRun::Completed { log, log_path } => (log, log_path),
        CleanupRun::Aborted => panic!("cleanup was aborted"),
    }
}

/// Every file under `root` with its contents and mtime, excluding the report directory
fn project_files(root: &Path) -> Vec<(PathBuf, Vec<u8>, SystemTime)> {
    let mut files: Vec<_> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| !e.path().starts_with(root.join("reports")))
        .map(|e| {
            let modified = fs::metadata(e.path()).unwrap().modified().unwrap();
            (e.path().to_path_buf(), fs::read(e.path()).unwrap(), modified)
        })
        .collect();
    files.sort();
    files
}

// ============================================================================
// Modes
// ============================================================================

#[test]
fn test_dry_run_changes_nothing() {
    let (_dir, root) = audited_project(&["public/images/old.png"]);
    let before = project_files(&root);

    let (result, prompter) = run(&root, ExecutionMode::DryRun, &[]);
    let (log, log_path) = completed(result);

    assert_eq!(project_files(&root), before);
    assert!(prompter.asked().is_empty());
    assert!(log_path.starts_with(root.join("reports")));
    assert_eq!(log.summary.would_delete, 2);
    assert_eq!(log.summary.deleted, 0);
    assert!(log.backup_location.is_none());
    assert!(!root.join(".cleanup-backup").exists());
}

#[test]
fn test_auto_backs_up_byte_identical() {
    let (_dir, root) = audited_project(&["public/images/old.png"]);

    let (result, prompter) = run(&root, ExecutionMode::Auto, &[true]);
    let (log, _) = completed(result);

    assert_eq!(prompter.asked().len(), 1);
    assert_eq!(log.summary.deleted, 2);
    assert!(root.join("public/images/a.png").exists(), "original of a duplicate group is kept");
    assert!(!root.join("public/images/copy/a.png").exists());
    assert!(!root.join("public/images/old.png").exists());

    for entry in &log.deletions {
        let backup = root.join(entry.backup_path.as_ref().expect("deleted entry has a backup"));
        assert_eq!(fs::read(backup).unwrap().len() as u64, entry.size_bytes);
    }
    let old_backup = log
        .deletions
        .iter()
        .find(|e| e.path == "public/images/old.png")
        .and_then(|e| e.backup_path.clone())
        .unwrap();
    assert_eq!(fs::read(root.join(old_backup)).unwrap(), b"public/images/old.png");
}

#[test]
fn test_auto_run_is_idempotent() {
    let (_dir, root) = audited_project(&["public/images/old.png"]);

    let (first, _) = run(&root, ExecutionMode::Auto, &[true]);
    assert_eq!(completed(first).0.summary.deleted, 2);

    let (second, _) = run(&root, ExecutionMode::Auto, &[true]);
    let (log, _) = completed(second);
    assert_eq!(log.summary.deleted, 0);
    assert_eq!(log.summary.already_absent, 2);
    assert_eq!(log.summary.failed, 0);
}

#[test]
fn test_auto_decline_aborts_without_log() {
    let (_dir, root) = audited_project(&["public/images/old.png"]);
    let before = project_files(&root);

    let (result, _) = run(&root, ExecutionMode::Auto, &[false]);

    assert!(matches!(result, CleanupRun::Aborted));
    assert_eq!(project_files(&root), before);
    let logs = fs::read_dir(root.join("reports"))
        .unwrap()
        .filter_map(Result::ok)
        .filter(|e| e.file_name().to_string_lossy().starts_with("cleanup-"))
        .count();
    assert_eq!(logs, 0);
}

#[test]
fn test_interactive_decline_is_user_skipped() {
    let (_dir, root) = audited_project(&["public/images/old.png"]);

    // Duplicate first, then the unused image
    let (result, prompter) = run(&root, ExecutionMode::Interactive, &[false, true]);
    let (log, _) = completed(result);

    assert_eq!(prompter.asked().len(), 2);
    assert!(prompter.asked()[0].contains("public/images/copy/a.png"));
    assert!(root.join("public/images/copy/a.png").exists());
    assert!(!root.join("public/images/old.png").exists());
    assert_eq!(log.skipped.len(), 1);
    assert_eq!(log.skipped[0].reason, "user skipped");
}

// ============================================================================
// Safety
// ============================================================================

#[test]
fn test_backup_failure_keeps_original_and_continues() {
    let (_dir, root) = audited_project(&["public/images/old.png"]);
    // A regular file where the backup root should be makes every backup fail
    fs::write(root.join(".cleanup-backup"), "not a directory").unwrap();

    let (result, _) = run(&root, ExecutionMode::Auto, &[true]);
    let (log, log_path) = completed(result);

    assert_eq!(log.summary.failed, 2);
    assert_eq!(log.summary.deleted, 0);
    assert_eq!(log.errors.len(), 2);
    assert!(root.join("public/images/copy/a.png").exists());
    assert!(root.join("public/images/old.png").exists());
    assert!(log_path.exists());
}

#[test]
fn test_whitelist_holds_in_every_mode() {
    for mode in [ExecutionMode::DryRun, ExecutionMode::Interactive, ExecutionMode::Auto] {
        let (_dir, root) = audited_project(&["src/App.tsx", "package.json"]);

        let (result, prompter) = run(&root, mode, &[true, true, true, true]);
        let (log, _) = completed(result);

        assert!(root.join("src/App.tsx").exists(), "{} removed a whitelisted file", mode);
        assert!(root.join("package.json").exists(), "{} removed a whitelisted file", mode);
        assert!(log.deletions.iter().all(|e| e.path != "package.json" && e.path != "src/App.tsx"));
        assert_eq!(
            log.skipped.iter().filter(|s| s.reason == "whitelisted").count(),
            2,
            "{}",
            mode
        );
        assert!(prompter.asked().iter().all(|q| !q.contains("package.json")));
    }
}

#[test]
fn test_runs_write_distinct_logs() {
    let (_dir, root) = audited_project(&["public/images/old.png"]);

    let (_, first) = completed(run(&root, ExecutionMode::DryRun, &[]).0);
    let (_, second) = completed(run(&root, ExecutionMode::DryRun, &[]).0);

    assert_ne!(first, second);
    assert!(first.exists());
    assert!(second.exists());
}

#[test]
fn test_animations_are_deferred() {
    let (_dir, root) = audited_project(&[]);
    write(&root, "src/components/animations/Fade.tsx", "export const Fade = 1;");

    let (result, _) = run(&root, ExecutionMode::Auto, &[true]);
    let (log, _) = completed(result);

    assert!(root.join("src/components/animations/Fade.tsx").exists());
    assert_eq!(log.summary.deferred, 1);
    assert_eq!(log.deferred[0].category, AssetCategory::Animation);
}

#[test]
fn test_missing_audit_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let result = load_findings(&Config::default(), temp_dir.path());

    assert!(matches!(result, Err(CleanupError::MissingAudit(_))));
}

#[test]
fn test_detector_reports_used_without_artifact() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(
        root,
        "reports/unused-assets-report.json",
        r#"{"timestamp": "2026-01-01T00:00:00Z", "summary": {"unusedImages": 1},
            "unusedImages": [{"path": "public/images/old.png", "size": 3, "category": "image"}]}"#,
    );

    let findings = load_findings(&Config::default(), root).unwrap();
    let plan = CleanupPlan::from_details(&findings, CleanupScope::default());

    assert_eq!(plan.candidates.len(), 1);
    assert_eq!(plan.candidates[0].path, "public/images/old.png");
}
