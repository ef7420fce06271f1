//! Audit aggregation integration tests
//!
//! External detector reports are written by hand; the aggregator must tolerate
//! any of them being missing or broken.

use assetaudit::analysis::{DetectorReport, UnusedAssetsReport};
use assetaudit::audit::{AuditAggregator, AuditArtifact, RecommendationKind, Severity};
use assetaudit::{AssetCategory, AssetRecord, Config};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const DUPLICATES: &str = r#"{
  "summary": {"contentDuplicates": 1, "nameDuplicates": 0, "similarNames": 2, "totalWastedSpace": 2048},
  "contentDuplicates": [
    {
      "hash": "abc",
      "original": {"path": "public/images/a.png", "size": 2048},
      "duplicates": [{"path": "public/images/copy/a.png", "size": 2048}],
      "wastedSpace": 2048
    }
  ]
}"#;

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn unused_report(images: usize) -> UnusedAssetsReport {
    let records = (0..images)
        .map(|i| AssetRecord::new(format!("public/images/old{}.png", i), 10, AssetCategory::Image))
        .collect();
    UnusedAssetsReport::from_reports(&[DetectorReport::new(AssetCategory::Image, records)])
}

#[test]
fn test_truncated_report_is_left_out() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(root, "reports/duplicates-report.json", DUPLICATES);
    write(root, "reports/moodboard-duplicates-report.json", r#"{"summary": {"dupl"#);

    let config = Config::default();
    let artifact = AuditAggregator::new(&config, root).aggregate(Some(unused_report(2)));

    assert!(artifact.details.duplicates.is_some());
    assert!(artifact.details.moodboard_duplicates.is_none());
    assert!(artifact.details.svg_duplicates.is_none());

    // Severity comes from the reports that did load
    assert_eq!(artifact.summary.content_duplicates, 1);
    assert_eq!(artifact.summary.moodboard_duplicates, 0);
    assert_eq!(artifact.summary.unused_images, 2);
    assert_eq!(artifact.summary.total_wasted_space, 2048);
    assert_eq!(artifact.summary.severity, Severity::High);
}

#[test]
fn test_no_reports_is_low_severity() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::default();
    let artifact = AuditAggregator::new(&config, temp_dir.path()).aggregate(None);

    assert!(artifact.details.is_empty());
    assert_eq!(artifact.summary.severity, Severity::Low);
    assert!(artifact.recommendations.is_empty());
}

#[test]
fn test_disabled_detector_is_not_read() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(root, "reports/duplicates-report.json", DUPLICATES);

    let mut config = Config::default();
    config.detectors.duplicates = false;
    let artifact = AuditAggregator::new(&config, root).aggregate(None);

    assert!(artifact.details.duplicates.is_none());
    assert_eq!(artifact.summary.severity, Severity::Low);
}

#[cfg(unix)]
#[test]
fn test_failing_command_does_not_abort() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(root, "reports/duplicates-report.json", DUPLICATES);
    write(
        root,
        "reports/svg-duplicates-report.json",
        r#"{"summary": {"exactDuplicates": 1, "normalizedDuplicates": 0, "totalWastedSpace": 10}}"#,
    );

    let mut config = Config::default();
    config.detectors.external_duplicates.command = Some(vec!["false".to_string()]);
    let artifact = AuditAggregator::new(&config, root).aggregate(None);

    assert!(artifact.details.duplicates.is_none());
    assert!(artifact.details.svg_duplicates.is_some());
    assert_eq!(artifact.summary.severity, Severity::Medium);
}

#[test]
fn test_artifact_roundtrip_and_recommendations() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(root, "reports/duplicates-report.json", DUPLICATES);

    let config = Config::default();
    let artifact = AuditAggregator::new(&config, root).aggregate(Some(unused_report(3)));
    let path = artifact.write(&config.report_dir(root)).unwrap();
    assert_eq!(path, root.join("reports").join(AuditArtifact::FILE_NAME));

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["summary"]["severity"], "high");
    assert_eq!(json["details"]["unusedAssets"]["summary"]["unusedImages"], 3);
    assert_eq!(json["recommendations"][0]["type"], "duplicate");
    assert_eq!(json["recommendations"][0]["priority"], "high");

    let loaded = AuditArtifact::load(&config.report_dir(root)).unwrap();
    assert_eq!(loaded.summary, artifact.summary);
    let kinds: Vec<RecommendationKind> = loaded.recommendations.iter().map(|r| r.kind).collect();
    assert!(kinds.contains(&RecommendationKind::Unused));
}
