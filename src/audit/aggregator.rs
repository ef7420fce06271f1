use super::external::{DuplicatesReport, ExternalDetector, MoodboardReport, SvgReport};
use super::summary::{AuditSummary, Recommendation};
use crate::analysis::UnusedAssetsReport;
use crate::config::Config;
use crate::report::{read_artifact, write_artifact, ArtifactError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Raw report of every detector that ran; `None` for skipped or failed ones
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuditDetails {
    pub duplicates: Option<DuplicatesReport>,
    pub unused_assets: Option<UnusedAssetsReport>,
    pub moodboard_duplicates: Option<MoodboardReport>,
    pub svg_duplicates: Option<SvgReport>,
}

impl AuditDetails {
    pub fn is_empty(&self) -> bool {
        self.duplicates.is_none()
            && self.unused_assets.is_none()
            && self.moodboard_duplicates.is_none()
            && self.svg_duplicates.is_none()
    }

    /// Merged counts. Detectors without a report contribute zero.
    pub fn summarize(&self) -> AuditSummary {
        let mut summary = AuditSummary::default();

        if let Some(duplicates) = &self.duplicates {
            summary.content_duplicates = duplicates.summary.content_duplicates;
            summary.name_duplicates = duplicates.summary.name_duplicates;
            summary.similar_names = duplicates.summary.similar_names;
            summary.total_wasted_space += duplicates.summary.total_wasted_space;
        }

        if let Some(svgs) = &self.svg_duplicates {
            summary.svg_exact_duplicates = svgs.summary.exact_duplicates;
            summary.svg_normalized_duplicates = svgs.summary.normalized_duplicates;
            summary.total_wasted_space += svgs.summary.total_wasted_space;
        }

        if let Some(moodboards) = &self.moodboard_duplicates {
            summary.moodboard_duplicates = moodboards.summary.duplicates;
        }

        if let Some(unused) = &self.unused_assets {
            summary.unused_images = unused.summary.unused_images;
            summary.unused_components = unused.summary.unused_components;
            summary.unused_animations = unused.summary.unused_animations;
            summary.total_unused_size += unused.summary.total_unused_size;
        }

        summary.severity = summary.compute_severity();
        summary
    }
}

/// The `asset-audit-report.json` artifact consumed by cleanup
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditArtifact {
    pub timestamp: DateTime<Utc>,
    pub summary: AuditSummary,
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
    #[serde(default)]
    pub details: AuditDetails,
}

impl AuditArtifact {
    pub const FILE_NAME: &'static str = "asset-audit-report.json";

    pub fn from_details(details: AuditDetails, unused_image_threshold: usize) -> Self {
        let summary = details.summarize();
        let recommendations = summary.recommendations(unused_image_threshold);
        Self {
            timestamp: Utc::now(),
            summary,
            recommendations,
            details,
        }
    }

    pub fn path_in(report_dir: &Path) -> PathBuf {
        report_dir.join(Self::FILE_NAME)
    }

    pub fn write(&self, report_dir: &Path) -> Result<PathBuf, ArtifactError> {
        let path = Self::path_in(report_dir);
        write_artifact(&path, self)?;
        Ok(path)
    }

    pub fn load(report_dir: &Path) -> Result<Self, ArtifactError> {
        read_artifact(&Self::path_in(report_dir))
    }
}

/// Runs the enabled detectors and merges their findings
pub struct AuditAggregator<'a> {
    config: &'a Config,
    project_root: &'a Path,
}

impl<'a> AuditAggregator<'a> {
    pub fn new(config: &'a Config, project_root: &'a Path) -> Self {
        Self {
            config,
            project_root,
        }
    }

    /// Merge the in-process unused report with the enabled external detectors.
    ///
    /// A failing external detector is logged and left out; it never aborts the audit.
    pub fn aggregate(&self, unused_assets: Option<UnusedAssetsReport>) -> AuditArtifact {
        let detectors = &self.config.detectors;
        let mut details = AuditDetails {
            unused_assets,
            ..Default::default()
        };

        if detectors.duplicates {
            details.duplicates = ExternalDetector::new(
                "Duplicates",
                &detectors.external_duplicates,
                self.project_root,
            )
            .run_or_warn();
        } else {
            debug!("Duplicate detection skipped");
        }

        if detectors.moodboards {
            details.moodboard_duplicates = ExternalDetector::new(
                "Moodboard duplicates",
                &detectors.external_moodboards,
                self.project_root,
            )
            .run_or_warn();
        } else {
            debug!("Moodboard detection skipped");
        }

        if detectors.svgs {
            details.svg_duplicates =
                ExternalDetector::new("SVG duplicates", &detectors.external_svgs, self.project_root)
                    .run_or_warn();
        } else {
            debug!("SVG detection skipped");
        }

        let artifact = AuditArtifact::from_details(details, self.config.report.unused_image_threshold);
        info!(
            "Audit complete: severity {}, {} recommendations",
            artifact.summary.severity,
            artifact.recommendations.len()
        );
        artifact
    }
}
