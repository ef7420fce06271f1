use super::DeferredEntry;
use crate::analysis::UnusedAssetsReport;
use crate::audit::{AuditArtifact, AuditDetails, ExternalDetector};
use crate::config::Config;
use crate::report::read_optional_artifact;
use miette::Diagnostic;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Diagnostic, Debug)]
pub enum CleanupError {
    #[error("No audit report found in {}", .0.display())]
    #[diagnostic(code(assetaudit::clean::missing_audit), help("run `assetaudit audit` first"))]
    MissingAudit(PathBuf),
}

/// Which finding kinds a cleanup run may act on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanupScope {
    pub duplicates: bool,
    pub unused: bool,
}

impl CleanupScope {
    pub fn from_flags(unused_only: bool, duplicates_only: bool) -> Self {
        Self {
            duplicates: !unused_only,
            unused: !duplicates_only,
        }
    }
}

impl Default for CleanupScope {
    fn default() -> Self {
        Self::from_flags(false, false)
    }
}

/// A file the executor may remove
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupCandidate {
    /// Root-relative path as listed in the report
    pub path: String,
    pub reason: String,
    /// Short label used in prompts
    pub label: &'static str,
}

/// Ordered candidates plus findings deferred to manual review
#[derive(Debug, Clone, Default)]
pub struct CleanupPlan {
    pub candidates: Vec<CleanupCandidate>,
    pub deferred: Vec<DeferredEntry>,
}

impl CleanupPlan {
    /// Build the plan from merged detector reports.
    ///
    /// Duplicate groups always keep their original (or first moodboard file).
    /// Unused components and animations are never candidates.
    pub fn from_details(details: &AuditDetails, scope: CleanupScope) -> Self {
        let mut plan = Self::default();
        let mut seen = HashSet::new();
        let mut push = |plan: &mut Self, path: &str, reason: String, label: &'static str| {
            if seen.insert(path.to_string()) {
                plan.candidates.push(CleanupCandidate {
                    path: path.to_string(),
                    reason,
                    label,
                });
            }
        };

        if scope.duplicates {
            if let Some(duplicates) = &details.duplicates {
                for group in &duplicates.content_duplicates {
                    for file in &group.duplicates {
                        push(&mut plan, &file.path, format!("Duplicate of {}", group.original.path), "duplicate");
                    }
                }
            }

            if let Some(moodboards) = &details.moodboard_duplicates {
                for group in &moodboards.duplicates {
                    for file in group.files.iter().skip(1) {
                        push(
                            &mut plan,
                            &file.path,
                            format!("Duplicate moodboard: {}", group.variants.join(", ")),
                            "duplicate moodboard",
                        );
                    }
                }
            }

            if let Some(svgs) = &details.svg_duplicates {
                for group in &svgs.exact_duplicates {
                    for file in &group.duplicates {
                        push(&mut plan, &file.path, format!("Duplicate SVG: {}", group.filename), "duplicate SVG");
                    }
                }
            }
        }

        if scope.unused {
            if let Some(unused) = &details.unused_assets {
                for image in &unused.unused_images {
                    push(&mut plan, &image.path, "Unused image".to_string(), "unused image");
                }

                plan.deferred.extend(
                    unused
                        .unused_components
                        .iter()
                        .chain(&unused.unused_animations)
                        .map(|record| DeferredEntry {
                            path: record.path.clone(),
                            category: record.category,
                            size: record.size_bytes,
                        }),
                );
            }
        }

        debug!(
            "Cleanup plan: {} candidates, {} deferred",
            plan.candidates.len(),
            plan.deferred.len()
        );
        plan
    }
}

/// Load the findings a cleanup run works from.
///
/// Prefers the aggregated audit artifact. Falls back to whichever per-detector
/// artifacts exist; with none at all the run cannot proceed.
pub fn load_findings(config: &Config, project_root: &Path) -> Result<AuditDetails, CleanupError> {
    let report_dir = config.report_dir(project_root);

    match AuditArtifact::load(&report_dir) {
        Ok(artifact) if !artifact.details.is_empty() => {
            info!("Using audit report from {}", artifact.timestamp);
            return Ok(artifact.details);
        }
        Ok(_) => warn!("Audit report has no detector results; looking for detector reports"),
        Err(e) => warn!("{}; looking for detector reports", e),
    }

    let detectors = &config.detectors;
    let details = AuditDetails {
        duplicates: ExternalDetector::new("Duplicates", &detectors.external_duplicates, project_root)
            .load_or_none(),
        moodboard_duplicates: ExternalDetector::new(
            "Moodboard duplicates",
            &detectors.external_moodboards,
            project_root,
        )
        .load_or_none(),
        svg_duplicates: ExternalDetector::new("SVG duplicates", &detectors.external_svgs, project_root)
            .load_or_none(),
        unused_assets: read_optional_artifact::<UnusedAssetsReport>(
            &report_dir.join(UnusedAssetsReport::FILE_NAME),
        ),
    };

    if details.is_empty() {
        return Err(CleanupError::MissingAudit(report_dir));
    }
    Ok(details)
}
