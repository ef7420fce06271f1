//! Reachability analysis and the in-process unused-asset detectors

pub mod detectors;
mod matcher;
mod resolver;

pub use detectors::{Detector, UnusedAnimationsDetector, UnusedComponentsDetector, UnusedImagesDetector};
pub use matcher::{MediaPath, MediaStrategy, ReachabilityMatcher};
pub use resolver::ModuleResolver;

use crate::config::Config;
use crate::graph::ReferenceSet;
use crate::inventory::{AssetCategory, AssetRecord, Inventory, InventoryBuilder};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Findings of one detector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectorReport {
    pub category: AssetCategory,
    pub unused_items: Vec<AssetRecord>,
    pub total_unused_size: u64,
}

impl DetectorReport {
    pub fn new(category: AssetCategory, unused_items: Vec<AssetRecord>) -> Self {
        let total_unused_size = unused_items.iter().map(|r| r.size_bytes).sum();
        Self {
            category,
            unused_items,
            total_unused_size,
        }
    }

    /// Report substituted for a detector that did not run or failed
    pub fn empty(category: AssetCategory) -> Self {
        Self::new(category, Vec::new())
    }

    pub fn count(&self) -> usize {
        self.unused_items.len()
    }
}

/// Run every detector against one inventory
pub fn run_detectors(
    detectors: &[Box<dyn Detector>],
    matcher: &ReachabilityMatcher,
    inventory: &Inventory,
) -> Vec<DetectorReport> {
    detectors
        .iter()
        .map(|detector| {
            let report = detector.detect(matcher, inventory);
            info!(
                "{}: {} unused of {} {}",
                detector.name(),
                report.count(),
                inventory.count(detector.category()),
                detector.category().label()
            );
            report
        })
        .collect()
}

/// Detector for one inventory category
pub fn detector_for(category: AssetCategory) -> Box<dyn Detector> {
    match category {
        AssetCategory::Image => Box::new(UnusedImagesDetector::new()),
        AssetCategory::Component => Box::new(UnusedComponentsDetector::new()),
        AssetCategory::Animation => Box::new(UnusedAnimationsDetector::new()),
    }
}

/// Inventory the requested categories and report what `references` leaves uncovered
pub fn find_unused(
    config: &Config,
    project_root: &Path,
    references: &ReferenceSet,
    categories: &[AssetCategory],
) -> Vec<DetectorReport> {
    let inventory = InventoryBuilder::new(config, project_root).build(categories);
    info!(
        "Inventoried {} images, {} components, {} animations",
        inventory.count(AssetCategory::Image),
        inventory.count(AssetCategory::Component),
        inventory.count(AssetCategory::Animation)
    );

    let matcher = ReachabilityMatcher::new(references, config, project_root);
    let detectors: Vec<Box<dyn Detector>> = categories.iter().map(|c| detector_for(*c)).collect();
    run_detectors(&detectors, &matcher, &inventory)
}

/// The `unused-assets-report.json` artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnusedAssetsReport {
    pub timestamp: DateTime<Utc>,
    pub summary: UnusedSummary,
    #[serde(default)]
    pub unused_images: Vec<AssetRecord>,
    #[serde(default)]
    pub unused_components: Vec<AssetRecord>,
    #[serde(default)]
    pub unused_animations: Vec<AssetRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UnusedSummary {
    pub unused_images: usize,
    pub unused_components: usize,
    pub unused_animations: usize,
    pub total_unused_size: u64,
}

impl UnusedAssetsReport {
    pub const FILE_NAME: &'static str = "unused-assets-report.json";

    pub fn from_reports(reports: &[DetectorReport]) -> Self {
        let items = |category: AssetCategory| -> Vec<AssetRecord> {
            reports
                .iter()
                .filter(|r| r.category == category)
                .flat_map(|r| r.unused_items.iter().cloned())
                .collect()
        };

        let unused_images = items(AssetCategory::Image);
        let unused_components = items(AssetCategory::Component);
        let unused_animations = items(AssetCategory::Animation);

        Self {
            timestamp: Utc::now(),
            summary: UnusedSummary {
                unused_images: unused_images.len(),
                unused_components: unused_components.len(),
                unused_animations: unused_animations.len(),
                total_unused_size: reports.iter().map(|r| r.total_unused_size).sum(),
            },
            unused_images,
            unused_components,
            unused_animations,
        }
    }

    /// Split back into per-category detector reports
    pub fn into_reports(self) -> Vec<DetectorReport> {
        vec![
            DetectorReport::new(AssetCategory::Image, self.unused_images),
            DetectorReport::new(AssetCategory::Component, self.unused_components),
            DetectorReport::new(AssetCategory::Animation, self.unused_animations),
        ]
    }
}
