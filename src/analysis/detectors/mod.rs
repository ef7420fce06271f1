// Unused-asset detectors, one per inventory category

mod unused_animations;
mod unused_components;
mod unused_images;

pub use unused_animations::UnusedAnimationsDetector;
pub use unused_components::UnusedComponentsDetector;
pub use unused_images::UnusedImagesDetector;

use crate::analysis::{DetectorReport, ReachabilityMatcher};
use crate::inventory::{AssetCategory, Inventory};

/// Trait for unused-asset detectors.
///
/// A detector is a pure function of the matcher's reference snapshot and the inventory.
pub trait Detector: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &'static str;

    /// Inventory category this detector inspects
    fn category(&self) -> AssetCategory;

    /// Run the detector and return the unreferenced entries
    fn detect(&self, matcher: &ReachabilityMatcher, inventory: &Inventory) -> DetectorReport {
        let unused = inventory
            .of(self.category())
            .filter(|record| !matcher.is_referenced(record))
            .cloned()
            .collect();
        DetectorReport::new(self.category(), unused)
    }
}
