use super::Detector;
use crate::inventory::AssetCategory;

/// Animation modules that nothing imports.
///
/// Findings are report-only; cleanup always defers them to manual review.
pub struct UnusedAnimationsDetector;

impl UnusedAnimationsDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Detector for UnusedAnimationsDetector {
    fn name(&self) -> &'static str {
        "Unused animations"
    }

    fn category(&self) -> AssetCategory {
        AssetCategory::Animation
    }
}

impl Default for UnusedAnimationsDetector {
    fn default() -> Self {
        Self::new()
    }
}
