use super::Detector;
use crate::inventory::AssetCategory;

/// Component modules that no module reference resolves to
pub struct UnusedComponentsDetector;

impl UnusedComponentsDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Detector for UnusedComponentsDetector {
    fn name(&self) -> &'static str {
        "Unused components"
    }

    fn category(&self) -> AssetCategory {
        AssetCategory::Component
    }
}

impl Default for UnusedComponentsDetector {
    fn default() -> Self {
        Self::new()
    }
}
