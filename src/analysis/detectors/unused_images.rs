use super::Detector;
use crate::inventory::AssetCategory;

/// Media files under the image roots that no reference string covers
pub struct UnusedImagesDetector;

impl UnusedImagesDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Detector for UnusedImagesDetector {
    fn name(&self) -> &'static str {
        "Unused images"
    }

    fn category(&self) -> AssetCategory {
        AssetCategory::Image
    }
}

impl Default for UnusedImagesDetector {
    fn default() -> Self {
        Self::new()
    }
}
