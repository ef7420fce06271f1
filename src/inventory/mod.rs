//! Asset inventory
//!
//! Enumerates the physical files that are candidates for unused-asset detection.

mod builder;

pub use builder::InventoryBuilder;

use serde::{Deserialize, Serialize};

/// Category of a candidate asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetCategory {
    Image,
    Component,
    Animation,
}

impl AssetCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetCategory::Image => "image",
            AssetCategory::Component => "component",
            AssetCategory::Animation => "animation",
        }
    }

    /// Plural label for reports
    pub fn label(&self) -> &'static str {
        match self {
            AssetCategory::Image => "images",
            AssetCategory::Component => "components",
            AssetCategory::Animation => "animations",
        }
    }
}

impl std::fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One physical candidate file
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetRecord {
    /// Path relative to the project root, forward slashes
    pub path: String,

    /// Size on disk
    #[serde(rename = "size")]
    pub size_bytes: u64,

    pub category: AssetCategory,
}

impl AssetRecord {
    pub fn new(path: impl Into<String>, size_bytes: u64, category: AssetCategory) -> Self {
        Self {
            path: path.into(),
            size_bytes,
            category,
        }
    }
}

/// All candidate assets of one audit run
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    records: Vec<AssetRecord>,
}

impl Inventory {
    pub fn new(records: Vec<AssetRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[AssetRecord] {
        &self.records
    }

    pub fn of(&self, category: AssetCategory) -> impl Iterator<Item = &AssetRecord> {
        self.records.iter().filter(move |r| r.category == category)
    }

    pub fn count(&self, category: AssetCategory) -> usize {
        self.of(category).count()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
