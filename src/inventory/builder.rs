use super::{AssetCategory, AssetRecord, Inventory};
use crate::config::Config;
use crate::discovery::relative_slash_path;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};
use walkdir::WalkDir;

/// Builds the asset inventory from the configured asset roots
pub struct InventoryBuilder<'a> {
    config: &'a Config,
    project_root: PathBuf,
}

impl<'a> InventoryBuilder<'a> {
    pub fn new(config: &'a Config, project_root: &Path) -> Self {
        Self {
            config,
            project_root: project_root.to_path_buf(),
        }
    }

    /// Inventory of the requested categories
    pub fn build(&self, categories: &[AssetCategory]) -> Inventory {
        let mut records = Vec::new();
        for category in categories {
            match category {
                AssetCategory::Image => records.extend(self.media()),
                AssetCategory::Component => records.extend(self.components()),
                AssetCategory::Animation => records.extend(self.animations()),
            }
        }
        Inventory::new(records)
    }

    /// Media files under every image root, unioned
    pub fn media(&self) -> Vec<AssetRecord> {
        let assets = &self.config.assets;
        let public_dir = self.project_root.join(&assets.public_dir);

        let mut by_path = BTreeMap::new();
        for root in &assets.image_roots {
            for record in self.scan(&public_dir.join(root), AssetCategory::Image, &assets.media_extensions, |_| true) {
                by_path.insert(record.path.clone(), record);
            }
        }

        debug!("Found {} media files", by_path.len());
        by_path.into_values().collect()
    }

    /// Component modules, excluding barrels, tests, entry points and the animation tree
    pub fn components(&self) -> Vec<AssetRecord> {
        let assets = &self.config.assets;
        let animations_prefix = format!(
            "{}/",
            assets.animations_dir.to_string_lossy().replace('\\', "/").trim_end_matches('/')
        );

        let records = self.scan(
            &self.project_root.join(&assets.components_dir),
            AssetCategory::Component,
            &assets.component_extensions,
            |relative| !relative.starts_with(&animations_prefix),
        );

        debug!("Found {} component files", records.len());
        records
    }

    /// Animation modules under the animation tree
    pub fn animations(&self) -> Vec<AssetRecord> {
        let assets = &self.config.assets;
        let records = self.scan(
            &self.project_root.join(&assets.animations_dir),
            AssetCategory::Animation,
            &assets.animation_extensions,
            |_| true,
        );

        debug!("Found {} animation files", records.len());
        records
    }

    fn scan(
        &self,
        dir: &Path,
        category: AssetCategory,
        extensions: &[String],
        keep: impl Fn(&str) -> bool,
    ) -> Vec<AssetRecord> {
        if !dir.is_dir() {
            trace!("Asset root does not exist: {}", dir.display());
            return Vec::new();
        }

        let walker = WalkDir::new(dir).into_iter().filter_entry(|e| {
            e.depth() == 0
                || !e.file_type().is_dir()
                || !self.config.is_excluded_dir(&e.file_name().to_string_lossy())
        });

        let mut records = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable asset entry: {}", e);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if !has_extension(path, extensions) {
                continue;
            }

            let relative = relative_slash_path(&self.project_root, path);

            if category != AssetCategory::Image {
                let file_name = entry.file_name().to_string_lossy();
                if is_index_file(&file_name) || is_test_file(&file_name) || file_name.ends_with(".d.ts") {
                    trace!("Skipping non-component module: {}", relative);
                    continue;
                }
                if self.config.is_entry_point(&relative) {
                    trace!("Skipping entry point: {}", relative);
                    continue;
                }
            }

            if !keep(&relative) {
                continue;
            }

            let size = match entry.metadata() {
                Ok(metadata) => metadata.len(),
                Err(e) => {
                    warn!("Could not stat {}: {}", relative, e);
                    continue;
                }
            };

            records.push(AssetRecord::new(relative, size, category));
        }

        records.sort_by(|a, b| a.path.cmp(&b.path));
        records
    }
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| {
            extensions
                .iter()
                .any(|allowed| allowed.trim_start_matches('.').eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

fn is_index_file(file_name: &str) -> bool {
    file_name
        .split_once('.')
        .map(|(stem, _)| stem == "index")
        .unwrap_or(false)
}

fn is_test_file(file_name: &str) -> bool {
    file_name.contains(".test.") || file_name.contains(".spec.")
}
