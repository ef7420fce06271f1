use miette::{IntoDiagnostic, Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for an asset audit run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where source files are discovered
    pub sources: SourceConfig,

    /// Where candidate assets live and how they are recognised
    pub assets: AssetConfig,

    /// Which detectors run
    pub detectors: DetectorConfig,

    /// Report artifact configuration
    pub report: ReportConfig,

    /// Cleanup executor configuration
    pub cleanup: CleanupConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Directories scanned for references, relative to the project root
    pub roots: Vec<PathBuf>,

    /// File extensions read by the extractor
    pub extensions: Vec<String>,

    /// Directory names skipped at any depth
    pub exclude_dirs: Vec<String>,

    /// Glob patterns excluded from scanning
    pub exclude: Vec<String>,

    /// Honour .gitignore files while walking
    pub respect_gitignore: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Public directory holding media assets
    pub public_dir: PathBuf,

    /// Media roots below the public directory
    pub image_roots: Vec<PathBuf>,

    /// Recognised media extensions (without dot)
    pub media_extensions: Vec<String>,

    /// Directory segments that mark a path as pointing into an asset tree
    pub asset_segments: Vec<String>,

    /// Component tree, relative to the project root
    pub components_dir: PathBuf,

    /// Animation component tree, relative to the project root
    pub animations_dir: PathBuf,

    /// Extensions of component modules
    pub component_extensions: Vec<String>,

    /// Extensions of animation modules
    pub animation_extensions: Vec<String>,

    /// Files that are always considered used
    pub entry_points: Vec<String>,

    /// Suffixes probed, in order, when resolving a module specifier
    pub module_probe_extensions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Content duplicate detection (external)
    pub duplicates: bool,

    /// Unused images and components
    pub unused: bool,

    /// Moodboard duplicate detection (external)
    pub moodboards: bool,

    /// SVG duplicate detection (external)
    pub svgs: bool,

    /// Unused animation components
    pub animations: bool,

    /// External duplicates detector
    pub external_duplicates: ExternalDetectorConfig,

    /// External moodboard duplicates detector
    pub external_moodboards: ExternalDetectorConfig,

    /// External SVG duplicates detector
    pub external_svgs: ExternalDetectorConfig,
}

/// A detector implemented outside this crate.
///
/// The detector is a black box: if `command` is set it is spawned from the
/// project root, then its JSON report is read from `report`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExternalDetectorConfig {
    /// Command line to spawn before reading the report
    pub command: Option<Vec<String>>,

    /// Report file, relative to the project root
    pub report: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Directory receiving every artifact, relative to the project root
    pub dir: PathBuf,

    /// Unused images are only recommended for cleanup above this count
    pub unused_image_threshold: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanupConfig {
    /// Backup root, relative to the project root. Each run gets its own subdirectory.
    pub backup_dir: PathBuf,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            roots: vec![PathBuf::from("src"), PathBuf::from("public")],
            extensions: strings(&["tsx", "ts", "jsx", "js", "css", "json"]),
            exclude_dirs: strings(&["node_modules", ".git"]),
            exclude: vec![],
            respect_gitignore: false,
        }
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            public_dir: PathBuf::from("public"),
            image_roots: vec![PathBuf::from("images"), PathBuf::from("apps")],
            media_extensions: strings(&["jpg", "jpeg", "png", "gif", "webp", "svg", "avif"]),
            asset_segments: strings(&["images", "apps"]),
            components_dir: PathBuf::from("src/components"),
            animations_dir: PathBuf::from("src/components/animations"),
            component_extensions: strings(&["tsx", "ts", "jsx", "js"]),
            animation_extensions: strings(&["tsx", "ts"]),
            entry_points: strings(&["src/main.tsx", "src/App.tsx", "src/router/AppRouter.tsx"]),
            module_probe_extensions: strings(&[".ts", ".tsx", ".js", ".jsx", ""]),
        }
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            duplicates: true,
            unused: true,
            moodboards: true,
            svgs: true,
            animations: true,
            external_duplicates: ExternalDetectorConfig {
                command: None,
                report: PathBuf::from("reports/duplicates-report.json"),
            },
            external_moodboards: ExternalDetectorConfig {
                command: None,
                report: PathBuf::from("reports/moodboard-duplicates-report.json"),
            },
            external_svgs: ExternalDetectorConfig {
                command: None,
                report: PathBuf::from("reports/svg-duplicates-report.json"),
            },
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("reports"),
            unused_image_threshold: 0,
        }
    }
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            backup_dir: PathBuf::from(".cleanup-backup"),
        }
    }
}

impl Config {
    /// Load configuration from a file (YAML or TOML)
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        match extension {
            "yml" | "yaml" => serde_yaml::from_str(&contents)
                .into_diagnostic()
                .wrap_err("Failed to parse YAML config"),
            "toml" => toml::from_str(&contents)
                .into_diagnostic()
                .wrap_err("Failed to parse TOML config"),
            _ => {
                // Try YAML first, then TOML
                if let Ok(config) = serde_yaml::from_str(&contents) {
                    Ok(config)
                } else {
                    toml::from_str(&contents)
                        .into_diagnostic()
                        .wrap_err("Failed to parse config file")
                }
            }
        }
    }

    /// Try to load configuration from default locations
    pub fn from_default_locations(project_root: &Path) -> Result<Self> {
        let default_names = [
            ".assetaudit.yml",
            ".assetaudit.yaml",
            ".assetaudit.toml",
            "assetaudit.yml",
            "assetaudit.yaml",
            "assetaudit.toml",
        ];

        for name in &default_names {
            let path = project_root.join(name);
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        // No config file found, use defaults
        Ok(Self::default())
    }

    /// Check if a path matches one of the exclusion patterns
    pub fn should_exclude(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy().replace('\\', "/");
        self.sources
            .exclude
            .iter()
            .any(|pattern| glob_match(pattern, &path_str))
    }

    /// Check if a directory name is skipped at any depth
    pub fn is_excluded_dir(&self, name: &str) -> bool {
        self.sources.exclude_dirs.iter().any(|d| d == name)
    }

    /// Check if a root-relative path is a designated entry point
    pub fn is_entry_point(&self, relative: &str) -> bool {
        self.assets
            .entry_points
            .iter()
            .any(|e| e.eq_ignore_ascii_case(relative))
    }

    /// Absolute location of the report directory
    pub fn report_dir(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.report.dir)
    }
}

/// Simple glob matching for patterns like "*.test.tsx" or "**/generated/**"
fn glob_match(pattern: &str, text: &str) -> bool {
    // Handle simple wildcard patterns
    if pattern.starts_with('*') && !pattern.contains('/') {
        let suffix = &pattern[1..];
        return text.ends_with(suffix);
    }

    if pattern.ends_with('*') && !pattern.contains('/') {
        let prefix = &pattern[..pattern.len() - 1];
        return text.starts_with(prefix);
    }

    // Handle path patterns with **
    if pattern.contains("**") {
        let cleaned = pattern.replace("**/", "").replace("/**", "");

        // "**/dist/**" must match a complete directory name, not a substring
        if pattern.starts_with("**/") && pattern.ends_with("/**") {
            let dir_name = cleaned.trim_matches('/');
            let dir_pattern = format!("/{}/", dir_name);
            return text.contains(&dir_pattern);
        }

        let parts: Vec<&str> = pattern.split("**").collect();
        if parts.len() == 2 {
            let prefix = parts[0].trim_end_matches('/');
            let suffix = parts[1].trim_start_matches('/');

            if prefix.is_empty() && suffix.is_empty() {
                return true;
            }

            if prefix.is_empty() {
                return text.ends_with(suffix) || text.contains(&format!("/{}", suffix));
            }

            if suffix.is_empty() {
                return text.starts_with(prefix) || text.contains(&format!("{}/", prefix));
            }

            return (text.starts_with(prefix) || text.contains(&format!("/{}/", prefix)))
                && (text.ends_with(suffix) || text.contains(&format!("/{}", suffix)));
        }
    }

    text == pattern
}
