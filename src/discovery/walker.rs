use crate::config::Config;
use ignore::{Walk, WalkBuilder};
use miette::{IntoDiagnostic, Result};
use path_slash::PathExt as _;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

/// Kind of source file, decides which extraction rules apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// JavaScript / TypeScript modules
    Script,
    /// Style sheets
    Stylesheet,
    /// Structured data documents (JSON)
    Data,
    /// HTML-like templates
    Markup,
    /// Allow-listed but otherwise unclassified text
    Other,
}

impl SourceKind {
    /// Classify a file by extension
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "ts" | "tsx" | "js" | "jsx" | "mjs" | "cjs" | "mts" | "cts" => SourceKind::Script,
            "css" | "scss" | "sass" | "less" => SourceKind::Stylesheet,
            "json" => SourceKind::Data,
            "html" | "htm" | "vue" | "svelte" | "astro" | "mdx" => SourceKind::Markup,
            _ => SourceKind::Other,
        }
    }

    /// Whether module-reference declarations are meaningful in this kind of file
    pub fn has_modules(&self) -> bool {
        matches!(self, SourceKind::Script | SourceKind::Markup)
    }
}

/// A discovered source file. Contents are read on demand and not retained.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Absolute path to the file
    pub path: PathBuf,

    /// Kind of source file
    pub kind: SourceKind,
}

impl SourceFile {
    pub fn new(path: PathBuf) -> Self {
        let kind = SourceKind::from_path(&path);
        Self { path, kind }
    }

    /// Read the file as text
    pub fn read_contents(&self) -> Result<String> {
        std::fs::read_to_string(&self.path).into_diagnostic()
    }
}

/// Walks the configured source roots and yields allow-listed files.
///
/// The walk is lazy and can be restarted by calling [`SourceWalker::walk`] again.
/// Symlinks are not followed; cycles through symlinked directories are therefore
/// never entered, but hard-linked or bind-mounted loops are not detected.
pub struct SourceWalker<'a> {
    config: &'a Config,
    project_root: PathBuf,
}

impl<'a> SourceWalker<'a> {
    pub fn new(config: &'a Config, project_root: &Path) -> Self {
        Self {
            config,
            project_root: project_root.to_path_buf(),
        }
    }

    /// Existing root directories to walk
    pub fn roots(&self) -> Vec<PathBuf> {
        self.config
            .sources
            .roots
            .iter()
            .map(|r| self.project_root.join(r))
            .filter(|r| {
                let exists = r.is_dir();
                if !exists {
                    trace!("Source root does not exist: {}", r.display());
                }
                exists
            })
            .collect()
    }

    /// Lazily enumerate source files under every root
    pub fn walk(&self) -> impl Iterator<Item = SourceFile> + '_ {
        self.build_walk()
            .into_iter()
            .flatten()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    None
                }
            })
            .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
            .filter_map(move |entry| {
                let path = entry.path();

                if self.config.should_exclude(path) {
                    trace!("Excluding: {}", path.display());
                    return None;
                }

                if !self.is_allowed(path) {
                    return None;
                }

                trace!("Found source: {}", path.display());
                Some(SourceFile::new(path.to_path_buf()))
            })
    }

    /// Collect the whole walk
    pub fn find_files(&self) -> Vec<SourceFile> {
        let files: Vec<SourceFile> = self.walk().collect();
        debug!("Found {} source files", files.len());
        files
    }

    fn build_walk(&self) -> Option<Walk> {
        let roots = self.roots();
        let (first, rest) = roots.split_first()?;

        let mut builder = WalkBuilder::new(first);
        for root in rest {
            builder.add(root);
        }

        let respect_gitignore = self.config.sources.respect_gitignore;
        let exclude_dirs = self.config.sources.exclude_dirs.clone();

        builder
            .hidden(false)
            .git_ignore(respect_gitignore)
            .git_global(respect_gitignore)
            .git_exclude(respect_gitignore)
            .ignore(respect_gitignore)
            .parents(respect_gitignore)
            .follow_links(false)
            .filter_entry(move |entry| {
                let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
                if !is_dir || entry.depth() == 0 {
                    return true;
                }
                let name = entry.file_name().to_string_lossy();
                !exclude_dirs.iter().any(|d| d.as_str() == name)
            });

        Some(builder.build())
    }

    fn is_allowed(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        self.config
            .sources
            .extensions
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(ext))
    }
}

/// Express `path` relative to `root` with forward slashes.
///
/// Paths outside `root` are returned whole, slash-normalised.
pub fn relative_slash_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative.to_slash_lossy().into_owned()
}
