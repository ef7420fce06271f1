use crate::extract::is_path_specifier;
use path_clean::PathClean;
use path_slash::PathExt;
use std::path::{Path, PathBuf};
use tracing::trace;

/// Resolves module specifiers to concrete files on disk.
///
/// Only path-like specifiers are resolved. `./x` and `../x` are joined against the
/// referencing file's directory, `/x` against the project root. Bare specifiers are
/// external packages and never resolve.
pub struct ModuleResolver {
    project_root: PathBuf,
    probe_extensions: Vec<String>,
}

impl ModuleResolver {
    pub fn new(project_root: &Path, probe_extensions: &[String]) -> Self {
        Self {
            project_root: project_root.to_path_buf().clean(),
            probe_extensions: probe_extensions.to_vec(),
        }
    }

    /// Resolve `specifier` as written in `origin`, returning the matched file
    pub fn resolve(&self, origin: &Path, specifier: &str) -> Option<PathBuf> {
        if !is_path_specifier(specifier) {
            return None;
        }

        let base = if let Some(absolute) = specifier.strip_prefix('/') {
            self.project_root.join(absolute)
        } else {
            origin.parent().unwrap_or(Path::new("")).join(specifier)
        };
        let base = base.clean();

        // Every suffix on the specifier itself before any directory index
        for ext in &self.probe_extensions {
            let file = append_extension(&base, ext);
            if file.is_file() {
                return Some(file);
            }
        }

        for ext in self.probe_extensions.iter().filter(|e| !e.is_empty()) {
            let index = base.join(format!("index{}", ext));
            if index.is_file() {
                return Some(index);
            }
        }

        trace!("Unresolved module reference {} from {}", specifier, origin.display());
        None
    }

    /// Resolve and express the hit as a lowercase root-relative slash path
    pub fn resolve_relative(&self, origin: &Path, specifier: &str) -> Option<String> {
        let resolved = self.resolve(origin, specifier)?;
        Some(self.root_relative(&resolved).to_lowercase())
    }

    fn root_relative(&self, path: &Path) -> String {
        let path = path.to_path_buf().clean();
        if self.project_root == Path::new(".") {
            return path.to_slash_lossy().into_owned();
        }
        path.strip_prefix(&self.project_root)
            .unwrap_or(&path)
            .to_slash_lossy()
            .into_owned()
    }
}

fn append_extension(base: &Path, ext: &str) -> PathBuf {
    if ext.is_empty() {
        return base.to_path_buf();
    }
    let mut raw = base.as_os_str().to_os_string();
    raw.push(ext);
    PathBuf::from(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AssetConfig;
    use std::fs;
    use tempfile::TempDir;

    fn project() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        for rel in [
            "src/components/Card.tsx",
            "src/components/forms/index.ts",
            "src/pages/Home.tsx",
            "src/utils/format.js",
        ] {
            let path = root.join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, "export {}").unwrap();
        }
        temp_dir
    }

    fn resolver(root: &Path) -> ModuleResolver {
        ModuleResolver::new(root, &AssetConfig::default().module_probe_extensions)
    }

    #[test]
    fn test_resolves_relative_with_probe() {
        let temp_dir = project();
        let root = temp_dir.path();
        let origin = root.join("src/pages/Home.tsx");

        assert_eq!(
            resolver(root).resolve_relative(&origin, "../components/Card"),
            Some("src/components/card.tsx".to_string())
        );
        assert_eq!(
            resolver(root).resolve_relative(&origin, "../utils/format.js"),
            Some("src/utils/format.js".to_string())
        );
    }

    #[test]
    fn test_resolves_directory_index() {
        let temp_dir = project();
        let root = temp_dir.path();
        let origin = root.join("src/pages/Home.tsx");

        assert_eq!(
            resolver(root).resolve_relative(&origin, "../components/forms"),
            Some("src/components/forms/index.ts".to_string())
        );
    }

    #[test]
    fn test_file_wins_over_directory_index() {
        let temp_dir = project();
        let root = temp_dir.path();
        let index = root.join("src/components/Card/index.ts");
        fs::create_dir_all(index.parent().unwrap()).unwrap();
        fs::write(&index, "export {}").unwrap();
        let origin = root.join("src/pages/Home.tsx");

        assert_eq!(
            resolver(root).resolve_relative(&origin, "../components/Card"),
            Some("src/components/card.tsx".to_string())
        );
    }

    #[test]
    fn test_root_absolute_specifier() {
        let temp_dir = project();
        let root = temp_dir.path();
        let origin = root.join("src/pages/Home.tsx");

        assert_eq!(
            resolver(root).resolve_relative(&origin, "/src/components/Card"),
            Some("src/components/card.tsx".to_string())
        );
    }

    #[test]
    fn test_bare_and_missing_specifiers() {
        let temp_dir = project();
        let root = temp_dir.path();
        let origin = root.join("src/pages/Home.tsx");

        assert!(resolver(root).resolve(&origin, "lucide-react").is_none());
        assert!(resolver(root).resolve(&origin, "Card").is_none());
        assert!(resolver(root).resolve(&origin, "./Missing").is_none());
    }
}
