use super::structured;
use crate::config::AssetConfig;
use crate::discovery::{SourceFile, SourceKind};
use crate::graph::{ReferenceEdge, ReferenceKind};
use miette::{IntoDiagnostic, Result, WrapErr};
use regex::Regex;
use std::path::Path;

/// Pattern-based reference extractor
pub struct ReferenceExtractor {
    /// `import x from "./a.png"`
    media_import: Regex,
    /// `src="..."`, `src={'...'}`
    src_attribute: Regex,
    /// `url(...)`
    css_url: Regex,
    /// `import ... from "./x"` and side-effect imports
    static_module: Regex,
    /// `export { X } from "./x"`, `export * from "./x"`
    reexport: Regex,
    /// `import("./x")`
    dynamic_module: Regex,
    media_extensions: Vec<String>,
    asset_segments: Vec<String>,
}

impl ReferenceExtractor {
    pub fn new(assets: &AssetConfig) -> Result<Self> {
        let extensions = assets
            .media_extensions
            .iter()
            .map(|e| regex::escape(e.trim_start_matches('.')))
            .collect::<Vec<_>>()
            .join("|");

        let media_import = format!(
            r#"\bimport\s+(?:[^;'"]*?\bfrom\s*)?["']([^"'\n]+\.(?i:{extensions}))["']"#
        );

        Ok(Self {
            media_import: compile(&media_import)?,
            src_attribute: compile(r#"\bsrc\s*=\s*\{?\s*["'`]([^"'`\n]+)["'`]"#)?,
            css_url: compile(r#"\burl\(\s*["']?([^"')\s]+?)["']?\s*\)"#)?,
            static_module: compile(
                r#"\bimport\s+(?:type\s+)?(?:[\w*{}\s,$]+?\s*\bfrom\s*)?["']([^"'\n]+)["']"#,
            )?,
            reexport: compile(
                r#"\bexport\s+(?:type\s+)?(?:\*(?:\s+as\s+\w+)?|\{[^}]*\})\s*from\s*["']([^"'\n]+)["']"#,
            )?,
            dynamic_module: compile(r#"\bimport\s*\(\s*["'`]([^"'`\n]+)["'`]\s*\)"#)?,
            media_extensions: assets
                .media_extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
                .collect(),
            asset_segments: assets.asset_segments.clone(),
        })
    }

    /// Read a file and extract its references
    pub fn extract_file(&self, file: &SourceFile) -> Result<Vec<ReferenceEdge>> {
        let text = file
            .read_contents()
            .wrap_err_with(|| format!("Could not read file: {}", file.path.display()))?;
        Ok(self.extract(&file.path, file.kind, &text))
    }

    /// Extract references from already loaded text
    pub fn extract(&self, origin: &Path, kind: SourceKind, text: &str) -> Vec<ReferenceEdge> {
        let mut edges = Vec::new();

        for cap in self.media_import.captures_iter(text) {
            edges.push(ReferenceEdge::new(origin, &cap[1], ReferenceKind::Import));
        }

        for cap in self.src_attribute.captures_iter(text) {
            let value = &cap[1];
            if self.is_media_reference(value) || self.has_asset_segment(value) {
                edges.push(ReferenceEdge::new(origin, value, ReferenceKind::JsxAttributeSrc));
            }
        }

        for cap in self.css_url.captures_iter(text) {
            let value = &cap[1];
            if self.is_media_reference(value) {
                edges.push(ReferenceEdge::new(origin, value, ReferenceKind::CssBackgroundUrl));
            }
        }

        if kind == SourceKind::Data {
            for path in structured::embedded_paths(text) {
                if self.is_media_reference(&path) && self.has_asset_segment(&path) {
                    edges.push(ReferenceEdge::new(origin, path, ReferenceKind::JsonEmbeddedPath));
                }
            }
        }

        if kind.has_modules() {
            let statics = self
                .static_module
                .captures_iter(text)
                .chain(self.reexport.captures_iter(text));
            for cap in statics {
                let specifier = &cap[1];
                if is_path_specifier(specifier) {
                    edges.push(ReferenceEdge::new(origin, specifier, ReferenceKind::Import));
                }
            }

            for cap in self.dynamic_module.captures_iter(text) {
                let specifier = &cap[1];
                // Template literals with substitutions are computed paths
                if is_path_specifier(specifier) && !specifier.contains("${") {
                    edges.push(ReferenceEdge::new(origin, specifier, ReferenceKind::DynamicImport));
                }
            }
        }

        edges
    }

    /// Whether a reference string names a media file by extension
    pub fn is_media_reference(&self, value: &str) -> bool {
        has_media_extension(value, &self.media_extensions)
    }

    fn has_asset_segment(&self, value: &str) -> bool {
        let mut components: Vec<&str> = value.split(|c: char| c == '/' || c == '\\').collect();
        // The last component is the file name, never a directory segment
        components.pop();
        components
            .iter()
            .any(|c| self.asset_segments.iter().any(|s| s.eq_ignore_ascii_case(c)))
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern)
        .into_diagnostic()
        .wrap_err_with(|| format!("Invalid extraction pattern: {}", pattern))
}

/// Whether `value` ends in one of `extensions`, ignoring any query string or fragment
pub fn has_media_extension(value: &str, extensions: &[String]) -> bool {
    let value = value.split(|c: char| c == '?' || c == '#').next().unwrap_or(value);
    let Some((_, ext)) = value.rsplit_once('.') else {
        return false;
    };
    if ext.contains('/') {
        return false;
    }
    extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
}

/// Whether a module specifier starts with a relative or absolute path marker.
///
/// Bare specifiers (`react`, `lucide-react`, `@scope/pkg`) are external dependencies.
pub fn is_path_specifier(specifier: &str) -> bool {
    specifier == "."
        || specifier == ".."
        || specifier.starts_with("./")
        || specifier.starts_with("../")
        || specifier.starts_with('/')
}
