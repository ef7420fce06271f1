use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Kind of reference found in a source file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReferenceKind {
    /// Static import declaration (media file or module)
    Import,

    /// `import('...')`, including `React.lazy(() => import('...'))`
    DynamicImport,

    /// `src="..."` attribute in markup
    JsxAttributeSrc,

    /// `url(...)` in a style declaration
    CssBackgroundUrl,

    /// Asset path embedded in a structured-data document
    JsonEmbeddedPath,
}

impl ReferenceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReferenceKind::Import => "import",
            ReferenceKind::DynamicImport => "dynamicImport",
            ReferenceKind::JsxAttributeSrc => "jsxAttributeSrc",
            ReferenceKind::CssBackgroundUrl => "cssBackgroundUrl",
            ReferenceKind::JsonEmbeddedPath => "jsonEmbeddedPath",
        }
    }

    /// Whether this kind can name a module to resolve
    pub fn is_module(&self) -> bool {
        matches!(self, ReferenceKind::Import | ReferenceKind::DynamicImport)
    }
}

impl std::fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A textual mention, in some source file, that plausibly points at another file.
///
/// `raw` is kept exactly as written. It is never resolved at creation time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReferenceEdge {
    /// File the reference was found in
    pub origin: PathBuf,

    /// Literal reference text
    pub raw: String,

    /// Kind of reference
    pub kind: ReferenceKind,
}

impl ReferenceEdge {
    pub fn new(origin: &Path, raw: impl Into<String>, kind: ReferenceKind) -> Self {
        Self {
            origin: origin.to_path_buf(),
            raw: raw.into(),
            kind,
        }
    }
}
