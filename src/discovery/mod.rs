mod walker;

pub use walker::{relative_slash_path, SourceFile, SourceKind, SourceWalker};
