mod builder;
mod parallel_builder;
mod reference;

pub use builder::ReferenceSetBuilder;
pub use parallel_builder::ParallelReferenceBuilder;
pub use reference::{ReferenceEdge, ReferenceKind};

use crate::config::Config;
use crate::discovery::{SourceFile, SourceWalker};
use crate::extract::ReferenceExtractor;
use miette::Result;
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

/// Every reference found during one audit pass.
///
/// Unordered; inserting the same edge twice is harmless.
#[derive(Debug, Clone, Default)]
pub struct ReferenceSet {
    edges: HashSet<ReferenceEdge>,
}

impl ReferenceSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, edge: ReferenceEdge) -> bool {
        self.edges.insert(edge)
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReferenceEdge> {
        self.edges.iter()
    }

    /// Edges that can name a module
    pub fn module_edges(&self) -> impl Iterator<Item = &ReferenceEdge> {
        self.edges.iter().filter(|e| e.kind.is_module())
    }

    /// Number of edges of one kind
    pub fn count_kind(&self, kind: ReferenceKind) -> usize {
        self.edges.iter().filter(|e| e.kind == kind).count()
    }
}

impl Extend<ReferenceEdge> for ReferenceSet {
    fn extend<T: IntoIterator<Item = ReferenceEdge>>(&mut self, iter: T) {
        self.edges.extend(iter);
    }
}

impl FromIterator<ReferenceEdge> for ReferenceSet {
    fn from_iter<T: IntoIterator<Item = ReferenceEdge>>(iter: T) -> Self {
        Self {
            edges: iter.into_iter().collect(),
        }
    }
}

/// Walk the configured source roots and extract every reference
pub fn scan_project(config: &Config, project_root: &Path, parallel: bool) -> Result<ReferenceSet> {
    let files = SourceWalker::new(config, project_root).find_files();
    scan_files(config, &files, parallel, || {})
}

/// Extract every reference from already discovered source files.
///
/// `on_file` runs after each file in sequential mode; the parallel path does not call it.
pub fn scan_files(
    config: &Config,
    files: &[SourceFile],
    parallel: bool,
    mut on_file: impl FnMut(),
) -> Result<ReferenceSet> {
    let extractor = ReferenceExtractor::new(&config.assets)?;

    if parallel {
        return Ok(ParallelReferenceBuilder::new(&extractor).build_from_files(files));
    }

    let mut builder = ReferenceSetBuilder::new(&extractor);
    for file in files {
        builder.process_file(file);
        on_file();
    }
    info!(
        "Scanned {} files, {} could not be read",
        builder.files_scanned(),
        builder.files_skipped()
    );
    Ok(builder.build())
}
