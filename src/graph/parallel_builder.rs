// Parallel reference extraction using rayon

use super::{ReferenceEdge, ReferenceSet};
use crate::discovery::SourceFile;
use crate::extract::ReferenceExtractor;
use miette::Result;
use rayon::prelude::*;
use tracing::{info, warn};

/// Extracts references from many files at once.
///
/// File reads and pattern scans are independent, so each file is handled on its
/// own worker and the per-file edge lists are merged afterwards.
pub struct ParallelReferenceBuilder<'a> {
    extractor: &'a ReferenceExtractor,
}

impl<'a> ParallelReferenceBuilder<'a> {
    pub fn new(extractor: &'a ReferenceExtractor) -> Self {
        Self { extractor }
    }

    /// Build the reference set from source files using parallel processing
    pub fn build_from_files(&self, files: &[SourceFile]) -> ReferenceSet {
        info!("Extracting references from {} files in parallel...", files.len());

        let results: Vec<Result<Vec<ReferenceEdge>>> = files
            .par_iter()
            .map(|file| self.extractor.extract_file(file))
            .collect();

        let mut references = ReferenceSet::new();
        let mut skipped = 0;

        for result in results {
            match result {
                Ok(edges) => references.extend(edges),
                Err(e) => {
                    warn!("{}", e);
                    skipped += 1;
                }
            }
        }

        info!(
            "Collected {} references ({} files skipped)",
            references.len(),
            skipped
        );

        references
    }
}
