use super::ReferenceSet;
use crate::discovery::SourceFile;
use crate::extract::ReferenceExtractor;
use tracing::{debug, warn};

/// Builder for the reference set of one audit pass.
///
/// Files that cannot be read are skipped with a warning.
pub struct ReferenceSetBuilder<'a> {
    /// The set being built
    references: ReferenceSet,

    /// Extraction rules
    extractor: &'a ReferenceExtractor,

    /// Number of files whose text was scanned
    files_scanned: usize,

    /// Number of files skipped because they could not be read
    files_skipped: usize,
}

impl<'a> ReferenceSetBuilder<'a> {
    pub fn new(extractor: &'a ReferenceExtractor) -> Self {
        Self {
            references: ReferenceSet::new(),
            extractor,
            files_scanned: 0,
            files_skipped: 0,
        }
    }

    /// Extract a file's references into the set
    pub fn process_file(&mut self, file: &SourceFile) {
        match self.extractor.extract_file(file) {
            Ok(edges) => {
                debug!("{} references in {}", edges.len(), file.path.display());
                self.references.extend(edges);
                self.files_scanned += 1;
            }
            Err(e) => {
                warn!("{}", e);
                self.files_skipped += 1;
            }
        }
    }

    pub fn files_scanned(&self) -> usize {
        self.files_scanned
    }

    pub fn files_skipped(&self) -> usize {
        self.files_skipped
    }

    pub fn build(self) -> ReferenceSet {
        self.references
    }
}
