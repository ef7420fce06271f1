//! Audit aggregation
//!
//! Merges the in-process unused-asset findings with the black-box duplicate
//! detectors, derives severity and recommendations, and persists the result.

mod aggregator;
pub mod external;
mod summary;

pub use aggregator::{AuditAggregator, AuditArtifact, AuditDetails};
pub use external::{DetectorError, DuplicatesReport, ExternalDetector, FileEntry, MoodboardReport, SvgReport};
pub use summary::{AuditSummary, Priority, Recommendation, RecommendationKind, Severity};
