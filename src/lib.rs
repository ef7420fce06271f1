//! assetaudit - Find unused and duplicate assets in web projects and clean them up safely
//!
//! # Architecture
//!
//! The audit pipeline consists of:
//! 1. **Source Discovery** - Walk the source roots for scripts, styles and data files
//! 2. **Reference Extraction** - Pattern rules turn file text into reference edges
//! 3. **Asset Inventory** - Enumerate images, components and animation modules
//! 4. **Reachability Matching** - Heuristic media matching and module resolution
//! 5. **Aggregation** - Merge with external duplicate detectors, derive severity
//! 6. **Safe Cleanup** - Dry-run, interactive or auto deletion with backups and logs

pub mod analysis;
pub mod audit;
pub mod config;
pub mod discovery;
pub mod extract;
pub mod graph;
pub mod inventory;
pub mod refactor;
pub mod report;

pub use analysis::{find_unused, DetectorReport, ReachabilityMatcher, UnusedAssetsReport};
pub use audit::{AuditAggregator, AuditArtifact, AuditSummary, Severity};
pub use config::Config;
pub use discovery::{SourceFile, SourceWalker};
pub use extract::ReferenceExtractor;
pub use graph::{scan_files, scan_project, ReferenceEdge, ReferenceKind, ReferenceSet};
pub use inventory::{AssetCategory, AssetRecord, Inventory, InventoryBuilder};
pub use refactor::{CleanupPlan, CleanupScope, ExecutionMode, SafeCleanup};
