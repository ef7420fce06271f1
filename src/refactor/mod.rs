//! Safe cleanup
//!
//! Turns audit findings into a plan and executes it under one of three modes,
//! with a compiled-in whitelist, per-run backups and an append-only log.

mod log;
mod plan;
mod prompt;
mod safe_delete;
mod undo;
mod whitelist;

pub use log::{
    CleanupLog, CleanupSummary, DeferredEntry, DeletionAction, DeletionLogEntry, FailedEntry, Journal,
    SkippedEntry,
};
pub use plan::{load_findings, CleanupCandidate, CleanupError, CleanupPlan, CleanupScope};
pub use prompt::{Prompter, ScriptedPrompter, TerminalPrompter};
pub use safe_delete::{CleanupRun, SafeCleanup};
pub use undo::RestoreScript;
pub use whitelist::{is_whitelisted, WHITELIST};

use serde::{Deserialize, Serialize};

/// How a cleanup run treats its candidates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExecutionMode {
    /// Log what would be deleted; touch nothing
    #[default]
    DryRun,
    /// Confirm every candidate
    Interactive,
    /// Confirm once, then delete everything
    Auto,
}

impl ExecutionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionMode::DryRun => "dry-run",
            ExecutionMode::Interactive => "interactive",
            ExecutionMode::Auto => "auto",
        }
    }

    /// Whether files may be removed in this mode
    pub fn is_destructive(&self) -> bool {
        !matches!(self, ExecutionMode::DryRun)
    }
}

impl std::fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
