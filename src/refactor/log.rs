use super::ExecutionMode;
use crate::inventory::AssetCategory;
use chrono::{DateTime, Utc};
use miette::{IntoDiagnostic, Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeletionAction {
    WouldDelete,
    Deleted,
}

/// One file removed, or that would have been removed in a dry run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletionLogEntry {
    pub path: String,
    pub reason: String,
    pub action: DeletionAction,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub backup_path: Option<String>,
    #[serde(rename = "size")]
    pub size_bytes: u64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedEntry {
    pub path: String,
    pub reason: String,
}

/// A candidate whose backup or removal failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedEntry {
    pub path: String,
    pub error: String,
}

/// A finding held back for manual review
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeferredEntry {
    pub path: String,
    pub category: AssetCategory,
    pub size: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanupSummary {
    pub deleted: usize,
    pub would_delete: usize,
    pub skipped: usize,
    pub failed: usize,
    pub deferred: usize,
    pub already_absent: usize,
    pub total_size: u64,
}

/// The `cleanup-log-<run id>.json` artifact. Written once and never touched again.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanupLog {
    pub timestamp: DateTime<Utc>,
    pub run_id: String,
    pub mode: ExecutionMode,
    pub summary: CleanupSummary,
    pub deletions: Vec<DeletionLogEntry>,
    pub skipped: Vec<SkippedEntry>,
    pub errors: Vec<FailedEntry>,
    pub deferred: Vec<DeferredEntry>,
    pub backup_location: Option<String>,
    /// Set when processing stopped before the last candidate
    #[serde(default)]
    pub interrupted: bool,
}

impl CleanupLog {
    pub fn new(run_id: &str, mode: ExecutionMode, backup_location: Option<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            run_id: run_id.to_string(),
            mode,
            summary: CleanupSummary::default(),
            deletions: Vec::new(),
            skipped: Vec::new(),
            errors: Vec::new(),
            deferred: Vec::new(),
            backup_location,
            interrupted: false,
        }
    }

    pub fn record_deletion(&mut self, entry: DeletionLogEntry) {
        match entry.action {
            DeletionAction::Deleted => self.summary.deleted += 1,
            DeletionAction::WouldDelete => self.summary.would_delete += 1,
        }
        self.summary.total_size += entry.size_bytes;
        self.deletions.push(entry);
    }

    pub fn record_skip(&mut self, entry: SkippedEntry) {
        self.summary.skipped += 1;
        self.skipped.push(entry);
    }

    pub fn record_failure(&mut self, entry: FailedEntry) {
        self.summary.failed += 1;
        self.errors.push(entry);
    }

    pub fn record_deferred(&mut self, entry: DeferredEntry) {
        self.summary.deferred += 1;
        self.deferred.push(entry);
    }

    pub fn record_absent(&mut self) {
        self.summary.already_absent += 1;
    }

    /// Write under `report_dir` with a name no earlier run has used
    pub fn write_unique(&self, report_dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(report_dir)
            .into_diagnostic()
            .wrap_err_with(|| format!("Could not create {}", report_dir.display()))?;

        let (path, file) = create_unique(report_dir, &format!("cleanup-log-{}", self.run_id), "json")?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self).into_diagnostic()?;
        writer.flush().into_diagnostic()?;
        Ok(path)
    }
}

/// Append-only JSON-lines record of a destructive run, flushed entry by entry
pub struct Journal {
    path: PathBuf,
    writer: BufWriter<File>,
}

#[derive(Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
enum JournalEvent<'a> {
    Deletion(&'a DeletionLogEntry),
    Skipped(&'a SkippedEntry),
    Failed(&'a FailedEntry),
}

impl Journal {
    pub fn create(report_dir: &Path, run_id: &str) -> Result<Self> {
        fs::create_dir_all(report_dir).into_diagnostic()?;
        let (path, file) = create_unique(report_dir, &format!("cleanup-journal-{}", run_id), "jsonl")?;
        Ok(Self {
            path,
            writer: BufWriter::new(file),
        })
    }

    #[cfg(test)]
    pub(super) fn with_file(path: PathBuf, file: File) -> Self {
        Self {
            path,
            writer: BufWriter::new(file),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn deletion(&mut self, entry: &DeletionLogEntry) -> Result<()> {
        self.append(&JournalEvent::Deletion(entry))
    }

    pub fn skipped(&mut self, entry: &SkippedEntry) -> Result<()> {
        self.append(&JournalEvent::Skipped(entry))
    }

    pub fn failed(&mut self, entry: &FailedEntry) -> Result<()> {
        self.append(&JournalEvent::Failed(entry))
    }

    fn append(&mut self, event: &JournalEvent<'_>) -> Result<()> {
        serde_json::to_writer(&mut self.writer, event).into_diagnostic()?;
        self.writer.write_all(b"\n").into_diagnostic()?;
        self.writer.flush().into_diagnostic()
    }
}

fn create_unique(dir: &Path, stem: &str, extension: &str) -> Result<(PathBuf, File)> {
    let mut counter = 0;
    loop {
        let name = if counter == 0 {
            format!("{}.{}", stem, extension)
        } else {
            format!("{}-{}.{}", stem, counter, extension)
        };
        let path = dir.join(name);

        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => counter += 1,
            Err(e) => {
                return Err(e)
                    .into_diagnostic()
                    .wrap_err_with(|| format!("Could not create {}", path.display()))
            }
        }
    }
}
