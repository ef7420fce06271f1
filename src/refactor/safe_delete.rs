use super::log::{CleanupLog, DeletionAction, DeletionLogEntry, FailedEntry, Journal, SkippedEntry};
use super::plan::{CleanupCandidate, CleanupPlan};
use super::prompt::Prompter;
use super::whitelist::is_whitelisted;
use super::ExecutionMode;
use crate::config::Config;
use crate::discovery::relative_slash_path;
use chrono::Utc;
use miette::Result;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, warn};

/// Result of one cleanup invocation
#[derive(Debug)]
pub enum CleanupRun {
    /// All candidates were processed and the log written
    Completed { log: CleanupLog, log_path: PathBuf },
    /// Auto mode was declined before anything happened
    Aborted,
}

enum Decision {
    Skip(&'static str),
    Absent,
    Proceed(PathBuf),
}

/// Performs or simulates deletions, one candidate at a time.
///
/// Every candidate is checked against the whitelist before any prompt or
/// filesystem access, in every mode. A deletion always copies the file into the
/// run's backup directory first.
pub struct SafeCleanup<'a> {
    project_root: PathBuf,
    report_dir: PathBuf,
    backup_dir: PathBuf,
    mode: ExecutionMode,
    prompter: &'a mut dyn Prompter,
}

impl<'a> SafeCleanup<'a> {
    pub fn new(config: &Config, project_root: &Path, mode: ExecutionMode, prompter: &'a mut dyn Prompter) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            report_dir: config.report_dir(project_root),
            backup_dir: project_root.join(&config.cleanup.backup_dir),
            mode,
            prompter,
        }
    }

    pub fn run(&mut self, plan: &CleanupPlan) -> Result<CleanupRun> {
        if self.mode == ExecutionMode::Auto {
            let question = format!(
                "Delete up to {} files? Backups are kept in {}",
                plan.candidates.len(),
                self.backup_dir.display()
            );
            if !self.prompter.confirm(&question)? {
                info!("Cleanup cancelled");
                return Ok(CleanupRun::Aborted);
            }
        }

        let run_id = Utc::now().timestamp_millis().to_string();
        let run_backup_dir = self.backup_dir.join(&run_id);
        let backup_location = self
            .mode
            .is_destructive()
            .then(|| relative_slash_path(&self.project_root, &run_backup_dir));

        let mut log = CleanupLog::new(&run_id, self.mode, backup_location);
        let mut journal = if self.mode.is_destructive() {
            Journal::create(&self.report_dir, &run_id)
                .map_err(|e| warn!("Could not create cleanup journal: {}", e))
                .ok()
        } else {
            None
        };

        info!("Cleanup ({}) of {} candidates", self.mode, plan.candidates.len());

        for candidate in &plan.candidates {
            let full_path = match self.decide(candidate) {
                Decision::Skip(reason) => {
                    let entry = SkippedEntry {
                        path: candidate.path.clone(),
                        reason: reason.to_string(),
                    };
                    append_or_disable(&mut journal, |j| j.skipped(&entry));
                    log.record_skip(entry);
                    continue;
                }
                Decision::Absent => {
                    debug!("Already absent: {}", candidate.path);
                    log.record_absent();
                    continue;
                }
                Decision::Proceed(full_path) => full_path,
            };

            if self.mode == ExecutionMode::DryRun {
                match fs::metadata(&full_path) {
                    Ok(metadata) => log.record_deletion(DeletionLogEntry {
                        path: candidate.path.clone(),
                        reason: candidate.reason.clone(),
                        action: DeletionAction::WouldDelete,
                        backup_path: None,
                        size_bytes: metadata.len(),
                        timestamp: Utc::now(),
                    }),
                    Err(e) => log.record_failure(FailedEntry {
                        path: candidate.path.clone(),
                        error: e.to_string(),
                    }),
                }
                continue;
            }

            if self.mode == ExecutionMode::Interactive {
                let question = format!("Delete {}: {}?", candidate.label, candidate.path);
                match self.prompter.confirm(&question) {
                    Ok(true) => {}
                    Ok(false) => {
                        let entry = SkippedEntry {
                            path: candidate.path.clone(),
                            reason: "user skipped".to_string(),
                        };
                        append_or_disable(&mut journal, |j| j.skipped(&entry));
                        log.record_skip(entry);
                        continue;
                    }
                    Err(e) => {
                        warn!("Prompt failed, stopping cleanup: {}", e);
                        log.interrupted = true;
                        break;
                    }
                }
            }

            match self.backup_and_remove(candidate, &full_path, &run_backup_dir) {
                Ok(entry) => {
                    append_or_disable(&mut journal, |j| j.deletion(&entry));
                    log.record_deletion(entry);
                }
                Err(error) => {
                    warn!("Could not delete {}: {}", candidate.path, error);
                    let entry = FailedEntry {
                        path: candidate.path.clone(),
                        error,
                    };
                    append_or_disable(&mut journal, |j| j.failed(&entry));
                    log.record_failure(entry);
                }
            }
        }

        for deferred in &plan.deferred {
            log.record_deferred(deferred.clone());
        }

        let log_path = log.write_unique(&self.report_dir)?;
        info!("Cleanup log written to {}", log_path.display());

        Ok(CleanupRun::Completed { log, log_path })
    }

    fn decide(&self, candidate: &CleanupCandidate) -> Decision {
        let relative = candidate.path.replace('\\', "/");
        let relative_path = Path::new(&relative);

        let escapes = relative_path.is_absolute()
            || relative_path
                .components()
                .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_) | Component::RootDir));
        if escapes {
            return Decision::Skip("outside project root");
        }

        if is_whitelisted(&relative) {
            return Decision::Skip("whitelisted");
        }

        let full_path = self.project_root.join(relative_path);
        match fs::symlink_metadata(&full_path) {
            Ok(metadata) if metadata.is_file() => Decision::Proceed(full_path),
            Ok(_) => Decision::Skip("not a regular file"),
            Err(_) => Decision::Absent,
        }
    }

    /// Copy into the run backup, then remove the original
    fn backup_and_remove(
        &self,
        candidate: &CleanupCandidate,
        full_path: &Path,
        run_backup_dir: &Path,
    ) -> Result<DeletionLogEntry, String> {
        let backup_path = run_backup_dir.join(candidate.path.replace('\\', "/"));

        if let Some(parent) = backup_path.parent() {
            fs::create_dir_all(parent).map_err(|e| format!("backup directory: {}", e))?;
        }
        let size = fs::copy(full_path, &backup_path).map_err(|e| format!("backup: {}", e))?;
        fs::remove_file(full_path).map_err(|e| format!("remove: {}", e))?;

        debug!("Deleted {} (backup {})", candidate.path, backup_path.display());

        Ok(DeletionLogEntry {
            path: candidate.path.clone(),
            reason: candidate.reason.clone(),
            action: DeletionAction::Deleted,
            backup_path: Some(relative_slash_path(&self.project_root, &backup_path)),
            size_bytes: size,
            timestamp: Utc::now(),
        })
    }
}

/// A journal that cannot be written is dropped; the cleanup log is still written at the end
fn append_or_disable(journal: &mut Option<Journal>, append: impl FnOnce(&mut Journal) -> Result<()>) {
    if let Some(open) = journal.as_mut() {
        if let Err(e) = append(open) {
            warn!("Cleanup journal {} failed, continuing without it: {}", open.path().display(), e);
            *journal = None;
        }
    }
}
