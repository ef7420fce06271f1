//! Detectors that live outside this crate.
//!
//! Each one is a black box: optionally spawn its command, then read the JSON report
//! it leaves behind. Every field of the report shapes is defaulted so older or partial
//! reports still load.

use crate::config::ExternalDetectorConfig;
use crate::report::{read_artifact, read_optional_artifact, ArtifactError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use thiserror::Error;
use tracing::{debug, info, warn};

/// A file listed by an external report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEntry {
    pub path: String,
    pub size: u64,
}

/// `duplicates-report.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DuplicatesReport {
    pub summary: DuplicatesSummary,
    pub content_duplicates: Vec<ContentDuplicateGroup>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DuplicatesSummary {
    pub content_duplicates: usize,
    pub name_duplicates: usize,
    pub similar_names: usize,
    pub total_wasted_space: u64,
}

/// Files with identical content; `original` is kept
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentDuplicateGroup {
    pub hash: String,
    pub original: FileEntry,
    pub duplicates: Vec<FileEntry>,
    pub wasted_space: u64,
}

/// `moodboard-duplicates-report.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MoodboardReport {
    pub summary: MoodboardSummary,
    pub duplicates: Vec<MoodboardGroup>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MoodboardSummary {
    pub duplicates: usize,
    pub similar_names: usize,
}

/// Name variants of one moodboard; the first file is kept
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MoodboardGroup {
    pub normalized: String,
    pub variants: Vec<String>,
    pub files: Vec<FileEntry>,
}

/// `svg-duplicates-report.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SvgReport {
    pub summary: SvgSummary,
    pub exact_duplicates: Vec<SvgDuplicateGroup>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SvgSummary {
    pub exact_duplicates: usize,
    pub normalized_duplicates: usize,
    pub total_wasted_space: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SvgDuplicateGroup {
    pub filename: String,
    pub original: FileEntry,
    pub duplicates: Vec<FileEntry>,
}

/// Why an external detector produced no report
#[derive(Error, Debug)]
pub enum DetectorError {
    #[error("Detector command is empty")]
    EmptyCommand,
    #[error("Failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("`{command}` exited with {status}")]
    Failed { command: String, status: ExitStatus },
    #[error(transparent)]
    Artifact(#[from] ArtifactError),
}

/// One black-box detector
pub struct ExternalDetector<'a> {
    name: &'static str,
    config: &'a ExternalDetectorConfig,
    project_root: &'a Path,
}

impl<'a> ExternalDetector<'a> {
    pub fn new(name: &'static str, config: &'a ExternalDetectorConfig, project_root: &'a Path) -> Self {
        Self {
            name,
            config,
            project_root,
        }
    }

    pub fn report_path(&self) -> PathBuf {
        self.project_root.join(&self.config.report)
    }

    /// Spawn the command if any, then load the report
    pub fn run<T: DeserializeOwned>(&self) -> Result<T, DetectorError> {
        if let Some(command) = &self.config.command {
            self.spawn(command)?;
        }

        let path = self.report_path();
        debug!("Reading {} report from {}", self.name, path.display());
        Ok(read_artifact(&path)?)
    }

    /// Like [`run`](Self::run), but a failure is a warning and no report
    pub fn run_or_warn<T: DeserializeOwned>(&self) -> Option<T> {
        match self.run() {
            Ok(report) => Some(report),
            Err(e) => {
                warn!("{} detector failed, using an empty report: {}", self.name, e);
                None
            }
        }
    }

    /// Read a report left by an earlier run, without spawning anything
    pub fn load_or_none<T: DeserializeOwned>(&self) -> Option<T> {
        read_optional_artifact(&self.report_path())
    }

    fn spawn(&self, command: &[String]) -> Result<(), DetectorError> {
        let (program, args) = command.split_first().ok_or(DetectorError::EmptyCommand)?;
        let command_line = command.join(" ");

        info!("Running {} detector: {}", self.name, command_line);
        let status = Command::new(program)
            .args(args)
            .current_dir(self.project_root)
            .status()
            .map_err(|source| DetectorError::Spawn {
                command: command_line.clone(),
                source,
            })?;

        if !status.success() {
            return Err(DetectorError::Failed {
                command: command_line,
                status,
            });
        }
        Ok(())
    }
}
