use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// Errors reading or writing a JSON report artifact
#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("Report not found: {}", .0.display())]
    Missing(PathBuf),
    #[error("Failed to read report {}: {source}", .path.display())]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse report {}: {source}", .path.display())]
    ParseError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to write report {}: {source}", .path.display())]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Load a JSON artifact
pub fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    if !path.exists() {
        return Err(ArtifactError::Missing(path.to_path_buf()));
    }

    let file = fs::File::open(path).map_err(|source| ArtifactError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|source| ArtifactError::ParseError {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a JSON artifact that may legitimately be absent.
///
/// Absence is silent; an unreadable or malformed file is a warning.
pub fn read_optional_artifact<T: DeserializeOwned>(path: &Path) -> Option<T> {
    match read_artifact(path) {
        Ok(value) => Some(value),
        Err(ArtifactError::Missing(_)) => None,
        Err(e) => {
            warn!("{}", e);
            None
        }
    }
}

/// Write a JSON artifact, pretty printed, creating the parent directory
pub fn write_artifact<T: Serialize>(path: &Path, value: &T) -> Result<(), ArtifactError> {
    let write_error = |source: std::io::Error| ArtifactError::WriteError {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_error)?;
    }

    let file = fs::File::create(path).map_err(write_error)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value).map_err(|e| write_error(e.into()))?;
    writer.flush().map_err(write_error)?;
    Ok(())
}
