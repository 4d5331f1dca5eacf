//! Snapshot file loader.
//!
//! A snapshot carries everything one computation needs, read from a single
//! JSON or YAML file chosen by extension.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tokio::fs;

use crate::domain::fees::{AttendanceRecord, ComputeOptions, CreditorBand, FeeStructure};
use crate::domain::foundation::{DomainError, ErrorCode};

/// A consistent (structure, attendance) pair plus computation inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSnapshot {
    pub structure: FeeStructure,
    pub attendance: AttendanceRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub band: Option<CreditorBand>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<ComputeOptions>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    Yaml,
}

impl SnapshotFormat {
    /// Picks the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self, SnapshotError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match extension.as_deref() {
            Some("json") => Ok(SnapshotFormat::Json),
            Some("yaml") | Some("yml") => Ok(SnapshotFormat::Yaml),
            _ => Err(SnapshotError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Unsupported snapshot file '{0}': expected .json, .yaml or .yml")]
    UnsupportedFormat(String),

    #[error("Failed to read snapshot {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid YAML snapshot: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Snapshot attendance is for {attendance} but the structure is for {structure}")]
    KeyMismatch { structure: String, attendance: String },
}

impl From<SnapshotError> for DomainError {
    fn from(err: SnapshotError) -> Self {
        let code = match err {
            SnapshotError::Io { .. } => ErrorCode::StorageError,
            _ => ErrorCode::InvalidFormat,
        };
        DomainError::new(code, err.to_string())
    }
}

impl FeeSnapshot {
    /// Parses snapshot text in the given format.
    pub fn parse(text: &str, format: SnapshotFormat) -> Result<Self, SnapshotError> {
        let snapshot: FeeSnapshot = match format {
            SnapshotFormat::Json => serde_json::from_str(text)?,
            SnapshotFormat::Yaml => serde_yaml::from_str(text)?,
        };
        snapshot.check_keys()?;
        Ok(snapshot)
    }

    /// Reads and parses a snapshot file.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        let format = SnapshotFormat::from_path(path)?;
        let text = fs::read_to_string(path).await.map_err(|source| SnapshotError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&text, format)
    }

    fn check_keys(&self) -> Result<(), SnapshotError> {
        let structure = self.structure.key();
        let attendance = self.attendance.key();
        if structure != attendance {
            return Err(SnapshotError::KeyMismatch {
                structure: structure.to_string(),
                attendance: attendance.to_string(),
            });
        }
        Ok(())
    }
}
