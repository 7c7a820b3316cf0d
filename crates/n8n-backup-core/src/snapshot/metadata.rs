use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{iso_timestamp, SourceKind, METADATA_FILE};
use crate::error::{BackupError, Result};

pub const METADATA_VERSION: &str = "1.0.0";
pub const METADATA_SOURCE: &str = "n8n-backup-script";

/// Contents of `backup-metadata.json`. Field order and names are part of the
/// on-disk format shared with existing backups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotMetadata {
    pub timestamp: String,
    pub version: String,
    pub source: String,
    pub directories: DirectoryFlags,
}

/// Which source directories existed when the snapshot was captured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryFlags {
    pub workflows: bool,
    pub credentials: bool,
    pub data: bool,
}

impl DirectoryFlags {
    pub fn get(&self, kind: SourceKind) -> bool {
        match kind {
            SourceKind::Workflows => self.workflows,
            SourceKind::Credentials => self.credentials,
            SourceKind::Data => self.data,
        }
    }

    pub fn set(&mut self, kind: SourceKind, present: bool) {
        match kind {
            SourceKind::Workflows => self.workflows = present,
            SourceKind::Credentials => self.credentials = present,
            SourceKind::Data => self.data = present,
        }
    }
}

impl SnapshotMetadata {
    pub fn new(time: DateTime<Utc>, directories: DirectoryFlags) -> Self {
        Self {
            timestamp: iso_timestamp(time),
            version: METADATA_VERSION.to_string(),
            source: METADATA_SOURCE.to_string(),
            directories,
        }
    }

    /// Pretty-printed with two-space indentation and no trailing newline.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn write_to(&self, snapshot_dir: &Path) -> Result<()> {
        let path = snapshot_dir.join(METADATA_FILE);
        std::fs::write(&path, self.to_json()?).map_err(BackupError::at(&path))
    }

    /// Read the descriptor from a directory snapshot. Returns `Ok(None)` when
    /// the file does not exist.
    pub fn read_from(snapshot_dir: &Path) -> Result<Option<Self>> {
        let path = snapshot_dir.join(METADATA_FILE);
        match std::fs::read_to_string(&path) {
            Ok(text) => Self::from_json(&text).map(Some),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(BackupError::IoAt { path, source: e }),
        }
    }
}
