use std::path::{Path, PathBuf};

use super::defaults::*;
use crate::snapshot::SourceKind;

/// Settings for one backup store and its three source directories.
///
/// Built once (from defaults or a config file) and passed by reference to
/// every operation; nothing mutates it afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupConfig {
    pub workflows_path: PathBuf,
    pub credentials_path: PathBuf,
    pub data_path: PathBuf,
    /// Store root holding every snapshot.
    pub backup_path: PathBuf,
    /// Number of newest snapshots kept by prune.
    pub max_backups: usize,
    /// Replace each snapshot directory with a `.tar.gz` archive.
    pub compress_backups: bool,
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            workflows_path: PathBuf::from(DEFAULT_WORKFLOWS_PATH),
            credentials_path: PathBuf::from(DEFAULT_CREDENTIALS_PATH),
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            backup_path: PathBuf::from(DEFAULT_BACKUP_PATH),
            max_backups: DEFAULT_MAX_BACKUPS,
            compress_backups: DEFAULT_COMPRESS_BACKUPS,
        }
    }
}

impl BackupConfig {
    /// Live directory for a source kind.
    pub fn source_path(&self, kind: SourceKind) -> &Path {
        match kind {
            SourceKind::Workflows => &self.workflows_path,
            SourceKind::Credentials => &self.credentials_path,
            SourceKind::Data => &self.data_path,
        }
    }

    /// All three live directories in capture order.
    pub fn sources(&self) -> impl Iterator<Item = (SourceKind, &Path)> {
        SourceKind::ALL
            .into_iter()
            .map(move |kind| (kind, self.source_path(kind)))
    }
}
