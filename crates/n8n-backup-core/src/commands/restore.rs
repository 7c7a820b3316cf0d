use tracing::info;

use crate::archive;
use crate::config::BackupConfig;
use crate::error::Result;
use crate::platform::fs::{self, CopyStats};
use crate::snapshot::SourceKind;
use crate::store::{nested_store, resolve_entry, EntryKind};

#[derive(Debug, Clone)]
pub struct RestoreStats {
    /// Store entry the restore read from.
    pub snapshot_name: String,
    pub extracted_from_archive: bool,
    /// Live directories that were replaced.
    pub restored: Vec<SourceKind>,
    /// Directories absent from the snapshot; their live copies were left alone.
    pub skipped: Vec<SourceKind>,
    pub stats: CopyStats,
}

/// Overwrite the live directories from the snapshot `name`.
///
/// `name` may be a directory snapshot, a `.tar.gz` archive, a bare snapshot
/// name whose archive is in the store, or `latest`. Each directory is
/// replaced independently: a failure aborts the run and leaves directories
/// not yet processed in their previous state. A backup directory nested in
/// a live directory survives the replacement.
pub fn run(config: &BackupConfig, name: &str) -> Result<RestoreStats> {
    let store_root = &config.backup_path;
    let entry = resolve_entry(store_root, name)?;
    info!(snapshot = %entry.name, "restoring from backup");

    let working_dir = match entry.kind {
        EntryKind::Archive => {
            info!(archive = %entry.name, "extracting compressed backup");
            archive::extract_archive(store_root, &entry.name)?
        }
        EntryKind::Directory => entry.path.clone(),
    };

    let mut restored = Vec::new();
    let mut skipped = Vec::new();
    let mut stats = CopyStats::default();

    for (kind, live) in config.sources() {
        let captured = working_dir.join(kind.dir_name());
        if !captured.is_dir() {
            skipped.push(kind);
            continue;
        }
        let keep = nested_store(store_root, live)?;
        info!(source = %kind, live = %live.display(), "restoring {kind}");
        stats.merge(fs::replace_dir_keeping(&captured, live, keep.as_deref())?);
        restored.push(kind);
    }

    info!(snapshot = %entry.name, restored = restored.len(), "restore completed");
    Ok(RestoreStats {
        snapshot_name: entry.name,
        extracted_from_archive: entry.kind == EntryKind::Archive,
        restored,
        skipped,
        stats,
    })
}
