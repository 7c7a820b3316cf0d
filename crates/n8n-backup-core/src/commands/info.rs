use std::path::Path;

use crate::archive::read_archive_metadata;
use crate::error::{BackupError, Result};
use crate::snapshot::SnapshotMetadata;
use crate::store::{resolve_entry, EntryKind};

use super::list::ListEntry;

#[derive(Debug, Clone)]
pub struct SnapshotInfo {
    pub entry: ListEntry,
    pub metadata: SnapshotMetadata,
}

/// Read the metadata descriptor of one snapshot. Archives are read in place.
pub fn run(store_root: &Path, name: &str) -> Result<SnapshotInfo> {
    let entry = resolve_entry(store_root, name)?;

    let metadata = match entry.kind {
        EntryKind::Directory => SnapshotMetadata::read_from(&entry.path)?,
        EntryKind::Archive => read_archive_metadata(&entry.path)?,
    }
    .ok_or_else(|| BackupError::MissingMetadata(entry.name.clone()))?;

    Ok(SnapshotInfo {
        entry: ListEntry::from_store_entry(&entry)?,
        metadata,
    })
}
