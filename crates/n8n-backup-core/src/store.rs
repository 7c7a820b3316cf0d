//! Enumeration of the snapshots held under a store root.
//!
//! A store entry is any immediate child that is a directory, or a regular
//! file whose name ends in `.tar.gz`. Everything else is ignored. Entries
//! are ordered newest first by modification time; equal times fall back to
//! name, descending, so the order is stable.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Utc};

use crate::error::{BackupError, Result};
use crate::platform::fs::nested_path;
use crate::snapshot::{archive_file_name, base_name, ARCHIVE_SUFFIX};

/// Name accepted by [`resolve_entry`] for the newest entry in the store.
pub const LATEST: &str = "latest";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    Archive,
}

impl EntryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntryKind::Directory => "directory",
            EntryKind::Archive => "archive",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreEntry {
    /// File name as it appears in the store root (archives keep `.tar.gz`).
    pub name: String,
    pub path: PathBuf,
    pub kind: EntryKind,
    pub modified: SystemTime,
    /// Size reported by the filesystem for the entry itself.
    pub len: u64,
}

impl StoreEntry {
    /// Snapshot name without the archive suffix.
    pub fn snapshot_name(&self) -> &str {
        base_name(&self.name)
    }

    pub fn modified_at(&self) -> DateTime<Utc> {
        DateTime::<Utc>::from(self.modified)
    }
}

fn newest_first(a: &StoreEntry, b: &StoreEntry) -> Ordering {
    b.modified
        .cmp(&a.modified)
        .then_with(|| b.name.cmp(&a.name))
}

/// List every store entry, newest first. A missing store root is empty.
pub fn scan_store(store_root: &Path) -> Result<Vec<StoreEntry>> {
    let read_dir = match std::fs::read_dir(store_root) {
        Ok(rd) => rd,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(BackupError::IoAt {
            path: store_root.to_path_buf(),
            source: e,
        }),
    };

    let mut entries = Vec::new();
    for dirent in read_dir {
        let dirent = dirent.map_err(BackupError::at(store_root))?;
        let path = dirent.path();
        let name = dirent.file_name().to_string_lossy().into_owned();

        // Follows symlinks, so a linked snapshot directory still counts.
        let meta = match std::fs::metadata(&path) {
            Ok(meta) => meta,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
            Err(e) => return Err(BackupError::IoAt { path, source: e }),
        };

        let kind = if meta.is_dir() {
            EntryKind::Directory
        } else if meta.is_file() && name.ends_with(ARCHIVE_SUFFIX) {
            EntryKind::Archive
        } else {
            continue;
        };

        let modified = meta.modified().map_err(BackupError::at(&path))?;
        entries.push(StoreEntry {
            name,
            path,
            kind,
            modified,
            len: meta.len(),
        });
    }

    entries.sort_by(newest_first);
    Ok(entries)
}

/// Reject names that could address anything but a direct child of the store.
fn validate_name(name: &str) -> Result<()> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\\');
    if invalid {
        return Err(BackupError::SnapshotNotFound(name.to_string()));
    }
    Ok(())
}

/// Find a store entry by exact name, falling back to `<name>.tar.gz`.
pub fn find_entry(store_root: &Path, name: &str) -> Result<StoreEntry> {
    validate_name(name)?;

    let candidates = [name.to_string(), archive_file_name(name)];
    let entries = scan_store(store_root)?;
    candidates
        .iter()
        .find_map(|candidate| entries.iter().find(|e| &e.name == candidate))
        .cloned()
        .ok_or_else(|| BackupError::SnapshotNotFound(name.to_string()))
}

/// Relative location of the store root when it lies inside `source`.
///
/// A source at or below the store root is rejected: prune and restore would
/// treat it as store content.
pub fn nested_store(store_root: &Path, source: &Path) -> Result<Option<PathBuf>> {
    if nested_path(source, store_root).is_some() {
        return Err(BackupError::Config(format!(
            "source directory '{}' lies inside the backup directory '{}'",
            source.display(),
            store_root.display()
        )));
    }
    Ok(nested_path(store_root, source))
}

/// Like [`find_entry`], but also accepts [`LATEST`] for the newest entry.
pub fn resolve_entry(store_root: &Path, name: &str) -> Result<StoreEntry> {
    if name == LATEST {
        return scan_store(store_root)?
            .into_iter()
            .next()
            .ok_or_else(|| BackupError::SnapshotNotFound(name.to_string()));
    }
    find_entry(store_root, name)
}
