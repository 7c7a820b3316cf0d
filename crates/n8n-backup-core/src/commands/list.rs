use std::path::Path;

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::platform::fs::dir_size;
use crate::store::{scan_store, EntryKind, StoreEntry};

/// One row of the store listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub name: String,
    pub kind: EntryKind,
    /// Archive file size, or the recursive content size of a directory.
    pub size_bytes: u64,
    pub modified_at: DateTime<Utc>,
}

impl ListEntry {
    pub(crate) fn from_store_entry(entry: &StoreEntry) -> Result<Self> {
        let size_bytes = match entry.kind {
            EntryKind::Archive => entry.len,
            EntryKind::Directory => dir_size(&entry.path)?,
        };
        Ok(Self {
            name: entry.name.clone(),
            kind: entry.kind,
            size_bytes,
            modified_at: entry.modified_at(),
        })
    }
}

/// List the store newest first. Any read failure aborts the listing.
pub fn run(store_root: &Path) -> Result<Vec<ListEntry>> {
    scan_store(store_root)?
        .iter()
        .map(ListEntry::from_store_entry)
        .collect()
}
