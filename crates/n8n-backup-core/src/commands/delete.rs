use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::platform::fs::remove_entry;
use crate::store::{find_entry, EntryKind};

#[derive(Debug, Clone)]
pub struct DeleteStats {
    pub name: String,
    pub kind: EntryKind,
}

/// Delete a single snapshot by name (exact, or its `.tar.gz` archive).
pub fn run(store_root: &Path, name: &str, dry_run: bool) -> Result<DeleteStats> {
    let entry = find_entry(store_root, name)?;

    if !dry_run {
        info!(backup = %entry.name, "deleting backup");
        remove_entry(&entry.path)?;
    }

    Ok(DeleteStats {
        name: entry.name,
        kind: entry.kind,
    })
}
