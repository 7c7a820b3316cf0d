use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::platform::fs;
use crate::prune::{apply_retention, PruneEntry};
use crate::store::scan_store;

#[derive(Debug, Clone)]
pub struct PruneStats {
    pub kept: usize,
    /// Names of removed entries, oldest first.
    pub removed: Vec<String>,
}

impl PruneStats {
    pub fn removed_count(&self) -> usize {
        self.removed.len()
    }
}

/// Compute keep/prune decisions for every entry without deleting anything.
pub fn plan(store_root: &Path, max_backups: usize) -> Result<Vec<PruneEntry>> {
    let entries = scan_store(store_root)?;
    Ok(apply_retention(entries, max_backups))
}

/// Remove every entry beyond the `max_backups` newest.
///
/// With `dry_run` the decisions are computed and reported but nothing is
/// deleted. Running again without new captures removes nothing.
pub fn run(store_root: &Path, max_backups: usize, dry_run: bool) -> Result<PruneStats> {
    let decisions = plan(store_root, max_backups)?;

    let kept = decisions.iter().filter(|d| d.is_kept()).count();
    let mut to_prune: Vec<&PruneEntry> = decisions.iter().filter(|d| !d.is_kept()).collect();

    // Oldest first.
    to_prune.reverse();
    let removed: Vec<String> = to_prune.iter().map(|d| d.entry.name.clone()).collect();

    if dry_run || to_prune.is_empty() {
        return Ok(PruneStats { kept, removed });
    }

    info!(count = to_prune.len(), max_backups, "removing old backups");
    for decision in &to_prune {
        info!(backup = %decision.entry.name, "removing old backup");
        fs::remove_entry(&decision.entry.path)?;
    }
    info!(count = removed.len(), "removed old backups");

    Ok(PruneStats { kept, removed })
}
