use std::path::PathBuf;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::archive;
use crate::config::BackupConfig;
use crate::error::{BackupError, Result};
use crate::platform::fs::{self, CopyStats};
use crate::snapshot::{snapshot_name, DirectoryFlags, SnapshotMetadata, SourceKind};
use crate::store::nested_store;

/// Result of a successful capture.
#[derive(Debug, Clone)]
pub struct CaptureOutcome {
    pub snapshot_name: String,
    /// The stored entry: `<store>/<name>.tar.gz` or `<store>/<name>/`.
    pub path: PathBuf,
    pub compressed: bool,
    pub directories: DirectoryFlags,
    /// Source directories that did not exist and were left out.
    pub missing_sources: Vec<SourceKind>,
    pub stats: CopyStats,
}

/// Capture the three source directories into a new snapshot.
pub fn run(config: &BackupConfig) -> Result<CaptureOutcome> {
    run_at(config, Utc::now())
}

/// Capture using `now` for the snapshot name and metadata timestamp.
///
/// A failure leaves whatever was already written in the store; it is not
/// rolled back.
pub fn run_at(config: &BackupConfig, now: DateTime<Utc>) -> Result<CaptureOutcome> {
    let store_root = &config.backup_path;
    if !store_root.exists() {
        std::fs::create_dir_all(store_root).map_err(BackupError::at(store_root))?;
        info!(path = %store_root.display(), "created backup directory");
    }

    let mut directories = DirectoryFlags::default();
    let mut missing_sources = Vec::new();
    let mut present = Vec::new();
    for (kind, path) in config.sources() {
        if path.is_dir() {
            let skip = nested_store(store_root, path)?;
            if let Some(rel) = &skip {
                warn!(source = %kind, store = %rel.display(), "backup directory is inside {kind}, leaving it out");
            }
            directories.set(kind, true);
            present.push((kind, path, skip));
        } else {
            warn!(source = %kind, path = %path.display(), "source directory not found, skipping");
            missing_sources.push(kind);
        }
    }

    let name = snapshot_name(now);
    let snapshot_dir = store_root.join(&name);
    info!(snapshot = %name, "creating backup");

    // Same-millisecond captures share a name; the newer one replaces the older.
    if snapshot_dir.exists() {
        fs::remove_entry(&snapshot_dir)?;
    }
    std::fs::create_dir_all(&snapshot_dir).map_err(BackupError::at(&snapshot_dir))?;

    let mut stats = CopyStats::default();
    for (kind, path, skip) in present {
        info!(source = %kind, "backing up {kind}");
        let copied =
            fs::copy_dir_excluding(path, &snapshot_dir.join(kind.dir_name()), skip.as_deref())?;
        stats.merge(copied);
    }

    SnapshotMetadata::new(now, directories).write_to(&snapshot_dir)?;

    let path = if config.compress_backups {
        info!(snapshot = %name, "compressing backup");
        let archive_path = archive::create_archive(store_root, &name)?;
        fs::remove_entry(&snapshot_dir)?;
        archive_path
    } else {
        snapshot_dir
    };

    info!(snapshot = %name, path = %path.display(), "backup created");
    Ok(CaptureOutcome {
        snapshot_name: name,
        path,
        compressed: config.compress_backups,
        directories,
        missing_sources,
        stats,
    })
}
