use std::fs::File;
use std::io::{BufReader, BufWriter, Read};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use tracing::{debug, warn};

use crate::error::{BackupError, Result};
use crate::snapshot::{archive_file_name, base_name, SnapshotMetadata, METADATA_FILE};

/// Pack `<store_root>/<snapshot_name>/` into `<store_root>/<snapshot_name>.tar.gz`.
///
/// Entries are rooted at `<snapshot_name>/` so any tar tool extracts the
/// same directory name. A partially written archive is removed on failure.
pub fn create_archive(store_root: &Path, snapshot_name: &str) -> Result<PathBuf> {
    let snapshot_dir = store_root.join(snapshot_name);
    let archive_path = store_root.join(archive_file_name(snapshot_name));

    match write_archive(&snapshot_dir, snapshot_name, &archive_path) {
        Ok(()) => {
            debug!(archive = %archive_path.display(), "archive written");
            Ok(archive_path)
        }
        Err(e) => {
            if archive_path.exists() {
                if let Err(cleanup) = std::fs::remove_file(&archive_path) {
                    warn!(
                        archive = %archive_path.display(),
                        error = %cleanup,
                        "failed to remove partial archive"
                    );
                }
            }
            Err(e)
        }
    }
}

fn write_archive(snapshot_dir: &Path, snapshot_name: &str, archive_path: &Path) -> Result<()> {
    let file = File::create(archive_path).map_err(BackupError::archive(archive_path))?;
    let encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
    let mut builder = tar::Builder::new(encoder);
    builder.follow_symlinks(false);

    builder
        .append_dir_all(snapshot_name, snapshot_dir)
        .map_err(BackupError::archive(archive_path))?;

    let encoder = builder
        .into_inner()
        .map_err(BackupError::archive(archive_path))?;
    let writer = encoder.finish().map_err(BackupError::archive(archive_path))?;
    let file = writer
        .into_inner()
        .map_err(|e| BackupError::archive(archive_path)(e.into_error()))?;
    file.sync_all().map_err(BackupError::archive(archive_path))?;
    Ok(())
}

/// Extract `<store_root>/<name>.tar.gz` next to itself and return the
/// resulting `<store_root>/<name>/` directory.
///
/// An existing directory of that name is replaced by the fresh extraction.
pub fn extract_archive(store_root: &Path, archive_name: &str) -> Result<PathBuf> {
    let archive_path = store_root.join(archive_name);
    let extracted = store_root.join(base_name(archive_name));

    if extracted.exists() {
        debug!(dir = %extracted.display(), "replacing previously extracted directory");
        crate::platform::fs::remove_entry(&extracted)?;
    }

    let file = File::open(&archive_path).map_err(BackupError::archive(&archive_path))?;
    let mut archive = tar::Archive::new(GzDecoder::new(BufReader::new(file)));
    archive.set_preserve_permissions(true);
    archive.set_preserve_mtime(true);
    archive
        .unpack(store_root)
        .map_err(BackupError::archive(&archive_path))?;

    if !extracted.is_dir() {
        return Err(BackupError::Archive {
            path: archive_path,
            source: std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!(
                    "archive does not contain a '{}/' directory",
                    base_name(archive_name)
                ),
            ),
        });
    }
    Ok(extracted)
}

/// Read `backup-metadata.json` straight out of an archive without
/// extracting it. Returns `Ok(None)` when the archive has no descriptor.
pub fn read_archive_metadata(archive_path: &Path) -> Result<Option<SnapshotMetadata>> {
    let file = File::open(archive_path).map_err(BackupError::archive(archive_path))?;
    let mut archive = tar::Archive::new(GzDecoder::new(BufReader::new(file)));

    let entries = archive
        .entries()
        .map_err(BackupError::archive(archive_path))?;
    for entry in entries {
        let mut entry = entry.map_err(BackupError::archive(archive_path))?;
        let path = entry
            .path()
            .map_err(BackupError::archive(archive_path))?
            .into_owned();

        // `<snapshot>/backup-metadata.json`, one level below the root.
        let is_descriptor = path.file_name().is_some_and(|n| n == METADATA_FILE)
            && path.components().count() == 2;
        if !is_descriptor {
            continue;
        }

        let mut text = String::new();
        entry
            .read_to_string(&mut text)
            .map_err(BackupError::archive(archive_path))?;
        return SnapshotMetadata::from_json(&text).map(Some);
    }
    Ok(None)
}
