use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use filetime::FileTime;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{BackupError, Result};

/// Suffix of the sibling directory a restore copies into before swapping.
pub const STAGING_SUFFIX: &str = ".restore-tmp";

/// Counters collected while copying a directory tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyStats {
    pub files: u64,
    pub dirs: u64,
    pub symlinks: u64,
    pub total_bytes: u64,
}

impl CopyStats {
    pub fn merge(&mut self, other: CopyStats) {
        self.files += other.files;
        self.dirs += other.dirs;
        self.symlinks += other.symlinks;
        self.total_bytes += other.total_bytes;
    }
}

/// Recursively copy `src` to `dst`, creating `dst` if needed.
///
/// File contents, permission bits and modification times are preserved.
/// Symlinks are recreated, not followed.
pub fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<CopyStats> {
    copy_dir_excluding(src, dst, None)
}

/// Like [`copy_dir_recursive`], but leaves out the subtree at `skip`
/// (relative to `src`).
pub fn copy_dir_excluding(src: &Path, dst: &Path, skip: Option<&Path>) -> Result<CopyStats> {
    let skipped = skip.map(|rel| src.join(rel));
    let mut stats = CopyStats::default();

    let walker = WalkDir::new(src)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| skipped.as_deref() != Some(e.path()));

    for entry in walker {
        let entry = entry?;
        let rel = entry.path().strip_prefix(src).map_err(|_| BackupError::IoAt {
            path: entry.path().to_path_buf(),
            source: std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "entry is outside the copy root",
            ),
        })?;
        let target = dst.join(rel);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            std::fs::create_dir_all(&target).map_err(BackupError::at(&target))?;
            stats.dirs += 1;
        } else if file_type.is_symlink() {
            let link = std::fs::read_link(entry.path()).map_err(BackupError::at(entry.path()))?;
            recreate_symlink(&link, &target, entry.path().is_dir())
                .map_err(BackupError::at(&target))?;
            stats.symlinks += 1;
        } else {
            let bytes = std::fs::copy(entry.path(), &target).map_err(BackupError::at(entry.path()))?;
            let modified = entry
                .metadata()?
                .modified()
                .map_err(BackupError::at(entry.path()))?;
            filetime::set_file_mtime(&target, FileTime::from_system_time(modified))
                .map_err(BackupError::at(&target))?;
            stats.files += 1;
            stats.total_bytes += bytes;
        }
    }

    debug!(
        src = %src.display(),
        dst = %dst.display(),
        files = stats.files,
        bytes = stats.total_bytes,
        "copied directory tree"
    );
    Ok(stats)
}

/// Replace the directory at `live` with a copy of `src`.
///
/// The copy lands in a `<live>.restore-tmp` sibling first; the live
/// directory is only removed once that copy is complete, then the staging
/// directory is renamed into place. A failed copy leaves `live` untouched.
pub fn replace_dir(src: &Path, live: &Path) -> Result<CopyStats> {
    replace_dir_keeping(src, live, None)
}

/// Like [`replace_dir`], but the subtree at `keep` (relative to `live`) is
/// carried over from the old live directory instead of being deleted.
pub fn replace_dir_keeping(src: &Path, live: &Path, keep: Option<&Path>) -> Result<CopyStats> {
    let staging = staging_path(live)?;

    if let Some(parent) = live.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(BackupError::at(parent))?;
    }
    if staging.exists() {
        remove_entry(&staging)?;
    }

    let stats = match copy_dir_excluding(src, &staging, keep) {
        Ok(stats) => stats,
        Err(e) => {
            if let Err(cleanup) = remove_entry(&staging) {
                warn!(path = %staging.display(), error = %cleanup, "failed to remove staging directory");
            }
            return Err(e);
        }
    };

    if let Some(rel) = keep {
        let kept = live.join(rel);
        if std::fs::symlink_metadata(&kept).is_ok() {
            let moved = staging.join(rel);
            if let Some(parent) = moved.parent() {
                std::fs::create_dir_all(parent).map_err(BackupError::at(parent))?;
            }
            if std::fs::symlink_metadata(&moved).is_ok() {
                remove_entry(&moved)?;
            }
            debug!(path = %kept.display(), "carrying nested directory over");
            std::fs::rename(&kept, &moved).map_err(BackupError::at(&kept))?;
        }
    }

    if std::fs::symlink_metadata(live).is_ok() {
        remove_entry(live)?;
    }
    std::fs::rename(&staging, live).map_err(BackupError::at(live))?;
    Ok(stats)
}

fn staging_path(live: &Path) -> Result<PathBuf> {
    let name = live.file_name().ok_or_else(|| {
        BackupError::Config(format!(
            "cannot restore into '{}': path has no directory name",
            live.display()
        ))
    })?;
    let mut staged = name.to_os_string();
    staged.push(STAGING_SUFFIX);
    Ok(live.with_file_name(staged))
}

/// Path of `inner` relative to `outer` when `inner` lies at or below it.
///
/// Both paths are canonicalized; `None` if either does not exist.
pub fn nested_path(inner: &Path, outer: &Path) -> Option<PathBuf> {
    let inner = std::fs::canonicalize(inner).ok()?;
    let outer = std::fs::canonicalize(outer).ok()?;
    inner.strip_prefix(&outer).ok().map(Path::to_path_buf)
}

/// Remove a directory recursively, or a single file/symlink.
pub fn remove_entry(path: &Path) -> Result<()> {
    let meta = std::fs::symlink_metadata(path).map_err(BackupError::at(path))?;
    if meta.is_dir() {
        std::fs::remove_dir_all(path).map_err(BackupError::at(path))
    } else {
        std::fs::remove_file(path).map_err(BackupError::at(path))
    }
}

/// Sum of the sizes of all regular files below `path`.
pub fn dir_size(path: &Path) -> Result<u64> {
    let mut total = 0u64;
    for entry in WalkDir::new(path).follow_links(false) {
        let entry = entry?;
        if entry.file_type().is_file() {
            total += entry.metadata()?.len();
        }
    }
    Ok(total)
}

/// Split a `SystemTime` into seconds and nanoseconds relative to the Unix epoch.
pub fn unix_time_parts(time: SystemTime) -> (i64, u32) {
    match time.duration_since(UNIX_EPOCH) {
        Ok(d) => (d.as_secs() as i64, d.subsec_nanos()),
        Err(e) => {
            let d = e.duration();
            if d.subsec_nanos() == 0 {
                (-(d.as_secs() as i64), 0)
            } else {
                (-(d.as_secs() as i64) - 1, 1_000_000_000 - d.subsec_nanos())
            }
        }
    }
}

/// Create `target` as a symlink pointing at `link_target`. Windows needs to
/// know whether the link refers to a directory.
fn recreate_symlink(link_target: &Path, target: &Path, is_dir: bool) -> std::io::Result<()> {
    #[cfg(unix)]
    {
        let _ = is_dir;
        std::os::unix::fs::symlink(link_target, target)
    }

    #[cfg(windows)]
    {
        if is_dir {
            std::os::windows::fs::symlink_dir(link_target, target)
        } else {
            std::os::windows::fs::symlink_file(link_target, target)
        }
    }

    #[cfg(not(any(unix, windows)))]
    {
        let _ = (link_target, target, is_dir);
        Err(std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            "symlinks are not supported on this platform",
        ))
    }
}

/// Set the modification time of a file or directory, leaving atime alone.
pub fn set_file_mtime(path: &Path, secs: i64, nanos: u32) -> std::io::Result<()> {
    filetime::set_file_mtime(path, FileTime::from_unix_time(secs, nanos))
}
