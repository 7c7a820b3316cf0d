use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone, Utc};
use tempfile::TempDir;

use crate::commands::capture::{self, CaptureOutcome};
use crate::config::BackupConfig;
use crate::platform::fs::set_file_mtime;

/// Base instant for captures with explicit times.
pub const BASE_SECS: i64 = 1_700_000_000;

/// Temp workspace with a store root and the three live directories.
pub struct Fixture {
    _tmp: TempDir,
    pub root: PathBuf,
    pub config: BackupConfig,
}

impl Fixture {
    /// Empty workspace: no live directories exist yet.
    pub fn empty(compress: bool) -> Self {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().to_path_buf();
        let config = BackupConfig {
            workflows_path: root.join("live/workflows"),
            credentials_path: root.join("live/credentials"),
            data_path: root.join("live/data"),
            backup_path: root.join("backups"),
            max_backups: 10,
            compress_backups: compress,
        };
        Self {
            _tmp: tmp,
            root,
            config,
        }
    }

    /// Workspace with sample content in all three live directories.
    pub fn populated(compress: bool) -> Self {
        let fx = Self::empty(compress);
        write_file(
            &fx.config.workflows_path.join("invoice-flow.json"),
            br#"{"name":"invoice","nodes":[{"type":"webhook"}]}"#,
        );
        write_file(
            &fx.config.workflows_path.join("nested/sub-flow.json"),
            br#"{"name":"sub"}"#,
        );
        write_file(
            &fx.config.credentials_path.join("slack.json"),
            br#"{"token":"xoxb-redacted"}"#,
        );
        write_file(&fx.config.data_path.join("database.sqlite"), &[0u8, 1, 2, 255, 254]);
        std::fs::create_dir_all(fx.config.data_path.join("empty-dir")).unwrap();
        fx
    }

    pub fn store(&self) -> &Path {
        &self.config.backup_path
    }

    /// Capture at `BASE_SECS + offset` and stamp the stored entry with the
    /// same modification time.
    pub fn capture_at(&self, offset: i64) -> CaptureOutcome {
        capture_at(&self.config, offset)
    }
}

pub fn instant(offset: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(BASE_SECS + offset, 0).unwrap()
}

pub fn capture_at(config: &BackupConfig, offset: i64) -> CaptureOutcome {
    let outcome = capture::run_at(config, instant(offset)).unwrap();
    set_mtime(&outcome.path, offset);
    outcome
}

pub fn set_mtime(path: &Path, offset: i64) {
    set_file_mtime(path, BASE_SECS + offset, 0).unwrap();
}

pub fn write_file(path: &Path, contents: &[u8]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, contents).unwrap();
}

/// Map of relative path -> file bytes (directories map to `None`).
pub fn tree(dir: &Path) -> BTreeMap<PathBuf, Option<Vec<u8>>> {
    let mut out = BTreeMap::new();
    for entry in walkdir::WalkDir::new(dir).min_depth(1) {
        let entry = entry.unwrap();
        let rel = entry.path().strip_prefix(dir).unwrap().to_path_buf();
        let contents = if entry.file_type().is_file() {
            Some(std::fs::read(entry.path()).unwrap())
        } else {
            None
        };
        out.insert(rel, contents);
    }
    out
}

/// Sorted file names directly under the store root.
pub fn store_names(store: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(store)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Create a unix socket file at `path`. Copying it fails for every user,
/// root included.
#[cfg(unix)]
pub fn make_socket(path: &Path) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::os::unix::net::UnixListener::bind(path).unwrap();
}
